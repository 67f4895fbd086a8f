pub mod api;
pub mod auth;
mod entry;
pub mod guards;
pub mod views;

pub use entry::router;
pub use guards::{GuardRedirect, RoomGuard};
