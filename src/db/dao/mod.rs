mod context;
pub mod error;
pub mod room_dao;

pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use room_dao::RoomDao;
