pub mod client;
pub mod types;

pub use client::{SpotifyClient, SpotifyError};
pub use types::{NowPlaying, TokenGrant, Track};
