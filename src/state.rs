use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, spotify::SpotifyClient};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub spotify: SpotifyClient,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection, spotify: SpotifyClient) -> Arc<Self> {
        Arc::new(Self {
            config,
            db,
            spotify,
        })
    }

    /// External callback URL registered with Spotify.
    pub fn redirect_uri(&self) -> String {
        format!("{}/auth/callback", self.base_url())
    }

    pub fn room_url(&self, room_id: &str) -> String {
        format!("{}/{room_id}", self.base_url())
    }

    /// URL encoded into the QR code and shown on the join page.
    pub fn join_url(&self, room_id: &str) -> String {
        format!("{}/{room_id}/join", self.base_url())
    }

    fn base_url(&self) -> &str {
        self.config.general.public_url.trim_end_matches('/')
    }
}
