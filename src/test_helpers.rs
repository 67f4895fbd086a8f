//! Shared scaffolding for the integration tests: a router over a mock
//! database with the Spotify base URLs pointed wherever the test wants
//! (usually a local wiremock server).

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;

use crate::{
    config::{AppConfig, SpotifyConfig},
    routes::router,
    spotify::SpotifyClient,
    state::AppState,
};

pub fn test_spotify_config(base_url: &str) -> SpotifyConfig {
    SpotifyConfig {
        client_id: "test-client-id".to_string(),
        client_secret: "test-client-secret".to_string(),
        scope: "user-read-playback-state user-modify-playback-state".to_string(),
        show_dialog: true,
        accounts_url: base_url.to_string(),
        api_url: base_url.to_string(),
    }
}

pub fn test_state(db: DatabaseConnection, spotify_base: &str) -> Arc<AppState> {
    let spotify_cfg = test_spotify_config(spotify_base);
    let spotify = SpotifyClient::new(spotify_cfg.clone());
    let mut cfg = AppConfig::default();
    cfg.spotify = Some(spotify_cfg);
    AppState::new(cfg, db, spotify)
}

pub fn test_router(db: DatabaseConnection, spotify_base: &str) -> Router {
    router(test_state(db, spotify_base))
}
