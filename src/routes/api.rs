//! JSON endpoints backing the AJAX pieces of the room page: the catalog
//! search box and the now-playing widget.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    routes::RoomGuard,
    spotify::{NowPlaying, Track},
    state::AppState,
};

const MAX_SEARCH_RESULTS: u8 = 20;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{room_id}/search", get(search))
        .route("/{room_id}/now-playing", get(now_playing))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: String,
    #[serde(default = "default_limit")]
    limit: u8,
}

fn default_limit() -> u8 {
    10
}

async fn search(
    State(state): State<Arc<AppState>>,
    RoomGuard(room): RoomGuard,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<Track>> {
    let term = query.q.trim();
    if term.is_empty() {
        return Err(AppError::bad_request("search query must not be empty"));
    }

    let limit = query.limit.clamp(1, MAX_SEARCH_RESULTS);
    let tracks = state
        .spotify
        .search_tracks(&room.access_token, term, limit)
        .await?;
    JsonApiResponse::ok(tracks)
}

async fn now_playing(
    State(state): State<Arc<AppState>>,
    RoomGuard(room): RoomGuard,
) -> ApiResult<Option<NowPlaying>> {
    let playing = state.spotify.currently_playing(&room.access_token).await?;
    JsonApiResponse::ok(playing)
}
