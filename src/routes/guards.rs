use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Path},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;

use crate::{
    db::entities::room,
    flash::{self, Level},
    services::ServiceContext,
    state::AppState,
};

#[derive(Deserialize)]
struct RoomPath {
    room_id: String,
}

/// Request guard for every `/{room_id}/...` route: the room has to exist
/// and not be expired, and an expired access token is refreshed before the
/// handler runs. On failure the user lands back on the index page with a
/// flash message, mirroring what guests expect from a dead party link.
pub struct RoomGuard(pub room::Model);

pub struct GuardRedirect {
    message: String,
}

impl GuardRedirect {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for GuardRedirect {
    fn into_response(self) -> Response {
        let jar = flash::push(CookieJar::default(), Level::Error, &self.message);
        (jar, Redirect::to("/")).into_response()
    }
}

impl FromRequestParts<Arc<AppState>> for RoomGuard {
    type Rejection = GuardRedirect;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Path(path) = Path::<RoomPath>::from_request_parts(parts, state)
            .await
            .map_err(|_| GuardRedirect::new("No room code was sent. (Error 400)"))?;

        let rooms = ServiceContext::from_state(state).room();

        let room = rooms.find_room(&path.room_id).await.map_err(|err| {
            tracing::error!(room_id = %path.room_id, error = %err, "room lookup failed");
            GuardRedirect::new("Something went wrong on the server. (Error 500)")
        })?;

        let Some(room) = room else {
            tracing::info!(room_id = %path.room_id, "room not found");
            return Err(GuardRedirect::new(
                "This room was not found on the server. (Error 404)",
            ));
        };

        if room.expires_at < Utc::now().fixed_offset() {
            tracing::info!(room_id = %room.id, "tried to use expired room");
            return Err(GuardRedirect::new("This room has expired. (Error 410)"));
        }

        let room = rooms
            .ensure_fresh(&state.spotify, room)
            .await
            .map_err(|err| GuardRedirect::new(format!("{}. (Error 502)", err.message())))?;

        Ok(Self(room))
    }
}
