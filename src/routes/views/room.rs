use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::{
    error::AppError,
    flash::{self, FlashMessage, Level},
    routes::RoomGuard,
    services::ServiceContext,
    state::AppState,
};

use super::public::{HtmlError, html_error};

#[derive(Template)]
#[template(path = "room.html")]
struct RoomTemplate {
    room_id: String,
    join_url: String,
    expires_at: String,
    messages: Vec<FlashMessage>,
}

#[derive(Template)]
#[template(path = "join.html")]
struct JoinTemplate {
    room_id: String,
    room_url: String,
    qr_url: String,
}

#[derive(Debug, Deserialize)]
struct QueueForm {
    uri: String,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{room_id}", get(room_page).post(queue_track))
        .route("/{room_id}/join", get(join_page))
        .route("/qr-code/{room_id}", get(qr_code))
}

/// The party view: search box, queue button, now-playing widget.
async fn room_page(
    State(state): State<Arc<AppState>>,
    RoomGuard(room): RoomGuard,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), HtmlError> {
    let (jar, messages) = flash::take(jar);
    let rendered = RoomTemplate {
        join_url: state.join_url(&room.id),
        expires_at: room.expires_at.format("%a %H:%M").to_string(),
        room_id: room.id,
        messages,
    }
    .render()
    .map_err(|_| html_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to render room"))?;
    Ok((jar, Html(rendered)))
}

/// Push a track onto the host queue, then bounce back to the room with the
/// outcome flashed.
async fn queue_track(
    State(state): State<Arc<AppState>>,
    RoomGuard(room): RoomGuard,
    jar: CookieJar,
    Form(form): Form<QueueForm>,
) -> (CookieJar, Redirect) {
    let uri = form.uri.trim();

    let jar = if !uri.starts_with("spotify:track:") {
        flash::push(
            jar,
            Level::Error,
            "That does not look like a Spotify track. (Error 400)",
        )
    } else {
        match state.spotify.queue_track(&room.access_token, uri).await {
            Ok(()) => {
                tracing::info!(room_id = %room.id, "queued track");
                flash::push(jar, Level::Success, "Track added to the queue")
            }
            Err(err) => {
                tracing::warn!(room_id = %room.id, error = %err, "queueing track failed");
                flash::push(
                    jar,
                    Level::Error,
                    "Spotify rejected the track. Is the host playing music?",
                )
            }
        }
    };

    (jar, Redirect::to(&format!("/{}", room.id)))
}

/// Guest landing page: the link to share and the QR code that encodes it.
async fn join_page(
    State(state): State<Arc<AppState>>,
    RoomGuard(room): RoomGuard,
) -> Result<Html<String>, HtmlError> {
    let rendered = JoinTemplate {
        room_url: state.room_url(&room.id),
        qr_url: format!("/qr-code/{}", room.id),
        room_id: room.id,
    }
    .render()
    .map_err(|_| html_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to render join page"))?;
    Ok(Html(rendered))
}

/// The QR image itself; rendered to disk on first request.
async fn qr_code(
    State(state): State<Arc<AppState>>,
    RoomGuard(room): RoomGuard,
) -> Result<Response, AppError> {
    let svg = ServiceContext::from_state(&state)
        .room()
        .qr_code_svg(&room, &state.join_url(&room.id))
        .await?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}
