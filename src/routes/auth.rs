//! The host side of the OAuth2 authorization-code dance: `/auth` sends the
//! host to Spotify, `/auth/callback` turns the returned code into a room.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Redirect,
    routing::get,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rand::{Rng, distributions::Alphanumeric};
use serde::Deserialize;

use crate::{
    flash::{self, Level},
    services::ServiceContext,
    state::AppState,
};

const STATE_COOKIE: &str = "qtify_oauth_state";
const STATE_LEN: usize = 32;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth", get(begin))
        .route("/auth/callback", get(callback))
}

/// Redirect the host to Spotify, remembering the CSRF state in a
/// short-lived cookie (the original kept it in the session).
async fn begin(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LEN)
        .map(char::from)
        .collect();

    let cookie = Cookie::build((STATE_COOKIE.to_string(), nonce.clone()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(time::Duration::minutes(10))
        .build();

    let url = state.spotify.authorize_url(&state.redirect_uri(), &nonce);
    (jar.add(cookie), Redirect::to(&url))
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    state: Option<String>,
    code: Option<String>,
    error: Option<String>,
}

/// Only Spotify's accounts service calls this. A valid code becomes a new
/// room; every failure path flashes an error and lands on the index page.
async fn callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> (CookieJar, Redirect) {
    let expected = jar.get(STATE_COOKIE).map(|cookie| cookie.value().to_owned());
    let jar = jar.remove(
        Cookie::build((STATE_COOKIE.to_string(), String::new()))
            .path("/".to_string())
            .build(),
    );

    if expected.is_none() || expected != query.state {
        tracing::info!("authorization failed due to state mismatch");
        return flash_home(jar, "Authorization failed. (Error 400)");
    }

    let Some(code) = query.code else {
        tracing::info!(
            error = query.error.as_deref().unwrap_or("unknown"),
            "authorization was denied"
        );
        return flash_home(jar, "Authorization failed. (Error 401)");
    };

    let grant = match state
        .spotify
        .exchange_code(&code, &state.redirect_uri())
        .await
    {
        Ok(grant) => grant,
        Err(err) => {
            tracing::info!(error = %err, "authorization failed while requesting access token");
            return flash_home(jar, "Authorization failed. (Error 403)");
        }
    };

    match ServiceContext::from_state(&state).room().create_room(&grant).await {
        Ok(room) => (jar, Redirect::to(&format!("/{}", room.id))),
        Err(err) => {
            tracing::error!(error = %err, "room creation failed after authorization");
            flash_home(jar, "Could not create the room. (Error 500)")
        }
    }
}

fn flash_home(jar: CookieJar, message: &str) -> (CookieJar, Redirect) {
    (flash::push(jar, Level::Error, message), Redirect::to("/"))
}
