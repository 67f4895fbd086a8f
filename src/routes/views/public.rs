use std::sync::Arc;

use askama::Template;
use axum::{Router, http::StatusCode, response::Html, routing::get};
use axum_extra::extract::cookie::CookieJar;

use crate::{flash, flash::FlashMessage, state::AppState};

pub(crate) type HtmlError = (StatusCode, Html<String>);

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    messages: Vec<FlashMessage>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}

/// Landing page: join an existing room by code, or start one as the host.
async fn index(jar: CookieJar) -> Result<(CookieJar, Html<String>), HtmlError> {
    let (jar, messages) = flash::take(jar);
    let rendered = IndexTemplate { messages }
        .render()
        .map_err(|_| html_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to render index"))?;
    Ok((jar, Html(rendered)))
}

pub(crate) fn html_error(status: StatusCode, message: &'static str) -> HtmlError {
    (status, Html(message.to_string()))
}
