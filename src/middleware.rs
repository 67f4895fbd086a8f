use std::any::Any;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;

pub fn catch_panic_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(panic_to_response)
}

fn panic_to_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic"
    };
    tracing::error!(panic = %details, "handler panicked");

    let body = if cfg!(debug_assertions) {
        format!("<h1>Internal server error</h1><pre>{details}</pre>")
    } else {
        "<h1>Internal server error</h1>".to_string()
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
}
