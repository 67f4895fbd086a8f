use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod public;
pub mod room;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().merge(public::router()).merge(room::router())
}
