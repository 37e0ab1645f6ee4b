use axum::{routing::get, Router};

use crate::modules::interaction::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/interactions", get(controller::list_interactions))
}
