use axum::{
    routing::{get, post},
    Router,
};

use crate::modules::chat::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(controller::home))
        .route("/chat", post(controller::chat))
}
