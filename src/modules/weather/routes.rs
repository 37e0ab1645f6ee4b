use axum::{routing::get, Router};

use crate::modules::weather::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/weather", get(controller::forecast).post(controller::forecast))
}
