use std::sync::Arc;

use axum::Router;
use mongodb::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod modules;
pub mod services;

use modules::chat::policy::ChatPolicy;
use services::{agent::AgentClient, weather::WeatherClient};

/// Process-wide dependencies, built once in `main` and cloned into each
/// handler.
#[derive(Clone)]
pub struct AppState {
    pub agent: AgentClient,
    pub weather: WeatherClient,
    pub policy: Arc<ChatPolicy>,
    /// Interaction store; `None` keeps records in the log stream only.
    pub db: Option<Database>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(modules::chat::routes::routes())
        .merge(modules::weather::routes::routes())
        .merge(modules::interaction::routes::routes())
        .route("/health", axum::routing::get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
