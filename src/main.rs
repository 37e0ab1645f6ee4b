use std::{env, sync::Arc};

use anyhow::Context;
use snowchat::{
    config,
    modules::chat::policy::ChatPolicy,
    services::{agent::AgentClient, weather::WeatherClient},
    AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("snowchat=info,interactions=info,tower_http=info")),
        )
        .init();

    let agent = AgentClient::from_env();
    if agent.settings().access_token.is_none() {
        tracing::warn!("GOOGLE_ACCESS_TOKEN is not set; chat requests will fail until it is");
    }

    let weather = WeatherClient::from_env().context("failed to build weather client")?;

    let db = config::database::connect()
        .await
        .context("failed to connect to MongoDB")?;
    if db.is_none() {
        tracing::info!("MONGODB_URI not set; interaction records go to the log only");
    }

    let state = AppState {
        agent,
        weather,
        policy: Arc::new(ChatPolicy::default()),
        db,
    };

    let app = snowchat::router(state);

    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("snowchat listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("snowchat stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
