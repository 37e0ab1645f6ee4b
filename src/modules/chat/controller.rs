use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use uuid::Uuid;

use crate::modules::chat::{
    pipeline,
    schema::{ChatRequest, ChatResponse},
};
use crate::AppState;

const HOME_PAGE: &str = include_str!("home.html");

/// Serves the chat page with a fresh session id for this page load.
pub async fn home() -> Html<String> {
    let session_id = Uuid::new_v4().to_string();
    Html(HOME_PAGE.replace("{{session_id}}", &session_id))
}

/// Always answers 200; failures are carried in the response text.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatResponse> {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "rejected chat payload");
            return Json(ChatResponse {
                response: state.policy.error_reply.clone(),
            });
        }
    };

    let session_id = match payload.session_id {
        Some(s) if !s.trim().is_empty() => s,
        _ => Uuid::new_v4().to_string(),
    };

    let response = pipeline::respond(&state, &session_id, &payload.message).await;

    Json(ChatResponse { response })
}
