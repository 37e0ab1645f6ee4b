use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::modules::interaction::{
    crud::InteractionCrud,
    model::Interaction,
    schema::{InteractionListResponse, InteractionQuery, InteractionResponse, MessageResponse},
};
use crate::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

fn to_response(i: &Interaction) -> InteractionResponse {
    InteractionResponse {
        id: i.id.map(|id| id.to_hex()).unwrap_or_default(),
        session_id: i.session_id.clone(),
        prompt: i.prompt.clone(),
        response: i.response.clone(),
        outcome: i.outcome,
        error: i.error.clone(),
        created_at: i.created_at.to_rfc3339(),
    }
}

pub async fn list_interactions(
    State(state): State<AppState>,
    Query(query): Query<InteractionQuery>,
) -> Result<Json<InteractionListResponse>, (StatusCode, Json<MessageResponse>)> {
    let db = state.db.as_ref().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(MessageResponse { message: "Interaction store is not configured".to_string() }),
        )
    })?;

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let crud = InteractionCrud::new(db);

    let (interactions, total) = match query.session_id.as_deref() {
        Some(session_id) => {
            let interactions = crud.find_by_session(session_id, limit).await;
            (interactions, crud.count_by_session(session_id).await)
        }
        None => (crud.find_recent(limit).await, crud.count().await),
    };

    let interactions = interactions.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse { message: e.to_string() }),
        )
    })?;
    let total = total.unwrap_or(0);

    Ok(Json(InteractionListResponse {
        data: interactions.iter().map(to_response).collect(),
        total,
    }))
}
