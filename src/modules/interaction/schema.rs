use serde::{Deserialize, Serialize};

use super::model::Outcome;

#[derive(Debug, Deserialize)]
pub struct InteractionQuery {
    pub limit: Option<i64>,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    pub id: String,
    pub session_id: String,
    pub prompt: String,
    pub response: String,
    pub outcome: Outcome,
    pub error: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct InteractionListResponse {
    pub data: Vec<InteractionResponse>,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
