use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Blocked,
    Answered,
    Fallback,
    Failed,
}

/// One chat exchange as it was answered.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Interaction {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub session_id: String,
    pub prompt: String,
    pub response: String,
    pub outcome: Outcome,
    pub error: Option<String>,
    // Stored as a BSON date so newest-first sorting is chronological.
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    pub fn new(
        session_id: String,
        prompt: String,
        response: String,
        outcome: Outcome,
        error: Option<String>,
    ) -> Self {
        Self {
            id: None,
            session_id,
            prompt,
            response,
            outcome,
            error,
            created_at: Utc::now(),
        }
    }
}
