use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::agent::AgentSettings;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Missing access token")]
    MissingAccessToken,
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentRequest<'a> {
    query_input: QueryInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryInput<'a> {
    text: TextInput<'a>,
    language_code: &'a str,
}

#[derive(Debug, Serialize)]
struct TextInput<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentResponse {
    response_id: Option<String>,
    query_result: Option<QueryResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    // Omitted from the JSON body when the agent produced nothing.
    #[serde(default)]
    response_messages: Vec<ResponseMessage>,
}

/// One entry of the agent's reply. Only text parts are read; payloads,
/// handoffs, audio and the rest deserialize with `text` unset.
#[derive(Debug, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub text: Option<TextPart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TextPart {
    #[serde(default)]
    pub text: Vec<String>,
}

impl ResponseMessage {
    pub fn text(segments: &[&str]) -> Self {
        Self {
            text: Some(TextPart {
                text: segments.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    /// First segment of a text-bearing message.
    pub fn first_text(&self) -> Option<&str> {
        self.text
            .as_ref()
            .and_then(|part| part.text.first())
            .map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

pub struct AgentReply {
    pub response_id: Option<String>,
    pub text: String,
}

/// Joins the first segment of every text-bearing message, in order, with a
/// single space.
pub fn join_text_parts(messages: &[ResponseMessage]) -> String {
    messages
        .iter()
        .filter_map(ResponseMessage::first_text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Session-scoped client for the hosted agent's detect-intent call.
#[derive(Clone)]
pub struct AgentClient {
    client: Client,
    settings: AgentSettings,
}

impl AgentClient {
    pub fn new(settings: AgentSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn from_env() -> Self {
        Self::new(AgentSettings::from_env())
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    pub async fn detect_intent(&self, session_id: &str, text: &str) -> Result<AgentReply, AgentError> {
        let access_token = self
            .settings
            .access_token
            .as_deref()
            .ok_or(AgentError::MissingAccessToken)?;

        let url = format!(
            "{}/v3beta1/{}:detectIntent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.session_path(session_id)
        );

        let request = DetectIntentRequest {
            query_input: QueryInput {
                text: TextInput { text },
                language_code: &self.settings.language_code,
            },
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(access_token)
            .header("x-goog-user-project", &self.settings.project_id)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(&error_text) {
                return Err(AgentError::ApiError(error_response.error.message));
            }
            return Err(AgentError::ApiError(format!("{}: {}", status, error_text)));
        }

        let body = response.text().await?;
        let detect: DetectIntentResponse = serde_json::from_str(&body)
            .map_err(|e| AgentError::InvalidResponse(e.to_string()))?;

        let query_result = detect
            .query_result
            .ok_or_else(|| AgentError::InvalidResponse("No queryResult in response".to_string()))?;

        Ok(AgentReply {
            response_id: detect.response_id,
            text: join_text_parts(&query_result.response_messages),
        })
    }
}
