use std::env;

pub const DEFAULT_PROJECT_ID: &str = "qwiklabs-gcp-03-5dc51bd29ec6";
pub const DEFAULT_LOCATION_ID: &str = "us-central1";
pub const DEFAULT_AGENT_ID: &str = "a9b0bb43-711c-45ba-bc3c-d0bc31a5fad7";
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Identifies the hosted agent and how to reach it.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub project_id: String,
    pub location_id: String,
    pub agent_id: String,
    pub language_code: String,
    pub endpoint: String,
    pub access_token: Option<String>,
}

impl AgentSettings {
    pub fn from_env() -> Self {
        let project_id =
            env::var("AGENT_PROJECT_ID").unwrap_or_else(|_| DEFAULT_PROJECT_ID.to_string());
        let location_id =
            env::var("AGENT_LOCATION_ID").unwrap_or_else(|_| DEFAULT_LOCATION_ID.to_string());
        let agent_id = env::var("AGENT_ID").unwrap_or_else(|_| DEFAULT_AGENT_ID.to_string());
        let language_code =
            env::var("AGENT_LANGUAGE_CODE").unwrap_or_else(|_| DEFAULT_LANGUAGE_CODE.to_string());
        let endpoint =
            env::var("AGENT_ENDPOINT").unwrap_or_else(|_| regional_endpoint(&location_id));
        let access_token = env::var("GOOGLE_ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        Self {
            project_id,
            location_id,
            agent_id,
            language_code,
            endpoint,
            access_token,
        }
    }

    /// Full resource name of a conversation with the agent.
    pub fn session_path(&self, session_id: &str) -> String {
        format!(
            "projects/{}/locations/{}/agents/{}/sessions/{}",
            self.project_id, self.location_id, self.agent_id, session_id
        )
    }
}

/// Agents outside `global` must be addressed through their regional host.
pub fn regional_endpoint(location_id: &str) -> String {
    if location_id == "global" {
        "https://dialogflow.googleapis.com".to_string()
    } else {
        format!("https://{}-dialogflow.googleapis.com", location_id)
    }
}
