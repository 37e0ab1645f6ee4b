use std::env;

pub const NWS_API_BASE: &str = "https://api.weather.gov";
/// weather.gov rejects requests without an identifying User-Agent.
pub const DEFAULT_USER_AGENT: &str = "(my-weather-app.com, contact@my-weather-app.com)";

#[derive(Debug, Clone)]
pub struct WeatherSettings {
    pub base_url: String,
    pub user_agent: String,
}

impl WeatherSettings {
    pub fn from_env() -> Self {
        let base_url = env::var("NWS_BASE_URL").unwrap_or_else(|_| NWS_API_BASE.to_string());
        let user_agent =
            env::var("NWS_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent,
        }
    }
}
