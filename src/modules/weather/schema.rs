use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use validator::Validate;

pub const MISSING_COORDINATES: &str = "Please provide 'lat' and 'lon'.";

#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Coordinates as received; only presence is checked.
#[derive(Debug, Validate)]
pub struct Coordinates {
    #[validate(length(min = 1, message = "lat is required"))]
    pub lat: String,
    #[validate(length(min = 1, message = "lon is required"))]
    pub lon: String,
}

impl Coordinates {
    /// A JSON body carrying `lat` wins over the query string.
    pub fn resolve(query: ForecastQuery, body: &[u8]) -> Self {
        let json = serde_json::from_slice::<Value>(body).ok();

        if let Some(obj) = json
            .as_ref()
            .and_then(Value::as_object)
            .filter(|obj| obj.contains_key("lat"))
        {
            return Self {
                lat: coordinate(obj, "lat"),
                lon: coordinate(obj, "lon"),
            };
        }

        Self {
            lat: query.lat.unwrap_or_default(),
            lon: query.lon.unwrap_or_default(),
        }
    }
}

fn coordinate(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ForecastResult {
    pub name: String,
    pub temperature: Number,
    pub unit: String,
    pub forecast: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}
