use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::modules::weather::schema::{
    Coordinates, ErrorResponse, ForecastQuery, ForecastResult, MISSING_COORDINATES,
};
use crate::services::weather::WeatherError;
use crate::AppState;

fn to_error_response(e: WeatherError) -> (StatusCode, Json<ErrorResponse>) {
    let error = e.to_string();
    let details = match e {
        WeatherError::GridLookup { details } => Some(details),
        _ => None,
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error, details }),
    )
}

pub async fn forecast(
    State(state): State<AppState>,
    query: Result<Query<ForecastQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<ForecastResult>, (StatusCode, Json<ErrorResponse>)> {
    // An unreadable query string counts as absent; the body may still carry
    // the coordinates.
    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unreadable weather query string");
            ForecastQuery::default()
        }
    };
    let coords = Coordinates::resolve(query, &body);

    if coords.validate().is_err() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: MISSING_COORDINATES.to_string(),
                details: None,
            }),
        ));
    }

    let period = state
        .weather
        .current_period(&coords.lat, &coords.lon)
        .await
        .map_err(|e| {
            tracing::error!(lat = %coords.lat, lon = %coords.lon, error = %e, "forecast lookup failed");
            to_error_response(e)
        })?;

    tracing::info!(lat = %coords.lat, lon = %coords.lon, period = %period.name, "forecast served");

    Ok(Json(ForecastResult {
        name: period.name,
        temperature: period.temperature,
        unit: period.temperature_unit,
        forecast: period.detailed_forecast,
    }))
}
