//! API route handlers
//!
//! All endpoints are read-only GETs. Per-segment failures are already
//! embedded in the engine's output as error placeholders; only store and
//! whole-snapshot failures surface here as error responses.

use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use seasonal_forecast::{CategoryTrend, ForecastError, ForecastOverview, UnitForecast};

/// Error response body: `{"error": "..."}` with a 4xx/5xx status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(message: impl ToString) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

impl From<ForecastError> for ApiError {
    fn from(e: ForecastError) -> Self {
        let status = match &e {
            // The whole snapshot was unusable: a client-visible data problem.
            ForecastError::InsufficientData(_) => StatusCode::BAD_REQUEST,
            ForecastError::MalformedRecord(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ForecastError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

/// `GET /forecast` - history, season/next-month summaries and monthly
/// breakdowns.
pub async fn forecast(State(state): State<AppState>) -> Result<Json<ForecastOverview>, ApiError> {
    let forecaster = state.forecaster.clone();
    let today = chrono::Local::now().date_naive();

    let overview = tokio::task::spawn_blocking(move || forecaster.overview(today))
        .await
        .map_err(ApiError::internal)??;

    Ok(Json(overview))
}

/// `GET /forecast/categories` - per-category quantity trends by season.
pub async fn category_trends(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryTrend>>, ApiError> {
    let forecaster = state.forecaster.clone();
    let today = chrono::Local::now().date_naive();

    let trends = tokio::task::spawn_blocking(move || forecaster.category_overview(today))
        .await
        .map_err(ApiError::internal)??;

    Ok(Json(trends))
}

/// `GET /forecast/units` - overall unit forecast.
pub async fn unit_forecast(State(state): State<AppState>) -> Result<Json<UnitForecast>, ApiError> {
    let forecaster = state.forecaster.clone();

    let units = tokio::task::spawn_blocking(move || forecaster.unit_overview())
        .await
        .map_err(ApiError::internal)??;

    Ok(Json(units))
}
