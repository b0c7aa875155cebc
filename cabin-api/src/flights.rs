use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::Deserialize;

use cabin_shared::Flight;

use crate::dto::parse_timestamp;
use crate::error::ApiError;
use crate::response::{ApiResponse, CreatedEntities};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateFlightsRequest {
    flight_numbers: Vec<String>,
    dep_date: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/flights", post(create_flights).get(list_flights))
}

async fn create_flights(
    State(state): State<AppState>,
    Json(req): Json<CreateFlightsRequest>,
) -> Result<ApiResponse<CreatedEntities>, ApiError> {
    let dep_date = parse_timestamp(&req.dep_date, "dep_date")?;
    let flights = state.catalog.create_flights(&req.flight_numbers, dep_date).await?;

    Ok(ApiResponse::created(CreatedEntities {
        created: flights.len(),
        ids: flights.into_iter().map(|f| f.id).collect(),
    }))
}

async fn list_flights(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Flight>>, ApiError> {
    Ok(ApiResponse::ok(state.catalog.list_flights().await?))
}
