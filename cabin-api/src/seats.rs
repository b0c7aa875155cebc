use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::Deserialize;

use cabin_shared::{FlightId, Seat};

use crate::dto::parse_cabin;
use crate::error::ApiError;
use crate::response::{ApiResponse, CreatedEntities};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateSeatsRequest {
    flight_id: FlightId,
    cabin: String,
    labels: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/seats", post(create_seats).get(list_seats))
}

async fn create_seats(
    State(state): State<AppState>,
    Json(req): Json<CreateSeatsRequest>,
) -> Result<ApiResponse<CreatedEntities>, ApiError> {
    let cabin = parse_cabin(&req.cabin)?;
    let seats = state
        .catalog
        .create_seats(req.flight_id, cabin, &req.labels)
        .await?;

    Ok(ApiResponse::created(CreatedEntities {
        created: seats.len(),
        ids: seats.into_iter().map(|s| s.id).collect(),
    }))
}

async fn list_seats(State(state): State<AppState>) -> Result<ApiResponse<Vec<Seat>>, ApiError> {
    Ok(ApiResponse::ok(state.catalog.list_seats().await?))
}
