use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};

use cabin_shared::{Cabin, FlightId, SeatId, Voucher};

use crate::dto::{parse_cabin, parse_timestamp};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateVoucherRequest {
    code: String,
    flight_id: FlightId,
    cabin: String,
    expires_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssignVoucherRequest {
    voucher_code: String,
}

#[derive(Debug, Serialize)]
struct AssignVoucherResponse {
    voucher_code: String,
    cabin: Cabin,
    seat_id: SeatId,
    seat_label: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/vouchers", post(create_voucher).get(list_vouchers))
        .route("/api/v1/vouchers/assigns", post(assign_voucher))
}

async fn create_voucher(
    State(state): State<AppState>,
    Json(req): Json<CreateVoucherRequest>,
) -> Result<ApiResponse<Voucher>, ApiError> {
    let cabin = parse_cabin(&req.cabin)?;
    let expires_at = req
        .expires_at
        .as_deref()
        .map(|v| parse_timestamp(v, "expires_at"))
        .transpose()?;

    let voucher = state
        .vouchers
        .create_voucher(&req.code, req.flight_id, cabin, expires_at)
        .await?;

    Ok(ApiResponse::created(voucher))
}

async fn list_vouchers(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Voucher>>, ApiError> {
    Ok(ApiResponse::ok(state.vouchers.list_vouchers().await?))
}

async fn assign_voucher(
    State(state): State<AppState>,
    Json(req): Json<AssignVoucherRequest>,
) -> Result<ApiResponse<AssignVoucherResponse>, ApiError> {
    if req.voucher_code.is_empty() {
        return Err(ApiError::InvalidInput(
            "voucher_code must not be empty".to_string(),
        ));
    }

    let assignment = state.engine.assign(&req.voucher_code).await?;

    Ok(ApiResponse::created(AssignVoucherResponse {
        voucher_code: assignment.voucher_code,
        cabin: assignment.cabin,
        seat_id: assignment.seat_id,
        seat_label: assignment.seat_label,
    }))
}
