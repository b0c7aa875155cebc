pub mod repository;

use cabin_shared::FlightId;

/// Failures surfaced by the storage layer. Everything except
/// `Unavailable` is a recoverable business outcome.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("flight not found: {0}")]
    FlightNotFound(FlightId),
    #[error("flight {flight_no} already exists for that departure date")]
    DuplicateFlight { flight_no: String },
    #[error("seat {label} already exists on flight {flight_id}")]
    DuplicateSeat { flight_id: FlightId, label: String },
    #[error("voucher code already exists: {0}")]
    DuplicateCode(String),
    #[error("concurrent state transition, commit aborted")]
    CommitConflict,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
