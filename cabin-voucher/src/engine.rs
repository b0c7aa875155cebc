use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::time::Instant;

use cabin_core::repository::{CatalogStore, VoucherStore};
use cabin_core::StoreError;
use cabin_shared::{Cabin, SeatId, VoucherStatus};

/// Default retry budget for commit conflicts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// The result of a successful redemption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatAssignment {
    pub voucher_code: String,
    pub cabin: Cabin,
    pub seat_id: SeatId,
    pub seat_label: String,
    pub redeemed_at: DateTime<Utc>,
}

/// The voucher-to-seat assignment engine.
///
/// Owns the only write path for seat and voucher state. Each attempt
/// reads a snapshot, picks the lowest-labeled free seat, and asks the
/// store to commit both transitions as one atomic unit; a commit
/// conflict means some concurrent attempt won the race, so the whole
/// operation restarts from the voucher lookup. Retries are bounded so
/// a pathological hot seat cannot starve the caller.
pub struct AssignmentEngine {
    catalog: Arc<dyn CatalogStore>,
    vouchers: Arc<dyn VoucherStore>,
    max_attempts: u32,
}

impl AssignmentEngine {
    pub fn new(catalog: Arc<dyn CatalogStore>, vouchers: Arc<dyn VoucherStore>) -> Self {
        Self::with_max_attempts(catalog, vouchers, DEFAULT_MAX_ATTEMPTS)
    }

    pub fn with_max_attempts(
        catalog: Arc<dyn CatalogStore>,
        vouchers: Arc<dyn VoucherStore>,
        max_attempts: u32,
    ) -> Self {
        Self {
            catalog,
            vouchers,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Redeem a voucher for exactly one seat of its flight/cabin.
    pub async fn assign(&self, code: &str) -> Result<SeatAssignment, AssignError> {
        self.assign_with_deadline(code, None).await
    }

    /// As `assign`, but aborts before each lookup once the deadline has
    /// passed. A deadline expiring after the commit does not roll it
    /// back; the commit is the durability boundary.
    pub async fn assign_with_deadline(
        &self,
        code: &str,
        deadline: Option<Instant>,
    ) -> Result<SeatAssignment, AssignError> {
        let mut attempt = 0;
        loop {
            attempt += 1;

            if let Some(d) = deadline {
                if Instant::now() >= d {
                    return Err(AssignError::DeadlineExceeded);
                }
            }

            let voucher = self
                .vouchers
                .find_by_code(code)
                .await?
                .ok_or_else(|| AssignError::NotFound(code.to_string()))?;

            if voucher.status == VoucherStatus::Redeemed {
                return Err(AssignError::AlreadyRedeemed(code.to_string()));
            }
            if voucher.is_expired(Utc::now()) {
                return Err(AssignError::Expired(code.to_string()));
            }

            let mut seats = self
                .catalog
                .available_seats(voucher.flight_id, voucher.cabin)
                .await?;
            // Deterministic tie-break: lowest label wins, id breaks label ties
            seats.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));

            let Some(seat) = seats.into_iter().next() else {
                return Err(AssignError::NoSeatAvailable {
                    flight_id: voucher.flight_id,
                    cabin: voucher.cabin,
                });
            };

            let redeemed_at = Utc::now();
            match self
                .vouchers
                .commit_assignment(voucher.id, seat.id, redeemed_at)
                .await
            {
                Ok(()) => {
                    tracing::info!(
                        voucher_id = voucher.id,
                        seat_id = seat.id,
                        seat_label = %seat.label,
                        attempt,
                        "voucher redeemed"
                    );
                    return Ok(SeatAssignment {
                        voucher_code: voucher.code,
                        cabin: voucher.cabin,
                        seat_id: seat.id,
                        seat_label: seat.label,
                        redeemed_at,
                    });
                }
                Err(StoreError::CommitConflict) => {
                    if attempt >= self.max_attempts {
                        tracing::warn!(code, attempt, "assignment retry budget exhausted");
                        return Err(AssignError::Conflict(code.to_string()));
                    }
                    tracing::debug!(code, attempt, "commit conflicted, restarting");
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssignError {
    #[error("voucher not found: {0}")]
    NotFound(String),

    #[error("voucher already redeemed: {0}")]
    AlreadyRedeemed(String),

    #[error("voucher expired: {0}")]
    Expired(String),

    #[error("no available {cabin} seats on flight {flight_id}")]
    NoSeatAvailable {
        flight_id: cabin_shared::FlightId,
        cabin: Cabin,
    },

    #[error("assignment conflicted with concurrent redemptions: {0}")]
    Conflict(String),

    #[error("deadline exceeded before assignment committed")]
    DeadlineExceeded,

    #[error("storage unavailable: {0}")]
    Store(#[from] StoreError),
}
