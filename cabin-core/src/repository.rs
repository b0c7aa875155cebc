use async_trait::async_trait;
use chrono::{DateTime, Utc};

use cabin_shared::{Cabin, Flight, FlightId, Seat, SeatId, Voucher, VoucherId};

use crate::StoreResult;

/// Store contract for flight and seat inventory. Creation is
/// append-only; a seat's assignment state is only ever written through
/// `VoucherStore::commit_assignment`.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert one flight per number, all-or-nothing.
    /// (flight_no, dep_date) pairs are unique.
    async fn insert_flights(
        &self,
        flight_numbers: &[String],
        dep_date: DateTime<Utc>,
    ) -> StoreResult<Vec<Flight>>;

    /// Insert one seat per label for an existing flight, all-or-nothing.
    /// Labels are unique within a flight.
    async fn insert_seats(
        &self,
        flight_id: FlightId,
        cabin: Cabin,
        labels: &[String],
    ) -> StoreResult<Vec<Seat>>;

    async fn list_flights(&self) -> StoreResult<Vec<Flight>>;

    async fn list_seats(&self) -> StoreResult<Vec<Seat>>;

    /// Snapshot of UNASSIGNED seats for a flight/cabin. Ordering is
    /// unspecified; selection policy belongs to the caller.
    async fn available_seats(&self, flight_id: FlightId, cabin: Cabin) -> StoreResult<Vec<Seat>>;
}

/// Store contract for vouchers and the one mutating operation in the
/// system, the voucher-to-seat commit.
#[async_trait]
pub trait VoucherStore: Send + Sync {
    /// Insert a PENDING voucher. Codes are globally unique and the
    /// target flight must exist.
    async fn insert_voucher(
        &self,
        code: &str,
        flight_id: FlightId,
        cabin: Cabin,
        expires_at: Option<DateTime<Utc>>,
    ) -> StoreResult<Voucher>;

    /// Exact, case-sensitive code lookup.
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Voucher>>;

    async fn list_vouchers(&self) -> StoreResult<Vec<Voucher>>;

    /// The atomic unit of work: re-validate under exclusive access that
    /// the voucher is still PENDING and the seat still UNASSIGNED (and
    /// belongs to the voucher's flight/cabin), then apply both
    /// transitions together. Both transitions are one-way, so the state
    /// check is equivalent to a version CAS. A failed check returns
    /// `StoreError::CommitConflict` and mutates nothing.
    async fn commit_assignment(
        &self,
        voucher_id: VoucherId,
        seat_id: SeatId,
        redeemed_at: DateTime<Utc>,
    ) -> StoreResult<()>;
}
