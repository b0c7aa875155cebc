use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use cabin_core::repository::{CatalogStore, VoucherStore};
use cabin_core::{StoreError, StoreResult};
use cabin_shared::{
    Cabin, Flight, FlightId, Seat, SeatId, SeatStatus, Voucher, VoucherId, VoucherStatus,
};

/// In-memory transactional store implementing both store contracts.
///
/// All state sits behind one async mutex; critical sections are short
/// and contain no await points, so independent requests stay parallel
/// up to the commit itself. `commit_assignment` re-validates state
/// under the lock, which gives the optimistic concurrency behavior the
/// assignment engine retries on.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    flights: BTreeMap<FlightId, Flight>,
    seats: BTreeMap<SeatId, Seat>,
    vouchers: BTreeMap<VoucherId, Voucher>,
    flight_seq: i64,
    seat_seq: i64,
    voucher_seq: i64,
}

impl Inner {
    fn next_flight_id(&mut self) -> FlightId {
        self.flight_seq += 1;
        self.flight_seq
    }

    fn next_seat_id(&mut self) -> SeatId {
        self.seat_seq += 1;
        self.seat_seq
    }

    fn next_voucher_id(&mut self) -> VoucherId {
        self.voucher_seq += 1;
        self.voucher_seq
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn insert_flights(
        &self,
        flight_numbers: &[String],
        dep_date: DateTime<Utc>,
    ) -> StoreResult<Vec<Flight>> {
        let mut inner = self.inner.lock().await;

        // Validate the whole batch before touching state, so a
        // duplicate in the middle cannot leave a partial insert.
        for (i, fn_) in flight_numbers.iter().enumerate() {
            let taken = inner
                .flights
                .values()
                .any(|f| f.flight_no == *fn_ && f.dep_date == dep_date)
                || flight_numbers[..i].contains(fn_);
            if taken {
                return Err(StoreError::DuplicateFlight {
                    flight_no: fn_.clone(),
                });
            }
        }

        let mut created = Vec::with_capacity(flight_numbers.len());
        for fn_ in flight_numbers {
            let id = inner.next_flight_id();
            let flight = Flight {
                id,
                flight_no: fn_.clone(),
                dep_date,
            };
            inner.flights.insert(id, flight.clone());
            created.push(flight);
        }

        Ok(created)
    }

    async fn insert_seats(
        &self,
        flight_id: FlightId,
        cabin: Cabin,
        labels: &[String],
    ) -> StoreResult<Vec<Seat>> {
        let mut inner = self.inner.lock().await;

        if !inner.flights.contains_key(&flight_id) {
            return Err(StoreError::FlightNotFound(flight_id));
        }

        for (i, label) in labels.iter().enumerate() {
            let taken = inner
                .seats
                .values()
                .any(|s| s.flight_id == flight_id && s.label == *label)
                || labels[..i].contains(label);
            if taken {
                return Err(StoreError::DuplicateSeat {
                    flight_id,
                    label: label.clone(),
                });
            }
        }

        let mut created = Vec::with_capacity(labels.len());
        for label in labels {
            let id = inner.next_seat_id();
            let seat = Seat {
                id,
                flight_id,
                label: label.clone(),
                cabin,
                status: SeatStatus::Unassigned,
                voucher_id: None,
            };
            inner.seats.insert(id, seat.clone());
            created.push(seat);
        }

        Ok(created)
    }

    async fn list_flights(&self) -> StoreResult<Vec<Flight>> {
        let inner = self.inner.lock().await;
        Ok(inner.flights.values().cloned().collect())
    }

    async fn list_seats(&self) -> StoreResult<Vec<Seat>> {
        let inner = self.inner.lock().await;
        Ok(inner.seats.values().cloned().collect())
    }

    async fn available_seats(&self, flight_id: FlightId, cabin: Cabin) -> StoreResult<Vec<Seat>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .seats
            .values()
            .filter(|s| {
                s.flight_id == flight_id && s.cabin == cabin && s.status == SeatStatus::Unassigned
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl VoucherStore for MemoryStore {
    async fn insert_voucher(
        &self,
        code: &str,
        flight_id: FlightId,
        cabin: Cabin,
        expires_at: Option<DateTime<Utc>>,
    ) -> StoreResult<Voucher> {
        let mut inner = self.inner.lock().await;

        if !inner.flights.contains_key(&flight_id) {
            return Err(StoreError::FlightNotFound(flight_id));
        }
        if inner.vouchers.values().any(|v| v.code == code) {
            return Err(StoreError::DuplicateCode(code.to_string()));
        }

        let id = inner.next_voucher_id();
        let voucher = Voucher {
            id,
            code: code.to_string(),
            flight_id,
            cabin,
            expires_at,
            status: VoucherStatus::Pending,
            seat_id: None,
            redeemed_at: None,
        };
        inner.vouchers.insert(id, voucher.clone());

        Ok(voucher)
    }

    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Voucher>> {
        let inner = self.inner.lock().await;
        Ok(inner.vouchers.values().find(|v| v.code == code).cloned())
    }

    async fn list_vouchers(&self) -> StoreResult<Vec<Voucher>> {
        let inner = self.inner.lock().await;
        Ok(inner.vouchers.values().cloned().collect())
    }

    async fn commit_assignment(
        &self,
        voucher_id: VoucherId,
        seat_id: SeatId,
        redeemed_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;

        // Re-validate both records under the lock. Either may have
        // transitioned since the caller's snapshot.
        let (flight_id, cabin) = match inner.vouchers.get(&voucher_id) {
            Some(v) if v.status == VoucherStatus::Pending => (v.flight_id, v.cabin),
            _ => return Err(StoreError::CommitConflict),
        };

        match inner.seats.get(&seat_id) {
            Some(s)
                if s.status == SeatStatus::Unassigned
                    && s.flight_id == flight_id
                    && s.cabin == cabin => {}
            _ => return Err(StoreError::CommitConflict),
        }

        // Both transitions or neither; nothing below can fail.
        let seat = inner.seats.get_mut(&seat_id).ok_or(StoreError::CommitConflict)?;
        seat.status = SeatStatus::Assigned;
        seat.voucher_id = Some(voucher_id);

        let voucher = inner
            .vouchers
            .get_mut(&voucher_id)
            .ok_or(StoreError::CommitConflict)?;
        voucher.status = VoucherStatus::Redeemed;
        voucher.seat_id = Some(seat_id);
        voucher.redeemed_at = Some(redeemed_at);

        tracing::debug!(voucher_id, seat_id, "committed voucher-to-seat assignment");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    async fn seeded_store() -> (MemoryStore, FlightId) {
        let store = MemoryStore::new();
        let flights = store
            .insert_flights(&labels(&["GA133"]), Utc::now())
            .await
            .unwrap();
        (store, flights[0].id)
    }

    #[tokio::test]
    async fn test_flight_ids_are_monotonic() {
        let store = MemoryStore::new();
        let flights = store
            .insert_flights(&labels(&["GA133", "GA125"]), Utc::now())
            .await
            .unwrap();
        assert_eq!(flights[0].id, 1);
        assert_eq!(flights[1].id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_flight_rejected_batch_untouched() {
        let store = MemoryStore::new();
        let dep = Utc::now();
        store.insert_flights(&labels(&["GA133"]), dep).await.unwrap();

        let err = store
            .insert_flights(&labels(&["GA200", "GA133"]), dep)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateFlight { .. }));
        // The batch must not have partially applied
        assert_eq!(store.list_flights().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_seats_require_existing_flight() {
        let store = MemoryStore::new();
        let err = store
            .insert_seats(99, Cabin::Economy, &labels(&["1A"]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::FlightNotFound(99)));
    }

    #[tokio::test]
    async fn test_duplicate_seat_label_rejected() {
        let (store, flight_id) = seeded_store().await;
        store
            .insert_seats(flight_id, Cabin::Economy, &labels(&["1A", "1B"]))
            .await
            .unwrap();

        let err = store
            .insert_seats(flight_id, Cabin::Business, &labels(&["1A"]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSeat { .. }));

        let err = store
            .insert_seats(flight_id, Cabin::Economy, &labels(&["2A", "2A"]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSeat { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_voucher_code_rejected() {
        let (store, flight_id) = seeded_store().await;
        store
            .insert_voucher("VC-1", flight_id, Cabin::Economy, None)
            .await
            .unwrap();
        let err = store
            .insert_voucher("VC-1", flight_id, Cabin::Business, None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateCode(_)));
    }

    #[tokio::test]
    async fn test_code_lookup_is_case_sensitive() {
        let (store, flight_id) = seeded_store().await;
        store
            .insert_voucher("vc-1", flight_id, Cabin::Economy, None)
            .await
            .unwrap();
        assert!(store.find_by_code("VC-1").await.unwrap().is_none());
        assert!(store.find_by_code("vc-1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_commit_applies_both_transitions() {
        let (store, flight_id) = seeded_store().await;
        let seats = store
            .insert_seats(flight_id, Cabin::Economy, &labels(&["1A"]))
            .await
            .unwrap();
        let voucher = store
            .insert_voucher("VC-1", flight_id, Cabin::Economy, None)
            .await
            .unwrap();

        let redeemed_at = Utc::now();
        store
            .commit_assignment(voucher.id, seats[0].id, redeemed_at)
            .await
            .unwrap();

        let seat = &store.list_seats().await.unwrap()[0];
        assert_eq!(seat.status, SeatStatus::Assigned);
        assert_eq!(seat.voucher_id, Some(voucher.id));

        let voucher = &store.list_vouchers().await.unwrap()[0];
        assert_eq!(voucher.status, VoucherStatus::Redeemed);
        assert_eq!(voucher.seat_id, Some(seat.id));
        assert_eq!(voucher.redeemed_at, Some(redeemed_at));
    }

    #[tokio::test]
    async fn test_commit_conflicts_on_taken_seat_and_mutates_nothing() {
        let (store, flight_id) = seeded_store().await;
        let seats = store
            .insert_seats(flight_id, Cabin::Economy, &labels(&["1A"]))
            .await
            .unwrap();
        let first = store
            .insert_voucher("VC-1", flight_id, Cabin::Economy, None)
            .await
            .unwrap();
        let second = store
            .insert_voucher("VC-2", flight_id, Cabin::Economy, None)
            .await
            .unwrap();

        store
            .commit_assignment(first.id, seats[0].id, Utc::now())
            .await
            .unwrap();

        let err = store
            .commit_assignment(second.id, seats[0].id, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::CommitConflict));

        // The losing voucher stays PENDING
        let vouchers = store.list_vouchers().await.unwrap();
        let loser = vouchers.iter().find(|v| v.id == second.id).unwrap();
        assert_eq!(loser.status, VoucherStatus::Pending);
        assert_eq!(loser.seat_id, None);
    }

    #[tokio::test]
    async fn test_commit_conflicts_on_redeemed_voucher() {
        let (store, flight_id) = seeded_store().await;
        let seats = store
            .insert_seats(flight_id, Cabin::Economy, &labels(&["1A", "1B"]))
            .await
            .unwrap();
        let voucher = store
            .insert_voucher("VC-1", flight_id, Cabin::Economy, None)
            .await
            .unwrap();

        store
            .commit_assignment(voucher.id, seats[0].id, Utc::now())
            .await
            .unwrap();

        let err = store
            .commit_assignment(voucher.id, seats[1].id, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::CommitConflict));

        // Second seat untouched
        let seat = store
            .list_seats()
            .await
            .unwrap()
            .into_iter()
            .find(|s| s.id == seats[1].id)
            .unwrap();
        assert_eq!(seat.status, SeatStatus::Unassigned);
    }

    #[tokio::test]
    async fn test_commit_conflicts_on_cabin_mismatch() {
        let (store, flight_id) = seeded_store().await;
        let seats = store
            .insert_seats(flight_id, Cabin::Business, &labels(&["1A"]))
            .await
            .unwrap();
        let voucher = store
            .insert_voucher("VC-1", flight_id, Cabin::Economy, None)
            .await
            .unwrap();

        let err = store
            .commit_assignment(voucher.id, seats[0].id, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::CommitConflict));
    }
}
