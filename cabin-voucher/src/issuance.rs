use chrono::{DateTime, Utc};
use std::sync::Arc;

use cabin_core::repository::VoucherStore;
use cabin_core::StoreError;
use cabin_shared::{Cabin, FlightId, Voucher};

/// Voucher issuance. Codes are stored exactly as issued, no trimming
/// or case folding. Seat availability is deliberately not checked at
/// creation time; inventory may be added after vouchers go out.
pub struct VoucherService {
    store: Arc<dyn VoucherStore>,
}

impl VoucherService {
    pub fn new(store: Arc<dyn VoucherStore>) -> Self {
        Self { store }
    }

    pub async fn create_voucher(
        &self,
        code: &str,
        flight_id: FlightId,
        cabin: Cabin,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Voucher, IssueError> {
        if code.is_empty() {
            return Err(IssueError::EmptyCode);
        }

        let voucher = self
            .store
            .insert_voucher(code, flight_id, cabin, expires_at)
            .await?;
        tracing::info!(voucher_id = voucher.id, flight_id, %cabin, "issued voucher");
        Ok(voucher)
    }

    pub async fn list_vouchers(&self) -> Result<Vec<Voucher>, IssueError> {
        Ok(self.store.list_vouchers().await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    #[error("voucher code must not be empty")]
    EmptyCode,

    #[error("voucher code already exists: {0}")]
    DuplicateCode(String),

    #[error("flight not found: {0}")]
    FlightNotFound(FlightId),

    #[error("storage unavailable: {0}")]
    Store(StoreError),
}

impl From<StoreError> for IssueError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateCode(code) => IssueError::DuplicateCode(code),
            StoreError::FlightNotFound(id) => IssueError::FlightNotFound(id),
            other => IssueError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabin_core::repository::CatalogStore;
    use cabin_store::MemoryStore;

    async fn setup() -> (VoucherService, FlightId) {
        let store = Arc::new(MemoryStore::new());
        let flights = store
            .insert_flights(&["GA133".to_string()], Utc::now())
            .await
            .unwrap();
        (VoucherService::new(store), flights[0].id)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (vouchers, flight_id) = setup().await;
        let created = vouchers
            .create_voucher("VC-1", flight_id, Cabin::Economy, None)
            .await
            .unwrap();
        assert_eq!(created.code, "VC-1");
        assert_eq!(created.seat_id, None);

        let listed = vouchers.list_vouchers().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_empty_code_rejected() {
        let (vouchers, flight_id) = setup().await;
        let err = vouchers
            .create_voucher("", flight_id, Cabin::Economy, None)
            .await
            .unwrap_err();
        assert!(matches!(err, IssueError::EmptyCode));
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let (vouchers, flight_id) = setup().await;
        vouchers
            .create_voucher("VC-1", flight_id, Cabin::Economy, None)
            .await
            .unwrap();
        let err = vouchers
            .create_voucher("VC-1", flight_id, Cabin::First, None)
            .await
            .unwrap_err();
        assert!(matches!(err, IssueError::DuplicateCode(code) if code == "VC-1"));
    }

    #[tokio::test]
    async fn test_codes_are_case_sensitive() {
        let (vouchers, flight_id) = setup().await;
        vouchers
            .create_voucher("VC-1", flight_id, Cabin::Economy, None)
            .await
            .unwrap();
        // Different case is a different code
        vouchers
            .create_voucher("vc-1", flight_id, Cabin::Economy, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_flight_rejected() {
        let (vouchers, _) = setup().await;
        let err = vouchers
            .create_voucher("VC-1", 404, Cabin::Economy, None)
            .await
            .unwrap_err();
        assert!(matches!(err, IssueError::FlightNotFound(404)));
    }
}
