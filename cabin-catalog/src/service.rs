use chrono::{DateTime, Utc};
use std::sync::Arc;

use cabin_core::repository::CatalogStore;
use cabin_core::StoreError;
use cabin_shared::{Cabin, Flight, FlightId, Seat};

/// Catalog operations: append-only creation of flights and seats.
///
/// Flight numbers and seat labels are upper-cased and trimmed before
/// storage, so "ga133 " and "GA133" name the same flight.
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Create one flight per number, sharing a departure date.
    pub async fn create_flights(
        &self,
        flight_numbers: &[String],
        dep_date: DateTime<Utc>,
    ) -> Result<Vec<Flight>, CatalogError> {
        let numbers = normalize_batch(flight_numbers, "flight_numbers")?;

        let flights = self.store.insert_flights(&numbers, dep_date).await?;
        tracing::info!(count = flights.len(), "created flights");
        Ok(flights)
    }

    /// Create one seat per label on an existing flight, all in one cabin.
    pub async fn create_seats(
        &self,
        flight_id: FlightId,
        cabin: Cabin,
        labels: &[String],
    ) -> Result<Vec<Seat>, CatalogError> {
        let labels = normalize_batch(labels, "labels")?;

        let seats = self.store.insert_seats(flight_id, cabin, &labels).await?;
        tracing::info!(flight_id, %cabin, count = seats.len(), "created seats");
        Ok(seats)
    }

    pub async fn list_flights(&self) -> Result<Vec<Flight>, CatalogError> {
        Ok(self.store.list_flights().await?)
    }

    pub async fn list_seats(&self) -> Result<Vec<Seat>, CatalogError> {
        Ok(self.store.list_seats().await?)
    }
}

fn normalize_batch(values: &[String], field: &str) -> Result<Vec<String>, CatalogError> {
    if values.is_empty() {
        return Err(CatalogError::InvalidInput(format!(
            "{} must not be empty",
            field
        )));
    }

    let mut out = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim().to_uppercase();
        if v.is_empty() {
            return Err(CatalogError::InvalidInput(format!(
                "{} entries must not be blank",
                field
            )));
        }
        out.push(v);
    }
    Ok(out)
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("flight not found: {0}")]
    FlightNotFound(FlightId),

    #[error("flight {0} already exists for that departure date")]
    DuplicateFlight(String),

    #[error("seat {0} already exists on this flight")]
    DuplicateSeat(String),

    #[error("storage unavailable: {0}")]
    Store(StoreError),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::FlightNotFound(id) => CatalogError::FlightNotFound(id),
            StoreError::DuplicateFlight { flight_no } => CatalogError::DuplicateFlight(flight_no),
            StoreError::DuplicateSeat { label, .. } => CatalogError::DuplicateSeat(label),
            other => CatalogError::Store(other),
        }
    }
}
