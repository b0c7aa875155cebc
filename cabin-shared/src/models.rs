use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type FlightId = i64;
pub type SeatId = i64;
pub type VoucherId = i64;

/// Cabin class partitioning a flight's seat inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cabin {
    Economy,
    Business,
    First,
}

impl std::fmt::Display for Cabin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Cabin::Economy => "ECONOMY",
            Cabin::Business => "BUSINESS",
            Cabin::First => "FIRST",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Cabin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ECONOMY" => Ok(Cabin::Economy),
            "BUSINESS" => Ok(Cabin::Business),
            "FIRST" => Ok(Cabin::First),
            other => Err(format!("unknown cabin: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    pub flight_no: String,
    pub dep_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    Unassigned,
    Assigned,
}

/// A physical seat. Transitions UNASSIGNED -> ASSIGNED at most once;
/// there is no release flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub flight_id: FlightId,
    pub label: String,
    pub cabin: Cabin,
    pub status: SeatStatus,
    pub voucher_id: Option<VoucherId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoucherStatus {
    Pending,
    Redeemed,
}

/// A single-use credential for one seat of a given flight/cabin.
/// Codes are case-sensitive and matched exactly as issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: VoucherId,
    pub code: String,
    pub flight_id: FlightId,
    pub cabin: Cabin,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: VoucherStatus,
    pub seat_id: Option<SeatId>,
    pub redeemed_at: Option<DateTime<Utc>>,
}

impl Voucher {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(t) if now > t)
    }
}
