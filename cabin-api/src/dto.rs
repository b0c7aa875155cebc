use chrono::{DateTime, NaiveDate, Utc};

use cabin_shared::Cabin;

use crate::error::ApiError;

/// Parse an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date taken as
/// midnight UTC.
pub fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc());
    }
    Err(ApiError::InvalidInput(format!(
        "{} must be an RFC 3339 timestamp or YYYY-MM-DD date",
        field
    )))
}

pub fn parse_cabin(value: &str) -> Result<Cabin, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::InvalidInput("cabin must be one of: ECONOMY, BUSINESS, FIRST".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_timestamp_accepts_both_forms() {
        let full = parse_timestamp("2025-06-01T10:30:00Z", "dep_date").unwrap();
        assert_eq!(full.hour(), 10);

        let bare = parse_timestamp("2025-06-01", "dep_date").unwrap();
        assert_eq!(bare.hour(), 0);
        assert_eq!(bare.date_naive().to_string(), "2025-06-01");

        assert!(parse_timestamp("June 1st", "dep_date").is_err());
    }

    #[test]
    fn test_parse_cabin() {
        assert_eq!(parse_cabin("BUSINESS").unwrap(), Cabin::Business);
        assert!(parse_cabin("economy").is_err());
    }
}
