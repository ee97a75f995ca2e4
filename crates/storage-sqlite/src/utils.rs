//! Conversions between domain values and their TEXT column encodings.
//!
//! Amounts are stored as decimal strings and instants as RFC 3339 UTC strings
//! with millisecond precision, so that string order matches time order.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use networth_core::errors::{DatabaseError, Error, Result};

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| corrupt(field, value, e))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| corrupt(field, value, e))
}

pub fn parse_decimal(value: &str, field: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| corrupt(field, value, e))
}

fn corrupt(field: &str, value: &str, err: impl std::fmt::Display) -> Error {
    Error::Database(DatabaseError::Internal(format!(
        "Invalid stored value for {}: '{}' ({})",
        field, value, err
    )))
}
