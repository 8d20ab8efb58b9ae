//! Validated calendar-date keys.
//!
//! A [`DateKey`] is the identity of one on-duty day: a canonical
//! `YYYY-MM-DD` string. Membership in the selection set is the only semantic
//! attached to it, so the type is a thin validated newtype that sorts and
//! hashes by value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A date key failed validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid date key '{0}': expected a real calendar date as YYYY-MM-DD")]
pub struct InvalidDateKey(pub String);

/// A calendar date encoded as a canonical `YYYY-MM-DD` string.
///
/// Construction always validates: the string must parse as a real calendar
/// date and must already be zero-padded. Serde round-trips through the
/// string form, so persisted selections are re-validated on load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(String);

impl DateKey {
    /// Build a key from numeric parts, zero-padding to canonical form.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self(format!("{year:04}-{month:02}-{day:02}"))
    }

    /// The full `YYYY-MM-DD` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `YYYY-MM` prefix used for month filtering.
    #[must_use]
    pub fn month_prefix(&self) -> &str {
        &self.0[..7]
    }

    /// Day-of-month component.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0[8..].parse().unwrap_or(0)
    }
}

impl FromStr for DateKey {
    type Err = InvalidDateKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| InvalidDateKey(s.to_string()))?;
        // Reject non-canonical spellings like 2024-5-1: one date, one key.
        let canonical = parsed.format("%Y-%m-%d").to_string();
        if canonical != s {
            return Err(InvalidDateKey(s.to_string()));
        }
        Ok(Self(canonical))
    }
}

impl TryFrom<String> for DateKey {
    type Error = InvalidDateKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_date() {
        let key: DateKey = "2024-05-01".parse().expect("valid key");
        assert_eq!(key.as_str(), "2024-05-01");
        assert_eq!(key.month_prefix(), "2024-05");
        assert_eq!(key.day(), 1);
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!("2024-02-30".parse::<DateKey>().is_err());
        assert!("2024-13-01".parse::<DateKey>().is_err());
        assert!("not-a-date".parse::<DateKey>().is_err());
    }

    #[test]
    fn rejects_non_canonical_padding() {
        assert!("2024-5-1".parse::<DateKey>().is_err());
        assert!("2024-05-1".parse::<DateKey>().is_err());
    }

    #[test]
    fn from_ymd_is_zero_padded() {
        assert_eq!(DateKey::from_ymd(2024, 5, 9).as_str(), "2024-05-09");
    }

    #[test]
    fn serde_revalidates_on_load() {
        let ok: Result<Vec<DateKey>, _> = serde_json::from_str(r#"["2024-05-01"]"#);
        assert!(ok.is_ok());
        let bad: Result<Vec<DateKey>, _> = serde_json::from_str(r#"["2024-99-01"]"#);
        assert!(bad.is_err());
    }

    #[test]
    fn orders_chronologically_by_string() {
        let a = DateKey::from_ymd(2024, 5, 2);
        let b = DateKey::from_ymd(2024, 11, 1);
        assert!(a < b);
    }
}
