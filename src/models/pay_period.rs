//! Pay period model.
//!
//! A pay period is a calendar month identified by a `YYYY-MM` token.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents a monthly pay period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period: PayPeriod = "2025-11".parse().unwrap();
/// assert_eq!(period.start_date(), NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());
/// assert_eq!(period.to_string(), "2025-11");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayPeriod {
    start_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period for the given year and month (1-12).
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|start_date| Self { start_date })
            .ok_or_else(|| EngineError::InvalidPeriod {
                value: format!("{:04}-{:02}", year, month),
            })
    }

    /// The calendar year of the period.
    pub fn year(&self) -> i32 {
        self.start_date.year()
    }

    /// The calendar month of the period (1-12).
    pub fn month(&self) -> u32 {
        self.start_date.month()
    }

    /// The first day of the period.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The last day of the period.
    pub fn end_date(&self) -> NaiveDate {
        // The first of the following month always exists.
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.start_date)
    }

    /// Checks if a date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for PayPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidPeriod {
            value: s.to_string(),
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let digits = |part: &str, len: usize| {
            part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(year, 4) || !digits(month, 2) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for PayPeriod {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayPeriod> for String {
    fn from(period: PayPeriod) -> Self {
        period.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(s: &str) -> PayPeriod {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_valid_token() {
        let p = period("2025-11");
        assert_eq!(p.year(), 2025);
        assert_eq!(p.month(), 11);
    }

    #[test]
    fn test_end_date_of_december_rolls_year() {
        let p = period("2025-12");
        assert_eq!(p.end_date(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_end_date_of_leap_february() {
        let p = period("2024-02");
        assert_eq!(p.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_rejects_month_out_of_range() {
        let result: EngineResult<PayPeriod> = "2025-13".parse();
        match result {
            Err(EngineError::InvalidPeriod { value }) => assert_eq!(value, "2025-13"),
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        for token in ["2025", "2025-1", "25-11", "2025/11", "abcd-ef", ""] {
            assert!(token.parse::<PayPeriod>().is_err(), "accepted {:?}", token);
        }
    }

    #[test]
    fn test_rejects_signed_components() {
        for token in ["+202-11", "2025-+1", "-202-11", "2025--1"] {
            assert!(
                matches!(token.parse::<PayPeriod>(), Err(EngineError::InvalidPeriod { .. })),
                "{} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_contains_date_bounds() {
        let p = period("2025-11");
        assert!(p.contains_date(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()));
        assert!(p.contains_date(NaiveDate::from_ymd_opt(2025, 11, 30).unwrap()));
        assert!(!p.contains_date(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()));
        assert!(!p.contains_date(NaiveDate::from_ymd_opt(2025, 10, 31).unwrap()));
    }

    #[test]
    fn test_serializes_as_token() {
        let json = serde_json::to_string(&period("2025-03")).unwrap();
        assert_eq!(json, "\"2025-03\"");
    }

    #[test]
    fn test_deserialize_rejects_invalid_token() {
        let result: Result<PayPeriod, _> = serde_json::from_str("\"2025-00\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_periods_order_chronologically() {
        assert!(period("2025-11") < period("2025-12"));
        assert!(period("2025-12") < period("2026-01"));
    }
}
