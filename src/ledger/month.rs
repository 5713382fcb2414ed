use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Today's date on the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A calendar month (ISO-8601 `YYYY-MM`), the accounting period of a budget.
///
/// Stored as the first day of the month so every value maps to a valid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BudgetMonth(NaiveDate);

impl BudgetMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The month containing today's local date.
    pub fn now() -> Self {
        Self::from_date(today())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        // The only month without a successor is the last representable one,
        // whose final day is `NaiveDate::MAX`.
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl Default for BudgetMonth {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for BudgetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMonthError {
    #[error("expected a month formatted as YYYY-MM, got `{0}`")]
    BadFormat(String),
    #[error("month `{0}` is out of range")]
    OutOfRange(String),
}

impl FromStr for BudgetMonth {
    type Err = ParseMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let bad_format = || ParseMonthError::BadFormat(raw.to_string());
        let (year, month) = raw.rsplit_once('-').ok_or_else(bad_format)?;
        if month.len() != 2 || year.trim_start_matches('-').len() < 4 {
            return Err(bad_format());
        }
        let year: i32 = year.parse().map_err(|_| bad_format())?;
        let month: u32 = month.parse().map_err(|_| bad_format())?;
        Self::new(year, month).ok_or_else(|| ParseMonthError::OutOfRange(raw.to_string()))
    }
}

impl TryFrom<String> for BudgetMonth {
    type Error = ParseMonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BudgetMonth> for String {
    fn from(month: BudgetMonth) -> Self {
        month.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_and_formats_iso_year_month() {
        let month: BudgetMonth = "2025-03".parse().unwrap();
        assert_eq!(month.year(), 2025);
        assert_eq!(month.month(), 3);
        assert_eq!(month.to_string(), "2025-03");
    }

    #[test]
    fn rejects_malformed_months() {
        for raw in ["", "2025", "2025-3", "2025-13", "25-03", "2025-03-01", "abcd-ef"] {
            assert!(raw.parse::<BudgetMonth>().is_err(), "`{raw}` should not parse");
        }
    }

    #[test]
    fn month_bounds_follow_calendar() {
        let feb_leap = BudgetMonth::new(2024, 2).unwrap();
        assert_eq!(feb_leap.first_day(), date(2024, 2, 1));
        assert_eq!(feb_leap.last_day(), date(2024, 2, 29));

        let feb = BudgetMonth::new(2023, 2).unwrap();
        assert_eq!(feb.last_day(), date(2023, 2, 28));

        let december = BudgetMonth::new(2025, 12).unwrap();
        assert_eq!(december.last_day(), date(2025, 12, 31));
    }

    #[test]
    fn contains_only_dates_of_the_same_month() {
        let month = BudgetMonth::new(2025, 6).unwrap();
        assert!(month.contains(date(2025, 6, 1)));
        assert!(month.contains(date(2025, 6, 30)));
        assert!(!month.contains(date(2025, 7, 1)));
        assert!(!month.contains(date(2024, 6, 15)));
    }

    #[test]
    fn serializes_as_plain_string() {
        let month = BudgetMonth::new(2025, 11).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2025-11\"");
        let back: BudgetMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);
        assert!(serde_json::from_str::<BudgetMonth>("\"2025-00\"").is_err());
    }

    #[test]
    fn from_date_truncates_to_first_day() {
        let month = BudgetMonth::from_date(date(2025, 8, 19));
        assert_eq!(month.first_day(), date(2025, 8, 1));
    }
}
