//! Calendar-day keys for streak tracking
//!
//! Every streak computation works on `NaiveDate` values. This module is the
//! only place that turns an instant into a calendar day, so the timezone
//! policy lives here and nowhere else.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Format used for calendar-day keys ("2024-03-09")
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Which clock decides where one study day ends and the next begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// Midnight in the machine's local timezone
    Local,
    /// Midnight UTC
    Utc,
}

impl Default for DayBoundary {
    fn default() -> Self {
        Self::Local
    }
}

impl DayBoundary {
    /// Calendar day an instant falls on under this policy
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => instant.with_timezone(&Local).date_naive(),
            Self::Utc => instant.date_naive(),
        }
    }

    /// Current calendar day
    pub fn today(&self) -> NaiveDate {
        self.day_of(Utc::now())
    }

    /// Calendar day `days` days before today
    pub fn days_ago(&self, days: u32) -> NaiveDate {
        self.today() - Duration::days(days as i64)
    }
}

/// Render a day as its storage key
pub fn day_key(day: NaiveDate) -> String {
    day.format(DAY_KEY_FORMAT).to_string()
}

/// Parse a storage key back into a day
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DAY_KEY_FORMAT).ok()
}
