//! Weekdays, meals and date windows shared by menus and attendance.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Position in the week, Monday first. Used as the menu sort key.
    pub fn index(self) -> i16 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }
}

impl TryFrom<&str> for Weekday {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| EngineError::InvalidInput(format!("invalid day: {value}")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
        }
    }

    pub fn index(self) -> i16 {
        match self {
            Self::Breakfast => 0,
            Self::Lunch => 1,
            Self::Dinner => 2,
        }
    }
}

impl TryFrom<&str> for MealType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Breakfast" => Ok(Self::Breakfast),
            "Lunch" => Ok(Self::Lunch),
            "Dinner" => Ok(Self::Dinner),
            other => Err(EngineError::InvalidInput(format!(
                "invalid meal type: {other}"
            ))),
        }
    }
}

/// Half-open `[start, start + 1 day)` window in UTC.
///
/// Accepts a calendar date (`2024-01-15`, window starts at midnight UTC) or
/// an RFC 3339 timestamp (window starts at that instant).
pub fn day_window(input: &str) -> ResultEngine<(DateTime<Utc>, DateTime<Utc>)> {
    let input = input.trim();
    let start = if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        date.and_hms_opt(0, 0, 0)
            .ok_or_else(|| EngineError::InvalidInput(format!("invalid date: {input}")))?
            .and_utc()
    } else {
        DateTime::parse_from_rfc3339(input)
            .map_err(|_| EngineError::InvalidInput(format!("invalid date: {input}")))?
            .with_timezone(&Utc)
    };

    Ok((start, start + Duration::days(1)))
}
