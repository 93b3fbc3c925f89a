//! Result types produced by the statistic groups.

use std::collections::BTreeMap;

use serde::Serialize;

/// Most frequent value of a category and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mode<T> {
    pub value: T,
    pub count: usize,
}

impl<T> Mode<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Mode<U> {
        Mode {
            value: f(self.value),
            count: self.count,
        }
    }
}

/// A start/end station pair. Ordered by start, then end.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Route {
    pub start: String,
    pub end: String,
}

/// Why an optional statistic could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The city's dataset has no such column.
    MissingColumn,
    /// The column exists but no record in the collection has a value.
    NoValues,
}

/// A statistic that depends on an optional column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Availability<T> {
    Available(T),
    Unavailable(UnavailableReason),
}

impl<T> Availability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }

    pub fn available(&self) -> Option<&T> {
        match self {
            Availability::Available(value) => Some(value),
            Availability::Unavailable(_) => None,
        }
    }
}

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    /// 1-based month number.
    pub popular_month: Mode<u32>,
    pub popular_weekday: Mode<&'static str>,
    /// Hour of day, 0-23.
    pub popular_hour: Mode<u32>,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub popular_start_station: Mode<String>,
    pub popular_end_station: Mode<String>,
    pub popular_route: Mode<Route>,
}

/// Total and average trip duration. Hour and minute figures are truncated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub mean_seconds: f64,
    pub total_hours: u64,
    pub mean_minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: Mode<i32>,
}

/// Rider breakdowns. Category maps are ordered alphabetically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: BTreeMap<String, usize>,
    pub gender: Availability<BTreeMap<String, usize>>,
    pub birth_year: Availability<BirthYearStats>,
}

/// Everything computed for one city/filter combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    pub city: String,
    pub month: String,
    pub weekday: String,
    pub trips: usize,
    pub time: TimeStats,
    pub station: StationStats,
    pub duration: DurationStats,
    pub user: UserStats,
}
