//! Month and weekday filtering of trip collections.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use tracing::debug;

use crate::error::{BikeshareError, Result};
use crate::records::{MONTH_NAMES, TripCollection, TripRecord, month_name, weekday_name};

/// Months the datasets cover (January through June).
pub const SUPPORTED_MONTHS: u32 = 6;

const ALL: &str = "all";

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Month axis of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthSelector {
    #[default]
    All,
    /// 1-based month number within the supported range.
    Month(u32),
}

/// Weekday axis of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekdaySelector {
    #[default]
    All,
    Day(Weekday),
}

impl MonthSelector {
    pub fn matches(&self, record: &TripRecord) -> bool {
        match self {
            MonthSelector::All => true,
            MonthSelector::Month(month) => record.month == *month,
        }
    }

    /// Accepted spellings, for prompts and error messages.
    pub fn choices() -> Vec<&'static str> {
        let mut choices: Vec<&str> = MONTH_NAMES[..SUPPORTED_MONTHS as usize].to_vec();
        choices.push(ALL);
        choices
    }
}

impl WeekdaySelector {
    pub fn matches(&self, record: &TripRecord) -> bool {
        match self {
            WeekdaySelector::All => true,
            WeekdaySelector::Day(day) => record.weekday == *day,
        }
    }

    pub fn choices() -> Vec<&'static str> {
        let mut choices: Vec<&str> = WEEKDAYS.iter().map(|d| weekday_name(*d)).collect();
        choices.push(ALL);
        choices
    }
}

impl FromStr for MonthSelector {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = capitalize(s.trim());
        if wanted.eq_ignore_ascii_case(ALL) {
            return Ok(MonthSelector::All);
        }

        MONTH_NAMES[..SUPPORTED_MONTHS as usize]
            .iter()
            .position(|name| *name == wanted)
            .map(|index| MonthSelector::Month(index as u32 + 1))
            .ok_or_else(|| BikeshareError::validation("month", s, &Self::choices()))
    }
}

impl FromStr for WeekdaySelector {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = capitalize(s.trim());
        if wanted.eq_ignore_ascii_case(ALL) {
            return Ok(WeekdaySelector::All);
        }

        WEEKDAYS
            .into_iter()
            .find(|day| weekday_name(*day) == wanted)
            .map(WeekdaySelector::Day)
            .ok_or_else(|| BikeshareError::validation("day", s, &Self::choices()))
    }
}

impl fmt::Display for MonthSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthSelector::All => f.write_str(ALL),
            MonthSelector::Month(m) => f.write_str(month_name(*m).unwrap_or("unknown")),
        }
    }
}

impl fmt::Display for WeekdaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekdaySelector::All => f.write_str(ALL),
            WeekdaySelector::Day(d) => f.write_str(weekday_name(*d)),
        }
    }
}

// "tUESDAY" -> "Tuesday"
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Keeps the records matching both selectors, in their original order.
/// The source collection is left untouched.
pub fn filter(
    collection: &TripCollection,
    month: MonthSelector,
    weekday: WeekdaySelector,
) -> TripCollection {
    let kept: Vec<TripRecord> = collection
        .iter()
        .filter(|r| month.matches(r) && weekday.matches(r))
        .cloned()
        .collect();

    debug!(
        city = collection.city(),
        %month,
        %weekday,
        before = collection.len(),
        after = kept.len(),
        "Trips filtered"
    );

    collection.derive(kept)
}

/// Parses both selectors and filters.
///
/// # Errors
///
/// Returns [`BikeshareError::Validation`] if either selector is not recognized.
pub fn filter_by_names(collection: &TripCollection, month: &str, weekday: &str) -> Result<TripCollection> {
    let month: MonthSelector = month.parse()?;
    let weekday: WeekdaySelector = weekday.parse()?;
    Ok(filter(collection, month, weekday))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::fixtures::{collection, trip};

    // 2017-01-02 Mon, 2017-01-03 Tue, 2017-02-07 Tue, 2017-03-05 Sun, 2017-06-30 Fri
    fn sample() -> TripCollection {
        collection(vec![
            trip((2017, 1, 2), 8, "A", "B", 60.0),
            trip((2017, 1, 3), 9, "B", "C", 60.0),
            trip((2017, 2, 7), 10, "C", "A", 60.0),
            trip((2017, 3, 5), 11, "A", "C", 60.0),
            trip((2017, 6, 30), 12, "B", "A", 60.0),
        ])
    }

    #[test]
    fn test_month_selector_parsing() {
        assert_eq!("all".parse::<MonthSelector>().unwrap(), MonthSelector::All);
        assert_eq!(" ALL ".parse::<MonthSelector>().unwrap(), MonthSelector::All);
        assert_eq!("january".parse::<MonthSelector>().unwrap(), MonthSelector::Month(1));
        assert_eq!("jUNE".parse::<MonthSelector>().unwrap(), MonthSelector::Month(6));
    }

    #[test]
    fn test_month_outside_covered_range_rejected() {
        let err = "july".parse::<MonthSelector>().unwrap_err();
        assert!(err.is_validation());
        assert!("jan".parse::<MonthSelector>().is_err());
        assert!("".parse::<MonthSelector>().is_err());
    }

    #[test]
    fn test_weekday_selector_parsing() {
        assert_eq!("all".parse::<WeekdaySelector>().unwrap(), WeekdaySelector::All);
        assert_eq!(
            "tuesday".parse::<WeekdaySelector>().unwrap(),
            WeekdaySelector::Day(Weekday::Tue)
        );
        assert_eq!(
            "SUNDAY".parse::<WeekdaySelector>().unwrap(),
            WeekdaySelector::Day(Weekday::Sun)
        );
        assert!("tues".parse::<WeekdaySelector>().unwrap_err().is_validation());
        assert!("funday".parse::<WeekdaySelector>().is_err());
    }

    #[test]
    fn test_selector_display() {
        assert_eq!(MonthSelector::Month(3).to_string(), "March");
        assert_eq!(WeekdaySelector::Day(Weekday::Fri).to_string(), "Friday");
        assert_eq!(MonthSelector::All.to_string(), "all");
    }

    #[test]
    fn test_all_all_is_identity() {
        let trips = sample();
        let filtered = filter(&trips, MonthSelector::All, WeekdaySelector::All);
        assert_eq!(filtered, trips);
    }

    #[test]
    fn test_weekday_filter_keeps_matching_records() {
        let trips = collection(vec![
            trip((2017, 1, 2), 8, "A", "B", 60.0),
            trip((2017, 1, 3), 9, "B", "C", 60.0),
            trip((2017, 1, 10), 10, "C", "A", 60.0),
        ]);
        let filtered = filter_by_names(&trips, "all", "Tuesday").unwrap();
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.weekday_name() == "Tuesday"));
    }

    #[test]
    fn test_month_filter_preserves_order() {
        let trips = sample();
        let filtered = filter_by_names(&trips, "January", "all").unwrap();
        let stations: Vec<&str> = filtered.iter().map(|r| r.start_station.as_str()).collect();
        assert_eq!(stations, vec!["A", "B"]);
        assert!(filtered.iter().all(|r| r.month == 1));
    }

    #[test]
    fn test_axes_compose_as_and() {
        let trips = sample();
        let filtered = filter_by_names(&trips, "february", "tuesday").unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0].start_station, "C");

        let none = filter_by_names(&trips, "march", "tuesday").unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_sequential_filters_equal_combined() {
        let trips = sample();
        for month in MonthSelector::choices() {
            for day in WeekdaySelector::choices() {
                let m: MonthSelector = month.parse().unwrap();
                let d: WeekdaySelector = day.parse().unwrap();
                let stepwise = filter(&filter(&trips, m, WeekdaySelector::All), MonthSelector::All, d);
                assert_eq!(stepwise, filter(&trips, m, d), "month={month} day={day}");
            }
        }
    }

    #[test]
    fn test_source_untouched_and_invalid_selector_errors() {
        let trips = sample();
        assert!(filter_by_names(&trips, "july", "all").unwrap_err().is_validation());
        assert!(filter_by_names(&trips, "all", "someday").unwrap_err().is_validation());
        assert_eq!(trips.len(), 5);
    }
}
