//! Typed trip records and the collections the pipeline passes around.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Month names in calendar order, index 0 = January.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a weekday, independent of the process locale.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// English name of a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get((month as usize).checked_sub(1)?).copied()
}

/// A single bikeshare trip. Built once by the loader and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    pub trip_duration_seconds: f64,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    // derived from start_time at construction
    pub month: u32,
    pub weekday: Weekday,
    pub hour: u32,
}

impl TripRecord {
    pub fn new(
        start_time: NaiveDateTime,
        start_station: String,
        end_station: String,
        trip_duration_seconds: f64,
        user_type: String,
    ) -> Self {
        TripRecord {
            start_time,
            start_station,
            end_station,
            trip_duration_seconds,
            user_type,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_year(mut self, birth_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self
    }

    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

/// Which optional columns the source dataset carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetCapabilities {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// Trips in file order, tagged with the city they came from and the
/// capabilities of that city's dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct TripCollection {
    city: String,
    capabilities: DatasetCapabilities,
    records: Vec<TripRecord>,
}

impl TripCollection {
    pub fn new(
        city: impl Into<String>,
        capabilities: DatasetCapabilities,
        records: Vec<TripRecord>,
    ) -> Self {
        TripCollection {
            city: city.into(),
            capabilities,
            records,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn capabilities(&self) -> DatasetCapabilities {
        self.capabilities
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    /// Builds a sibling collection (same city and capabilities) from `records`.
    pub(crate) fn derive(&self, records: Vec<TripRecord>) -> Self {
        TripCollection {
            city: self.city.clone(),
            capabilities: self.capabilities,
            records,
        }
    }
}

impl<'a> IntoIterator for &'a TripCollection {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
