//! CSV parser for bikeshare trip files.

use std::io::Read;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{BikeshareError, Result};
use crate::records::{DatasetCapabilities, TripCollection, TripRecord};

/// Fixed layout of the `Start Time` column.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Required columns as `(file header, snake_case alias)`.
const REQUIRED_COLUMNS: &[(&str, &str)] = &[
    ("Start Time", "start_time"),
    ("Start Station", "start_station"),
    ("End Station", "end_station"),
    ("Trip Duration", "trip_duration_seconds"),
    ("User Type", "user_type"),
];
const GENDER_COLUMN: (&str, &str) = ("Gender", "gender");
const BIRTH_YEAR_COLUMN: (&str, &str) = ("Birth Year", "birth_year");

/// How the parser reacts to a malformed row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// The first malformed row aborts the load.
    #[default]
    Strict,
    /// Malformed rows are skipped and reported in [`LoadOutcome::rejected`].
    Collect,
}

/// Result of a successful load: the collection plus any rows rejected under
/// [`LoadPolicy::Collect`].
#[derive(Debug)]
pub struct LoadOutcome {
    pub collection: TripCollection,
    pub rejected: Vec<BikeshareError>,
}

/// One row as it appears in the file, before validation.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time", alias = "start_time")]
    start_time: String,
    #[serde(rename = "Start Station", alias = "start_station")]
    start_station: String,
    #[serde(rename = "End Station", alias = "end_station")]
    end_station: String,
    #[serde(rename = "Trip Duration", alias = "trip_duration_seconds")]
    trip_duration: String,
    #[serde(rename = "User Type", alias = "user_type")]
    user_type: String,
    #[serde(rename = "Gender", alias = "gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", alias = "birth_year", default)]
    birth_year: Option<String>,
}

/// Parses a trip CSV for `city` into a [`TripCollection`].
///
/// Column presence for gender and birth year is decided from the header row
/// alone. Extra columns are ignored.
///
/// # Errors
///
/// Returns [`BikeshareError::Parse`] if a required column is missing, or,
/// under [`LoadPolicy::Strict`], for the first row that fails validation.
pub fn parse_trips<R: Read>(city: &str, reader: R, policy: LoadPolicy) -> Result<LoadOutcome> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let has_column =
        |(name, alias): (&str, &str)| headers.iter().any(|h| h == name || h == alias);

    for &column in REQUIRED_COLUMNS {
        if !has_column(column) {
            return Err(BikeshareError::parse(0, column.0, "required column is missing"));
        }
    }

    let capabilities = DatasetCapabilities {
        has_gender: has_column(GENDER_COLUMN),
        has_birth_year: has_column(BIRTH_YEAR_COLUMN),
    };
    debug!(city, ?capabilities, "Trip file header read");

    let mut records = Vec::new();
    let mut rejected = Vec::new();

    for (index, result) in rdr.deserialize::<RawTrip>().enumerate() {
        let line = index as u64 + 1;
        let parsed = result
            .map_err(|e| BikeshareError::parse(line, "<row>", e.to_string()))
            .and_then(|raw| raw.into_record(line));

        match parsed {
            Ok(record) => records.push(record),
            Err(e) if policy == LoadPolicy::Collect => {
                warn!(city, line, error = %e, "Skipping malformed trip row");
                rejected.push(e);
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        city,
        records = records.len(),
        rejected = rejected.len(),
        "Trip file parsed"
    );

    Ok(LoadOutcome {
        collection: TripCollection::new(city, capabilities, records),
        rejected,
    })
}

impl RawTrip {
    fn into_record(self, line: u64) -> Result<TripRecord> {
        let start_time = parse_start_time(&self.start_time, line)?;
        let start_station = required(self.start_station, line, "Start Station")?;
        let end_station = required(self.end_station, line, "End Station")?;
        let duration = parse_duration(&self.trip_duration, line)?;
        let user_type = required(self.user_type, line, "User Type")?;
        let birth_year = self
            .birth_year
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(|value| parse_birth_year(value, line))
            .transpose()?;

        Ok(
            TripRecord::new(start_time, start_station, end_station, duration, user_type)
                .with_gender(self.gender.filter(|g| !g.is_empty()))
                .with_birth_year(birth_year),
        )
    }
}

fn required(value: String, line: u64, field: &str) -> Result<String> {
    if value.is_empty() {
        Err(BikeshareError::parse(line, field, "missing value"))
    } else {
        Ok(value)
    }
}

fn parse_start_time(value: &str, line: u64) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, START_TIME_FORMAT).map_err(|e| {
        BikeshareError::parse(
            line,
            "Start Time",
            format!("'{value}' does not match {START_TIME_FORMAT}: {e}"),
        )
    })
}

fn parse_duration(value: &str, line: u64) -> Result<f64> {
    let seconds: f64 = value.parse().map_err(|_| {
        BikeshareError::parse(line, "Trip Duration", format!("'{value}' is not a number"))
    })?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(BikeshareError::parse(
            line,
            "Trip Duration",
            format!("'{value}' is not a non-negative duration"),
        ));
    }
    Ok(seconds)
}

// Birth years arrive as `1989` or, from float-typed exports, `1989.0`.
fn parse_birth_year(value: &str, line: u64) -> Result<i32> {
    let invalid =
        || BikeshareError::parse(line, "Birth Year", format!("'{value}' is not a year"));

    let year: f64 = value.parse().map_err(|_| invalid())?;
    if year.fract() != 0.0 || year < i32::MIN as f64 || year > i32::MAX as f64 {
        return Err(invalid());
    }
    Ok(year as i32)
}
