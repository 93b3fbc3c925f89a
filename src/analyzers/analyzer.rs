use tracing::info;

use crate::analyzers::types::TripReport;
use crate::analyzers::{duration_stats, station_stats, time_stats, user_stats};
use crate::error::Result;
use crate::filter::{MonthSelector, WeekdaySelector};
use crate::records::TripCollection;

/// Runs every statistic group over `trips` and bundles the results.
///
/// `month` and `weekday` are the selectors that produced `trips`; they are
/// recorded in the report, not re-applied.
///
/// # Errors
///
/// Returns [`BikeshareError::EmptyResult`] if `trips` is empty.
///
/// [`BikeshareError::EmptyResult`]: crate::error::BikeshareError::EmptyResult
#[tracing::instrument(skip(trips), fields(city = trips.city(), records = trips.len()))]
pub fn analyze(
    trips: &TripCollection,
    month: MonthSelector,
    weekday: WeekdaySelector,
) -> Result<TripReport> {
    let report = TripReport {
        city: trips.city().to_string(),
        month: month.to_string(),
        weekday: weekday.to_string(),
        trips: trips.len(),
        time: time_stats(trips)?,
        station: station_stats(trips)?,
        duration: duration_stats(trips)?,
        user: user_stats(trips)?,
    };

    info!(
        city = %report.city,
        trips = report.trips,
        gender = report.user.gender.is_available(),
        birth_year = report.user.birth_year.is_available(),
        "Trip statistics computed"
    );
    Ok(report)
}
