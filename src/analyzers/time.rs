use crate::analyzers::types::TimeStats;
use crate::analyzers::utility::{mode, require_trips};
use crate::error::{BikeshareError, Result};
use crate::records::TripCollection;

/// Most common month, weekday and start hour.
///
/// Weekday ties resolve alphabetically by name, month and hour ties to the
/// lowest number.
#[tracing::instrument(skip_all, fields(city = trips.city(), records = trips.len()))]
pub fn time_stats(trips: &TripCollection) -> Result<TimeStats> {
    require_trips(trips, "time statistics")?;

    let month = mode(trips.iter().map(|r| r.month));
    let weekday = mode(trips.iter().map(|r| r.weekday_name()));
    let hour = mode(trips.iter().map(|r| r.hour));

    match (month, weekday, hour) {
        (Some(popular_month), Some(popular_weekday), Some(popular_hour)) => Ok(TimeStats {
            popular_month,
            popular_weekday,
            popular_hour,
        }),
        _ => Err(BikeshareError::EmptyResult {
            statistic: "time statistics",
        }),
    }
}
