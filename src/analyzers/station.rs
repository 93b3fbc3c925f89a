use crate::analyzers::types::{Route, StationStats};
use crate::analyzers::utility::{mode, require_trips};
use crate::error::{BikeshareError, Result};
use crate::records::TripCollection;

/// Most used start station, end station and start/end pair.
/// Ties resolve to the alphabetically smallest name (or pair).
#[tracing::instrument(skip_all, fields(city = trips.city(), records = trips.len()))]
pub fn station_stats(trips: &TripCollection) -> Result<StationStats> {
    require_trips(trips, "station statistics")?;

    let start = mode(trips.iter().map(|r| r.start_station.as_str()));
    let end = mode(trips.iter().map(|r| r.end_station.as_str()));
    let route = mode(
        trips
            .iter()
            .map(|r| (r.start_station.as_str(), r.end_station.as_str())),
    );

    match (start, end, route) {
        (Some(start), Some(end), Some(route)) => Ok(StationStats {
            popular_start_station: start.map(str::to_string),
            popular_end_station: end.map(str::to_string),
            popular_route: route.map(|(start, end)| Route {
                start: start.to_string(),
                end: end.to_string(),
            }),
        }),
        _ => Err(BikeshareError::EmptyResult {
            statistic: "station statistics",
        }),
    }
}
