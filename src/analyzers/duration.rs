use crate::analyzers::types::DurationStats;
use crate::analyzers::utility::require_trips;
use crate::error::Result;
use crate::records::TripCollection;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Total trip time in whole hours and mean trip time in whole minutes.
/// Both figures are truncated, never rounded.
#[tracing::instrument(skip_all, fields(city = trips.city(), records = trips.len()))]
pub fn duration_stats(trips: &TripCollection) -> Result<DurationStats> {
    require_trips(trips, "duration statistics")?;

    let total_seconds: f64 = trips.iter().map(|r| r.trip_duration_seconds).sum();
    let mean_seconds = total_seconds / trips.len() as f64;

    Ok(DurationStats {
        total_seconds,
        mean_seconds,
        total_hours: (total_seconds / SECONDS_PER_HOUR).trunc() as u64,
        mean_minutes: (mean_seconds / SECONDS_PER_MINUTE).trunc() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BikeshareError;
    use crate::records::fixtures::{collection, trip};

    fn trips_with(durations: &[f64]) -> TripCollection {
        collection(
            durations
                .iter()
                .map(|d| trip((2017, 4, 1), 12, "A", "B", *d))
                .collect(),
        )
    }

    #[test]
    fn test_short_trips_truncate_to_zero_hours() {
        let stats = duration_stats(&trips_with(&[60.0, 180.0, 120.0])).unwrap();
        assert_eq!(stats.total_seconds, 360.0);
        assert_eq!(stats.mean_seconds, 120.0);
        assert_eq!(stats.total_hours, 0);
        assert_eq!(stats.mean_minutes, 2);
    }

    #[test]
    fn test_truncation_not_rounding() {
        // 7199s total = 1.9997h, mean 3599.5s = 59.99min
        let stats = duration_stats(&trips_with(&[3599.0, 3600.0])).unwrap();
        assert_eq!(stats.total_hours, 1);
        assert_eq!(stats.mean_minutes, 59);
    }

    #[test]
    fn test_fractional_durations() {
        let stats = duration_stats(&trips_with(&[489.066, 1610.5, 7200.434])).unwrap();
        assert_eq!(stats.total_hours, 2);
        assert_eq!(stats.mean_minutes, 51);
    }

    #[test]
    fn test_duration_stats_empty() {
        let err = duration_stats(&trips_with(&[])).unwrap_err();
        assert!(matches!(
            err,
            BikeshareError::EmptyResult {
                statistic: "duration statistics"
            }
        ));
    }
}
