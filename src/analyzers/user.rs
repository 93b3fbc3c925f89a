use std::collections::BTreeMap;

use crate::analyzers::types::{Availability, BirthYearStats, UnavailableReason, UserStats};
use crate::analyzers::utility::{counts, mode, require_trips};
use crate::error::Result;
use crate::records::TripCollection;

/// Trips per user type, alphabetical.
pub fn user_type_counts(trips: &TripCollection) -> BTreeMap<String, usize> {
    counts(trips.iter().map(|r| r.user_type.as_str()))
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Trips per gender, or why the breakdown is unavailable.
/// Trips with a blank gender are not counted.
pub fn gender_counts(trips: &TripCollection) -> Availability<BTreeMap<String, usize>> {
    if !trips.capabilities().has_gender {
        return Availability::Unavailable(UnavailableReason::MissingColumn);
    }

    let counts: BTreeMap<String, usize> = counts(trips.iter().filter_map(|r| r.gender.as_deref()))
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

    if counts.is_empty() {
        Availability::Unavailable(UnavailableReason::NoValues)
    } else {
        Availability::Available(counts)
    }
}

/// Earliest, most recent and most common birth year among trips that
/// report one.
pub fn birth_year_stats(trips: &TripCollection) -> Availability<BirthYearStats> {
    if !trips.capabilities().has_birth_year {
        return Availability::Unavailable(UnavailableReason::MissingColumn);
    }

    let years: Vec<i32> = trips.iter().filter_map(|r| r.birth_year).collect();

    match (years.iter().min(), years.iter().max(), mode(years.iter().copied())) {
        (Some(&earliest), Some(&most_recent), Some(most_common)) => {
            Availability::Available(BirthYearStats {
                earliest,
                most_recent,
                most_common,
            })
        }
        _ => Availability::Unavailable(UnavailableReason::NoValues),
    }
}

/// User type, gender and birth year breakdowns.
///
/// A missing gender or birth-year column only marks that part unavailable;
/// the user type counts are always produced.
#[tracing::instrument(skip_all, fields(city = trips.city(), records = trips.len()))]
pub fn user_stats(trips: &TripCollection) -> Result<UserStats> {
    require_trips(trips, "user statistics")?;

    Ok(UserStats {
        user_types: user_type_counts(trips),
        gender: gender_counts(trips),
        birth_year: birth_year_stats(trips),
    })
}
