//! Descriptive statistics over trip collections.
//!
//! Each statistic group is a pure reduction over a [`TripCollection`]:
//! popular travel times, popular stations and routes, trip durations and
//! user breakdowns. Every mode resolves ties to the smallest key, and every
//! group fails with [`BikeshareError::EmptyResult`] on an empty collection.
//!
//! [`TripCollection`]: crate::records::TripCollection
//! [`BikeshareError::EmptyResult`]: crate::error::BikeshareError::EmptyResult

pub mod analyzer;
pub mod duration;
pub mod station;
pub mod time;
pub mod types;
pub mod user;
pub mod utility;

pub use analyzer::analyze;
pub use duration::duration_stats;
pub use station::station_stats;
pub use time::time_stats;
pub use user::{birth_year_stats, gender_counts, user_stats, user_type_counts};
