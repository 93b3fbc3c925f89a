//! Presentation of reports and raw trip rows.
//!
//! Supports the console text layout, pretty-printing, JSON serialization and
//! CSV output of record pages.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use csv::WriterBuilder;
use tracing::{debug, info};

use crate::analyzers::types::{Availability, TripReport, UnavailableReason};
use crate::parser::START_TIME_FORMAT;
use crate::records::{DatasetCapabilities, TripRecord, month_name};

const RULE: &str = "----------------------------------------";

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &TripReport) {
    debug!("{:#?}", report);
}

/// Writes a report as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(mut writer: W, report: &TripReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    info!(city = %report.city, "Report written as JSON");
    Ok(())
}

/// Console text for a report, one section per statistic group.
pub fn render_report(report: &TripReport) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, r: &TripReport) -> std::fmt::Result {
    writeln!(
        out,
        "{} trips in {} (month: {}, day: {})",
        r.trips,
        title_case(&r.city),
        r.month,
        r.weekday
    )?;
    writeln!(out, "{RULE}")?;

    writeln!(out, "\nThe Most Frequent Times of Travel\n")?;
    let month = r.time.popular_month.value;
    writeln!(
        out,
        "The Most Common Month is: {}",
        month_name(month).unwrap_or("unknown")
    )?;
    writeln!(
        out,
        "Most Frequent Day of the Week is: {}",
        r.time.popular_weekday.value
    )?;
    writeln!(out, "Most Common Hour is: {}", r.time.popular_hour.value)?;
    writeln!(out, "{RULE}")?;

    writeln!(out, "\nThe Most Popular Stations and Trip\n")?;
    writeln!(
        out,
        "Most Frequently Used Starting Station is: {}",
        r.station.popular_start_station.value
    )?;
    writeln!(
        out,
        "Most Frequently Used End Station is: {}",
        r.station.popular_end_station.value
    )?;
    let route = &r.station.popular_route.value;
    writeln!(out, "The Busiest Route is: {} to {}", route.start, route.end)?;
    writeln!(out, "{RULE}")?;

    writeln!(out, "\nTrip Duration\n")?;
    writeln!(
        out,
        "Total Travel Time (in hours) for Your Selection is: {}",
        r.duration.total_hours
    )?;
    writeln!(
        out,
        "Average Travel Time (in minutes): {}",
        r.duration.mean_minutes
    )?;
    writeln!(out, "{RULE}")?;

    writeln!(out, "\nUser Stats\n")?;
    writeln!(out, "Count by User Type:")?;
    write_counts(out, &r.user.user_types)?;

    match &r.user.gender {
        Availability::Available(counts) => {
            writeln!(out, "Usage by Gender:")?;
            write_counts(out, counts)?;
        }
        Availability::Unavailable(reason) => {
            writeln!(out, "Gender data is not available ({}).", describe(*reason))?;
        }
    }

    match &r.user.birth_year {
        Availability::Available(years) => {
            writeln!(out, "Subscriber Birth Year Statistics:")?;
            writeln!(out, "Oldest Subscriber Birth Year: {}", years.earliest)?;
            writeln!(out, "Youngest Subscriber Birth Year: {}", years.most_recent)?;
            writeln!(out, "Most Common Birth Year: {}", years.most_common.value)?;
        }
        Availability::Unavailable(_) => {
            writeln!(out, "No additional birth year information exists!")?;
        }
    }
    writeln!(out, "{RULE}")
}

fn write_counts(out: &mut String, counts: &BTreeMap<String, usize>) -> std::fmt::Result {
    for (category, count) in counts {
        writeln!(out, "  {category}: {count}")?;
    }
    Ok(())
}

fn describe(reason: UnavailableReason) -> &'static str {
    match reason {
        UnavailableReason::MissingColumn => "not recorded for this city",
        UnavailableReason::NoValues => "no values in this selection",
    }
}

// "new york city" -> "New York City"
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes records as CSV rows with a header. Optional columns are included
/// only when the dataset has them.
pub fn write_rows<W: Write>(
    writer: W,
    records: &[TripRecord],
    capabilities: DatasetCapabilities,
) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    let mut header = vec![
        "Start Time",
        "Start Station",
        "End Station",
        "Trip Duration",
        "User Type",
    ];
    if capabilities.has_gender {
        header.push("Gender");
    }
    if capabilities.has_birth_year {
        header.push("Birth Year");
    }
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.start_time.format(START_TIME_FORMAT).to_string(),
            record.start_station.clone(),
            record.end_station.clone(),
            record.trip_duration_seconds.to_string(),
            record.user_type.clone(),
        ];
        if capabilities.has_gender {
            row.push(record.gender.clone().unwrap_or_default());
        }
        if capabilities.has_birth_year {
            row.push(record.birth_year.map(|y| y.to_string()).unwrap_or_default());
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    debug!(rows = records.len(), "Trip rows written");
    Ok(())
}
