//! Output formatting for trip reports.
//!
//! Supports the human-readable console report, pretty-printed JSON and a
//! debug dump to the log.

use std::fmt;

use anyhow::Result;
use chrono::{Month, TimeDelta};
use tracing::debug;

use crate::analyzers::types::{Mode, TripReport, UserStats, ValueCount};

const RULE: &str = "--------------------------------------------------------------------------------";
const NO_DATA: &str = "no data for this selection";

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &TripReport) {
    debug!("{:#?}", report);
}

/// Writes the report to stdout as pretty-printed JSON.
pub fn print_json(report: &TripReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes the human-readable report to stdout.
pub fn print_text(report: &TripReport) {
    print!("{}", TextReport(report));
}

/// Renders a [`TripReport`] as the console text report.
pub struct TextReport<'a>(pub &'a TripReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;

        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "City: {} | Month: {} | Day: {} | Trips: {}",
            r.city, r.month, r.day, r.trip_count
        )?;
        writeln!(f, "{RULE}")?;

        writeln!(f, "\nThe Most Frequent Times of Travel\n")?;
        match &r.time {
            Some(t) => {
                writeln!(
                    f,
                    "Most popular month: {}",
                    with_count(&month_label(t.popular_month.value), &t.popular_month)
                )?;
                writeln!(
                    f,
                    "Most popular day: {}",
                    with_count(&t.popular_day.value, &t.popular_day)
                )?;
                writeln!(
                    f,
                    "Most popular start hour: {}",
                    with_count(&t.popular_hour.value.to_string(), &t.popular_hour)
                )?;
            }
            None => writeln!(f, "{NO_DATA}")?,
        }

        writeln!(f, "\nThe Most Popular Stations and Trip\n")?;
        match &r.stations {
            Some(s) => {
                writeln!(
                    f,
                    "Most commonly used start station: {}",
                    with_count(&s.popular_start_station.value, &s.popular_start_station)
                )?;
                writeln!(
                    f,
                    "Most commonly used end station: {}",
                    with_count(&s.popular_end_station.value, &s.popular_end_station)
                )?;
                writeln!(
                    f,
                    "Most common start and end station combination: {}",
                    with_count(&s.popular_route.value, &s.popular_route)
                )?;
            }
            None => writeln!(f, "{NO_DATA}")?,
        }

        writeln!(f, "\nTrip Duration\n")?;
        match &r.duration {
            Some(d) => {
                writeln!(f, "Total travel time: {}", format_duration(d.total))?;
                writeln!(f, "Mean travel time: {}", format_duration(d.mean))?;
            }
            None => writeln!(f, "{NO_DATA} (mean travel time is undefined)")?,
        }

        writeln!(f, "\nUser Stats\n")?;
        write_users(f, &r.users)?;

        writeln!(f, "{RULE}")
    }
}

fn write_users(f: &mut fmt::Formatter<'_>, users: &UserStats) -> fmt::Result {
    writeln!(f, "Counts of user types:")?;
    write_table(f, &users.user_types)?;

    // Datasets without demographic columns omit these sections entirely.
    let Some(demo) = &users.demographics else {
        return Ok(());
    };

    writeln!(f, "\nCounts of gender:")?;
    write_table(f, &demo.genders)?;

    writeln!(f, "\nYear of birth:")?;
    match &demo.birth_years {
        Some(b) => {
            writeln!(f, "  Earliest: {}", b.earliest)?;
            writeln!(f, "  Most recent: {}", b.latest)?;
            writeln!(
                f,
                "  Most common: {}",
                with_count(&b.most_common.value.to_string(), &b.most_common)
            )?;
        }
        None => writeln!(f, "  {NO_DATA}")?,
    }
    Ok(())
}

fn write_table(f: &mut fmt::Formatter<'_>, table: &[ValueCount]) -> fmt::Result {
    if table.is_empty() {
        return writeln!(f, "  {NO_DATA}");
    }
    let width = table.iter().map(|v| v.value.chars().count()).max().unwrap_or(0);
    for row in table {
        writeln!(f, "  {:<width$}  {}", row.value, row.count)?;
    }
    Ok(())
}

fn with_count<T>(label: &str, mode: &Mode<T>) -> String {
    format!("{label} (count: {})", mode.count)
}

fn month_label(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| month.to_string())
}

/// Formats a duration as `<days> days HH:MM:SS`, adding `.mmm` when the
/// duration has a millisecond part.
pub fn format_duration(d: TimeDelta) -> String {
    let sign = if d < TimeDelta::zero() { "-" } else { "" };
    let total_ms = d.num_milliseconds().unsigned_abs();

    let millis = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    let mut out = format!("{sign}{days} days {hours:02}:{minutes:02}:{seconds:02}");
    if millis != 0 {
        out.push_str(&format!(".{millis:03}"));
    }
    out
}
