use chrono::TimeDelta;
use tracing::debug;

use crate::analyzers::types::{
    BirthYearStats, Demographics, DurationStats, Mode, StationStats, TimeStats, UserStats,
};
use crate::analyzers::utility::{mode, value_counts};
use crate::error::{BikeshareError, Result};
use crate::normalize::{Trip, WEEKDAYS, weekday_name};

/// Most frequent month, weekday and start hour. `None` for an empty trip set.
#[tracing::instrument(skip_all, fields(trips = trips.len()))]
pub fn time_stats(trips: &[Trip<'_>]) -> Option<TimeStats> {
    let popular_month = mode(trips.iter().map(|t| t.month))?;
    let popular_hour = mode(trips.iter().map(|t| t.hour))?;

    // Keyed by calendar position so ties resolve Monday first.
    let day = mode(trips.iter().map(|t| t.day_of_week.num_days_from_monday()))?;
    let popular_day = Mode {
        value: weekday_name(WEEKDAYS[day.value as usize]).to_string(),
        count: day.count,
    };

    Some(TimeStats {
        popular_month,
        popular_day,
        popular_hour,
    })
}

/// Most used start station, end station and start/end combination.
#[tracing::instrument(skip_all, fields(trips = trips.len()))]
pub fn station_stats(trips: &[Trip<'_>]) -> Option<StationStats> {
    let owned = |m: Mode<&str>| Mode {
        value: m.value.to_string(),
        count: m.count,
    };

    let popular_start_station = mode(trips.iter().map(|t| t.record.start_station.as_str()))?;
    let popular_end_station = mode(trips.iter().map(|t| t.record.end_station.as_str()))?;
    let popular_route = mode(trips.iter().map(route_key))?;

    Some(StationStats {
        popular_start_station: owned(popular_start_station),
        popular_end_station: owned(popular_end_station),
        popular_route,
    })
}

/// Route identity used for the popular-trip statistic.
///
/// Plain concatenation with a space, so distinct station pairs can collide
/// when a station name itself contains the separator.
pub fn route_key(trip: &Trip<'_>) -> String {
    format!("{} {}", trip.record.start_station, trip.record.end_station)
}

/// Total and mean of `end_time - start_time`.
///
/// # Errors
///
/// Returns [`BikeshareError::EmptyResultSet`] when `trips` is empty, since the
/// mean is undefined.
#[tracing::instrument(skip_all, fields(trips = trips.len()))]
pub fn duration_stats(trips: &[Trip<'_>]) -> Result<DurationStats> {
    if trips.is_empty() {
        return Err(BikeshareError::EmptyResultSet);
    }

    let total = trips
        .iter()
        .fold(TimeDelta::zero(), |acc, t| acc + t.record.duration());
    let mean = TimeDelta::milliseconds(total.num_milliseconds() / trips.len() as i64);

    Ok(DurationStats {
        trip_count: trips.len(),
        total,
        mean,
    })
}

/// User type counts plus, when the dataset carries the columns, gender counts
/// and birth-year extremes.
///
/// Branches on `has_demographics` (a property of the dataset schema), never on
/// the city.
#[tracing::instrument(skip_all, fields(trips = trips.len(), has_demographics = has_demographics))]
pub fn user_stats(trips: &[Trip<'_>], has_demographics: bool) -> UserStats {
    let user_types = value_counts(trips.iter().map(|t| t.record.user_type.as_str()));

    let demographics = has_demographics.then(|| {
        let genders = value_counts(trips.iter().filter_map(|t| t.record.gender.as_deref()));
        let birth_years = birth_year_stats(trips);
        if birth_years.is_none() {
            debug!("No usable birth years in selection");
        }
        Demographics {
            genders,
            birth_years,
        }
    });

    UserStats {
        user_types,
        demographics,
    }
}

fn birth_year_stats(trips: &[Trip<'_>]) -> Option<BirthYearStats> {
    let years: Vec<i32> = trips.iter().filter_map(|t| t.record.birth_year).collect();

    Some(BirthYearStats {
        earliest: *years.iter().min()?,
        latest: *years.iter().max()?,
        most_common: mode(years.iter().copied())?,
    })
}
