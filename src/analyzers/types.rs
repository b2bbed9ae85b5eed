//! Result types produced by the statistic groups.

use chrono::TimeDelta;
use serde::{Serialize, Serializer};

use crate::dataset::City;
use crate::filter::{DayFilter, MonthFilter};

/// The most frequent value of a column and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mode<T> {
    pub value: T,
    pub count: usize,
}

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    /// 1 = January.
    pub popular_month: Mode<u32>,
    pub popular_day: Mode<String>,
    pub popular_hour: Mode<u32>,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub popular_start_station: Mode<String>,
    pub popular_end_station: Mode<String>,
    /// Start and end station joined by a single space.
    pub popular_route: Mode<String>,
}

/// Total and mean trip duration. Only exists for a non-empty trip set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    #[serde(rename = "total_seconds", serialize_with = "as_seconds")]
    pub total: TimeDelta,
    #[serde(rename = "mean_seconds", serialize_with = "as_seconds")]
    pub mean: TimeDelta,
}

fn as_seconds<S: Serializer>(d: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(d.num_milliseconds() as f64 / 1000.0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: Mode<i32>,
}

/// Gender and birth-year statistics, for datasets that carry those columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Demographics {
    pub genders: Vec<ValueCount>,
    /// `None` when no trip has a usable birth year.
    pub birth_years: Option<BirthYearStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<ValueCount>,
    /// `None` when the dataset has no demographic columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demographics: Option<Demographics>,
}

/// Everything computed for one city and filter selection.
///
/// A `None` group means there was no data to compute it from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
    pub trip_count: usize,
    pub time: Option<TimeStats>,
    pub stations: Option<StationStats>,
    pub duration: Option<DurationStats>,
    pub users: UserStats,
}
