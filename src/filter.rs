//! Narrowing a normalized trip set by month and/or day of week.
//!
//! Both axes are independent and compose by conjunction; `all` disables an axis.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Serialize, Serializer};

use crate::dataset::City;
use crate::error::BikeshareError;
use crate::normalize::{Trip, WEEKDAYS, weekday_name};

/// Month names accepted by the month filter. Position + 1 is the month number.
pub const MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    /// 1-based month number within [`MONTHS`].
    Only(u32),
}

impl MonthFilter {
    pub fn matches(&self, trip: &Trip<'_>) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => trip.month == *m,
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(MonthFilter::All);
        }
        MONTHS
            .iter()
            .position(|m| *m == wanted)
            .map(|i| MonthFilter::Only(i as u32 + 1))
            .ok_or(BikeshareError::InvalidFilter {
                axis: "month",
                value: wanted,
            })
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Only(m) => {
                let name = (*m as usize)
                    .checked_sub(1)
                    .and_then(|i| MONTHS.get(i))
                    .copied()
                    .unwrap_or("unknown");
                f.write_str(name)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    pub fn matches(&self, trip: &Trip<'_>) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(day) => trip.day_of_week == *day,
        }
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|d| weekday_name(*d).eq_ignore_ascii_case(&wanted))
            .map(DayFilter::Only)
            .ok_or(BikeshareError::InvalidFilter {
                axis: "day",
                value: wanted,
            })
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Only(day) => f.write_str(&weekday_name(*day).to_lowercase()),
        }
    }
}

macro_rules! serialize_as_display {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }
    };
}

serialize_as_display!(MonthFilter);
serialize_as_display!(DayFilter);

/// The city and filter axes chosen for one session iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSpec {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }
}

/// Keeps the trips matching both axes, preserving input order.
pub fn filter_trips<'a>(trips: &[Trip<'a>], month: MonthFilter, day: DayFilter) -> Vec<Trip<'a>> {
    trips
        .iter()
        .filter(|t| month.matches(t) && day.matches(t))
        .copied()
        .collect()
}
