//! Trip datasets: the supported cities, the record type, and loading.
//!
//! [`DatasetConfig`] maps each [`City`] to its backing CSV resource.
//! [`Loader`] resolves a city through that map and parses every row into a
//! [`TripRecord`]. Loaded records are never mutated; derived fields live in
//! [`crate::normalize::Trip`].

mod config;
mod loader;

pub use config::DatasetConfig;
pub use loader::{Loader, read_trips};

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::error::BikeshareError;

/// One of the three cities with bikeshare data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum City {
    #[serde(rename = "chicago")]
    Chicago,
    #[serde(rename = "new york city")]
    NewYorkCity,
    #[serde(rename = "washington")]
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// The lower-case name users type at the prompt.
    pub fn name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File stem of the city's resource inside a data directory.
    pub fn file_stem(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new_york_city",
            City::Washington => "washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or(BikeshareError::UnknownCity(wanted))
    }
}

/// A single bicycle rental as read from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

impl TripRecord {
    /// `end_time - start_time`. May be negative for bad source rows.
    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }
}

/// All trips loaded for one city.
#[derive(Debug, Clone)]
pub struct TripDataset {
    pub city: City,
    /// True when the resource carries both `Gender` and `Birth Year` columns.
    pub has_demographics: bool,
    pub records: Vec<TripRecord>,
}
