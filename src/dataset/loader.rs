use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::{debug, info};

use super::{City, DatasetConfig, TripDataset, TripRecord};
use crate::error::{BikeshareError, Result};
use crate::parser::{parse_birth_year, parse_timestamp};

const REQUIRED_COLUMNS: &[&str] = &[
    "Start Time",
    "End Time",
    "Start Station",
    "End Station",
    "User Type",
];
const GENDER_COLUMN: &str = "Gender";
const BIRTH_YEAR_COLUMN: &str = "Birth Year";

/// A single row deserialized from a city CSV. Unknown columns (such as the
/// unnamed index column of the published files) are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type")]
    user_type: String,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

/// Loads trip datasets through a [`DatasetConfig`].
pub struct Loader {
    config: DatasetConfig,
}

impl Loader {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    /// Reads and parses every trip for `city`.
    ///
    /// # Errors
    ///
    /// * [`BikeshareError::UnknownCity`] if the config has no resource for `city`.
    /// * [`BikeshareError::Io`] if the resource cannot be opened.
    /// * [`BikeshareError::MalformedDataset`] if any row fails to parse.
    #[tracing::instrument(skip_all, fields(city = %city))]
    pub fn load(&self, city: City) -> Result<TripDataset> {
        let path = self
            .config
            .resource(city)
            .ok_or_else(|| BikeshareError::UnknownCity(city.to_string()))?;

        let file = File::open(path).map_err(|source| BikeshareError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let resource = path.display().to_string();
        let dataset = if is_gzip(path) {
            debug!(resource = %resource, "Decoding gzip resource");
            read_trips(city, &resource, GzDecoder::new(file))?
        } else {
            read_trips(city, &resource, file)?
        };

        info!(
            rows = dataset.records.len(),
            has_demographics = dataset.has_demographics,
            "Dataset loaded"
        );
        Ok(dataset)
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("gz")
}

/// Parses a city CSV from any reader. `resource` names the source in errors.
///
/// Rows are numbered from 1, excluding the header; header problems are row 0.
pub fn read_trips<R: Read>(city: City, resource: &str, reader: R) -> Result<TripDataset> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| BikeshareError::malformed(resource, 0, e.to_string()))?
        .clone();
    let has_column = |name: &str| headers.iter().any(|h| h == name);

    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !has_column(**c)) {
        return Err(BikeshareError::malformed(
            resource,
            0,
            format!("missing column '{missing}'"),
        ));
    }
    let has_demographics = has_column(GENDER_COLUMN) && has_column(BIRTH_YEAR_COLUMN);

    let mut records = Vec::new();

    for (i, result) in rdr.deserialize::<RawTrip>().enumerate() {
        let row = i + 1;
        let raw = result.map_err(|e| BikeshareError::malformed(resource, row, e.to_string()))?;
        records.push(to_record(raw, has_demographics).map_err(|reason| {
            BikeshareError::malformed(resource, row, reason)
        })?);
    }

    Ok(TripDataset {
        city,
        has_demographics,
        records,
    })
}

fn to_record(raw: RawTrip, has_demographics: bool) -> std::result::Result<TripRecord, String> {
    let start_time =
        parse_timestamp(&raw.start_time).map_err(|reason| format!("Start Time: {reason}"))?;
    let end_time =
        parse_timestamp(&raw.end_time).map_err(|reason| format!("End Time: {reason}"))?;

    let (gender, birth_year) = if has_demographics {
        (
            raw.gender.filter(|g| !g.trim().is_empty()),
            raw.birth_year.as_deref().and_then(parse_birth_year),
        )
    } else {
        (None, None)
    };

    Ok(TripRecord {
        start_time,
        end_time,
        start_station: required(raw.start_station, "Start Station")?,
        end_station: required(raw.end_station, "End Station")?,
        user_type: required(raw.user_type, "User Type")?,
        gender,
        birth_year,
    })
}

fn required(value: String, column: &str) -> std::result::Result<String, String> {
    if value.trim().is_empty() {
        Err(format!("{column}: missing value"))
    } else {
        Ok(value)
    }
}
