use tracing::{info, warn};

use crate::analyzers::aggregate::{duration_stats, station_stats, time_stats, user_stats};
use crate::analyzers::types::TripReport;
use crate::dataset::{Loader, TripDataset};
use crate::error::Result;
use crate::filter::{DayFilter, FilterSpec, MonthFilter, filter_trips};
use crate::normalize::normalize;

/// Loads the city in `spec`, then filters and summarizes it.
///
/// Only loading can fail. Empty selections still produce a report.
pub fn run(loader: &Loader, spec: &FilterSpec) -> Result<TripReport> {
    let dataset = loader.load(spec.city)?;
    Ok(analyze(&dataset, spec.month, spec.day))
}

/// Normalizes, filters and aggregates an already loaded dataset.
#[tracing::instrument(skip_all, fields(city = %dataset.city, month = %month, day = %day))]
pub fn analyze(dataset: &TripDataset, month: MonthFilter, day: DayFilter) -> TripReport {
    let trips = normalize(&dataset.records);
    let selected = filter_trips(&trips, month, day);

    info!(
        loaded = trips.len(),
        selected = selected.len(),
        "Trips filtered"
    );

    let duration = match duration_stats(&selected) {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!(error = %e, "Trip duration statistics unavailable");
            None
        }
    };

    TripReport {
        city: dataset.city,
        month,
        day,
        trip_count: selected.len(),
        time: time_stats(&selected),
        stations: station_stats(&selected),
        duration,
        users: user_stats(&selected, dataset.has_demographics),
    }
}
