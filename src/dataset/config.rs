use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::City;

/// Maps each city to the CSV resource holding its trips.
///
/// Passed to [`super::Loader::new`], so tests can point a city at a
/// synthetic file:
/// ```no_run
/// use bikeshare_explorer::dataset::{City, DatasetConfig};
///
/// let config = DatasetConfig::from_data_dir("data")
///     .with_resource(City::Washington, "/tmp/washington_sample.csv");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DatasetConfig {
    resources: BTreeMap<City, PathBuf>,
}

impl DatasetConfig {
    /// An empty mapping. Every city is unknown until added.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard layout: `<dir>/chicago.csv`, `<dir>/new_york_city.csv`,
    /// `<dir>/washington.csv`. A `.csv.gz` sibling is used when the plain
    /// file does not exist.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let resources = City::ALL
            .into_iter()
            .map(|city| {
                let plain = dir.join(format!("{}.csv", city.file_stem()));
                let gzipped = dir.join(format!("{}.csv.gz", city.file_stem()));
                let path = if !plain.exists() && gzipped.exists() {
                    gzipped
                } else {
                    plain
                };
                (city, path)
            })
            .collect();
        Self { resources }
    }

    /// Points `city` at `path`, replacing any existing entry.
    pub fn with_resource(mut self, city: City, path: impl Into<PathBuf>) -> Self {
        self.resources.insert(city, path.into());
        self
    }

    /// Returns the resource configured for `city`, if any.
    pub fn resource(&self, city: City) -> Option<&Path> {
        self.resources.get(&city).map(PathBuf::as_path)
    }

    /// Iterates over all `(city, resource)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (City, &Path)> {
        self.resources.iter().map(|(c, p)| (*c, p.as_path()))
    }
}
