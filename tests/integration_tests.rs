use std::path::PathBuf;

use bikeshare_explorer::analyzers::analyzer::{analyze, run};
use bikeshare_explorer::analyzers::types::Mode;
use bikeshare_explorer::dataset::{City, DatasetConfig, Loader};
use bikeshare_explorer::error::BikeshareError;
use bikeshare_explorer::filter::{DayFilter, FilterSpec, MonthFilter, filter_trips};
use bikeshare_explorer::normalize::normalize;
use bikeshare_explorer::output::TextReport;
use chrono::{TimeDelta, Weekday};

fn fixtures_loader() -> Loader {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    Loader::new(DatasetConfig::from_data_dir(dir))
}

#[test]
fn test_full_pipeline_january() {
    let spec = FilterSpec::new(City::Chicago, MonthFilter::Only(1), DayFilter::All);
    let report = run(&fixtures_loader(), &spec).expect("Failed to build report");

    assert_eq!(report.trip_count, 3);

    let time = report.time.unwrap();
    assert_eq!(time.popular_month, Mode { value: 1, count: 3 });
    assert_eq!(time.popular_day.value, "Monday");
    assert_eq!(time.popular_day.count, 2);
    assert_eq!(time.popular_hour.value, 8);

    let stations = report.stations.unwrap();
    assert_eq!(stations.popular_start_station.value, "Canal St & Adams St");
    assert_eq!(
        stations.popular_route.value,
        "Canal St & Adams St Clinton St & Washington Blvd"
    );

    let duration = report.duration.unwrap();
    assert_eq!(duration.total, TimeDelta::minutes(37));
    assert_eq!(duration.mean, TimeDelta::milliseconds(740_000));

    let demo = report.users.demographics.unwrap();
    assert_eq!(demo.genders[0].value, "Male");
    assert_eq!(demo.genders[0].count, 2);
    let years = demo.birth_years.unwrap();
    assert_eq!(years.earliest, 1975);
    assert_eq!(years.latest, 1992);
    assert_eq!(years.most_common.value, 1975);
}

#[test]
fn test_all_all_returns_full_dataset() {
    let dataset = fixtures_loader().load(City::Chicago).unwrap();
    let trips = normalize(&dataset.records);
    let selected = filter_trips(&trips, MonthFilter::All, DayFilter::All);

    assert_eq!(selected.len(), dataset.records.len());
    assert_eq!(selected.len(), 5);
}

#[test]
fn test_filtering_is_conjunctive_on_real_rows() {
    let dataset = fixtures_loader().load(City::Chicago).unwrap();
    let trips = normalize(&dataset.records);

    for month in ["all", "january", "march", "june"] {
        for day in ["all", "monday", "wednesday", "sunday"] {
            let m: MonthFilter = month.parse().unwrap();
            let d: DayFilter = day.parse().unwrap();

            let direct = filter_trips(&trips, m, d);
            let by_month = filter_trips(&trips, m, DayFilter::All);
            let staged = filter_trips(&by_month, MonthFilter::All, d);
            assert_eq!(direct.len(), staged.len(), "{month}/{day}");
        }
    }
}

#[test]
fn test_pipeline_is_idempotent() {
    let loader = fixtures_loader();
    let spec = FilterSpec::new(
        City::NewYorkCity,
        MonthFilter::All,
        DayFilter::Only(Weekday::Wed),
    );

    let first = run(&loader, &spec).unwrap();
    let second = run(&loader, &spec).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.trip_count, 1);
}

#[test]
fn test_city_without_demographic_columns() {
    let dataset = fixtures_loader().load(City::Washington).unwrap();
    assert!(!dataset.has_demographics);

    let report = analyze(&dataset, MonthFilter::All, DayFilter::All);
    assert_eq!(report.trip_count, 3);
    assert!(report.users.demographics.is_none());
    assert_eq!(report.users.user_types[0].value, "Subscriber");
    assert_eq!(report.users.user_types[0].count, 2);

    let text = TextReport(&report).to_string();
    assert!(!text.contains("gender"));
    assert!(!text.contains("Year of birth"));
}

#[test]
fn test_demographics_follow_schema_not_city() {
    // Washington pointed at a file that does carry the demographic columns.
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let config = DatasetConfig::new().with_resource(City::Washington, dir.join("chicago.csv"));
    let dataset = Loader::new(config).load(City::Washington).unwrap();

    assert!(dataset.has_demographics);
    let report = analyze(&dataset, MonthFilter::All, DayFilter::All);
    assert!(report.users.demographics.is_some());
}

#[test]
fn test_empty_selection_degrades_per_group() {
    let spec = FilterSpec::new(City::Chicago, MonthFilter::Only(5), DayFilter::All);
    let report = run(&fixtures_loader(), &spec).unwrap();

    assert_eq!(report.trip_count, 0);
    assert!(report.time.is_none());
    assert!(report.stations.is_none());
    assert!(report.duration.is_none());
    assert!(report.users.user_types.is_empty());

    let demo = report.users.demographics.unwrap();
    assert!(demo.genders.is_empty());
    assert!(demo.birth_years.is_none());
}

#[test]
fn test_synthetic_dataset_injection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trips.csv");
    std::fs::write(
        &path,
        "Start Time,End Time,Start Station,End Station,User Type\n\
         2017-01-01 08:00:00,2017-01-01 08:15:00,A,B,Subscriber\n",
    )
    .unwrap();

    let loader = Loader::new(DatasetConfig::new().with_resource(City::Chicago, &path));
    let report = run(
        &loader,
        &FilterSpec::new(City::Chicago, MonthFilter::All, DayFilter::All),
    )
    .unwrap();

    let duration = report.duration.unwrap();
    assert_eq!(duration.total, TimeDelta::minutes(15));
    assert_eq!(duration.mean, TimeDelta::minutes(15));
    assert!(report.users.demographics.is_none());
}

#[test]
fn test_malformed_dataset_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(
        &path,
        "Start Time,End Time,Start Station,End Station,User Type\n\
         2017-01-01 08:00:00,2017-01-01 08:15:00,A,B,Subscriber\n\
         2017-01-01 09:00:00,garbage,A,B,Subscriber\n",
    )
    .unwrap();

    let loader = Loader::new(DatasetConfig::new().with_resource(City::Chicago, &path));
    let err = run(
        &loader,
        &FilterSpec::new(City::Chicago, MonthFilter::All, DayFilter::All),
    )
    .unwrap_err();

    assert!(matches!(err, BikeshareError::MalformedDataset { row: 2, .. }));
}

#[test]
fn test_unconfigured_city_is_unknown() {
    let loader = Loader::new(DatasetConfig::new());
    let err = loader.load(City::NewYorkCity).unwrap_err();
    assert!(matches!(err, BikeshareError::UnknownCity(_)));
}
