//! Derives the month, weekday and hour of every trip from its start time.

use chrono::{Datelike, Timelike, Weekday};

use crate::dataset::TripRecord;

/// A loaded [`TripRecord`] plus the fields derived from its `start_time`.
///
/// Borrows the record, so the loaded dataset is never modified and can be
/// filtered again with different settings.
#[derive(Debug, Clone, Copy)]
pub struct Trip<'a> {
    pub record: &'a TripRecord,
    /// 1 = January.
    pub month: u32,
    pub day_of_week: Weekday,
    /// 0..=23
    pub hour: u32,
}

impl<'a> Trip<'a> {
    pub fn from_record(record: &'a TripRecord) -> Self {
        let start = record.start_time;
        Trip {
            record,
            month: start.month(),
            day_of_week: start.weekday(),
            hour: start.hour(),
        }
    }
}

pub fn normalize(records: &[TripRecord]) -> Vec<Trip<'_>> {
    records.iter().map(Trip::from_record).collect()
}

/// Calendar order, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday, e.g. `Monday`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn record(start: &str, end: &str) -> TripRecord {
        let parse = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
        TripRecord {
            start_time: parse(start),
            end_time: parse(end),
            start_station: "A".into(),
            end_station: "B".into(),
            user_type: "Subscriber".into(),
            gender: None,
            birth_year: None,
        }
    }

    #[test]
    fn test_derived_fields_come_from_start_time() {
        // Ends on a different month, day and hour than it starts.
        let records = vec![record("2017-01-31 23:50:00", "2017-02-01 00:20:00")];
        let trips = normalize(&records);

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].month, 1);
        assert_eq!(trips[0].day_of_week, Weekday::Tue);
        assert_eq!(trips[0].hour, 23);
    }

    #[test]
    fn test_normalize_keeps_order_and_records() {
        let records = vec![
            record("2017-01-02 08:00:00", "2017-01-02 08:15:00"),
            record("2017-06-04 14:00:00", "2017-06-04 14:05:00"),
        ];
        let trips = normalize(&records);

        assert!(std::ptr::eq(trips[0].record, &records[0]));
        assert!(std::ptr::eq(trips[1].record, &records[1]));
        assert_eq!(trips[1].month, 6);
        assert_eq!(weekday_name(trips[1].day_of_week), "Sunday");
    }
}
