//! Cell parsers for the trip CSV resources.

use chrono::NaiveDateTime;

/// Formats accepted in the `Start Time` / `End Time` columns, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parses a trip timestamp such as `2017-01-01 08:00:00`.
///
/// # Errors
///
/// Returns a human-readable reason if none of the accepted formats match.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("empty timestamp".to_string());
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| format!("unparseable timestamp '{trimmed}'"))
}

/// Parses a `Birth Year` cell. The source files store years as floats (`1989.0`).
///
/// Returns `None` for empty, non-numeric or non-integral values; those are
/// excluded from the birth-year statistics rather than failing the load.
pub fn parse_birth_year(raw: &str) -> Option<i32> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < i32::MIN as f64 || value > i32::MAX as f64 {
        return None;
    }
    Some(value as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp_plain() {
        let ts = parse_timestamp("2017-01-01 08:00:00").unwrap();
        assert_eq!(ts.month(), 1);
        assert_eq!(ts.hour(), 8);
    }

    #[test]
    fn test_parse_timestamp_fractional_and_t_separator() {
        assert!(parse_timestamp("2017-06-21 08:36:34.052").is_ok());
        assert!(parse_timestamp("2017-06-21T08:36:34").is_ok());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("2017-13-01 08:00:00").is_err());
    }

    #[test]
    fn test_parse_birth_year() {
        assert_eq!(parse_birth_year("1989.0"), Some(1989));
        assert_eq!(parse_birth_year("1992"), Some(1992));
        assert_eq!(parse_birth_year(""), None);
        assert_eq!(parse_birth_year("1989.5"), None);
        assert_eq!(parse_birth_year("NaN"), None);
        assert_eq!(parse_birth_year("unknown"), None);
    }
}
