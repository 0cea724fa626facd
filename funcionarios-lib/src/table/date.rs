//! Lenient date parsing shared by filters, sorting and cells

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;

use super::FilterInputError;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Parses a date or timestamp as sent by the backend or typed in a filter.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS[.fff]`,
/// `YYYY-MM-DD` and `DD/MM/YYYY`. Date-only values resolve to midnight.
/// RFC 3339 values keep their wall-clock time in the sender's offset.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, FilterInputError> {
    let value = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            return Ok(parsed.and_time(chrono::NaiveTime::MIN));
        }
    }

    Err(FilterInputError::InvalidDate {
        value: raw.to_string(),
    })
}

/// Parses a value at day granularity.
pub fn parse_date(raw: &str) -> Result<NaiveDate, FilterInputError> {
    parse_timestamp(raw).map(|timestamp| timestamp.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_accepted_formats() {
        assert_eq!(parse_date("2024-03-10").unwrap(), day(2024, 3, 10));
        assert_eq!(parse_date("10/03/2024").unwrap(), day(2024, 3, 10));
        assert_eq!(parse_date("2024-03-10 08:30:00").unwrap(), day(2024, 3, 10));
        assert_eq!(parse_date("2024-03-10T08:30:00").unwrap(), day(2024, 3, 10));
        assert_eq!(
            parse_date("2024-03-10T23:30:00.000000Z").unwrap(),
            day(2024, 3, 10)
        );
        assert_eq!(
            parse_date("2024-03-10T23:30:00-05:00").unwrap(),
            day(2024, 3, 10)
        );
    }

    #[test]
    fn test_timestamp_keeps_time() {
        let parsed = parse_timestamp("2024-03-10 08:30:00").unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "08:30");
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            parse_timestamp("mañana").unwrap_err(),
            FilterInputError::InvalidDate {
                value: "mañana".to_string()
            }
        );
        assert!(parse_timestamp("2024-13-40").is_err());
        assert!(parse_timestamp("").is_err());
    }
}
