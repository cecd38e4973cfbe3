//! Run and compile identifiers and the timestamp embedded in them.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use fairmeta_core::ParseError;

/// Naive layouts tried for the date component, read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y%m%dT%H%M%S",
    "%Y%m%d%H%M%S",
];

/// An identifier together with the date derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub id: String,
    pub date: DateTime<Utc>,
}

/// Splits `value` on `_` and parses the third component as a date.
///
/// `line` locates the identifier (or its section header when the identifier
/// line is missing) in diagnostics.
pub fn parse_identifier(
    value: &str,
    keyword: &'static str,
    line: usize,
) -> Result<Identifier, ParseError> {
    let components: Vec<&str> = value.split('_').collect();
    let Some(stamp) = components.get(2) else {
        return Err(ParseError::malformed_identifier(
            line,
            keyword,
            value,
            format!(
                "expected at least 3 `_`-separated components, found {}",
                components.len()
            ),
        ));
    };

    let date = parse_timestamp(stamp).ok_or_else(|| {
        ParseError::malformed_identifier(
            line,
            keyword,
            value,
            format!("component `{stamp}` is not a date"),
        )
    })?;

    Ok(Identifier {
        id: value.to_string(),
        date,
    })
}

pub fn parse_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(stamp) {
        return Some(date.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(stamp, format).ok())
    {
        return Some(naive.and_utc());
    }
    if let Ok(seconds) = stamp.parse::<i64>() {
        return DateTime::from_timestamp(seconds, 0);
    }
    if let Some(date) = fractional_epoch(stamp) {
        return Some(date);
    }
    NaiveDate::parse_from_str(stamp, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Unix seconds with a fractional part, such as `1709634030.5`.
fn fractional_epoch(stamp: &str) -> Option<DateTime<Utc>> {
    if !stamp.contains('.') {
        return None;
    }
    let seconds: f64 = stamp.parse().ok().filter(|s: &f64| s.is_finite())?;
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_third_component_is_the_date() {
        let ident = parse_identifier("scorep_a1b2_2024-03-05T10:20:30_x", "compile-id", 4).unwrap();
        assert_eq!(ident.id, "scorep_a1b2_2024-03-05T10:20:30_x");
        assert_eq!(ident.date, Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap());
    }

    #[test]
    fn test_timestamp_layouts() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap();
        assert_eq!(parse_timestamp("2024-03-05T10:20:30Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-05T12:20:30+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-05 10:20:30"), Some(expected));
        assert_eq!(parse_timestamp("20240305T102030"), Some(expected));
        assert_eq!(parse_timestamp("20240305102030"), Some(expected));
        assert_eq!(parse_timestamp("1709634030"), Some(expected));
        assert_eq!(
            parse_timestamp("1709634030.5"),
            Some(expected + chrono::Duration::milliseconds(500))
        );
        assert_eq!(
            parse_timestamp("2024-03-05"),
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_too_few_components() {
        let err = parse_identifier("run_42", "run-id", 2).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedIdentifier { line: 2, keyword: "run-id", .. }
        ));

        let err = parse_identifier("", "compile-id", 9).unwrap_err();
        assert!(err.to_string().contains("found 1"));
    }

    #[test]
    fn test_fractional_epoch_identifier() {
        let ident = parse_identifier("scorep_run_1709634030.25", "run-id", 3).unwrap();
        assert_eq!(ident.date.timestamp(), 1709634030);
        assert_eq!(ident.date.timestamp_subsec_millis(), 250);
        assert_eq!(parse_timestamp("1e9"), None);
        assert_eq!(parse_timestamp("inf.0"), None);
    }

    #[test]
    fn test_undated_component() {
        let err = parse_identifier("run_42_tuesday", "run-id", 1).unwrap_err();
        assert!(err.to_string().contains("`tuesday` is not a date"));
    }
}
