//! Shared parameter handling helpers.
//!
//! Every tool deserializes its arguments into a typed struct via serde; the
//! helpers here cover the two conversions that recur across the GitLab API
//! surface: comma-separated list parameters and date/time parameters.
//!
//! Date handling is strict: an unparsable value rejects the invocation with a
//! validation error instead of silently collapsing to a zero time.

use crate::error::ToolError;
use chrono::{DateTime, NaiveDate, Utc};

/// Split a comma-separated parameter into an ordered list.
///
/// `"a,b,c"` becomes `["a", "b", "c"]`; whitespace around items is trimmed.
/// An empty or all-whitespace input yields `None`, leaving the field unset.
pub fn split_csv(value: &str) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if items.is_empty() { None } else { Some(items) }
}

/// Parse an RFC 3339 timestamp parameter (e.g. `2024-01-15T08:00:00Z`).
pub fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, ToolError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            ToolError::InvalidArguments(format!(
                "{}: expected an ISO 8601 timestamp (e.g. 2024-01-15T08:00:00Z), got '{}': {}",
                field, value, e
            ))
        })
}

/// Parse a calendar-date parameter in `YYYY-MM-DD` form (e.g. `due_date`).
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ToolError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        ToolError::InvalidArguments(format!(
            "{}: expected a date in YYYY-MM-DD form, got '{}': {}",
            field, value, e
        ))
    })
}

/// Validate an optional timestamp parameter, returning it normalized to
/// RFC 3339 for the outgoing request. `None` stays `None`.
pub fn checked_timestamp(field: &str, value: Option<&str>) -> Result<Option<String>, ToolError> {
    value
        .map(|v| parse_timestamp(field, v).map(|dt| dt.to_rfc3339()))
        .transpose()
}

/// Validate an optional date parameter, returning it in `YYYY-MM-DD` form.
pub fn checked_date(field: &str, value: Option<&str>) -> Result<Option<String>, ToolError> {
    value
        .map(|v| parse_date(field, v).map(|d| d.format("%Y-%m-%d").to_string()))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a,b,c", vec!["a", "b", "c"])]
    #[case("bug", vec!["bug"])]
    #[case("bug, p1 ,backend", vec!["bug", "p1", "backend"])]
    #[case("a,,c", vec!["a", "c"])]
    fn test_split_csv_values(#[case] input: &str, #[case] expected: Vec<&str>) {
        let result = split_csv(input).unwrap();
        assert_eq!(result, expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(",")]
    fn test_split_csv_empty_leaves_unset(#[case] input: &str) {
        assert!(split_csv(input).is_none());
    }

    #[test]
    fn test_parse_timestamp_valid() {
        let dt = parse_timestamp("created_after", "2024-01-15T08:00:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T08:00:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let dt = parse_timestamp("created_after", "2024-01-15T10:00:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T08:00:00+00:00");
    }

    #[rstest]
    #[case("yesterday")]
    #[case("2024-01-15")]
    #[case("2024-13-01T00:00:00Z")]
    fn test_parse_timestamp_invalid_is_rejected(#[case] input: &str) {
        let err = parse_timestamp("updated_after", input).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("updated_after"));
        assert!(text.contains(input));
    }

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("due_date", "2024-06-30").unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2024-06-30");
    }

    #[rstest]
    #[case("30-06-2024")]
    #[case("2024/06/30")]
    #[case("soon")]
    fn test_parse_date_invalid_is_rejected(#[case] input: &str) {
        assert!(parse_date("due_date", input).is_err());
    }

    #[test]
    fn test_checked_timestamp_none_passthrough() {
        assert_eq!(checked_timestamp("since", None).unwrap(), None);
    }

    #[test]
    fn test_checked_date_normalizes() {
        let out = checked_date("start_date", Some("2024-06-30")).unwrap();
        assert_eq!(out.as_deref(), Some("2024-06-30"));
    }
}
