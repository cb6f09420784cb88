//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use chrono::{DateTime, Utc};

/// Formats a timestamp as a human-readable date.
///
/// Usage in templates: `{{ post.created_at|date }}`
#[askama::filter_fn]
pub fn date(value: &DateTime<Utc>, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_date(value))
}

/// Turns a hyphenated form value into display text.
///
/// Usage in templates: `{{ request.budget_range|humanize }}`
#[askama::filter_fn]
pub fn humanize(value: &str, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(humanize_value(value))
}

fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%B %-d, %Y").to_string()
}

fn humanize_value(value: &str) -> String {
    value.replace('-', " ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_date_format() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 1, 9, 30, 0).unwrap();
        assert_eq!(format_date(&ts), "August 1, 2026");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize_value("under-5k"), "under 5k");
        assert_eq!(humanize_value("asap"), "asap");
    }
}
