//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::{DateTime, Utc};

/// Formats a timestamp as a human-readable date.
///
/// Usage in templates: `{{ post.created_at|date }}`
#[askama::filter_fn]
pub fn date(value: &DateTime<Utc>, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_date(value))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(Utc::now().year())
}

fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%B %-d, %Y").to_string()
}
