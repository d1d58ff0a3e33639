//! Custom Askama template filters.

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats an item count with the right noun (`1 course`, `3 courses`).
///
/// Usage in templates: `{{ cart.len()|courses }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn courses(count: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let count = count.to_string();
    let noun = if count == "1" { "course" } else { "courses" };
    Ok(format!("{count} {noun}"))
}
