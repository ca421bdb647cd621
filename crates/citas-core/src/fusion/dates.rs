//! Date normalization to `YYYY-MM-DD`.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Accepted layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%Y-%d-%m"];

/// Day, month, year with `/` or `-` separators; trailing text is ignored.
static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[/\-](\d{1,2})[/\-](\d{2,4})").expect("Invalid date regex pattern")
});

/// Normalize a date string to `YYYY-MM-DD`.
///
/// Unparseable input comes back trimmed but otherwise unchanged.
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    parse_date(trimmed)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Parse a date in any accepted layout.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        // %Y is greedy about width; only four-digit years count as a match
        .find(|date| (1000..=9999).contains(&date.year()))
        .or_else(|| parse_day_month_year(raw))
}

fn parse_day_month_year(raw: &str) -> Option<NaiveDate> {
    let caps = DAY_MONTH_YEAR.captures(raw)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = match &caps[3] {
        short if short.len() == 2 => 2000 + short.parse::<i32>().ok()?,
        long => long.parse().ok()?,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}
