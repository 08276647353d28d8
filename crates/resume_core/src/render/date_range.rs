//! Month and date-range formatting for entry headers.

use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("valid year-month regex"));

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Label used for the end of an ongoing entry.
pub const PRESENT_LABEL: &str = "Present";

/// Formats a `YYYY-MM` value as `"<Month> <Year>"`.
///
/// Empty input gives an empty string; values in any other shape are returned
/// trimmed but otherwise unchanged.
pub fn format_month(value: &str) -> String {
    let trimmed = value.trim();
    let Some(captures) = YEAR_MONTH_RE.captures(trimmed) else {
        return trimmed.to_string();
    };
    let month = captures[2].parse::<usize>().ok().filter(|m| (1..=12).contains(m));
    match month {
        Some(month) => format!("{} {}", MONTH_NAMES[month - 1], &captures[1]),
        None => trimmed.to_string(),
    }
}

/// Formats an entry's date range.
///
/// - No start date: empty string.
/// - `current`: `"<start> - Present"`, whatever end date is stored.
/// - No end date: the start alone.
pub fn format_date_range(start: &str, end: &str, current: bool) -> String {
    let start = format_month(start);
    if start.is_empty() {
        return String::new();
    }
    if current {
        return format!("{start} - {PRESENT_LABEL}");
    }
    let end = format_month(end);
    if end.is_empty() {
        start
    } else {
        format!("{start} - {end}")
    }
}
