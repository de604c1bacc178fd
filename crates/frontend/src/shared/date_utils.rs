/// Utilities for lab date strings
///
/// The lab API stamps orders as "DD-Mon-YYYY hh:mm:ssAM/PM". Every filter in the
/// dashboard compares whole days, so parsing drops the time of day.
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Formats tried when the string is not in the lab format
const FALLBACK_DATETIME_FORMATS: [&str; 3] =
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];
const FALLBACK_DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Parse a lab date string to a calendar day.
///
/// Example: "14-Mar-2023 07:32:31am" -> 2023-03-14
///
/// Returns `None` when neither the lab format nor any generic format matches.
pub fn parse_lab_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    parse_day_mon_year(value).or_else(|| parse_generic(value))
}

fn month_number(abbr: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(abbr))
        .map(|i| i as u32 + 1)
}

fn parse_day_mon_year(value: &str) -> Option<NaiveDate> {
    let date_part = value.split_whitespace().next()?;
    let mut parts = date_part.split('-');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let month = month_number(month)?;
    let day: u32 = day.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_generic(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    for format in FALLBACK_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Format a day as YYYY-MM-DD (used in file names and date inputs)
pub fn format_iso_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Parse the value of an `<input type="date">`; blank means "no bound"
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Current local calendar day
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
