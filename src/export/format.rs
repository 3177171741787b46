use chrono::{DateTime, Datelike, TimeZone};

use crate::units::ThaiArea;

/// Offset between the Gregorian year and the Thai Buddhist Era year
const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Format a number the way the result card shows it: en-US thousands
/// separators and exactly two decimals (`1234567.891` -> `"1,234,567.89"`).
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.');
    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, frac_part)
}

/// `d/m/yyyy HH:MM:SS` with a Buddhist Era year and unpadded day and month,
/// as the `th-TH` locale prints dates
pub fn thai_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}/{} {}",
        at.format("%-d/%-m"),
        at.year() + BUDDHIST_ERA_OFFSET,
        at.format("%H:%M:%S")
    )
}

/// Multi-line, human-readable summary of an area result
pub fn describe_area(area: &ThaiArea) -> String {
    format!(
        "Area:   {}\n\
         Total:  {} ตารางวา ({} ไร่)\n\
         Metric: {} m²",
        area.thai_label(),
        format_number(area.total_sq_wah),
        format_number(area.total_rai()),
        format_number(area.total_sq_meters)
    )
}
