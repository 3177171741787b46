pub mod coordinates;
pub mod format;
pub mod summary;

use chrono::NaiveDate;
use std::path::PathBuf;

pub use coordinates::{read_coordinates_csv, write_coordinates_csv};
pub use format::{describe_area, format_number, thai_timestamp};
pub use summary::{render_area_summary, write_area_csv};

/// Prepended to exported CSV files so spreadsheet tools detect UTF-8
pub const UTF8_BOM: &str = "\u{feff}";

/// `land_coordinates_YYYY-MM-DD.csv`
pub fn default_coordinates_filename(date: NaiveDate) -> PathBuf {
    PathBuf::from(format!("land_coordinates_{}.csv", date.format("%Y-%m-%d")))
}

/// `land_area_result_YYYY-MM-DD.csv`
pub fn default_area_filename(date: NaiveDate) -> PathBuf {
    PathBuf::from(format!("land_area_result_{}.csv", date.format("%Y-%m-%d")))
}
