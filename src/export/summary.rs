use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::UTF8_BOM;
use super::format::thai_timestamp;
use crate::error::LandError;
use crate::units::ThaiArea;

/// Render the area summary document (without BOM)
pub fn render_area_summary<Tz: TimeZone>(area: &ThaiArea, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    [
        "Land Area Calculation Result".to_string(),
        format!("Date,{}", thai_timestamp(at)),
        String::new(),
        "Thai Measurement System".to_string(),
        "Rai,Ngan,Sq.Wah,Total Sq.Wah".to_string(),
        format!(
            "{},{},{:.2},{:.2}",
            area.rai, area.ngan, area.sq_wah, area.total_sq_wah
        ),
        String::new(),
        "Metric System".to_string(),
        "Total Sq.Meters".to_string(),
        format!("{:.2}", area.total_sq_meters),
    ]
    .join("\n")
}

/// Write the calculated area as a small CSV report.
///
/// Refuses to write anything for a zero area, which means the parcel does
/// not have enough points yet.
pub fn write_area_csv<Tz: TimeZone>(path: &Path, area: &ThaiArea, at: &DateTime<Tz>) -> Result<()>
where
    Tz::Offset: std::fmt::Display,
{
    if area.is_empty() {
        return Err(LandError::NothingToExport.into());
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(UTF8_BOM.as_bytes())?;
    writer.write_all(render_area_summary(area, at).as_bytes())?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::convert_to_thai_units;
    use chrono::Utc;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_summary_layout() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        let area = convert_to_thai_units(2006.0);

        assert_eq!(
            render_area_summary(&area, &at),
            "Land Area Calculation Result\n\
             Date,19/10/2569 09:30:00\n\
             \n\
             Thai Measurement System\n\
             Rai,Ngan,Sq.Wah,Total Sq.Wah\n\
             1,1,1.50,501.50\n\
             \n\
             Metric System\n\
             Total Sq.Meters\n\
             2006.00"
        );
    }

    #[test]
    fn test_write_area_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("area.csv");
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();

        write_area_csv(&path, &convert_to_thai_units(1600.0), &at).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with(UTF8_BOM));
        assert!(contents.contains("\n1,0,0.00,400.00\n"));
        assert!(contents.ends_with("\n1600.00"));
    }

    #[test]
    fn test_zero_area_is_not_exported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("area.csv");
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();

        assert!(write_area_csv(&path, &convert_to_thai_units(0.0), &at).is_err());
        assert!(!path.exists());
    }
}
