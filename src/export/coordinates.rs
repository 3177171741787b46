use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::UTF8_BOM;
use crate::domain::{Point, parse_coordinate};
use crate::error::LandError;

const HEADER: [&str; 3] = ["Point", "Easting (X)", "Northing (Y)"];

/// Write the coordinate list as a GIS-friendly CSV file
///
/// Layout:
/// - UTF-8 BOM (so spreadsheet tools pick the right encoding)
/// - `Point,Easting (X),Northing (Y)`
/// - one `{n},{x},{y}` row per point, `n` starting at 1, full precision
pub fn write_coordinates_csv(path: &Path, points: &[Point]) -> Result<()> {
    if points.is_empty() {
        return Err(LandError::NothingToExport.into());
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(UTF8_BOM.as_bytes())?;

    let mut out = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    out.write_record(HEADER)?;
    for (i, p) in points.iter().enumerate() {
        out.write_record([(i + 1).to_string(), p.x.to_string(), p.y.to_string()])?;
    }
    out.flush()?;

    Ok(())
}

/// Read a coordinate list back from CSV.
///
/// Accepts the exported `index,x,y` layout as well as bare `x,y` rows. A BOM
/// and a leading header row are skipped.
pub fn read_coordinates_csv(path: &Path) -> Result<Vec<Point>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;
    Ok(parse_coordinates_csv(&contents)?)
}

fn is_header(x: &str, y: &str) -> bool {
    x.parse::<f64>().is_err() && y.parse::<f64>().is_err()
}

fn parse_coordinates_csv(contents: &str) -> Result<Vec<Point>, LandError> {
    let contents = contents.strip_prefix(UTF8_BOM).unwrap_or(contents);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut points = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| LandError::InvalidCsv {
            line: i + 1,
            reason: e.to_string(),
        })?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(i + 1);

        let (x, y) = match record.len() {
            2 => (&record[0], &record[1]),
            3 => (&record[1], &record[2]),
            n => {
                return Err(LandError::InvalidCsv {
                    line,
                    reason: format!("expected 2 or 3 columns, found {}", n),
                });
            }
        };

        match parse_coordinate(x, y) {
            Ok(p) => points.push(p),
            // A header is a first row with no numeric coordinate at all
            Err(_) if i == 0 && is_header(x, y) => continue,
            Err(e) => {
                return Err(LandError::InvalidCsv {
                    line,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(points)
}
