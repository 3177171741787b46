use super::Point;
use crate::error::{Axis, LandError};

fn parse_axis(raw: &str, axis: Axis) -> Result<f64, LandError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LandError::MissingValue(axis));
    }

    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LandError::InvalidNumber {
            axis,
            value: trimmed.to_string(),
        }),
    }
}

/// Parse raw Easting / Northing text into a point.
///
/// Empty text is reported as missing rather than invalid so that "0" stays a
/// legitimate coordinate.
pub fn parse_coordinate(x: &str, y: &str) -> Result<Point, LandError> {
    Ok(Point::new(
        parse_axis(x, Axis::Easting)?,
        parse_axis(y, Axis::Northing)?,
    ))
}

/// Parse a single "x,y" argument (comma, semicolon or whitespace separated)
pub fn parse_pair(raw: &str) -> Result<Point, LandError> {
    let parts: Vec<&str> = raw
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    match parts.as_slice() {
        [x, y] => parse_coordinate(x, y),
        _ => Err(LandError::InvalidPair(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(
            parse_coordinate(" 670000.5 ", "1500000").unwrap(),
            Point::new(670000.5, 1500000.0)
        );
    }

    #[test]
    fn test_zero_is_valid() {
        assert_eq!(parse_coordinate("0", "0").unwrap(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_empty_is_missing() {
        assert_eq!(
            parse_coordinate("", "10"),
            Err(LandError::MissingValue(Axis::Easting))
        );
        assert_eq!(
            parse_coordinate("10", "   "),
            Err(LandError::MissingValue(Axis::Northing))
        );
    }

    #[test]
    fn test_non_numeric_is_invalid() {
        assert_eq!(
            parse_coordinate("abc", "10"),
            Err(LandError::InvalidNumber {
                axis: Axis::Easting,
                value: "abc".to_string()
            })
        );
        assert!(matches!(
            parse_coordinate("1", "inf"),
            Err(LandError::InvalidNumber {
                axis: Axis::Northing,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_pair_separators() {
        let expected = Point::new(670000.0, 1500000.0);
        assert_eq!(parse_pair("670000,1500000").unwrap(), expected);
        assert_eq!(parse_pair("670000, 1500000").unwrap(), expected);
        assert_eq!(parse_pair("670000;1500000").unwrap(), expected);
        assert_eq!(parse_pair("670000 1500000").unwrap(), expected);
        assert_eq!(parse_pair("-12.5,3").unwrap(), Point::new(-12.5, 3.0));
    }

    #[test]
    fn test_parse_pair_wrong_arity() {
        assert!(matches!(parse_pair("1"), Err(LandError::InvalidPair(_))));
        assert!(matches!(parse_pair("1,2,3"), Err(LandError::InvalidPair(_))));
    }
}
