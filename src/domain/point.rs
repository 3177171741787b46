use geo::{Coord, coord};
use serde::{Deserialize, Serialize};

/// A planar survey point in meters
///
/// `x` is the Easting and `y` the Northing of a projected metric system (e.g. UTM).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for Coord<f64> {
    fn from(p: Point) -> Self {
        coord! { x: p.x, y: p.y }
    }
}

impl From<Coord<f64>> for Point {
    fn from(c: Coord<f64>) -> Self {
        Point::new(c.x, c.y)
    }
}
