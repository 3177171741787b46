use crate::domain::Point;

/// Twice the signed area enclosed by `points`, treated as a closed ring.
///
/// The `(i + 1) % n` wraparound closes the ring, so callers never repeat the
/// first point at the end.
fn shoelace_sum(points: &[Point]) -> f64 {
    let n = points.len();
    let mut sum = 0.0;

    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y;
        sum -= points[j].x * points[i].y;
    }

    sum
}

/// Area of a polygon in square meters using the Shoelace (surveyor's) formula.
///
/// Returns 0 for fewer than 3 points: a point or a line encloses nothing.
/// The result is independent of winding direction and of the starting vertex.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    shoelace_sum(points).abs() / 2.0
}

/// Signed area: positive for counter-clockwise rings, negative for clockwise
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    shoelace_sum(points) / 2.0
}

/// Traversal direction of a ring in a y-up (Northing) frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    /// Winding of the ring, or `None` when it encloses no area
    pub fn of(points: &[Point]) -> Option<Winding> {
        let area = signed_area(points);
        if area > 0.0 {
            Some(Winding::CounterClockwise)
        } else if area < 0.0 {
            Some(Winding::Clockwise)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Winding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winding::Clockwise => write!(f, "clockwise"),
            Winding::CounterClockwise => write!(f, "counter-clockwise"),
        }
    }
}
