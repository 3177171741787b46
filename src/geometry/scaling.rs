use crate::domain::Point;

/// Axis range used when every point shares the same coordinate on that axis
const FALLBACK_RANGE_M: f64 = 100.0;

/// Bounding box in survey coordinates (meters)
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from a set of points
    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        let mut min_y = f64::MAX;
        let mut max_y = f64::MIN;

        for p in points {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        Some(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Grow each axis by `fraction` of its range on both sides.
    ///
    /// A flat axis (all points aligned) is treated as 100 m wide so the plot
    /// still has something to frame.
    pub fn padded(&self, fraction: f64) -> Self {
        let range_x = match self.width() {
            w if w > 0.0 => w,
            _ => FALLBACK_RANGE_M,
        };
        let range_y = match self.height() {
            h if h > 0.0 => h,
            _ => FALLBACK_RANGE_M,
        };
        let pad_x = range_x * fraction;
        let pad_y = range_y * fraction;

        Self {
            min_x: self.min_x - pad_x,
            max_x: self.max_x + pad_x,
            min_y: self.min_y - pad_y,
            max_y: self.max_y + pad_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Maps survey meters onto an SVG canvas in pixels
///
/// Both axes share one scale factor so parcel shapes are not distorted.
/// Northing grows upward on the canvas, so the y axis is flipped.
#[derive(Debug, Clone)]
pub struct Scaler {
    /// Pixels per meter
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    canvas_height: f64,
}

impl Scaler {
    /// Fit `bounds` into a `width` x `height` canvas, leaving `margin` pixels on every side
    pub fn fit(bounds: &Bounds, width: f64, height: f64, margin: f64) -> Self {
        let usable_w = (width - 2.0 * margin).max(1.0);
        let usable_h = (height - 2.0 * margin).max(1.0);

        let scale = if bounds.width() > 0.0 && bounds.height() > 0.0 {
            (usable_w / bounds.width()).min(usable_h / bounds.height())
        } else {
            1.0
        };

        let scaled_w = bounds.width() * scale;
        let scaled_h = bounds.height() * scale;

        let offset_x = margin + (usable_w - scaled_w) / 2.0 - bounds.min_x * scale;
        let offset_y = margin + (usable_h - scaled_h) / 2.0 - bounds.min_y * scale;

        Self {
            scale,
            offset_x,
            offset_y,
            canvas_height: height,
        }
    }

    /// Scale a point from meters to canvas pixels (origin top-left)
    pub fn scale(&self, p: Point) -> (f64, f64) {
        let x = p.x * self.scale + self.offset_x;
        let y = self.canvas_height - (p.y * self.scale + self.offset_y);
        (x, y)
    }

    /// Get the scale factor (pixels per meter)
    pub fn scale_factor(&self) -> f64 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1000.0, 2000.0),
            Point::new(500.0, 1000.0),
        ];
        let bounds = Bounds::from_points(&points).unwrap();

        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 1000.0);
        assert_eq!(bounds.min_y, 0.0);
        assert_eq!(bounds.max_y, 2000.0);
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_padded_by_fifteen_percent() {
        let bounds = Bounds::from_points(&[Point::new(0.0, 0.0), Point::new(100.0, 200.0)]).unwrap();
        let padded = bounds.padded(0.15);

        assert!((padded.min_x + 15.0).abs() < 1e-9);
        assert!((padded.max_x - 115.0).abs() < 1e-9);
        assert!((padded.min_y + 30.0).abs() < 1e-9);
        assert!((padded.max_y - 230.0).abs() < 1e-9);
    }

    #[test]
    fn test_padded_flat_axis_uses_fallback_range() {
        let bounds = Bounds::from_points(&[Point::new(10.0, 5.0), Point::new(50.0, 5.0)]).unwrap();
        let padded = bounds.padded(0.15);

        assert!((padded.height() - 30.0).abs() < 1e-9);
        assert!(padded.width() > bounds.width());
    }

    #[test]
    fn test_scaler_flips_northing() {
        let bounds = Bounds {
            min_x: 0.0,
            max_x: 100.0,
            min_y: 0.0,
            max_y: 100.0,
        };
        let scaler = Scaler::fit(&bounds, 200.0, 200.0, 0.0);

        assert!((scaler.scale_factor() - 2.0).abs() < 1e-9);

        let (x0, y0) = scaler.scale(Point::new(0.0, 0.0));
        let (x1, y1) = scaler.scale(Point::new(100.0, 100.0));
        assert!(x0.abs() < 1e-9);
        assert!((y0 - 200.0).abs() < 1e-9);
        assert!((x1 - 200.0).abs() < 1e-9);
        assert!(y1.abs() < 1e-9);
    }

    #[test]
    fn test_scaler_centers_narrow_parcel() {
        let bounds = Bounds {
            min_x: 0.0,
            max_x: 50.0,
            min_y: 0.0,
            max_y: 100.0,
        };
        let scaler = Scaler::fit(&bounds, 200.0, 200.0, 0.0);

        let (cx, cy) = scaler.scale(Point::new(25.0, 50.0));
        assert!((cx - 100.0).abs() < 1e-9);
        assert!((cy - 100.0).abs() < 1e-9);
    }
}
