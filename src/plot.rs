//! SVG rendering of a parcel outline
//!
//! Draws the boundary in survey space (Easting right, Northing up) with
//! numbered vertices, a north arrow and a small legend, similar to a
//! surveyor's sketch plan.

use anyhow::{Context, Result};
use geo::{Centroid, LineString, Polygon};
use std::path::Path;

use crate::domain::Point;
use crate::error::LandError;
use crate::export::format_number;
use crate::geometry::{Bounds, Scaler, polygon_area};

/// At least two points are needed to draw anything meaningful
pub const MIN_PLOT_POINTS: usize = 2;

const STROKE: &str = "#059669";
const VERTEX_FILL: &str = "#047857";

#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub width: f64,
    pub height: f64,
    /// Pixels kept free around the plot area
    pub margin: f64,
    /// Padding added to each axis, as a fraction of that axis' range
    pub padding: f64,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 30.0,
            padding: 0.15,
        }
    }
}

/// Outline vertices, closed back to the first point when it has at least three
fn outline(points: &[Point]) -> Vec<Point> {
    let mut ring = points.to_vec();
    if let (Some(&first), Some(&last)) = (points.first(), points.last())
        && points.len() > 2
        && first != last
    {
        ring.push(first);
    }
    ring
}

fn centroid(points: &[Point]) -> Option<Point> {
    let ring: LineString<f64> = points.iter().map(|&p| geo::Coord::from(p)).collect();
    Polygon::new(ring, vec![])
        .centroid()
        .map(|c| Point::new(c.x(), c.y()))
}

pub fn render_svg(points: &[Point], options: &PlotOptions) -> Result<String, LandError> {
    if points.len() < MIN_PLOT_POINTS {
        return Err(LandError::TooFewPoints {
            needed: MIN_PLOT_POINTS,
            got: points.len(),
        });
    }

    let bounds = Bounds::from_points(points)
        .ok_or(LandError::TooFewPoints {
            needed: MIN_PLOT_POINTS,
            got: 0,
        })?
        .padded(options.padding);
    let scaler = Scaler::fit(&bounds, options.width, options.height, options.margin);

    let (w, h) = (options.width, options.height);
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
    ));
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"#f8fafc\" stroke=\"#e5e7eb\"/>\n"
    ));

    let ring = outline(points);
    let path: Vec<String> = ring
        .iter()
        .map(|&p| {
            let (x, y) = scaler.scale(p);
            format!("{:.2},{:.2}", x, y)
        })
        .collect();
    let fill = if points.len() > 2 { STROKE } else { "none" };
    svg.push_str(&format!(
        "  <polyline points=\"{}\" fill=\"{fill}\" fill-opacity=\"0.15\" stroke=\"{STROKE}\" stroke-width=\"2\"/>\n",
        path.join(" ")
    ));

    for (i, &p) in points.iter().enumerate() {
        let (x, y) = scaler.scale(p);
        svg.push_str(&format!(
            "  <circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"4\" fill=\"{VERTEX_FILL}\" stroke=\"white\" stroke-width=\"1.5\"/>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"{x:.2}\" y=\"{:.2}\" font-size=\"10\" font-weight=\"bold\" text-anchor=\"middle\" fill=\"#1f2937\">P{}</text>\n",
            y - 8.0,
            i + 1
        ));
    }

    let area = polygon_area(points);
    if area > 0.0
        && let Some(c) = centroid(points)
    {
        let (x, y) = scaler.scale(c);
        svg.push_str(&format!(
            "  <text x=\"{x:.2}\" y=\"{y:.2}\" font-size=\"12\" text-anchor=\"middle\" fill=\"#065f46\">{} m²</text>\n",
            format_number(area)
        ));
    }

    write_north_arrow(&mut svg, w - 40.0, 20.0);
    write_legend(&mut svg, 10.0, h - 46.0);

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn write_north_arrow(svg: &mut String, x: f64, y: f64) {
    svg.push_str(&format!(
        "  <path d=\"M {x} {y} L {} {} L {x} {} L {} {} Z\" fill=\"#1f2937\"/>\n",
        x + 8.0,
        y + 28.0,
        y + 22.0,
        x - 8.0,
        y + 28.0
    ));
    svg.push_str(&format!(
        "  <text x=\"{x}\" y=\"{}\" font-size=\"14\" font-family=\"serif\" font-weight=\"bold\" text-anchor=\"middle\" fill=\"#dc2626\">N</text>\n",
        y - 4.0
    ));
}

fn write_legend(svg: &mut String, x: f64, y: f64) {
    let lines = ["System: UTM", "X: Easting (m)", "Y: Northing (m)"];
    for (i, line) in lines.iter().enumerate() {
        svg.push_str(&format!(
            "  <text x=\"{x}\" y=\"{}\" font-size=\"10\" fill=\"#4b5563\">{line}</text>\n",
            y + 12.0 * i as f64
        ));
    }
}

/// Render and write the plot to `path`
pub fn write_svg(path: &Path, points: &[Point], options: &PlotOptions) -> Result<()> {
    let svg = render_svg(points, options)?;
    std::fs::write(path, svg)
        .with_context(|| format!("Failed to write SVG file: {}", path.display()))?;
    Ok(())
}
