// File: crates/figure-core/src/polar.rs
// Summary: Pie/donut and radar templates; wedge and spoke geometry kept pure for tests.

use serde::{Deserialize, Serialize};
use skia_safe as skia;

use crate::chart::{Plot, ANNOTATION_SIZE, PX_PER_PT, TICK_SIZE};
use crate::color::{cycle, Rgba, CHART_PALETTE};
use crate::error::{FigureError, Result};
use crate::geometry::Point;
use crate::grid::{format_tick, nice_ceiling};
use crate::raster::{fill_paint, polygon, stroke_paint};
use crate::surface::{HAlign, VAlign};
use crate::text::FontFace;

/// First wedge starts at the top and wedges run counterclockwise.
pub const PIE_START_ANGLE: f64 = 90.0;
/// Percentage labels sit at this fraction of the radius.
pub const PIE_PCT_DISTANCE: f64 = 0.6;
/// Category labels sit at this fraction of the radius.
pub const PIE_LABEL_DISTANCE: f64 = 1.1;
/// Donut hole radius as a fraction of the pie radius.
pub const DONUT_HOLE: f64 = 0.5;
const WEDGE_EDGE_WIDTH: f32 = 2.0;

pub const RADAR_RINGS: usize = 5;
pub const RADAR_FILL_ALPHA: f32 = 0.25;
const RADAR_LINE_WIDTH: f32 = 2.0;
/// Share of the plot rect's short side used as the outer radius.
const RADIUS_SHARE: f32 = 0.8;

// ---- pie ---------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    #[serde(default)]
    pub colors: Option<Vec<Rgba>>,
    /// Per-wedge radial offsets, as a fraction of the radius.
    #[serde(default)]
    pub explode: Option<Vec<f64>>,
    #[serde(default)]
    pub donut: bool,
}

impl PieData {
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>, values: Vec<f64>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            values,
            colors: None,
            explode: None,
            donut: false,
        }
    }

    pub fn donut(mut self) -> Self {
        self.donut = true;
        self
    }

    pub fn with_explode(mut self, explode: Vec<f64>) -> Self {
        self.explode = Some(explode);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.values.is_empty() {
            return Err(FigureError::InvalidSpec("pie chart needs at least one value".into()));
        }
        if self.labels.len() != self.values.len() {
            return Err(FigureError::InvalidSpec(format!(
                "pie chart has {} labels but {} values",
                self.labels.len(),
                self.values.len()
            )));
        }
        if self.values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(FigureError::InvalidSpec("pie values must be finite and non-negative".into()));
        }
        if self.values.iter().sum::<f64>() <= 0.0 {
            return Err(FigureError::InvalidSpec("pie values sum to zero".into()));
        }
        for (what, len) in [
            ("pie colors", self.colors.as_ref().map(Vec::len)),
            ("pie explode", self.explode.as_ref().map(Vec::len)),
        ] {
            if let Some(len) = len.filter(|l| *l != self.values.len()) {
                return Err(FigureError::InvalidSpec(format!("{what} has {len} entries, expected {}", self.values.len())));
            }
        }
        Ok(())
    }

    pub fn color(&self, i: usize) -> Rgba {
        self.colors
            .as_ref()
            .and_then(|c| c.get(i).copied())
            .unwrap_or_else(|| cycle(&CHART_PALETTE, i))
    }
}

/// One pie wedge; angles in degrees, counterclockwise from east.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wedge {
    pub start: f64,
    pub sweep: f64,
    pub fraction: f64,
    pub explode: f64,
}

impl Wedge {
    pub fn mid_angle(&self) -> f64 {
        self.start + self.sweep * 0.5
    }

    /// Percentage label, one decimal.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

/// Wedges for `values`, starting at 90° and running counterclockwise.
pub fn pie_wedges(values: &[f64], explode: Option<&[f64]>) -> Vec<Wedge> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut start = PIE_START_ANGLE;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let fraction = v / total;
            let w = Wedge {
                start,
                sweep: fraction * 360.0,
                fraction,
                explode: explode.and_then(|e| e.get(i).copied()).unwrap_or(0.0),
            };
            start += w.sweep;
            w
        })
        .collect()
}

/// Unit vector at `degrees` counterclockwise, mapped to a pixel offset (y down).
fn screen_dir(degrees: f64) -> skia::Point {
    let u = Point::from_angle(degrees);
    skia::Point::new(u.x as f32, -u.y as f32)
}

fn outer_radius(plot: &Plot) -> f32 {
    plot.area.width().min(plot.area.height()) * 0.5 * RADIUS_SHARE
}

pub(crate) fn draw_pie(plot: &Plot, data: &PieData) {
    let center = plot.area.center();
    let r = outer_radius(plot);
    let wedges = pie_wedges(&data.values, data.explode.as_deref());
    let edge = stroke_paint(plot.theme.edge, WEDGE_EDGE_WIDTH);

    for (i, w) in wedges.iter().enumerate() {
        let shift = screen_dir(w.mid_angle());
        let c = skia::Point::new(center.x + shift.x * r * w.explode as f32, center.y + shift.y * r * w.explode as f32);
        let oval = skia::Rect::from_ltrb(c.x - r, c.y - r, c.x + r, c.y + r);
        let mut path = skia::Path::new();
        path.move_to(c);
        // skia measures angles clockwise on screen
        path.arc_to(oval, -w.start as f32, -w.sweep as f32, false);
        path.close();
        plot.canvas.draw_path(&path, &fill_paint(data.color(i)));
        plot.canvas.draw_path(&path, &edge);
    }

    if data.donut {
        let hole = r * DONUT_HOLE as f32;
        plot.canvas.draw_circle(center, hole, &fill_paint(plot.theme.background));
    }

    for (i, w) in wedges.iter().enumerate() {
        let dir = screen_dir(w.mid_angle());
        let c = skia::Point::new(center.x + dir.x * r * w.explode as f32, center.y + dir.y * r * w.explode as f32);
        let at = |dist: f64| skia::Point::new(c.x + dir.x * r * dist as f32, c.y + dir.y * r * dist as f32);

        let pct = at(PIE_PCT_DISTANCE);
        plot.text(&w.percent_label(), pct.x, pct.y, ANNOTATION_SIZE, Rgba::WHITE, FontFace::Bold, HAlign::Center, VAlign::Center);

        let outer = at(PIE_LABEL_DISTANCE);
        let h = if dir.x >= 0.0 { HAlign::Left } else { HAlign::Right };
        if let Some(label) = data.labels.get(i) {
            plot.text(label, outer.x, outer.y, TICK_SIZE, plot.theme.annotation, FontFace::Regular, h, VAlign::Center);
        }
    }
}

// ---- radar -------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadarData {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    /// Outer ring value; the nice ceiling of the data when absent.
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default = "default_fill")]
    pub fill: bool,
    #[serde(default)]
    pub color: Option<Rgba>,
}

fn default_fill() -> bool {
    true
}

impl RadarData {
    pub fn new<S: Into<String>>(categories: impl IntoIterator<Item = S>, values: Vec<f64>) -> Self {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            values,
            max_value: None,
            fill: true,
            color: None,
        }
    }

    pub fn with_max(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.values.len() < 3 {
            return Err(FigureError::InvalidSpec(format!(
                "radar chart needs at least 3 categories, got {}",
                self.values.len()
            )));
        }
        if self.categories.len() != self.values.len() {
            return Err(FigureError::InvalidSpec(format!(
                "radar chart has {} categories but {} values",
                self.categories.len(),
                self.values.len()
            )));
        }
        if matches!(self.max_value, Some(m) if m.is_nan() || m <= 0.0) {
            return Err(FigureError::InvalidSpec("radar max_value must be positive".into()));
        }
        Ok(())
    }

    /// Value at the outer ring.
    pub fn limit(&self) -> f64 {
        radar_limit(&self.values, self.max_value)
    }
}

/// Spoke angles in radians: `2πi/n`, counterclockwise from east.
pub fn radar_angles(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64 * std::f64::consts::TAU / n as f64).collect()
}

/// `max_value` if given, else the nice ceiling of the largest value.
pub fn radar_limit(values: &[f64], max_value: Option<f64>) -> f64 {
    max_value.unwrap_or_else(|| {
        let max = values.iter().copied().filter(|v| v.is_finite()).fold(0.0f64, f64::max);
        nice_ceiling(max)
    })
}

/// Closed radar polygon in unit-circle coordinates (y up): one vertex per
/// value at radius `value / limit`, then the first vertex again.
pub fn radar_vertices(values: &[f64], limit: f64) -> Vec<Point> {
    let limit = if limit > 0.0 { limit } else { 1.0 };
    let mut pts: Vec<Point> = radar_angles(values.len())
        .into_iter()
        .zip(values)
        .map(|(a, v)| {
            let r = (v / limit).max(0.0);
            Point::new(r * a.cos(), r * a.sin())
        })
        .collect();
    if let Some(first) = pts.first().copied() {
        pts.push(first);
    }
    pts
}

pub(crate) fn draw_radar(plot: &Plot, data: &RadarData) {
    let center = plot.area.center();
    let r = outer_radius(plot);
    let limit = data.limit();
    let to_px = |p: Point| skia::Point::new(center.x + p.x as f32 * r, center.y - p.y as f32 * r);

    // rings and spokes
    let grid = stroke_paint(plot.theme.grid, 1.0);
    for k in 1..=RADAR_RINGS {
        let frac = k as f32 / RADAR_RINGS as f32;
        plot.canvas.draw_circle(center, r * frac, &grid);
        let value = limit * k as f64 / RADAR_RINGS as f64;
        plot.text(&format_tick(value), center.x + 4.0, center.y - r * frac, ANNOTATION_SIZE, plot.theme.tick, FontFace::Regular, HAlign::Left, VAlign::Bottom);
    }
    for (a, label) in radar_angles(data.values.len()).into_iter().zip(&data.categories) {
        let dir = Point::new(a.cos(), a.sin());
        plot.canvas.draw_line(center, to_px(dir), &grid);
        let at = to_px(dir * 1.1);
        let h = if dir.x > 0.1 {
            HAlign::Left
        } else if dir.x < -0.1 {
            HAlign::Right
        } else {
            HAlign::Center
        };
        plot.text(label, at.x, at.y, TICK_SIZE, plot.theme.axis_label, FontFace::Regular, h, VAlign::Center);
    }

    let color = data.color.unwrap_or(CHART_PALETTE[0]);
    let pts: Vec<skia::Point> = radar_vertices(&data.values, limit).into_iter().map(to_px).collect();
    let shape = polygon(&pts[..pts.len().saturating_sub(1)]);
    if data.fill {
        plot.canvas.draw_path(&shape, &fill_paint(color.with_alpha(RADAR_FILL_ALPHA)));
    }
    let mut line = stroke_paint(color, RADAR_LINE_WIDTH);
    line.set_stroke_join(skia::paint::Join::Round);
    plot.canvas.draw_path(&shape, &line);
    let marker = fill_paint(color);
    for p in &pts {
        plot.canvas.draw_circle(*p, 3.0 * PX_PER_PT, &marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedges_sweep_full_circle_from_top() {
        let w = pie_wedges(&[1.0, 2.0, 1.0], None);
        assert_eq!(w.len(), 3);
        assert_eq!(w[0].start, 90.0);
        let total: f64 = w.iter().map(|w| w.sweep).sum();
        assert!((total - 360.0).abs() < 1e-9);
        assert!((w[1].start - 180.0).abs() < 1e-9);
        assert!((w[1].sweep - 180.0).abs() < 1e-9);
        assert_eq!(w[1].percent_label(), "50.0%");
    }

    #[test]
    fn explode_offsets_follow_index() {
        let w = pie_wedges(&[1.0, 1.0], Some(&[0.1, 0.0]));
        assert_eq!(w[0].explode, 0.1);
        assert_eq!(w[1].explode, 0.0);
        assert!(pie_wedges(&[0.0, 0.0], None).is_empty());
    }

    #[test]
    fn pie_validation() {
        assert!(PieData::new(["a"], vec![-1.0]).validate().is_err());
        assert!(PieData::new(["a", "b"], vec![0.0, 0.0]).validate().is_err());
        assert!(PieData::new(["a", "b"], vec![1.0, 1.0]).with_explode(vec![0.1]).validate().is_err());
        assert!(PieData::new(["a", "b"], vec![1.0, 1.0]).donut().validate().is_ok());
    }

    #[test]
    fn radar_vertices_close_and_scale() {
        let v = radar_vertices(&[10.0, 5.0, 10.0, 0.0], 10.0);
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], v[4]);
        // first spoke points east at full radius
        assert!((v[0].x - 1.0).abs() < 1e-12 && v[0].y.abs() < 1e-12);
        // second spoke points north at half radius
        assert!(v[1].x.abs() < 1e-12 && (v[1].y - 0.5).abs() < 1e-12);
        // zero sits on the center
        assert!(v[3].length() < 1e-12);
    }

    #[test]
    fn radar_limit_uses_max_or_nice_ceiling() {
        assert_eq!(radar_limit(&[3.0, 87.0], None), 100.0);
        assert_eq!(radar_limit(&[3.0, 87.0], Some(90.0)), 90.0);
        assert!(RadarData::new(["a", "b"], vec![1.0, 2.0]).validate().is_err());
        assert!(RadarData::new(["a", "b", "c"], vec![1.0, 2.0, 3.0]).with_max(0.0).validate().is_err());
    }
}
