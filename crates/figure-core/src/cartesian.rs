// File: crates/figure-core/src/cartesian.rs
// Summary: Bar, grouped bar, line and scatter templates drawn in an x/y frame.

use serde::{Deserialize, Serialize};
use skia_safe as skia;

use crate::axis::Axis;
use crate::chart::{Plot, ANNOTATION_SIZE, AXIS_LABEL_SIZE, PX_PER_PT, TICK_SIZE};
use crate::color::{cycle, Rgba, CHART_PALETTE};
use crate::error::{FigureError, Result};
use crate::grid::format_tick;
use crate::raster::{fill_paint, stroke_paint};
use crate::scale::{BandScale, LinearScale};
use crate::series::{value_range, Series};
use crate::surface::{HAlign, VAlign};
use crate::text::FontFace;

/// Share of a category band covered by its bar (or bar group).
pub const BAR_FILL: f64 = 0.8;
/// Value labels sit this fraction of the largest value past the bar end.
pub const VALUE_LABEL_OFFSET: f64 = 0.01;
pub const LINE_WIDTH: f32 = 2.0;
/// Marker diameter in points.
pub const MARKER_SIZE: f32 = 6.0;
/// Default scatter marker area in points².
pub const SCATTER_AREA: f64 = 100.0;
pub const SCATTER_ALPHA: f32 = 0.6;
/// Scatter label offset from its point, in points (right, up).
pub const SCATTER_LABEL_OFFSET: (f32, f32) = (5.0, 5.0);
const TICK_LEN: f32 = 5.0;

fn invalid(msg: String) -> FigureError {
    FigureError::InvalidSpec(msg)
}

fn check_len<T>(what: &str, items: &Option<Vec<T>>, want: usize) -> Result<()> {
    match items {
        Some(v) if v.len() != want => Err(invalid(format!("{what} has {} entries, expected {want}", v.len()))),
        _ => Ok(()),
    }
}

fn collect_strings<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Vec<String> {
    items.into_iter().map(Into::into).collect()
}

/// Value label text: whole numbers without a fraction.
pub fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

// ---- data --------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarData {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    /// Per-bar colours; palette by index when absent.
    #[serde(default)]
    pub colors: Option<Vec<Rgba>>,
    #[serde(default)]
    pub horizontal: bool,
}

impl BarData {
    pub fn new<S: Into<String>>(categories: impl IntoIterator<Item = S>, values: Vec<f64>) -> Self {
        Self { categories: collect_strings(categories), values, colors: None, horizontal: false }
    }

    pub fn horizontal(mut self) -> Self {
        self.horizontal = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.values.is_empty() {
            return Err(invalid("bar chart needs at least one value".into()));
        }
        if self.categories.len() != self.values.len() {
            return Err(invalid(format!(
                "bar chart has {} categories but {} values",
                self.categories.len(),
                self.values.len()
            )));
        }
        check_len("bar colors", &self.colors, self.values.len())
    }

    pub fn color(&self, i: usize) -> Rgba {
        self.colors
            .as_ref()
            .and_then(|c| c.get(i).copied())
            .unwrap_or_else(|| cycle(&CHART_PALETTE, i))
    }

    /// Distance between a bar end and its value label, in data units.
    pub fn label_offset(&self) -> f64 {
        let max = self.values.iter().copied().filter(|v| v.is_finite()).fold(0.0f64, f64::max);
        max * VALUE_LABEL_OFFSET
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupedBarData {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl GroupedBarData {
    pub fn new<S: Into<String>>(categories: impl IntoIterator<Item = S>, series: Vec<Series>) -> Self {
        Self { categories: collect_strings(categories), series }
    }

    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(invalid("grouped bar chart needs at least one category".into()));
        }
        if self.series.is_empty() {
            return Err(invalid("grouped bar chart needs at least one series".into()));
        }
        for (i, s) in self.series.iter().enumerate() {
            if s.values.len() != self.categories.len() {
                return Err(invalid(format!(
                    "series {} has {} values for {} categories",
                    i + 1,
                    s.values.len(),
                    self.categories.len()
                )));
            }
        }
        Ok(())
    }
}

/// Bar width and per-series center offsets within one band, in band units.
pub fn group_offsets(n_series: usize) -> (f64, Vec<f64>) {
    let n = n_series.max(1) as f64;
    let width = BAR_FILL / n;
    let offsets = (0..n_series).map(|i| (i as f64 - n / 2.0 + 0.5) * width).collect();
    (width, offsets)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineData {
    pub x: Vec<f64>,
    pub series: Vec<Series>,
    #[serde(default = "default_true")]
    pub markers: bool,
}

fn default_true() -> bool {
    true
}

impl LineData {
    pub fn new(x: Vec<f64>, series: Vec<Series>) -> Self {
        Self { x, series, markers: true }
    }

    pub fn validate(&self) -> Result<()> {
        if self.x.is_empty() {
            return Err(invalid("line chart needs at least one x value".into()));
        }
        if self.series.is_empty() {
            return Err(invalid("line chart needs at least one series".into()));
        }
        for (i, s) in self.series.iter().enumerate() {
            if s.values.len() != self.x.len() {
                return Err(invalid(format!(
                    "series {} has {} values for {} x values",
                    i + 1,
                    s.values.len(),
                    self.x.len()
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Marker areas in points².
    #[serde(default)]
    pub sizes: Option<Vec<f64>>,
    #[serde(default)]
    pub colors: Option<Vec<Rgba>>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

impl ScatterData {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y, sizes: None, colors: None, labels: None }
    }

    pub fn validate(&self) -> Result<()> {
        if self.x.is_empty() {
            return Err(invalid("scatter chart needs at least one point".into()));
        }
        if self.x.len() != self.y.len() {
            return Err(invalid(format!("scatter chart has {} x but {} y values", self.x.len(), self.y.len())));
        }
        check_len("scatter sizes", &self.sizes, self.x.len())?;
        check_len("scatter colors", &self.colors, self.x.len())?;
        check_len("scatter labels", &self.labels, self.x.len())
    }

    pub fn size(&self, i: usize) -> f64 {
        self.sizes.as_ref().and_then(|s| s.get(i).copied()).unwrap_or(SCATTER_AREA)
    }

    pub fn color(&self, i: usize) -> Rgba {
        self.colors.as_ref().and_then(|c| c.get(i).copied()).unwrap_or(CHART_PALETTE[0])
    }
}

/// Marker radius in pixels for an area given in points².
pub fn marker_radius(area: f64) -> f32 {
    (area.max(0.0).sqrt() as f32) * 0.5 * PX_PER_PT
}

// ---- frame -------------------------------------------------------------------

/// How one side of the frame is labelled.
enum Ticks<'a> {
    Values(LinearScale, &'a Axis),
    Bands(BandScale, &'a [String]),
}

fn value_scale_x(plot: &Plot, axis: &Axis) -> LinearScale {
    LinearScale::new(axis.min, axis.max, plot.area.left, plot.area.right)
}

fn value_scale_y(plot: &Plot, axis: &Axis) -> LinearScale {
    LinearScale::new(axis.min, axis.max, plot.area.bottom, plot.area.top)
}

/// Grid, left/bottom spines, ticks and axis titles. Top/right spines stay hidden.
fn draw_frame(plot: &Plot, x: Ticks, y: Ticks, x_label: &str, y_label: &str, grid: bool) {
    let a = plot.area;
    let theme = plot.theme;
    let grid_paint = stroke_paint(theme.grid, 1.0);
    let tick_paint = stroke_paint(theme.tick, 1.0);
    let axis_paint = stroke_paint(theme.axis_line, 1.5);

    match &x {
        Ticks::Values(scale, axis) => {
            for t in axis.ticks() {
                let px = scale.to_px(t);
                if grid {
                    plot.canvas.draw_line((px, a.top), (px, a.bottom), &grid_paint);
                }
                plot.canvas.draw_line((px, a.bottom), (px, a.bottom + TICK_LEN), &tick_paint);
                plot.text(&format_tick(t), px, a.bottom + TICK_LEN + 3.0, TICK_SIZE, theme.tick, FontFace::Regular, HAlign::Center, VAlign::Top);
            }
        }
        Ticks::Bands(bands, names) => {
            for (i, name) in names.iter().enumerate() {
                let px = bands.center(i);
                plot.canvas.draw_line((px, a.bottom), (px, a.bottom + TICK_LEN), &tick_paint);
                plot.text(name, px, a.bottom + TICK_LEN + 3.0, TICK_SIZE, theme.axis_label, FontFace::Regular, HAlign::Center, VAlign::Top);
            }
        }
    }
    match &y {
        Ticks::Values(scale, axis) => {
            for t in axis.ticks() {
                let py = scale.to_px(t);
                if grid {
                    plot.canvas.draw_line((a.left, py), (a.right, py), &grid_paint);
                }
                plot.canvas.draw_line((a.left - TICK_LEN, py), (a.left, py), &tick_paint);
                plot.text(&format_tick(t), a.left - TICK_LEN - 3.0, py, TICK_SIZE, theme.tick, FontFace::Regular, HAlign::Right, VAlign::Center);
            }
        }
        Ticks::Bands(bands, names) => {
            for (i, name) in names.iter().enumerate() {
                let py = bands.center(i);
                plot.canvas.draw_line((a.left - TICK_LEN, py), (a.left, py), &tick_paint);
                plot.text(name, a.left - TICK_LEN - 3.0, py, TICK_SIZE, theme.axis_label, FontFace::Regular, HAlign::Right, VAlign::Center);
            }
        }
    }

    // X and Y axis lines
    plot.canvas.draw_line((a.left, a.bottom), (a.right, a.bottom), &axis_paint);
    plot.canvas.draw_line((a.left, a.top), (a.left, a.bottom), &axis_paint);

    plot.text(x_label, (a.left + a.right) * 0.5, a.bottom + 30.0, AXIS_LABEL_SIZE, theme.axis_label, FontFace::Regular, HAlign::Center, VAlign::Top);
    plot.text_rotated(y_label, a.left - 56.0, (a.top + a.bottom) * 0.5, -90.0, AXIS_LABEL_SIZE, theme.axis_label, HAlign::Center, VAlign::Bottom);
}

// ---- templates -----------------------------------------------------------------

pub(crate) fn draw_bar(plot: &Plot, data: &BarData, x_axis: &Axis, y_axis: &Axis) {
    let a = plot.area;
    let n = data.values.len();
    let offset = data.label_offset();

    if data.horizontal {
        // first category at the bottom, values along x
        let bands = BandScale::new(n, a.bottom, a.top);
        let values = value_scale_x(plot, y_axis);
        draw_frame(plot, Ticks::Values(values, y_axis), Ticks::Bands(bands, &data.categories), &y_axis.label, &x_axis.label, false);
        let half = bands.step().abs() * BAR_FILL as f32 * 0.5;
        for (i, &v) in data.values.iter().enumerate() {
            let cy = bands.center(i);
            let (x0, x1) = (values.to_px(0.0), values.to_px(v));
            let rect = skia::Rect::from_ltrb(x0.min(x1), cy - half, x0.max(x1), cy + half);
            plot.canvas.draw_rect(rect, &fill_paint(data.color(i)));
            plot.text(&format_value(v), values.to_px(v + offset), cy, ANNOTATION_SIZE, plot.theme.annotation, FontFace::Regular, HAlign::Left, VAlign::Center);
        }
    } else {
        let bands = BandScale::new(n, a.left, a.right);
        let values = value_scale_y(plot, y_axis);
        draw_frame(plot, Ticks::Bands(bands, &data.categories), Ticks::Values(values, y_axis), &x_axis.label, &y_axis.label, false);
        let half = bands.step() * BAR_FILL as f32 * 0.5;
        for (i, &v) in data.values.iter().enumerate() {
            let cx = bands.center(i);
            let (y0, y1) = (values.to_px(0.0), values.to_px(v));
            let rect = skia::Rect::from_ltrb(cx - half, y0.min(y1), cx + half, y0.max(y1));
            plot.canvas.draw_rect(rect, &fill_paint(data.color(i)));
            plot.text(&format_value(v), cx, values.to_px(v + offset), ANNOTATION_SIZE, plot.theme.annotation, FontFace::Regular, HAlign::Center, VAlign::Bottom);
        }
    }
}

pub(crate) fn draw_grouped_bar(plot: &Plot, data: &GroupedBarData, x_axis: &Axis, y_axis: &Axis) {
    let a = plot.area;
    let bands = BandScale::new(data.categories.len(), a.left, a.right);
    let values = value_scale_y(plot, y_axis);
    draw_frame(plot, Ticks::Bands(bands, &data.categories), Ticks::Values(values, y_axis), &x_axis.label, &y_axis.label, false);

    let (width, offsets) = group_offsets(data.series.len());
    let mut legend = Vec::with_capacity(data.series.len());
    for (si, (series, off)) in data.series.iter().zip(offsets).enumerate() {
        let color = series.resolved_color(si);
        let paint = fill_paint(color);
        for (ci, &v) in series.values.iter().enumerate() {
            let left = bands.at(ci as f64 + off - width / 2.0);
            let right = bands.at(ci as f64 + off + width / 2.0);
            let (y0, y1) = (values.to_px(0.0), values.to_px(v));
            plot.canvas.draw_rect(skia::Rect::from_ltrb(left, y0.min(y1), right, y0.max(y1)), &paint);
        }
        legend.push((series.display_label(si), color));
    }
    plot.legend(&legend);
}

pub(crate) fn draw_line(plot: &Plot, data: &LineData, x_axis: &Axis, y_axis: &Axis) {
    let xs = value_scale_x(plot, x_axis);
    let ys = value_scale_y(plot, y_axis);
    draw_frame(plot, Ticks::Values(xs, x_axis), Ticks::Values(ys, y_axis), &x_axis.label, &y_axis.label, true);

    let mut legend = Vec::with_capacity(data.series.len());
    for (si, series) in data.series.iter().enumerate() {
        let color = series.resolved_color(si);
        let points: Vec<skia::Point> = data
            .x
            .iter()
            .zip(&series.values)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| skia::Point::new(xs.to_px(x), ys.to_px(y)))
            .collect();

        if points.len() >= 2 {
            let mut path = skia::Path::new();
            path.move_to(points[0]);
            for p in &points[1..] {
                path.line_to(*p);
            }
            let mut stroke = stroke_paint(color, LINE_WIDTH);
            stroke.set_stroke_join(skia::paint::Join::Round);
            plot.canvas.draw_path(&path, &stroke);
        }
        if data.markers {
            let r = MARKER_SIZE * PX_PER_PT * 0.5;
            let fill = fill_paint(color);
            for p in &points {
                plot.canvas.draw_circle(*p, r, &fill);
            }
        }
        legend.push((series.display_label(si), color));
    }
    plot.legend(&legend);
}

pub(crate) fn draw_scatter(plot: &Plot, data: &ScatterData, x_axis: &Axis, y_axis: &Axis) {
    let xs = value_scale_x(plot, x_axis);
    let ys = value_scale_y(plot, y_axis);
    draw_frame(plot, Ticks::Values(xs, x_axis), Ticks::Values(ys, y_axis), &x_axis.label, &y_axis.label, true);

    let edge = stroke_paint(plot.theme.edge, 1.0);
    for (i, (&x, &y)) in data.x.iter().zip(&data.y).enumerate() {
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        let p = skia::Point::new(xs.to_px(x), ys.to_px(y));
        let r = marker_radius(data.size(i));
        plot.canvas.draw_circle(p, r, &fill_paint(data.color(i).with_alpha(SCATTER_ALPHA)));
        plot.canvas.draw_circle(p, r, &edge);
        if let Some(label) = data.labels.as_ref().and_then(|l| l.get(i)) {
            let (dx, dy) = SCATTER_LABEL_OFFSET;
            plot.text(label, p.x + dx * PX_PER_PT, p.y - dy * PX_PER_PT, 8.0 * PX_PER_PT, plot.theme.annotation, FontFace::Regular, HAlign::Left, VAlign::Bottom);
        }
    }
}

/// Combined `(min, max)` of every series, used by callers that share axes.
pub fn series_range(series: &[Series]) -> Option<(f64, f64)> {
    value_range(series.iter().flat_map(|s| s.values.iter().copied()))
}
