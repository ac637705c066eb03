// File: crates/figure-core/src/heatmap.rs
// Summary: Annotated heatmap template with a vertical colorbar.

use serde::{Deserialize, Serialize};
use skia_safe as skia;

use crate::chart::{Plot, TICK_SIZE};
use crate::color::Rgba;
use crate::colormap::Colormap;
use crate::error::{FigureError, Result};
use crate::grid::{format_tick, nice_range, ticks};
use crate::raster::{fill_paint, stroke_paint};
use crate::scale::{BandScale, LinearScale};
use crate::series::value_range;
use crate::surface::{HAlign, VAlign};
use crate::text::FontFace;

const CELL_TEXT_SIZE: f32 = 9.0 * crate::chart::PX_PER_PT;
const COLORBAR_WIDTH: f32 = 18.0;
const COLORBAR_GAP: f32 = 16.0;
/// Room right of the colorbar for its tick labels.
const COLORBAR_LABELS: f32 = 40.0;
const COLORBAR_STEPS: usize = 64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeatmapData {
    /// Row-major cells; every row has one value per column label.
    pub values: Vec<Vec<f64>>,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    #[serde(default)]
    pub colormap: Colormap,
    #[serde(default = "default_annotate")]
    pub annotate: bool,
}

fn default_annotate() -> bool {
    true
}

impl HeatmapData {
    pub fn new<R: Into<String>, C: Into<String>>(
        values: Vec<Vec<f64>>,
        row_labels: impl IntoIterator<Item = R>,
        col_labels: impl IntoIterator<Item = C>,
    ) -> Self {
        Self {
            values,
            row_labels: row_labels.into_iter().map(Into::into).collect(),
            col_labels: col_labels.into_iter().map(Into::into).collect(),
            colormap: Colormap::default(),
            annotate: true,
        }
    }

    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let cols = self.col_labels.len();
        if self.values.is_empty() || cols == 0 {
            return Err(FigureError::InvalidSpec("heatmap needs at least one row and one column".into()));
        }
        if self.row_labels.len() != self.values.len() {
            return Err(FigureError::InvalidSpec(format!(
                "heatmap has {} row labels for {} rows",
                self.row_labels.len(),
                self.values.len()
            )));
        }
        if let Some((i, row)) = self.values.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(FigureError::InvalidSpec(format!(
                "heatmap row {} has {} values, expected {cols}",
                i + 1,
                row.len()
            )));
        }
        Ok(())
    }

    fn cells(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().copied()
    }

    /// `(min, max)` over finite cells.
    pub fn range(&self) -> Option<(f64, f64)> {
        value_range(self.cells())
    }

    /// Mean over finite cells; 0 when there are none.
    pub fn mean(&self) -> f64 {
        let (sum, n) = self
            .cells()
            .filter(|v| v.is_finite())
            .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
        if n == 0 { 0.0 } else { sum / n as f64 }
    }
}

/// Annotation colour: white on cells above the mean, black otherwise.
pub fn annotation_color(value: f64, mean: f64) -> Rgba {
    if value > mean { Rgba::WHITE } else { Rgba::BLACK }
}

pub(crate) fn draw_heatmap(plot: &Plot, data: &HeatmapData) {
    let a = plot.area;
    let (lo, hi) = data.range().unwrap_or((0.0, 1.0));
    let mean = data.mean();
    let grid_right = a.right - COLORBAR_GAP - COLORBAR_WIDTH - COLORBAR_LABELS;
    let cols = BandScale::new(data.col_labels.len(), a.left, grid_right);
    let rows = BandScale::new(data.values.len(), a.top, a.bottom);

    for (ri, row) in data.values.iter().enumerate() {
        let top = rows.r0 + rows.step() * ri as f32;
        for (ci, &v) in row.iter().enumerate() {
            let left = cols.r0 + cols.step() * ci as f32;
            let rect = skia::Rect::from_xywh(left, top, cols.step(), rows.step());
            let fill = if v.is_finite() { data.colormap.map(v, lo, hi) } else { plot.theme.background };
            plot.canvas.draw_rect(rect, &fill_paint(fill));
            if data.annotate && v.is_finite() {
                let c = rect.center();
                plot.text(&format!("{v:.1}"), c.x, c.y, CELL_TEXT_SIZE, annotation_color(v, mean), FontFace::Regular, HAlign::Center, VAlign::Center);
            }
        }
    }

    for (ri, label) in data.row_labels.iter().enumerate() {
        plot.text(label, a.left - 6.0, rows.center(ri), TICK_SIZE, plot.theme.axis_label, FontFace::Regular, HAlign::Right, VAlign::Center);
    }
    for (ci, label) in data.col_labels.iter().enumerate() {
        // 45° labels hanging right-aligned under their column
        plot.text_rotated(label, cols.center(ci), a.bottom + 6.0, -45.0, TICK_SIZE, plot.theme.axis_label, HAlign::Right, VAlign::Top);
    }

    draw_colorbar(plot, data.colormap, lo, hi, grid_right + COLORBAR_GAP);
}

fn draw_colorbar(plot: &Plot, colormap: Colormap, lo: f64, hi: f64, left: f32) {
    let a = plot.area;
    let step = a.height() / COLORBAR_STEPS as f32;
    for i in 0..COLORBAR_STEPS {
        let t = (i as f64 + 0.5) / COLORBAR_STEPS as f64;
        // high values at the top
        let top = a.bottom - step * (i as f32 + 1.0);
        let rect = skia::Rect::from_xywh(left, top, COLORBAR_WIDTH, step + 0.5);
        plot.canvas.draw_rect(rect, &fill_paint(colormap.sample(t)));
    }
    let frame = skia::Rect::from_xywh(left, a.top, COLORBAR_WIDTH, a.height());
    plot.canvas.draw_rect(frame, &stroke_paint(plot.theme.axis_line, 1.0));

    let scale = LinearScale::new(lo, hi, a.bottom, a.top);
    let (_, _, tick_step) = nice_range(lo, hi, 5);
    let first = (lo / tick_step).ceil() * tick_step;
    let tick_paint = stroke_paint(plot.theme.tick, 1.0);
    for t in ticks(first, hi, tick_step) {
        let y = scale.to_px(t);
        plot.canvas.draw_line((left + COLORBAR_WIDTH, y), (left + COLORBAR_WIDTH + 4.0, y), &tick_paint);
        plot.text(&format_tick(t), left + COLORBAR_WIDTH + 7.0, y, TICK_SIZE, plot.theme.tick, FontFace::Regular, HAlign::Left, VAlign::Center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HeatmapData {
        HeatmapData::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 9.0]], ["r1", "r2"], ["a", "b", "c"])
    }

    #[test]
    fn range_and_mean() {
        let d = sample();
        assert!(d.validate().is_ok());
        assert_eq!(d.range(), Some((1.0, 9.0)));
        assert!((d.mean() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn annotations_switch_at_mean() {
        assert_eq!(annotation_color(5.0, 4.0), Rgba::WHITE);
        assert_eq!(annotation_color(4.0, 4.0), Rgba::BLACK);
        assert_eq!(annotation_color(1.0, 4.0), Rgba::BLACK);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let mut d = sample();
        d.values[1].pop();
        let msg = d.validate().unwrap_err().to_string();
        assert!(msg.contains("row 2"), "{msg}");
        let d = HeatmapData::new(vec![vec![1.0]], ["r1", "r2"], ["a"]);
        assert!(d.validate().is_err());
    }

    #[test]
    fn colormap_defaults_to_ylorrd() {
        assert_eq!(sample().colormap, Colormap::YlOrRd);
        assert_eq!(sample().with_colormap(Colormap::Viridis).colormap, Colormap::Viridis);
    }
}
