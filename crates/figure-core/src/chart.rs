// File: crates/figure-core/src/chart.rs
// Summary: Chart struct and headless PNG rendering pipeline using Skia CPU raster surfaces.
// Notes:
// - Chart geometry is in pixels; each template module draws into the plot
//   rect left after `RenderOptions::insets`.
// - Constructors validate input and autoscale axes; callers may still
//   override `x_axis`/`y_axis` before rendering.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use skia_safe as skia;

use crate::cartesian::{self, BarData, GroupedBarData, LineData, ScatterData};
use crate::color::Rgba;
use crate::error::FigureError;
use crate::heatmap::{self, HeatmapData};
use crate::polar::{self, PieData, RadarData};
use crate::raster::{fill_paint, stroke_paint};
use crate::series::{value_range, Series};
use crate::surface::{HAlign, VAlign};
use crate::text::{FontFace, TextShaper};
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};
use crate::Axis;

pub const TITLE_SIZE: f32 = 18.0;
pub const AXIS_LABEL_SIZE: f32 = 13.0;
pub const TICK_SIZE: f32 = 11.0;
pub const ANNOTATION_SIZE: f32 = 10.0;
/// Screen pixels per typographic point (96 dpi).
pub const PX_PER_PT: f32 = 96.0 / 72.0;

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Skip all text (deterministic output for pixel comparisons).
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::light(),
            draw_labels: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartKind {
    Bar(BarData),
    Pie(PieData),
    Line(LineData),
    Scatter(ScatterData),
    Heatmap(HeatmapData),
    Radar(RadarData),
    GroupedBar(GroupedBarData),
}

impl ChartKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Bar(_) => "bar",
            ChartKind::Pie(_) => "pie",
            ChartKind::Line(_) => "line",
            ChartKind::Scatter(_) => "scatter",
            ChartKind::Heatmap(_) => "heatmap",
            ChartKind::Radar(_) => "radar",
            ChartKind::GroupedBar(_) => "grouped_bar",
        }
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        match self {
            ChartKind::Bar(d) => d.validate(),
            ChartKind::Pie(d) => d.validate(),
            ChartKind::Line(d) => d.validate(),
            ChartKind::Scatter(d) => d.validate(),
            ChartKind::Heatmap(d) => d.validate(),
            ChartKind::Radar(d) => d.validate(),
            ChartKind::GroupedBar(d) => d.validate(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Chart {
    pub title: Option<String>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub kind: ChartKind,
}

impl Chart {
    /// Wrap `kind` with default axis labels and autoscaled ranges (no validation).
    pub fn new(kind: ChartKind) -> Self {
        let (x_axis, y_axis) = match kind {
            ChartKind::Bar(_) => (Axis::default_x(), Axis::default_y()),
            _ => (Axis::new("", 0.0, 1.0), Axis::new("", 0.0, 1.0)),
        };
        let mut chart = Self { title: None, x_axis, y_axis, kind };
        chart.autoscale_axes();
        chart
    }

    fn checked(kind: ChartKind) -> crate::error::Result<Self> {
        kind.validate()?;
        Ok(Self::new(kind))
    }

    pub fn bar<S: Into<String>>(
        categories: impl IntoIterator<Item = S>,
        values: Vec<f64>,
    ) -> crate::error::Result<Self> {
        Self::checked(ChartKind::Bar(BarData::new(categories, values)))
    }

    pub fn pie<S: Into<String>>(
        labels: impl IntoIterator<Item = S>,
        values: Vec<f64>,
    ) -> crate::error::Result<Self> {
        Self::checked(ChartKind::Pie(PieData::new(labels, values)))
    }

    pub fn line(x: Vec<f64>, series: Vec<Series>) -> crate::error::Result<Self> {
        Self::checked(ChartKind::Line(LineData::new(x, series)))
    }

    pub fn scatter(x: Vec<f64>, y: Vec<f64>) -> crate::error::Result<Self> {
        Self::checked(ChartKind::Scatter(ScatterData::new(x, y)))
    }

    pub fn heatmap<R: Into<String>, C: Into<String>>(
        values: Vec<Vec<f64>>,
        row_labels: impl IntoIterator<Item = R>,
        col_labels: impl IntoIterator<Item = C>,
    ) -> crate::error::Result<Self> {
        Self::checked(ChartKind::Heatmap(HeatmapData::new(values, row_labels, col_labels)))
    }

    pub fn radar<S: Into<String>>(
        categories: impl IntoIterator<Item = S>,
        values: Vec<f64>,
    ) -> crate::error::Result<Self> {
        Self::checked(ChartKind::Radar(RadarData::new(categories, values)))
    }

    pub fn grouped_bar<S: Into<String>>(
        categories: impl IntoIterator<Item = S>,
        series: Vec<Series>,
    ) -> crate::error::Result<Self> {
        Self::checked(ChartKind::GroupedBar(GroupedBarData::new(categories, series)))
    }

    /// Build from an already assembled kind, validating it first.
    pub fn from_kind(kind: ChartKind) -> crate::error::Result<Self> {
        Self::checked(kind)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis.label = x.into();
        self.y_axis.label = y.into();
        self
    }

    /// Fit axis ranges to the data with nice 1-2-5 bounds. Bar value axes
    /// always include zero. Pie, radar and heatmap charts keep their axes
    /// untouched since they draw no cartesian frame.
    pub fn autoscale_axes(&mut self) {
        match &self.kind {
            ChartKind::Bar(d) => {
                if let Some((lo, hi)) = value_range(d.values.iter().copied()) {
                    self.y_axis.fit(lo, hi, true);
                }
            }
            ChartKind::GroupedBar(d) => {
                if let Some((lo, hi)) = cartesian::series_range(&d.series) {
                    self.y_axis.fit(lo, hi, true);
                }
            }
            ChartKind::Line(d) => {
                if let Some((lo, hi)) = value_range(d.x.iter().copied()) {
                    self.x_axis.fit(lo, hi, false);
                }
                if let Some((lo, hi)) = cartesian::series_range(&d.series) {
                    self.y_axis.fit(lo, hi, false);
                }
            }
            ChartKind::Scatter(d) => {
                if let Some((lo, hi)) = value_range(d.x.iter().copied()) {
                    self.x_axis.fit(lo, hi, false);
                }
                if let Some((lo, hi)) = value_range(d.y.iter().copied()) {
                    self.y_axis.fit(lo, hi, false);
                }
            }
            ChartKind::Pie(_) | ChartKind::Heatmap(_) | ChartKind::Radar(_) => {}
        }
    }

    /// Render onto a fresh CPU raster surface.
    pub fn render_to_surface(&self, opts: &RenderOptions) -> Result<skia::Surface> {
        self.kind.validate()?;
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| FigureError::Surface(format!("failed to create {}x{} raster surface", opts.width, opts.height)))?;
        let shaper = TextShaper::new();
        tracing::debug!(kind = self.kind.name(), width = opts.width, height = opts.height, "rendering chart");

        {
            let canvas = surface.canvas();
            canvas.clear(opts.theme.background.to_skia());

            // Paddings & plot rect
            let area = skia::Rect::from_ltrb(
                opts.insets.left as f32,
                opts.insets.top as f32,
                (opts.width - opts.insets.right as i32) as f32,
                (opts.height - opts.insets.bottom as i32) as f32,
            );
            let plot = Plot {
                canvas,
                area,
                theme: &opts.theme,
                shaper: &shaper,
                draw_labels: opts.draw_labels,
            };

            match &self.kind {
                ChartKind::Bar(d) => cartesian::draw_bar(&plot, d, &self.x_axis, &self.y_axis),
                ChartKind::GroupedBar(d) => cartesian::draw_grouped_bar(&plot, d, &self.x_axis, &self.y_axis),
                ChartKind::Line(d) => cartesian::draw_line(&plot, d, &self.x_axis, &self.y_axis),
                ChartKind::Scatter(d) => cartesian::draw_scatter(&plot, d, &self.x_axis, &self.y_axis),
                ChartKind::Pie(d) => polar::draw_pie(&plot, d),
                ChartKind::Radar(d) => polar::draw_radar(&plot, d),
                ChartKind::Heatmap(d) => heatmap::draw_heatmap(&plot, d),
            }

            if let Some(title) = &self.title {
                plot.text(
                    title,
                    opts.width as f32 * 0.5,
                    opts.insets.top as f32 * 0.5,
                    TITLE_SIZE,
                    opts.theme.title,
                    FontFace::Bold,
                    HAlign::Center,
                    VAlign::Center,
                );
            }
        }
        Ok(surface)
    }

    /// Encode the chart as PNG in memory.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.render_to_surface(opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Unpremultiplied RGBA pixels, plus width, height and row stride in bytes.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.render_to_surface(opts)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("reading {w}x{h} pixels failed");
        }
        Ok((pixels, w as u32, h as u32, stride))
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        let path = output_png_path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        tracing::info!(path = %path.display(), kind = self.kind.name(), "chart saved");
        Ok(())
    }
}

// ---- shared drawing context --------------------------------------------------

/// What a template needs to draw: the canvas, the plot rect and the theme.
pub(crate) struct Plot<'a> {
    pub canvas: &'a skia::Canvas,
    pub area: skia::Rect,
    pub theme: &'a Theme,
    shaper: &'a TextShaper,
    draw_labels: bool,
}

impl Plot<'_> {
    #[allow(clippy::too_many_arguments)]
    pub fn text(&self, text: &str, x: f32, y: f32, size: f32, color: Rgba, face: FontFace, h: HAlign, v: VAlign) {
        if !self.draw_labels || text.is_empty() {
            return;
        }
        self.shaper.draw_aligned(self.canvas, text, x, y, size, color.to_skia(), face, h, v);
    }

    /// Text turned by `degrees` (clockwise on screen) around its anchor.
    #[allow(clippy::too_many_arguments)]
    pub fn text_rotated(&self, text: &str, x: f32, y: f32, degrees: f32, size: f32, color: Rgba, h: HAlign, v: VAlign) {
        if !self.draw_labels || text.is_empty() {
            return;
        }
        self.canvas.save();
        self.canvas.translate((x, y));
        self.canvas.rotate(degrees, None);
        self.shaper.draw_aligned(self.canvas, text, 0.0, 0.0, size, color.to_skia(), FontFace::Regular, h, v);
        self.canvas.restore();
    }

    pub fn measure(&self, text: &str, size: f32, face: FontFace) -> (f32, f32) {
        if !self.draw_labels {
            return (0.0, 0.0);
        }
        self.shaper.measure(text, size, face)
    }

    /// Legend box in the top-right corner of the plot rect.
    pub fn legend(&self, entries: &[(String, Rgba)]) {
        if entries.is_empty() {
            return;
        }
        let row = 18.0;
        let swatch = 12.0;
        let pad = 8.0;
        let text_w = entries
            .iter()
            .map(|(label, _)| self.measure(label, TICK_SIZE, FontFace::Regular).0)
            .fold(0.0f32, f32::max);
        let w = pad * 3.0 + swatch + text_w;
        let h = pad * 2.0 + row * entries.len() as f32;
        let box_rect = skia::Rect::from_xywh(self.area.right - w - 6.0, self.area.top + 6.0, w, h);
        let rrect = skia::RRect::new_rect_xy(box_rect, 4.0, 4.0);
        self.canvas.draw_rrect(&rrect, &fill_paint(self.theme.legend_background));
        self.canvas.draw_rrect(&rrect, &stroke_paint(self.theme.legend_border, 1.0));

        for (i, (label, color)) in entries.iter().enumerate() {
            let cy = box_rect.top + pad + row * (i as f32 + 0.5);
            let sx = box_rect.left + pad;
            let sw = skia::Rect::from_xywh(sx, cy - swatch * 0.5, swatch, swatch);
            self.canvas.draw_rect(sw, &fill_paint(*color));
            self.text(label, sx + swatch + pad, cy, TICK_SIZE, self.theme.axis_label, FontFace::Regular, HAlign::Left, VAlign::Center);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_reject_mismatched_lengths() {
        let err = Chart::bar(["a", "b"], vec![1.0]).unwrap_err();
        assert!(matches!(err, FigureError::InvalidSpec(_)));
        assert!(Chart::pie(Vec::<String>::new(), vec![]).is_err());
        assert!(Chart::line(vec![1.0, 2.0], vec![Series::new(vec![1.0])]).is_err());
        assert!(Chart::grouped_bar(["a"], vec![]).is_err());
    }

    #[test]
    fn bar_defaults_and_autoscale() {
        let chart = Chart::bar(["A", "B", "C"], vec![12.0, 48.0, 30.0]).unwrap();
        assert_eq!(chart.x_axis.label, "Category");
        assert_eq!(chart.y_axis.label, "Value");
        assert_eq!(chart.y_axis.min, 0.0);
        assert!(chart.y_axis.max >= 48.0);
        assert_eq!(chart.kind.name(), "bar");
    }

    #[test]
    fn line_autoscale_covers_all_series() {
        let chart = Chart::line(
            vec![1.0, 2.0, 3.0],
            vec![Series::new(vec![5.0, 7.0, 6.0]), Series::new(vec![-2.0, 0.0, 9.5])],
        )
        .unwrap();
        assert!(chart.y_axis.min <= -2.0);
        assert!(chart.y_axis.max >= 9.5);
        assert!(chart.x_axis.min <= 1.0 && chart.x_axis.max >= 3.0);
        assert_eq!(chart.x_axis.label, "");
    }

    #[test]
    fn builders_set_title_and_labels() {
        let chart = Chart::scatter(vec![1.0, 2.0], vec![3.0, 4.0])
            .unwrap()
            .with_title("Spread")
            .with_axis_labels("x", "y");
        assert_eq!(chart.title.as_deref(), Some("Spread"));
        assert_eq!(chart.x_axis.label, "x");
        assert_eq!(chart.y_axis.label, "y");
    }

    #[test]
    fn kind_deserializes_from_tagged_json() {
        let kind: ChartKind = serde_json::from_str(
            r#"{"type":"pie","labels":["a","b"],"values":[1,3],"donut":true}"#,
        )
        .unwrap();
        let chart = Chart::from_kind(kind).unwrap();
        assert_eq!(chart.kind.name(), "pie");
    }

    #[test]
    fn kind_reads_hex_and_named_colours() {
        let kind: ChartKind = serde_json::from_str(
            r##"{"type":"bar","categories":["a","b"],"values":[1,2],"colors":["#FF0000","#0f0"]}"##,
        )
        .unwrap();
        let ChartKind::Bar(bar) = &kind else { panic!("expected bar, got {kind:?}") };
        assert_eq!(bar.color(0), Rgba::hex(0xFF0000));
        assert_eq!(bar.color(1), Rgba::hex(0x00FF00));
        assert!(Chart::from_kind(kind).is_ok());

        let kind: ChartKind = serde_json::from_str(
            r##"{"type":"grouped_bar","categories":["q1"],"series":[{"label":"a","values":[3],"color":"teal"}]}"##,
        )
        .unwrap();
        let ChartKind::GroupedBar(grouped) = &kind else { panic!("expected grouped bar, got {kind:?}") };
        assert_eq!(grouped.series[0].resolved_color(0), Rgba::hex(0x008080));

        let bad = r##"{"type":"bar","categories":["a"],"values":[1],"colors":["nope"]}"##;
        assert!(serde_json::from_str::<ChartKind>(bad).is_err());
    }
}
