// File: crates/figure-core/src/raster.rs
// Summary: Skia CPU raster implementation of `Surface`; maps world units to pixels and writes PNG.

use skia_safe as skia;
use std::path::Path;

use crate::color::Rgba;
use crate::error::{FigureError, Result};
use crate::geometry::{Bounds, Point};
use crate::node::{Edge, Node, NodeShape};
use crate::surface::{ConnectorStyle, HAlign, LabelStyle, ShapeStyle, Surface, TextStyle, VAlign};
use crate::text::TextShaper;

/// Arrow head length and half width, in points.
const HEAD_LENGTH_PT: f32 = 6.0;
const HEAD_HALF_WIDTH_PT: f32 = 3.0;
/// Padding around label text, as a fraction of the font size.
const LABEL_PAD: f32 = 0.3;

/// Diagram raster configuration.
#[derive(Clone, Copy, Debug)]
pub struct DiagramOptions {
    /// Pixels per world unit; one point is `pixels_per_unit / 72` pixels.
    pub pixels_per_unit: f32,
    /// Blank border around the diagram bounds, in pixels.
    pub padding: u32,
    pub background: Rgba,
    /// Skip all text (deterministic output for pixel comparisons).
    pub draw_labels: bool,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            pixels_per_unit: 100.0,
            padding: 24,
            background: Rgba::WHITE,
            draw_labels: true,
        }
    }
}

pub struct RasterSurface {
    surface: skia::Surface,
    bounds: Bounds,
    scale: f32,
    padding: f32,
    draw_labels: bool,
    shaper: TextShaper,
}

impl RasterSurface {
    /// Surface covering world `bounds`, cleared to the background colour.
    pub fn new(bounds: Bounds, opts: &DiagramOptions) -> Result<Self> {
        let scale = opts.pixels_per_unit.max(1.0);
        let w = (bounds.width() as f32 * scale).ceil() as i32 + 2 * opts.padding as i32;
        let h = (bounds.height() as f32 * scale).ceil() as i32 + 2 * opts.padding as i32;
        let mut surface = skia::surfaces::raster_n32_premul((w.max(1), h.max(1)))
            .ok_or_else(|| FigureError::Surface(format!("failed to create {w}x{h} raster surface")))?;
        surface.canvas().clear(opts.background.to_skia());
        Ok(Self {
            surface,
            bounds,
            scale,
            padding: opts.padding as f32,
            draw_labels: opts.draw_labels,
            shaper: TextShaper::new(),
        })
    }

    pub fn size(&self) -> (i32, i32) {
        (self.surface.width(), self.surface.height())
    }

    /// World point to pixel (y flipped).
    pub fn to_px(&self, p: Point) -> skia::Point {
        skia::Point::new(
            self.padding + ((p.x - self.bounds.min.x) as f32) * self.scale,
            self.padding + ((self.bounds.max.y - p.y) as f32) * self.scale,
        )
    }

    /// Points to pixels.
    fn pt(&self, points: f32) -> f32 {
        points * self.scale / 72.0
    }

    pub fn encode_png(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| FigureError::Surface("encode PNG failed".into()))?;
        Ok(data.as_bytes().to_vec())
    }

    fn draw_text_block(&mut self, at: Point, text: &str, style: &TextStyle) {
        if !self.draw_labels || text.is_empty() {
            return;
        }
        let size = self.pt(style.size);
        let color = style.color.to_skia();
        match style.line_height {
            Some(lh) if text.contains('\n') => {
                // Explicit stacking: the block's middle line sits on `at`.
                let lines: Vec<&str> = text.split('\n').collect();
                let start_y = at.y + (lines.len() as f64 - 1.0) * lh / 2.0;
                for (i, line) in lines.iter().enumerate() {
                    let p = self.to_px(Point::new(at.x, start_y - i as f64 * lh));
                    let canvas = self.surface.canvas();
                    self.shaper.draw_aligned(canvas, line, p.x, p.y, size, color, style.face, style.h_align, VAlign::Center);
                }
            }
            _ => {
                let p = self.to_px(at);
                let canvas = self.surface.canvas();
                self.shaper.draw_aligned(canvas, text, p.x, p.y, size, color, style.face, style.h_align, style.v_align);
            }
        }
    }
}

pub(crate) fn fill_paint(c: Rgba) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(c.to_skia());
    paint
}

pub(crate) fn stroke_paint(c: Rgba, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(c.to_skia());
    paint
}

pub(crate) fn polygon(points: &[skia::Point]) -> skia::Path {
    let mut path = skia::Path::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close();
    }
    path
}

/// Filled triangle with its tip on `tip`, pointing along `dir` (pixel space).
fn arrow_head(tip: skia::Point, dir: skia::Point, length: f32, half_width: f32) -> Option<skia::Path> {
    let len = (dir.x * dir.x + dir.y * dir.y).sqrt();
    if len <= f32::EPSILON {
        return None;
    }
    let (ux, uy) = (dir.x / len, dir.y / len);
    let base = skia::Point::new(tip.x - ux * length, tip.y - uy * length);
    let (nx, ny) = (-uy * half_width, ux * half_width);
    Some(polygon(&[
        tip,
        skia::Point::new(base.x + nx, base.y + ny),
        skia::Point::new(base.x - nx, base.y - ny),
    ]))
}

impl Surface for RasterSurface {
    fn shape(&mut self, node: &Node, style: &ShapeStyle) {
        let c = node.center();
        let (hw, hh) = node.shape.half_extents();
        let tl = self.to_px(Point::new(c.x - hw, c.y + hh));
        let br = self.to_px(Point::new(c.x + hw, c.y - hh));
        let rect = skia::Rect::from_ltrb(tl.x, tl.y, br.x, br.y);
        let fill = fill_paint(node.fill);
        let outline = stroke_paint(style.outline, self.pt(style.outline_width));
        let poly = node
            .shape
            .vertices(c)
            .map(|vs| polygon(&vs.iter().map(|v| self.to_px(*v)).collect::<Vec<_>>()));
        let corner = match node.shape {
            NodeShape::RoundedBox { corner, .. } => corner as f32 * self.scale,
            _ => 0.0,
        };

        {
            let canvas = self.surface.canvas();
            match (node.shape, poly) {
                (_, Some(path)) => {
                    canvas.draw_path(&path, &fill);
                    canvas.draw_path(&path, &outline);
                }
                (NodeShape::Oval { .. }, None) => {
                    canvas.draw_oval(rect, &fill);
                    canvas.draw_oval(rect, &outline);
                }
                (_, None) => {
                    let rrect = skia::RRect::new_rect_xy(rect, corner, corner);
                    canvas.draw_rrect(&rrect, &fill);
                    canvas.draw_rrect(&rrect, &outline);
                }
            }
        }

        self.draw_text_block(c, &node.text, &style.text);
    }

    fn connector(&mut self, edge: &Edge, style: &ConnectorStyle) {
        let from = self.to_px(edge.from);
        let to = self.to_px(edge.to);
        let control = edge.control(style.rad).map(|p| self.to_px(p));
        let alpha = style.stroke.alpha * (style.stroke.color.a as f32 / 255.0);
        let color = style.stroke.color.with_alpha(alpha);
        let paint = stroke_paint(color, self.pt(style.stroke.width));
        let head = if style.head {
            let back = control.unwrap_or(from);
            arrow_head(to, skia::Point::new(to.x - back.x, to.y - back.y), self.pt(HEAD_LENGTH_PT), self.pt(HEAD_HALF_WIDTH_PT))
        } else {
            None
        };

        {
            let canvas = self.surface.canvas();
            let mut path = skia::Path::new();
            path.move_to(from);
            match control {
                Some(ctrl) => {
                    path.quad_to(ctrl, to);
                }
                None => {
                    path.line_to(to);
                }
            }
            canvas.draw_path(&path, &paint);
            if let Some(head) = head {
                canvas.draw_path(&head, &fill_paint(color));
            }
        }

        if let Some(label) = edge.label.as_deref() {
            self.draw_text_block(edge.label_origin(), label, &style.label);
        }
    }

    fn text(&mut self, at: Point, text: &str, style: &TextStyle) {
        self.draw_text_block(at, text, style);
    }

    fn label(&mut self, at: Point, text: &str, style: &LabelStyle) {
        if !self.draw_labels || text.is_empty() {
            return;
        }
        let size = self.pt(style.text.size);
        let (w, h) = self.shaper.measure(text, size, style.text.face);
        let p = self.to_px(at);
        let pad = size * LABEL_PAD;
        let left = match style.text.h_align {
            HAlign::Left => p.x,
            HAlign::Center => p.x - w * 0.5,
            HAlign::Right => p.x - w,
        };
        let top = match style.text.v_align {
            VAlign::Top => p.y,
            VAlign::Center => p.y - h * 0.5,
            VAlign::Bottom => p.y - h,
        };
        let rect = skia::Rect::from_ltrb(left - pad, top - pad, left + w + pad, top + h + pad);
        let rrect = skia::RRect::new_rect_xy(rect, pad, pad);
        let border = stroke_paint(style.border, self.pt(1.0));
        {
            let canvas = self.surface.canvas();
            canvas.draw_rrect(&rrect, &fill_paint(style.background));
            canvas.draw_rrect(&rrect, &border);
        }
        self.draw_text_block(at, text, &style.text);
    }

    fn persist(&mut self, path: &Path) -> Result<()> {
        let bytes = self.encode_png()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        let (w, h) = self.size();
        tracing::info!(path = %path.display(), width = w, height = h, "image saved");
        Ok(())
    }
}
