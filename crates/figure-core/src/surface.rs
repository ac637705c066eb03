// File: crates/figure-core/src/surface.rs
// Summary: Drawing surface contract used by the diagram renderer, plus an in-memory recorder.
// Notes:
// - Coordinates are world units (y up). Sizes of text and strokes are points.
// - `raster::RasterSurface` is the Skia implementation; `Recorder` keeps the
//   calls for inspection or a JSON scene dump.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Point;
use crate::node::{Edge, Node, Stroke};
use crate::text::FontFace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in points.
    pub size: f32,
    pub color: Rgba,
    pub face: FontFace,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Distance between stacked lines of multi-line text, world units.
    /// `None` lets the font decide.
    pub line_height: Option<f64>,
}

impl TextStyle {
    pub fn new(size: f32, color: Rgba) -> Self {
        Self {
            size,
            color,
            face: FontFace::Regular,
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            line_height: None,
        }
    }

    pub fn face(mut self, face: FontFace) -> Self {
        self.face = face;
        self
    }

    pub fn align(mut self, h: HAlign, v: VAlign) -> Self {
        self.h_align = h;
        self.v_align = v;
        self
    }

    pub fn line_height(mut self, units: f64) -> Self {
        self.line_height = Some(units);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub outline: Rgba,
    /// Outline width in points.
    pub outline_width: f32,
    pub text: TextStyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectorStyle {
    pub stroke: Stroke,
    /// Draw a filled head at the `to` end.
    pub head: bool,
    /// Bend used when the edge is curved.
    pub rad: f64,
    /// Style of the edge label, if the edge carries one.
    pub label: TextStyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub text: TextStyle,
    pub background: Rgba,
    pub border: Rgba,
}

/// Everything a diagram needs from a canvas.
pub trait Surface {
    /// Fill and outline `node.shape` at its anchor center, label centered inside.
    fn shape(&mut self, node: &Node, style: &ShapeStyle);
    /// Straight or curved line from `edge.from` to `edge.to`, with its label.
    fn connector(&mut self, edge: &Edge, style: &ConnectorStyle);
    fn text(&mut self, at: Point, text: &str, style: &TextStyle);
    /// Text on a rounded, bordered background.
    fn label(&mut self, at: Point, text: &str, style: &LabelStyle);
    /// Write the canvas to `path`, creating parent directories.
    fn persist(&mut self, path: &Path) -> Result<()>;
}

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Shape { node: Node, style: ShapeStyle },
    Connector { edge: Edge, style: ConnectorStyle },
    Text { at: Point, text: String, style: TextStyle },
    Label { at: Point, text: String, style: LabelStyle },
}

/// Surface that remembers calls instead of drawing; persists them as JSON.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Node> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Shape { node, .. } => Some(node),
            _ => None,
        })
    }

    pub fn connectors(&self) -> impl Iterator<Item = (&Edge, &ConnectorStyle)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Connector { edge, style } => Some((edge, style)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } | DrawOp::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn shape(&mut self, node: &Node, style: &ShapeStyle) {
        self.ops.push(DrawOp::Shape { node: node.clone(), style: *style });
    }

    fn connector(&mut self, edge: &Edge, style: &ConnectorStyle) {
        self.ops.push(DrawOp::Connector { edge: edge.clone(), style: *style });
    }

    fn text(&mut self, at: Point, text: &str, style: &TextStyle) {
        self.ops.push(DrawOp::Text { at, text: text.to_string(), style: *style });
    }

    fn label(&mut self, at: Point, text: &str, style: &LabelStyle) {
        self.ops.push(DrawOp::Label { at, text: text.to_string(), style: *style });
    }

    fn persist(&mut self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec_pretty(&self.ops)?)?;
        tracing::info!(path = %path.display(), ops = self.ops.len(), "scene saved");
        Ok(())
    }
}
