// File: crates/figure-core/src/diagram.rs
// Summary: Draws flowchart and mind map layouts onto any `Surface`; PNG entry points.

use anyhow::Result;
use std::path::Path;

use crate::color::Rgba;
use crate::flow::{self, FlowLayout, FlowStep, StepKind};
use crate::geometry::Point;
use crate::mindmap::{self, MindMapLayout, MindMapSpec};
use crate::node::{NodeShape, Stroke};
use crate::raster::{DiagramOptions, RasterSurface};
use crate::surface::{ConnectorStyle, HAlign, LabelStyle, ShapeStyle, Surface, TextStyle, VAlign};
use crate::text::FontFace;
use crate::types::{Validation, FLOW_CURVE_RAD};

const OUTLINE_WIDTH: f32 = 2.0;
const ARROW_WIDTH: f32 = 1.5;
const EDGE_LABEL: Rgba = Rgba::hex(0x333333);
const NOTE_BACKGROUND: Rgba = Rgba::hex(0xFFFDE7);
const NOTE_BORDER: Rgba = Rgba::hex(0xFFD54F);
/// Vertical distance between lines of a mind map node label, world units.
const NODE_LINE_HEIGHT: f64 = 0.25;

fn node_style(size: f32) -> ShapeStyle {
    ShapeStyle {
        outline: Rgba::WHITE,
        outline_width: OUTLINE_WIDTH,
        text: TextStyle::new(size, flow::NODE_TEXT).face(FontFace::Bold),
    }
}

fn flow_label_size(shape: &NodeShape) -> f32 {
    match shape {
        NodeShape::Oval { .. } => StepKind::Start.font_size(),
        NodeShape::Diamond { .. } => StepKind::Decision.font_size(),
        _ => StepKind::Process.font_size(),
    }
}

/// Shapes first, then arrows on top, then the title.
pub fn draw_flowchart<S: Surface + ?Sized>(layout: &FlowLayout, surface: &mut S) {
    for node in &layout.nodes {
        surface.shape(node, &node_style(flow_label_size(&node.shape)));
    }

    let arrows = ConnectorStyle {
        stroke: Stroke::new(flow::ARROW, ARROW_WIDTH, 1.0),
        head: true,
        rad: FLOW_CURVE_RAD,
        label: TextStyle::new(9.0, EDGE_LABEL).align(HAlign::Left, VAlign::Center),
    };
    for edge in &layout.edges {
        surface.connector(edge, &arrows);
    }

    if let Some(title) = &layout.title {
        let style = TextStyle::new(14.0, flow::TITLE_TEXT)
            .face(FontFace::Bold)
            .align(HAlign::Center, VAlign::Top);
        surface.text(title.at, &title.text, &style);
    }
}

/// Connectors underneath, then center, branches and children, then header and notes.
pub fn draw_mindmap<S: Surface + ?Sized>(layout: &MindMapLayout, surface: &mut S) {
    for c in &layout.connectors {
        let style = ConnectorStyle {
            stroke: c.stroke,
            head: false,
            rad: 0.0,
            label: TextStyle::new(9.0, EDGE_LABEL),
        };
        surface.connector(&c.edge, &style);
    }

    let stacked = |size: f32| {
        let mut s = node_style(size);
        s.text = s.text.line_height(NODE_LINE_HEIGHT);
        s
    };
    surface.shape(&layout.center, &stacked(14.0));
    for b in &layout.branches {
        surface.shape(&b.node, &stacked(11.0));
        for child in &b.children {
            surface.shape(child, &stacked(9.0));
        }
    }

    if let Some(header) = &layout.header {
        let style = TextStyle::new(16.0, mindmap::HEADER_TEXT)
            .face(FontFace::Bold)
            .align(HAlign::Center, VAlign::Top);
        surface.text(header.at, &header.text, &style);
    }

    let note = LabelStyle {
        text: TextStyle::new(9.0, EDGE_LABEL).face(FontFace::Italic),
        background: NOTE_BACKGROUND,
        border: NOTE_BORDER,
    };
    for a in &layout.annotations {
        surface.label(Point::new(a.x, a.y), &a.text, &note);
    }
}

/// Draw `layout` onto a fresh raster sized to its bounds.
pub fn rasterize_flowchart(layout: &FlowLayout, opts: &DiagramOptions) -> Result<RasterSurface> {
    let mut surface = RasterSurface::new(layout.bounds(), opts)?;
    draw_flowchart(layout, &mut surface);
    Ok(surface)
}

pub fn rasterize_mindmap(layout: &MindMapLayout, opts: &DiagramOptions) -> Result<RasterSurface> {
    let mut surface = RasterSurface::new(layout.bounds(), opts)?;
    draw_mindmap(layout, &mut surface);
    Ok(surface)
}

/// Lay out and render a branching flowchart to a PNG at `path`.
pub fn render_flowchart(
    steps: &[FlowStep],
    path: impl AsRef<Path>,
    opts: &DiagramOptions,
    validation: Validation,
) -> Result<()> {
    let layout = flow::layout_flow(steps, validation)?;
    rasterize_flowchart(&layout, opts)?.persist(path.as_ref())?;
    Ok(())
}

/// Lay out and render a straight chain of steps to a PNG at `path`.
pub fn render_linear_flowchart<S: AsRef<str>>(
    items: &[(StepKind, S)],
    title: Option<&str>,
    path: impl AsRef<Path>,
    opts: &DiagramOptions,
    validation: Validation,
) -> Result<()> {
    let layout = flow::layout_linear(items, title, validation)?;
    rasterize_flowchart(&layout, opts)?.persist(path.as_ref())?;
    Ok(())
}

/// Lay out and render a mind map to a PNG at `path`.
pub fn render_mindmap(
    spec: &MindMapSpec,
    path: impl AsRef<Path>,
    opts: &DiagramOptions,
    validation: Validation,
) -> Result<()> {
    let layout = mindmap::layout_mindmap(spec, validation)?;
    rasterize_mindmap(&layout, opts)?.persist(path.as_ref())?;
    Ok(())
}
