// File: crates/figure-core/src/node.rs
// Summary: Placed diagram nodes, their anchor points, and the edges between them.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::geometry::{arc_control, Bounds, Point};

/// Outline of a diagram node, sized in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum NodeShape {
    Oval { width: f64, height: f64 },
    RoundedBox { width: f64, height: f64, corner: f64 },
    /// Rhombus whose diagonals are both `size` long.
    Diamond { size: f64 },
    /// Top edge shifted right by `width * skew`, bottom edge shifted left.
    Parallelogram { width: f64, height: f64, skew: f64 },
}

impl NodeShape {
    pub const START_END: NodeShape = NodeShape::Oval { width: 2.5, height: 1.0 };
    pub const PROCESS: NodeShape = NodeShape::RoundedBox { width: 3.0, height: 1.2, corner: 0.15 };
    pub const DECISION: NodeShape = NodeShape::Diamond { size: 1.8 };
    pub const IO: NodeShape = NodeShape::Parallelogram { width: 3.0, height: 1.0, skew: 0.3 };

    /// Half width and half height used for anchors.
    pub fn half_extents(&self) -> (f64, f64) {
        match *self {
            NodeShape::Oval { width, height }
            | NodeShape::RoundedBox { width, height, .. }
            | NodeShape::Parallelogram { width, height, .. } => (width / 2.0, height / 2.0),
            NodeShape::Diamond { size } => (size / 2.0, size / 2.0),
        }
    }

    pub fn anchor(&self, center: Point) -> NodeAnchor {
        let (hw, hh) = self.half_extents();
        NodeAnchor {
            center,
            top: Point::new(center.x, center.y + hh),
            bottom: Point::new(center.x, center.y - hh),
            left: Point::new(center.x - hw, center.y),
            right: Point::new(center.x + hw, center.y),
        }
    }

    /// Polygon outline for diamond and parallelogram shapes, clockwise starting
    /// at the top. Ovals and boxes have no vertex list.
    pub fn vertices(&self, center: Point) -> Option<Vec<Point>> {
        let Point { x, y } = center;
        match *self {
            NodeShape::Diamond { size } => {
                let h = size / 2.0;
                Some(vec![
                    Point::new(x, y + h),
                    Point::new(x + h, y),
                    Point::new(x, y - h),
                    Point::new(x - h, y),
                ])
            }
            NodeShape::Parallelogram { width, height, skew } => {
                let (hw, hh) = (width / 2.0, height / 2.0);
                let off = width * skew;
                Some(vec![
                    Point::new(x - hw + off, y + hh),
                    Point::new(x + hw + off, y + hh),
                    Point::new(x + hw - off, y - hh),
                    Point::new(x - hw - off, y - hh),
                ])
            }
            _ => None,
        }
    }

    /// Region covered by the drawn outline (parallelograms overhang their anchors).
    pub fn bounds(&self, center: Point) -> Bounds {
        if let Some(vs) = self.vertices(center) {
            let mut b = Bounds::new(vs[0], vs[0]);
            for v in vs { b.include(v); }
            return b;
        }
        let (hw, hh) = self.half_extents();
        Bounds::new(
            Point::new(center.x - hw, center.y - hh),
            Point::new(center.x + hw, center.y + hh),
        )
    }
}

/// Named attachment points of a placed node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeAnchor {
    pub center: Point,
    pub top: Point,
    pub bottom: Point,
    pub left: Point,
    pub right: Point,
}

/// A shape placed on the canvas with its label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub shape: NodeShape,
    pub text: String,
    pub fill: Rgba,
    pub anchor: NodeAnchor,
}

impl Node {
    pub fn new(shape: NodeShape, center: Point, text: impl Into<String>, fill: Rgba) -> Self {
        Self { shape, text: text.into(), fill, anchor: shape.anchor(center) }
    }

    pub fn center(&self) -> Point { self.anchor.center }

    pub fn bounds(&self) -> Bounds { self.shape.bounds(self.anchor.center) }
}

/// Connection between two anchor points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: Point,
    pub to: Point,
    pub label: Option<String>,
    pub curved: bool,
}

impl Edge {
    pub fn straight(from: Point, to: Point) -> Self {
        Self { from, to, label: None, curved: false }
    }

    pub fn curved(from: Point, to: Point, label: impl Into<String>) -> Self {
        Self { from, to, label: Some(label.into()), curved: true }
    }

    /// Quadratic control point when curved with bend `rad`.
    pub fn control(&self, rad: f64) -> Option<Point> {
        self.curved.then(|| arc_control(self.from, self.to, rad))
    }

    /// Where the edge label starts (left-aligned, just right of the midpoint).
    pub fn label_origin(&self) -> Point {
        self.from.midpoint(self.to) + Point::new(0.2, 0.0)
    }
}

/// Free-standing text placed at a world point, e.g. a diagram title.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    /// Horizontal center and top edge of the text.
    pub at: Point,
    pub text: String,
}

/// Line style for connectors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Rgba,
    /// Width in points.
    pub width: f32,
    pub alpha: f32,
}

impl Stroke {
    pub const fn new(color: Rgba, width: f32, alpha: f32) -> Self {
        Self { color, width, alpha }
    }
}

/// An edge together with the stroke it is drawn with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub edge: Edge,
    pub stroke: Stroke,
}
