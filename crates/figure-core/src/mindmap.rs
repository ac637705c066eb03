// File: crates/figure-core/src/mindmap.rs
// Summary: Radial mind map layout: center topic, branches on a circle, children fanned outward.

use serde::{Deserialize, Serialize};

use crate::color::{cycle, Rgba, BRANCH_PALETTE};
use crate::error::{FigureError, Result};
use crate::geometry::{Bounds, Point};
use crate::node::{Caption, Connector, Edge, Node, NodeShape, Stroke};
use crate::types::{
    CanvasSize, Validation, MINDMAP_BASE_HEIGHT, MINDMAP_CHILD_EXTENSION, MINDMAP_CHILD_SPREAD,
    MINDMAP_HEIGHT_PER_CHILD, MINDMAP_MIN_HEIGHT, MINDMAP_MIN_WIDTH, MINDMAP_RADIUS_DIVISOR,
    MINDMAP_START_ANGLE, MINDMAP_WIDTH_PER_BRANCH,
};

pub const CENTER_FILL: Rgba = Rgba::hex(0xE74C3C);
pub const HEADER_TEXT: Rgba = Rgba::hex(0x2C3E50);

pub const CENTER_SHAPE: NodeShape = NodeShape::RoundedBox { width: 3.5, height: 1.2, corner: 0.2 };
pub const BRANCH_SHAPE: NodeShape = NodeShape::RoundedBox { width: 2.8, height: 0.8, corner: 0.2 };
pub const CHILD_SHAPE: NodeShape = NodeShape::RoundedBox { width: 2.2, height: 0.6, corner: 0.2 };

const BRANCH_ALPHA: f32 = 0.9;
const CHILD_ALPHA: f32 = 0.85;
const CONNECTOR_ALPHA: f32 = 0.6;
const TRUNK_WIDTH: f32 = 3.0;
const TWIG_WIDTH: f32 = 1.5;

/// Rough extent of 9pt note text in world units (1pt = 1/72 unit).
const NOTE_CHAR_WIDTH: f64 = 0.6 * 9.0 / 72.0;
const NOTE_LINE_HEIGHT: f64 = 1.2 * 9.0 / 72.0;
const NOTE_PAD: f64 = 0.15;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    /// `#RRGGBB`/`#RGB` or a basic colour name such as `red`; falls back to
    /// the branch palette when absent or unparseable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

impl Branch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), color: None, children: Vec::new() }
    }

    pub fn color(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(hex.into());
        self
    }

    pub fn children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }
}

/// Free note drawn in a bordered label box at world coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl Annotation {
    /// Estimated box of the centered note, padding included.
    pub fn bounds(&self) -> Bounds {
        let lines = self.text.lines().count().max(1) as f64;
        let chars = self.text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
        let hw = chars * NOTE_CHAR_WIDTH / 2.0 + NOTE_PAD;
        let hh = lines * NOTE_LINE_HEIGHT / 2.0 + NOTE_PAD;
        Bounds::new(Point::new(self.x - hw, self.y - hh), Point::new(self.x + hw, self.y + hh))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MindMapSpec {
    /// Center topic; may contain newlines.
    pub title: String,
    /// Heading printed above the map.
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl MindMapSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Default::default() }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn branch(mut self, branch: Branch) -> Self {
        self.branches.push(branch);
        self
    }

    pub fn max_children(&self) -> usize {
        self.branches.iter().map(|b| b.children.len()).max().unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchLayout {
    pub node: Node,
    /// Position angle in degrees, counterclockwise from +x.
    pub angle: f64,
    /// Unit vector from the map center towards the branch.
    pub direction: Point,
    pub color: Rgba,
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MindMapLayout {
    pub canvas: CanvasSize,
    pub radius: f64,
    pub center: Node,
    pub branches: Vec<BranchLayout>,
    /// For each branch in order: its trunk from the center, then its twigs.
    pub connectors: Vec<Connector>,
    pub header: Option<Caption>,
    pub annotations: Vec<Annotation>,
}

impl MindMapLayout {
    /// Canvas plus any node or note overhanging it.
    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds::from_size(self.canvas.width, self.canvas.height).union(self.center.bounds());
        for br in &self.branches {
            b = b.union(br.node.bounds());
            for c in &br.children {
                b = b.union(c.bounds());
            }
        }
        for a in &self.annotations {
            b = b.union(a.bounds());
        }
        b
    }
}

/// Canvas that fits `spec`: wider with more branches, taller with more children.
pub fn mindmap_canvas(spec: &MindMapSpec) -> CanvasSize {
    let width = MINDMAP_MIN_WIDTH.max(MINDMAP_WIDTH_PER_BRANCH * spec.branches.len() as f64);
    let height = MINDMAP_MIN_HEIGHT
        .max(MINDMAP_BASE_HEIGHT + MINDMAP_HEIGHT_PER_CHILD * spec.max_children() as f64);
    CanvasSize::new(width, height)
}

/// `count` points evenly spaced on a circle, first at `start_angle` degrees,
/// then proceeding clockwise.
pub fn radial_layout(center: Point, radius: f64, count: usize, start_angle: f64) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f64;
    (0..count)
        .map(|i| center + Point::from_angle(start_angle - i as f64 * step) * radius)
        .collect()
}

/// Children of a branch at `branch`: a row through `branch + 2D` perpendicular
/// to the outward direction `D` from `center`, centered on that point.
pub fn child_fan(center: Point, branch: Point, count: usize) -> Vec<Point> {
    let dir = (branch - center).normalized().unwrap_or(Point::new(0.0, 1.0));
    let base = branch + dir * MINDMAP_CHILD_EXTENSION;
    if count == 1 {
        return vec![base];
    }
    let perp = dir.perp();
    let mid = (count as f64 - 1.0) / 2.0;
    (0..count)
        .map(|j| base + perp * ((j as f64 - mid) * MINDMAP_CHILD_SPREAD))
        .collect()
}

/// Children in a row offset from `parent` by `offset_y`, `spread` apart.
pub fn tree_layout(parent: Point, count: usize, spread: f64, offset_y: f64) -> Vec<Point> {
    if count == 1 {
        return vec![Point::new(parent.x, parent.y + offset_y)];
    }
    let start_x = parent.x - spread * (count as f64 - 1.0) / 2.0;
    (0..count)
        .map(|i| Point::new(start_x + i as f64 * spread, parent.y + offset_y))
        .collect()
}

/// Colour for branch `index`: its declared colour, else the palette entry.
pub fn branch_color(branch: &Branch, index: usize, validation: Validation) -> Result<Rgba> {
    match branch.color.as_deref() {
        None => Ok(cycle(&BRANCH_PALETTE, index)),
        Some(hex) => match hex.parse::<Rgba>() {
            Ok(c) => Ok(c),
            Err(e) if validation.is_strict() => Err(e),
            Err(_) => {
                tracing::warn!(branch = %branch.name, color = hex, "unparseable branch colour, using palette");
                Ok(cycle(&BRANCH_PALETTE, index))
            }
        },
    }
}

pub fn layout_mindmap(spec: &MindMapSpec, validation: Validation) -> Result<MindMapLayout> {
    if spec.branches.is_empty() && validation.is_strict() {
        return Err(FigureError::InvalidSpec("mind map has no branches".into()));
    }

    let canvas = mindmap_canvas(spec);
    let center_pt = Point::new(canvas.width / 2.0, canvas.height / 2.0);
    let radius = canvas.width.min(canvas.height) / MINDMAP_RADIUS_DIVISOR;
    let positions = radial_layout(center_pt, radius, spec.branches.len(), MINDMAP_START_ANGLE);
    let step = if spec.branches.is_empty() { 0.0 } else { 360.0 / spec.branches.len() as f64 };

    let mut branches = Vec::with_capacity(spec.branches.len());
    let mut connectors = Vec::new();
    for (i, (branch, pos)) in spec.branches.iter().zip(positions).enumerate() {
        let color = branch_color(branch, i, validation)?;
        let direction = (pos - center_pt).normalized().unwrap_or(Point::new(0.0, 1.0));

        connectors.push(Connector {
            edge: Edge::straight(center_pt, pos),
            stroke: Stroke::new(color, TRUNK_WIDTH, CONNECTOR_ALPHA),
        });

        let children: Vec<Node> = child_fan(center_pt, pos, branch.children.len())
            .into_iter()
            .zip(&branch.children)
            .map(|(cp, text)| {
                connectors.push(Connector {
                    edge: Edge::straight(pos, cp),
                    stroke: Stroke::new(color, TWIG_WIDTH, CONNECTOR_ALPHA),
                });
                Node::new(CHILD_SHAPE, cp, text.clone(), color.with_alpha(CHILD_ALPHA))
            })
            .collect();

        branches.push(BranchLayout {
            node: Node::new(BRANCH_SHAPE, pos, branch.name.clone(), color.with_alpha(BRANCH_ALPHA)),
            angle: MINDMAP_START_ANGLE - i as f64 * step,
            direction,
            color,
            children,
        });
    }

    let header = (!spec.header.is_empty()).then(|| Caption {
        at: Point::new(canvas.width / 2.0, canvas.height - 0.5),
        text: spec.header.clone(),
    });

    tracing::debug!(
        branches = branches.len(),
        connectors = connectors.len(),
        width = canvas.width,
        height = canvas.height,
        "mind map layout computed"
    );
    Ok(MindMapLayout {
        canvas,
        radius,
        center: Node::new(CENTER_SHAPE, center_pt, spec.title.clone(), CENTER_FILL.with_alpha(BRANCH_ALPHA)),
        branches,
        connectors,
        header,
        annotations: spec.annotations.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TREE_OFFSET_Y, TREE_SPREAD};

    const EPS: f64 = 1e-9;

    fn physics() -> MindMapSpec {
        MindMapSpec::new("Classical\nMechanics")
            .header("Physics Mind Map")
            .branch(Branch::new("Kinematics").color("#3498DB").children(["Position", "Velocity", "Acceleration"]))
            .branch(Branch::new("Dynamics").children(["Newton's Laws", "Force", "Momentum"]))
            .branch(Branch::new("Energy").children(["Kinetic"]))
            .branch(Branch::new("Rotation"))
            .branch(Branch::new("Oscillations").children(["SHM", "Damping", "Resonance", "Beats"]))
    }

    #[test]
    fn canvas_scales_with_content() {
        assert_eq!(mindmap_canvas(&physics()), CanvasSize::new(16.0, 12.0));
        let wide = MindMapSpec {
            branches: (0..7).map(|i| Branch::new(format!("b{i}"))).collect(),
            ..Default::default()
        };
        assert_eq!(mindmap_canvas(&wide).width, 21.0);
        let tall = MindMapSpec::new("t").branch(Branch::new("b").children((0..8).map(|i| i.to_string())));
        assert_eq!(mindmap_canvas(&tall).height, 16.0);
    }

    #[test]
    fn five_branches_step_clockwise_by_72_degrees() {
        let center = Point::new(8.0, 6.0);
        let pts = radial_layout(center, 4.0, 5, 90.0);
        for (i, p) in pts.iter().enumerate() {
            assert!((p.distance(center) - 4.0).abs() < EPS);
            let want = Point::from_angle(90.0 - 72.0 * i as f64) * 4.0 + center;
            assert!(p.distance(want) < EPS);
        }
        // first at the top, second to the right of it
        assert!((pts[0].x - 8.0).abs() < EPS && pts[0].y > 6.0);
        assert!(pts[1].x > 8.0);
    }

    #[test]
    fn layout_places_branches_on_radius() {
        let layout = layout_mindmap(&physics(), Validation::Permissive).unwrap();
        assert!((layout.radius - 4.0).abs() < EPS);
        for (i, b) in layout.branches.iter().enumerate() {
            assert!((b.node.center().distance(layout.center.center()) - layout.radius).abs() < EPS);
            assert!((b.angle - (90.0 - 72.0 * i as f64)).abs() < EPS);
        }
    }

    #[test]
    fn single_child_goes_straight_out() {
        let center = Point::new(0.0, 0.0);
        let branch = Point::new(3.0, 4.0);
        let kids = child_fan(center, branch, 1);
        assert_eq!(kids.len(), 1);
        let d = branch.normalized().unwrap();
        let off = kids[0] - branch;
        assert!((off.dot(d) - MINDMAP_CHILD_EXTENSION).abs() < EPS);
        assert!(off.dot(d.perp()).abs() < EPS);
    }

    #[test]
    fn three_children_are_symmetric() {
        let center = Point::new(0.0, 0.0);
        let branch = Point::new(-2.0, 1.0);
        let kids = child_fan(center, branch, 3);
        let d = branch.normalized().unwrap();
        let base = branch + d * MINDMAP_CHILD_EXTENSION;
        let offsets: Vec<f64> = kids.iter().map(|k| (*k - base).dot(d.perp())).collect();
        assert!(offsets[1].abs() < EPS);
        assert!((offsets[0] + offsets[2]).abs() < EPS);
        assert!((offsets[2] - offsets[1] - MINDMAP_CHILD_SPREAD).abs() < EPS);
        // all children sit on the line through the base point
        for k in &kids {
            assert!(((*k - base).dot(d)).abs() < EPS);
        }
    }

    #[test]
    fn palette_cycles_when_no_colour_declared() {
        let layout = layout_mindmap(&physics(), Validation::Permissive).unwrap();
        assert_eq!(layout.branches[0].color, Rgba::hex(0x3498DB));
        assert_eq!(layout.branches[1].color, BRANCH_PALETTE[1]);
        assert_eq!(layout.branches[4].color, BRANCH_PALETTE[4]);

        let six = MindMapSpec {
            branches: (0..6).map(|i| Branch::new(format!("b{i}"))).collect(),
            ..Default::default()
        };
        let layout = layout_mindmap(&six, Validation::Permissive).unwrap();
        assert_eq!(layout.branches[5].color, BRANCH_PALETTE[0]);
    }

    #[test]
    fn connectors_follow_branch_colour() {
        let layout = layout_mindmap(&physics(), Validation::Permissive).unwrap();
        // 5 trunks + 3 + 3 + 1 + 0 + 4 twigs
        assert_eq!(layout.connectors.len(), 16);
        let trunk = &layout.connectors[0];
        assert_eq!(trunk.edge.from, layout.center.center());
        assert_eq!(trunk.edge.to, layout.branches[0].node.center());
        assert_eq!(trunk.stroke.color, layout.branches[0].color);
        let twig = &layout.connectors[1];
        assert_eq!(twig.edge.from, layout.branches[0].node.center());
        assert!(twig.stroke.width < trunk.stroke.width);
    }

    #[test]
    fn bad_colour_falls_back_or_fails() {
        let spec = MindMapSpec::new("t").branch(Branch::new("b").color("not-a-colour"));
        let layout = layout_mindmap(&spec, Validation::Permissive).unwrap();
        assert_eq!(layout.branches[0].color, BRANCH_PALETTE[0]);
        assert!(matches!(layout_mindmap(&spec, Validation::Strict), Err(FigureError::InvalidColor(_))));
    }

    #[test]
    fn named_branch_colour_is_kept() {
        let spec = MindMapSpec::new("t").branch(Branch::new("b").color("red"));
        let layout = layout_mindmap(&spec, Validation::Strict).unwrap();
        assert_eq!(layout.branches[0].color, Rgba::hex(0xFF0000));
    }

    #[test]
    fn notes_outside_the_canvas_widen_bounds() {
        let mut spec = MindMapSpec::new("Root");
        spec.annotations.push(Annotation { x: 20.0, y: 1.0, text: "far note".into() });
        spec.annotations.push(Annotation { x: -3.0, y: -2.0, text: "low".into() });
        let layout = layout_mindmap(&spec, Validation::Permissive).unwrap();
        let b = layout.bounds();
        assert_eq!(layout.canvas.width, 16.0);
        for a in &layout.annotations {
            assert!(b.contains(Point::new(a.x, a.y)), "{a:?} outside {b:?}");
            let note = a.bounds();
            assert!(b.contains(note.min) && b.contains(note.max));
        }
        assert!(b.max.x > 20.0);
        assert!(b.min.y < -2.0);
    }

    #[test]
    fn empty_map_keeps_center_only() {
        let spec = MindMapSpec::new("Alone");
        let layout = layout_mindmap(&spec, Validation::Permissive).unwrap();
        assert!(layout.branches.is_empty());
        assert!(layout.connectors.is_empty());
        assert_eq!(layout.center.center(), Point::new(8.0, 6.0));
        assert!(layout_mindmap(&spec, Validation::Strict).is_err());
    }

    #[test]
    fn tree_layout_rows() {
        let one = tree_layout(Point::new(1.0, 5.0), 1, 2.5, -2.0);
        assert_eq!(one, vec![Point::new(1.0, 3.0)]);
        let three = tree_layout(Point::new(0.0, 0.0), 3, TREE_SPREAD, TREE_OFFSET_Y);
        assert_eq!(three, vec![Point::new(-2.5, -2.0), Point::new(0.0, -2.0), Point::new(2.5, -2.0)]);
    }

    #[test]
    fn spec_deserializes_with_defaults() {
        let json = r##"{"title": "Root", "branches": [{"name": "A", "children": ["x"]}, {"name": "B", "color": "#E74C3C"}]}"##;
        let spec: MindMapSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.header, "");
        assert_eq!(spec.branches[1].color.as_deref(), Some("#E74C3C"));
        assert!(spec.branches[1].children.is_empty());
    }
}
