// File: crates/figure-core/src/flow.rs
// Summary: Linear/branching flowchart layout: steps -> node anchors + edge list.
// Notes:
// - Layout is pure; nothing here touches a surface. See `diagram` for drawing.
// - Successor handling follows `Validation`: permissive drops dangling edges,
//   strict reports them.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{FigureError, Result};
use crate::geometry::{Bounds, Point};
use crate::node::{Caption, Edge, Node, NodeAnchor, NodeShape};
use crate::types::{
    CanvasSize, Validation, FLOW_BRANCH_OFFSET, FLOW_CANVAS_WIDTH, FLOW_MARGIN, FLOW_MIN_HEIGHT,
    FLOW_ROW_HEIGHT, LINEAR_CANVAS_WIDTH, LINEAR_ROW_HEIGHT,
};

pub const START_END_FILL: Rgba = Rgba::hex(0x2ECC71);
pub const PROCESS_FILL: Rgba = Rgba::hex(0x3498DB);
pub const DECISION_FILL: Rgba = Rgba::hex(0xF39C12);
pub const IO_FILL: Rgba = Rgba::hex(0x9B59B6);
pub const NODE_TEXT: Rgba = Rgba::WHITE;
pub const ARROW: Rgba = Rgba::hex(0x2C3E50);
pub const TITLE_TEXT: Rgba = Rgba::hex(0x2C3E50);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Start,
    End,
    Process,
    Decision,
    Io,
}

impl StepKind {
    pub fn shape(self) -> NodeShape {
        match self {
            StepKind::Start | StepKind::End => NodeShape::START_END,
            StepKind::Process => NodeShape::PROCESS,
            StepKind::Decision => NodeShape::DECISION,
            StepKind::Io => NodeShape::IO,
        }
    }

    pub fn fill(self) -> Rgba {
        match self {
            StepKind::Start | StepKind::End => START_END_FILL,
            StepKind::Process => PROCESS_FILL,
            StepKind::Decision => DECISION_FILL,
            StepKind::Io => IO_FILL,
        }
    }

    /// Label size in points.
    pub fn font_size(self) -> f32 {
        match self {
            StepKind::Start | StepKind::End => 11.0,
            StepKind::Decision => 9.0,
            StepKind::Process | StepKind::Io => 10.0,
        }
    }
}

/// Side of a decision a step hangs off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchSide {
    #[serde(alias = "yes")]
    Left,
    #[serde(alias = "no")]
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowStep {
    #[serde(alias = "type")]
    pub kind: StepKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yes_to: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_to: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchSide>,
}

impl FlowStep {
    pub fn new(kind: StepKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into(), next: None, yes_to: None, no_to: None, branch: None }
    }

    pub fn with_next(mut self, index: usize) -> Self {
        self.next = Some(index);
        self
    }

    pub fn with_yes(mut self, index: usize) -> Self {
        self.yes_to = Some(index);
        self
    }

    pub fn with_no(mut self, index: usize) -> Self {
        self.no_to = Some(index);
        self
    }

    pub fn on(mut self, side: BranchSide) -> Self {
        self.branch = Some(side);
        self
    }
}

/// Computed flowchart geometry, ready for a surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowLayout {
    pub canvas: CanvasSize,
    /// One node per input step, same order.
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub title: Option<Caption>,
}

impl FlowLayout {
    pub fn anchors(&self) -> Vec<NodeAnchor> {
        self.nodes.iter().map(|n| n.anchor).collect()
    }

    /// Canvas plus any shape overhanging it.
    pub fn bounds(&self) -> Bounds {
        self.nodes
            .iter()
            .fold(Bounds::from_size(self.canvas.width, self.canvas.height), |b, n| b.union(n.bounds()))
    }
}

/// Canvas that fits `steps` flow steps.
pub fn flow_canvas(steps: usize) -> CanvasSize {
    CanvasSize::new(FLOW_CANVAS_WIDTH, FLOW_MIN_HEIGHT.max(steps as f64 * FLOW_ROW_HEIGHT))
}

/// Lay out `steps` on a canvas sized by [`flow_canvas`].
pub fn layout_flow(steps: &[FlowStep], validation: Validation) -> Result<FlowLayout> {
    layout_flow_in(steps, flow_canvas(steps.len()), validation)
}

/// Lay out `steps` top to bottom on `canvas`.
pub fn layout_flow_in(steps: &[FlowStep], canvas: CanvasSize, validation: Validation) -> Result<FlowLayout> {
    if steps.is_empty() && validation.is_strict() {
        return Err(FigureError::InvalidSpec("flowchart has no steps".into()));
    }

    let n = steps.len();
    let spacing = (canvas.height - FLOW_MARGIN) / (n as f64 + 1.0);
    let x_center = canvas.width / 2.0;
    let top = canvas.height - FLOW_MARGIN / 2.0;

    let nodes: Vec<Node> = steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let y = top - (i as f64 + 1.0) * spacing;
            let x = match step.branch {
                Some(BranchSide::Left) => x_center - FLOW_BRANCH_OFFSET,
                Some(BranchSide::Right) => x_center + FLOW_BRANCH_OFFSET,
                None => x_center,
            };
            Node::new(step.kind.shape(), Point::new(x, y), step.text.clone(), step.kind.fill())
        })
        .collect();

    let mut edges = Vec::new();
    for (i, step) in steps.iter().enumerate() {
        let here = &nodes[i].anchor;
        if step.kind == StepKind::Decision {
            if validation.is_strict() && step.next.is_some() {
                return Err(FigureError::MisplacedSuccessor { step: i, field: "next" });
            }
            if let Some(t) = successor(i, "yes_to", step.yes_to, n, validation)? {
                edges.push(Edge::curved(here.left, nodes[t].anchor.top, "Yes"));
            }
            if let Some(t) = successor(i, "no_to", step.no_to, n, validation)? {
                edges.push(Edge::curved(here.right, nodes[t].anchor.top, "No"));
            }
        } else {
            if validation.is_strict() {
                if step.yes_to.is_some() {
                    return Err(FigureError::MisplacedSuccessor { step: i, field: "yes_to" });
                }
                if step.no_to.is_some() {
                    return Err(FigureError::MisplacedSuccessor { step: i, field: "no_to" });
                }
            }
            if let Some(t) = successor(i, "next", step.next, n, validation)? {
                edges.push(Edge::straight(here.bottom, nodes[t].anchor.top));
            }
        }
    }

    tracing::debug!(steps = n, edges = edges.len(), height = canvas.height, "flow layout computed");
    Ok(FlowLayout { canvas, nodes, edges, title: None })
}

/// Lay out a straight chain of `(kind, text)` items, each linked to the next.
pub fn layout_linear<S: AsRef<str>>(
    items: &[(StepKind, S)],
    title: Option<&str>,
    validation: Validation,
) -> Result<FlowLayout> {
    if items.is_empty() && validation.is_strict() {
        return Err(FigureError::InvalidSpec("linear flowchart has no items".into()));
    }

    let height = items.len() as f64 * LINEAR_ROW_HEIGHT + LINEAR_ROW_HEIGHT;
    let canvas = CanvasSize::new(LINEAR_CANVAS_WIDTH, height);
    let x = LINEAR_CANVAS_WIDTH / 2.0;

    let nodes: Vec<Node> = items
        .iter()
        .enumerate()
        .map(|(i, (kind, text))| {
            let y = height - LINEAR_ROW_HEIGHT - i as f64 * LINEAR_ROW_HEIGHT;
            let text: &str = text.as_ref();
            Node::new(kind.shape(), Point::new(x, y), text, kind.fill())
        })
        .collect();

    let edges = nodes
        .windows(2)
        .map(|w| Edge::straight(w[0].anchor.bottom, w[1].anchor.top))
        .collect::<Vec<_>>();

    let title = title
        .filter(|t| !t.is_empty())
        .map(|t| Caption { at: Point::new(x, height - 0.5), text: t.to_string() });

    tracing::debug!(items = nodes.len(), "linear flow layout computed");
    Ok(FlowLayout { canvas, nodes, edges, title })
}

fn successor(
    step: usize,
    field: &'static str,
    target: Option<usize>,
    len: usize,
    validation: Validation,
) -> Result<Option<usize>> {
    match target {
        Some(t) if t < len => Ok(Some(t)),
        Some(t) if validation.is_strict() => Err(FigureError::SuccessorOutOfRange { step, field, target: t, len }),
        Some(t) => {
            tracing::debug!(step, field, target = t, len, "dropping edge to a missing step");
            Ok(None)
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_flow() -> Vec<FlowStep> {
        vec![
            FlowStep::new(StepKind::Start, "Start").with_next(1),
            FlowStep::new(StepKind::Io, "Enter credentials").with_next(2),
            FlowStep::new(StepKind::Decision, "Valid?").with_yes(3).with_no(4),
            FlowStep::new(StepKind::Process, "Grant access").on(BranchSide::Left).with_next(5),
            FlowStep::new(StepKind::Process, "Show error").on(BranchSide::Right).with_next(1),
            FlowStep::new(StepKind::End, "End"),
        ]
    }

    #[test]
    fn one_anchor_per_step_descending() {
        let layout = layout_flow(&login_flow(), Validation::Permissive).unwrap();
        let anchors = layout.anchors();
        assert_eq!(anchors.len(), 6);
        for w in anchors.windows(2) {
            assert!(w[1].center.y < w[0].center.y);
        }
    }

    #[test]
    fn rows_are_evenly_spaced() {
        let steps = login_flow();
        let layout = layout_flow(&steps, Validation::Permissive).unwrap();
        assert_eq!(layout.canvas, CanvasSize::new(10.0, 15.0));
        let spacing = (15.0 - 2.0) / 7.0;
        for (i, n) in layout.nodes.iter().enumerate() {
            let want = 15.0 - 1.0 - (i as f64 + 1.0) * spacing;
            assert!((n.center().y - want).abs() < 1e-9);
        }
    }

    #[test]
    fn canvas_keeps_minimum_height() {
        assert_eq!(flow_canvas(2).height, FLOW_MIN_HEIGHT);
        assert_eq!(flow_canvas(8).height, 20.0);
    }

    #[test]
    fn branches_shift_sideways() {
        let layout = layout_flow(&login_flow(), Validation::Permissive).unwrap();
        assert_eq!(layout.nodes[2].center().x, 5.0);
        assert_eq!(layout.nodes[3].center().x, 3.0);
        assert_eq!(layout.nodes[4].center().x, 7.0);
    }

    #[test]
    fn decision_emits_yes_and_no_curves() {
        let layout = layout_flow(&login_flow(), Validation::Permissive).unwrap();
        let decision = layout.nodes[2].anchor;
        let from_decision: Vec<&Edge> = layout
            .edges
            .iter()
            .filter(|e| e.from == decision.left || e.from == decision.right)
            .collect();
        assert_eq!(from_decision.len(), 2);
        let yes = from_decision.iter().find(|e| e.label.as_deref() == Some("Yes")).unwrap();
        let no = from_decision.iter().find(|e| e.label.as_deref() == Some("No")).unwrap();
        assert!(yes.curved && no.curved);
        assert_eq!(yes.from, decision.left);
        assert_eq!(yes.to, layout.nodes[3].anchor.top);
        assert_eq!(no.from, decision.right);
        assert_eq!(no.to, layout.nodes[4].anchor.top);
    }

    #[test]
    fn plain_steps_link_bottom_to_top() {
        let layout = layout_flow(&login_flow(), Validation::Permissive).unwrap();
        let first = &layout.edges[0];
        assert_eq!(first.from, layout.nodes[0].anchor.bottom);
        assert_eq!(first.to, layout.nodes[1].anchor.top);
        assert!(!first.curved);
        assert!(first.label.is_none());
        // start, io, 2 decision branches, grant, error -> 6 edges; end has none
        assert_eq!(layout.edges.len(), 6);
    }

    #[test]
    fn dangling_yes_is_dropped_silently() {
        let steps = vec![
            FlowStep::new(StepKind::Decision, "?").with_yes(9).with_no(1),
            FlowStep::new(StepKind::End, "End"),
        ];
        let layout = layout_flow(&steps, Validation::Permissive).unwrap();
        assert_eq!(layout.edges.len(), 1);
        assert_eq!(layout.edges[0].label.as_deref(), Some("No"));
    }

    #[test]
    fn strict_rejects_dangling_successor() {
        let steps = vec![FlowStep::new(StepKind::Start, "Start").with_next(3)];
        let err = layout_flow(&steps, Validation::Strict).unwrap_err();
        assert!(matches!(
            err,
            FigureError::SuccessorOutOfRange { step: 0, field: "next", target: 3, len: 1 }
        ));
    }

    #[test]
    fn strict_rejects_misplaced_fields() {
        let steps = vec![FlowStep::new(StepKind::Process, "p").with_yes(0)];
        assert!(matches!(
            layout_flow(&steps, Validation::Strict),
            Err(FigureError::MisplacedSuccessor { step: 0, field: "yes_to" })
        ));
        // permissive ignores the stray field
        let layout = layout_flow(&steps, Validation::Permissive).unwrap();
        assert!(layout.edges.is_empty());
    }

    #[test]
    fn empty_flow_depends_on_validation() {
        let layout = layout_flow(&[], Validation::Permissive).unwrap();
        assert!(layout.nodes.is_empty());
        assert!(layout.edges.is_empty());
        assert!(matches!(layout_flow(&[], Validation::Strict), Err(FigureError::InvalidSpec(_))));
    }

    #[test]
    fn linear_chain_links_neighbours() {
        let items = [
            (StepKind::Start, "Start"),
            (StepKind::Process, "Work"),
            (StepKind::End, "End"),
        ];
        let layout = layout_linear(&items, Some("Login Process"), Validation::Permissive).unwrap();
        assert_eq!(layout.canvas, CanvasSize::new(8.0, 8.0));
        assert_eq!(layout.nodes[0].center(), Point::new(4.0, 6.0));
        assert_eq!(layout.nodes[2].center(), Point::new(4.0, 2.0));
        assert_eq!(layout.edges.len(), 2);
        assert_eq!(layout.edges[1].to, layout.nodes[2].anchor.top);
        let title = layout.title.unwrap();
        assert_eq!(title.at, Point::new(4.0, 7.5));
    }

    #[test]
    fn steps_deserialize_from_original_keys() {
        let json = r#"[
            {"type": "decision", "text": "ok?", "yes_to": 1, "no_to": 2},
            {"kind": "process", "text": "a", "branch": "yes"},
            {"kind": "io", "text": "b", "branch": "right"}
        ]"#;
        let steps: Vec<FlowStep> = serde_json::from_str(json).unwrap();
        assert_eq!(steps[0].kind, StepKind::Decision);
        assert_eq!(steps[1].branch, Some(BranchSide::Left));
        assert_eq!(steps[2].branch, Some(BranchSide::Right));
    }
}
