// File: crates/figure-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings, layout heuristics, validation mode).

use serde::{Deserialize, Serialize};

/// Default chart surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default chart surface height in pixels.
pub const HEIGHT: i32 = 640;

// ---- flowchart layout (world units) ----------------------------------------

/// Flowchart canvas width.
pub const FLOW_CANVAS_WIDTH: f64 = 10.0;
/// Minimum flowchart canvas height, regardless of step count.
pub const FLOW_MIN_HEIGHT: f64 = 14.0;
/// Height budget per step when the flow outgrows the minimum canvas.
pub const FLOW_ROW_HEIGHT: f64 = 2.5;
/// Vertical margin shared between top and bottom.
pub const FLOW_MARGIN: f64 = 2.0;
/// Lateral shift of steps placed on a left/right branch.
pub const FLOW_BRANCH_OFFSET: f64 = 2.0;
/// Bend of curved (decision) connectors, as a fraction of their length.
pub const FLOW_CURVE_RAD: f64 = 0.2;

/// Linear flowchart canvas width.
pub const LINEAR_CANVAS_WIDTH: f64 = 8.0;
/// Distance between consecutive items of a linear flowchart.
pub const LINEAR_ROW_HEIGHT: f64 = 2.0;

// ---- mind map layout (world units) -----------------------------------------

/// Minimum mind map canvas width.
pub const MINDMAP_MIN_WIDTH: f64 = 16.0;
/// Width budget per branch.
pub const MINDMAP_WIDTH_PER_BRANCH: f64 = 3.0;
/// Minimum mind map canvas height.
pub const MINDMAP_MIN_HEIGHT: f64 = 12.0;
/// Fixed height added on top of the per-child budget.
pub const MINDMAP_BASE_HEIGHT: f64 = 4.0;
/// Height budget per child of the largest branch.
pub const MINDMAP_HEIGHT_PER_CHILD: f64 = 1.5;
/// Branch circle radius is the canvas' short side divided by this.
pub const MINDMAP_RADIUS_DIVISOR: f64 = 3.0;
/// Angle of the first branch, in degrees (top of the circle).
pub const MINDMAP_START_ANGLE: f64 = 90.0;
/// Distance from a branch to the base point of its children.
pub const MINDMAP_CHILD_EXTENSION: f64 = 2.0;
/// Spacing between adjacent children of one branch.
pub const MINDMAP_CHILD_SPREAD: f64 = 1.2;

/// Spacing of [`crate::mindmap::tree_layout`] siblings.
pub const TREE_SPREAD: f64 = 2.5;
/// Vertical offset of [`crate::mindmap::tree_layout`] children (negative is down).
pub const TREE_OFFSET_Y: f64 = -2.0;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(84, 32, 64, 72)
    }
}

/// Canvas extent in world units (origin at bottom-left, y up).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// How layouts treat malformed input.
///
/// `Permissive` drops what it cannot place (dangling successors, unknown
/// colours, empty inputs render an empty canvas). `Strict` rejects it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validation {
    #[default]
    Permissive,
    Strict,
}

impl Validation {
    pub fn is_strict(self) -> bool {
        matches!(self, Validation::Strict)
    }
}
