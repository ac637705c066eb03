// File: crates/figure-core/src/lib.rs
// Summary: Core library entry point; exports layouts, chart templates and rendering.

pub mod types;
pub mod geometry;
pub mod error;
pub mod color;
pub mod node;
pub mod flow;
pub mod mindmap;
pub mod surface;
pub mod text;
pub mod raster;
pub mod diagram;

pub mod chart;
pub mod series;
pub mod axis;
pub mod grid;
pub mod scale;
pub mod theme;
pub mod colormap;
pub mod cartesian;
pub mod polar;
pub mod heatmap;

pub use error::{FigureError, Result};
pub use types::{CanvasSize, Insets, Validation};
pub use geometry::{Bounds, Point};
pub use color::Rgba;
pub use node::{Caption, Connector, Edge, Node, NodeAnchor, NodeShape, Stroke};
pub use flow::{layout_flow, layout_linear, BranchSide, FlowLayout, FlowStep, StepKind};
pub use mindmap::{layout_mindmap, radial_layout, tree_layout, Annotation, Branch, MindMapLayout, MindMapSpec};
pub use surface::{DrawOp, Recorder, Surface};
pub use raster::{DiagramOptions, RasterSurface};
pub use diagram::{draw_flowchart, draw_mindmap, render_flowchart, render_linear_flowchart, render_mindmap};

pub use chart::{Chart, ChartKind, RenderOptions};
pub use series::Series;
pub use axis::Axis;
pub use theme::Theme;
pub use colormap::Colormap;
pub use cartesian::{BarData, GroupedBarData, LineData, ScatterData};
pub use polar::{PieData, RadarData};
pub use heatmap::HeatmapData;
pub use text::TextShaper;
