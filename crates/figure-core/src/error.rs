// File: crates/figure-core/src/error.rs
// Summary: Error type shared by layouts, chart input checks and surfaces.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FigureError>;

#[derive(Debug, Error)]
pub enum FigureError {
    #[error("invalid input: {0}")]
    InvalidSpec(String),

    #[error("step {step}: `{field}` points to {target}, but the flow has {len} steps")]
    SuccessorOutOfRange {
        step: usize,
        field: &'static str,
        target: usize,
        len: usize,
    },

    #[error("step {step}: `{field}` is not valid for this kind of step")]
    MisplacedSuccessor { step: usize, field: &'static str },

    #[error("invalid colour: {0:?}")]
    InvalidColor(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
