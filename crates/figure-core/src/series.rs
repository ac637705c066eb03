// File: crates/figure-core/src/series.rs
// Summary: Named value series shared by line, radar and grouped bar charts.

use serde::{Deserialize, Serialize};

use crate::color::{cycle, Rgba, CHART_PALETTE};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend text; `None` shows as `Series {i+1}`.
    #[serde(default)]
    pub label: Option<String>,
    pub values: Vec<f64>,
    #[serde(default)]
    pub color: Option<Rgba>,
}

impl Series {
    pub fn new(values: Vec<f64>) -> Self {
        Self { label: None, values, color: None }
    }

    pub fn labeled(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self { label: Some(label.into()), values, color: None }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Legend text for the series at position `index`.
    pub fn display_label(&self, index: usize) -> String {
        self.label.clone().unwrap_or_else(|| format!("Series {}", index + 1))
    }

    /// Explicit colour or the palette entry for `index`.
    pub fn resolved_color(&self, index: usize) -> Rgba {
        self.color.unwrap_or_else(|| cycle(&CHART_PALETTE, index))
    }

    /// `(min, max)` of finite values, `None` when there are none.
    pub fn range(&self) -> Option<(f64, f64)> {
        value_range(self.values.iter().copied())
    }
}

/// `(min, max)` over finite values.
pub fn value_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
