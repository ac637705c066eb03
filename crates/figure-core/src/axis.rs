// File: crates/figure-core/src/axis.rs
// Summary: Axis model with labels, ranges and nice tick generation.

use crate::grid::{nice_range, ticks};

/// Number of intervals the tick generator aims for.
pub const TARGET_TICKS: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    pub fn default_x() -> Self {
        Self::new("Category", 0.0, 1.0)
    }

    pub fn default_y() -> Self {
        Self::new("Value", 0.0, 1.0)
    }

    /// Fit the range to `[lo, hi]`, rounded outward to nice steps.
    /// With `zero`, the range is stretched to include 0 first (bar charts).
    pub fn fit(&mut self, lo: f64, hi: f64, zero: bool) {
        let (lo, hi) = if zero { (lo.min(0.0), hi.max(0.0)) } else { (lo, hi) };
        let (a, b, _) = nice_range(lo, hi, TARGET_TICKS);
        self.min = a;
        self.max = b;
    }

    pub fn span(&self) -> f64 {
        (self.max - self.min).max(1e-12)
    }

    /// Tick values inside the current range.
    pub fn ticks(&self) -> Vec<f64> {
        let (_, _, step) = nice_range(self.min, self.max, TARGET_TICKS);
        let first = (self.min / step).ceil() * step;
        ticks(first, self.max, step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_includes_zero_for_bars() {
        let mut a = Axis::default_y();
        a.fit(12.0, 48.0, true);
        assert_eq!(a.min, 0.0);
        assert!(a.max >= 48.0);
        assert_eq!(a.ticks().first(), Some(&0.0));
    }

    #[test]
    fn fit_without_zero_hugs_data() {
        let mut a = Axis::default_x();
        a.fit(101.0, 109.0, false);
        assert!(a.min > 0.0 && a.min <= 101.0);
        assert!(a.max >= 109.0);
        assert!(a.ticks().iter().all(|t| *t >= a.min && *t <= a.max));
    }

    #[test]
    fn default_labels() {
        assert_eq!(Axis::default_x().label, "Category");
        assert_eq!(Axis::default_y().label, "Value");
    }
}
