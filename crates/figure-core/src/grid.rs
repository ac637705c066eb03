// File: crates/figure-core/src/grid.rs
// Summary: Grid/tick layout helpers ("nice" 1-2-5 steps).

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Smallest 1-2-5 multiple of a power of ten that is `>= raw`.
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 { return 1.0; }
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let f = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    f * mag
}

/// `value` rounded up to the next nice step boundary (radar/pie radial limits).
pub fn nice_ceiling(value: f64) -> f64 {
    if value <= 0.0 { return 1.0; }
    let step = nice_step(value / 5.0);
    (value / step).ceil() * step
}

/// Round `[min, max]` outward to nice step boundaries, aiming for about `target` intervals.
/// Returns `(lo, hi, step)`.
pub fn nice_range(min: f64, max: f64, target: usize) -> (f64, f64, f64) {
    let (mut min, mut max) = if min <= max { (min, max) } else { (max, min) };
    if (max - min).abs() < 1e-12 {
        min -= 0.5;
        max += 0.5;
    }
    let step = nice_step((max - min) / target.max(1) as f64);
    let lo = (min / step).floor() * step;
    let hi = (max / step).ceil() * step;
    (lo, hi, step)
}

/// Tick values at every `step` from `lo` to `hi` inclusive.
pub fn ticks(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || hi < lo { return vec![lo]; }
    let n = ((hi - lo) / step + 1e-9).floor() as usize;
    (0..=n).map(|i| {
        let v = lo + step * i as f64;
        // snap float noise like 0.30000000000000004
        (v / step).round() * step
    }).collect()
}

/// Short label for a tick value: integers without a fraction, otherwise up to 2 decimals.
pub fn format_tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_picks_125() {
        assert_eq!(nice_step(0.9), 1.0);
        assert_eq!(nice_step(1.5), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(7.0), 10.0);
        assert_eq!(nice_step(23.0), 50.0);
        assert!((nice_step(0.013) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn nice_range_covers_data() {
        let (lo, hi, step) = nice_range(3.0, 97.0, 5);
        assert_eq!(step, 20.0);
        assert_eq!((lo, hi), (0.0, 100.0));
        let t = ticks(lo, hi, step);
        assert_eq!(t, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn flat_range_is_widened() {
        let (lo, hi, _) = nice_range(5.0, 5.0, 5);
        assert!(lo < 5.0 && hi > 5.0);
    }

    #[test]
    fn ceiling_and_format() {
        assert_eq!(nice_ceiling(87.0), 100.0);
        assert_eq!(nice_ceiling(4.2), 5.0);
        assert_eq!(format_tick(20.0), "20");
        assert_eq!(format_tick(0.25), "0.25");
        assert_eq!(format_tick(-1.5), "-1.5");
    }

    #[test]
    fn linspace_endpoints() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[4], 1.0);
    }
}
