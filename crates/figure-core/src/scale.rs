// File: crates/figure-core/src/scale.rs
// Summary: Value-to-pixel scales: continuous linear and categorical bands.

/// Maps a value range onto a pixel range. `r0` is where `d0` lands, so a
/// vertical scale is built with `r0 = bottom`, `r1 = top`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub d0: f64,
    pub d1: f64,
    pub r0: f32,
    pub r1: f32,
}

impl LinearScale {
    pub fn new(d0: f64, d1: f64, r0: f32, r1: f32) -> Self {
        let mut s = Self { d0, d1, r0, r1 };
        if (s.d1 - s.d0).abs() < 1e-12 { s.d1 = s.d0 + 1.0; }
        s
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        self.r0 + ((v - self.d0) / (self.d1 - self.d0)) as f32 * (self.r1 - self.r0)
    }

    #[inline]
    pub fn from_px(&self, px: f32) -> f64 {
        let span = (self.r1 - self.r0) as f64;
        if span.abs() < 1e-9 { return self.d0; }
        self.d0 + ((px - self.r0) as f64 / span) * (self.d1 - self.d0)
    }
}

/// `count` equal bands across a pixel range; each band holds a bar group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
    pub count: usize,
    pub r0: f32,
    pub r1: f32,
}

impl BandScale {
    pub fn new(count: usize, r0: f32, r1: f32) -> Self {
        Self { count: count.max(1), r0, r1 }
    }

    /// Pixel width of one band (signed like `r1 - r0`).
    pub fn step(&self) -> f32 {
        (self.r1 - self.r0) / self.count as f32
    }

    /// Pixel center of band `i`.
    pub fn center(&self, i: usize) -> f32 {
        self.r0 + self.step() * (i as f32 + 0.5)
    }

    /// Pixel position of a fractional band coordinate (band `i` spans `i - 0.5 .. i + 0.5`).
    pub fn at(&self, x: f64) -> f32 {
        self.r0 + self.step() * (x as f32 + 0.5)
    }
}
