// File: crates/figure-core/src/colormap.rs
// Summary: Sequential colormaps for heatmaps (piecewise-linear between fixed stops).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::color::Rgba;
use crate::error::FigureError;

const YL_OR_RD: [Rgba; 9] = [
    Rgba::hex(0xFFFFCC),
    Rgba::hex(0xFFEDA0),
    Rgba::hex(0xFED976),
    Rgba::hex(0xFEB24C),
    Rgba::hex(0xFD8D3C),
    Rgba::hex(0xFC4E2A),
    Rgba::hex(0xE31A1C),
    Rgba::hex(0xBD0026),
    Rgba::hex(0x800026),
];

const BLUES: [Rgba; 9] = [
    Rgba::hex(0xF7FBFF),
    Rgba::hex(0xDEEBF7),
    Rgba::hex(0xC6DBEF),
    Rgba::hex(0x9ECAE1),
    Rgba::hex(0x6BAED6),
    Rgba::hex(0x4292C6),
    Rgba::hex(0x2171B5),
    Rgba::hex(0x08519C),
    Rgba::hex(0x08306B),
];

const VIRIDIS: [Rgba; 10] = [
    Rgba::hex(0x440154),
    Rgba::hex(0x482878),
    Rgba::hex(0x3E4989),
    Rgba::hex(0x31688E),
    Rgba::hex(0x26828E),
    Rgba::hex(0x1F9E89),
    Rgba::hex(0x35B779),
    Rgba::hex(0x6ECE58),
    Rgba::hex(0xB5DE2B),
    Rgba::hex(0xFDE725),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Colormap {
    #[default]
    YlOrRd,
    Blues,
    Viridis,
}

impl Colormap {
    fn stops(self) -> &'static [Rgba] {
        match self {
            Colormap::YlOrRd => &YL_OR_RD,
            Colormap::Blues => &BLUES,
            Colormap::Viridis => &VIRIDIS,
        }
    }

    /// Colour at `t` in `0.0..=1.0` (clamped).
    pub fn sample(self, t: f64) -> Rgba {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let pos = t * (stops.len() - 1) as f64;
        let i = (pos.floor() as usize).min(stops.len() - 2);
        stops[i].lerp(stops[i + 1], pos - i as f64)
    }

    /// Colour for `v` normalized into `[lo, hi]`.
    pub fn map(self, v: f64, lo: f64, hi: f64) -> Rgba {
        let span = hi - lo;
        if span.abs() < 1e-12 {
            return self.sample(0.5);
        }
        self.sample((v - lo) / span)
    }
}

impl FromStr for Colormap {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ylorrd" => Ok(Colormap::YlOrRd),
            "blues" => Ok(Colormap::Blues),
            "viridis" => Ok(Colormap::Viridis),
            _ => Err(FigureError::InvalidSpec(format!("unknown colormap {s:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_stops() {
        assert_eq!(Colormap::YlOrRd.sample(0.0), Rgba::hex(0xFFFFCC));
        assert_eq!(Colormap::YlOrRd.sample(1.0), Rgba::hex(0x800026));
        assert_eq!(Colormap::Blues.sample(1.0), Rgba::hex(0x08306B));
        assert_eq!(Colormap::Viridis.sample(0.0), Rgba::hex(0x440154));
        assert_eq!(Colormap::Viridis.sample(2.0), Rgba::hex(0xFDE725));
    }

    #[test]
    fn flat_data_maps_to_middle() {
        assert_eq!(Colormap::Blues.map(4.0, 4.0, 4.0), Colormap::Blues.sample(0.5));
    }

    #[test]
    fn parses_names() {
        assert_eq!("viridis".parse::<Colormap>().unwrap(), Colormap::Viridis);
        assert_eq!("YlOrRd".parse::<Colormap>().unwrap(), Colormap::YlOrRd);
        assert!("jet".parse::<Colormap>().is_err());
    }
}
