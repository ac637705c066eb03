// File: crates/figure-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors.

use crate::color::Rgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub grid: Rgba,
    pub axis_line: Rgba,
    pub axis_label: Rgba,
    pub tick: Rgba,
    pub title: Rgba,
    /// Value labels, pie category labels, scatter annotations.
    pub annotation: Rgba,
    pub legend_background: Rgba,
    pub legend_border: Rgba,
    /// Pie wedge and scatter marker edges.
    pub edge: Rgba,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::WHITE,
            grid: Rgba::rgb(230, 230, 235),
            axis_line: Rgba::rgb(60, 60, 70),
            axis_label: Rgba::rgb(20, 20, 30),
            tick: Rgba::rgb(100, 100, 110),
            title: Rgba::hex(0x2C3E50),
            annotation: Rgba::rgb(40, 40, 48),
            legend_background: Rgba::WHITE.with_alpha(0.9),
            legend_border: Rgba::rgb(200, 200, 205),
            edge: Rgba::WHITE,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            grid: Rgba::rgb(40, 40, 45),
            axis_line: Rgba::rgb(180, 180, 190),
            axis_label: Rgba::rgb(235, 235, 245),
            tick: Rgba::rgb(150, 150, 160),
            title: Rgba::rgb(245, 245, 250),
            annotation: Rgba::rgb(210, 210, 220),
            legend_background: Rgba::rgb(28, 28, 32).with_alpha(0.9),
            legend_border: Rgba::rgb(70, 70, 78),
            edge: Rgba::rgb(18, 18, 20),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    tracing::warn!(name, "unknown theme, using light");
    Theme::light()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_with_light_fallback() {
        assert_eq!(find("DARK").name, "dark");
        assert_eq!(find("solarized").name, "light");
        assert_eq!(Theme::default().background, Rgba::WHITE);
    }
}
