// File: crates/figure-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout with CJK-capable font fallbacks.

use serde::{Deserialize, Serialize};
use skia_safe as skia;
use skia::textlayout::{
    FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle as SkTextStyle,
};

use crate::surface::{HAlign, VAlign};

/// Sans families tried in order; the CJK faces come first so mixed labels shape in one run.
const SANS_FAMILIES: [&str; 7] = [
    "Noto Sans CJK SC",
    "WenQuanYi Zen Hei",
    "DejaVu Sans",
    "Segoe UI",
    "Arial",
    "Helvetica",
    "sans-serif",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFace {
    #[default]
    Regular,
    Bold,
    Italic,
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, face: FontFace) -> SkTextStyle {
        let mut ts = SkTextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&SANS_FAMILIES);
        let style = match face {
            FontFace::Bold => skia::FontStyle::bold(),
            FontFace::Italic => skia::FontStyle::italic(),
            FontFace::Regular => skia::FontStyle::normal(),
        };
        ts.set_font_style(style);
        ts
    }

    /// Shape `text` (newlines allowed) and size the paragraph to its widest line.
    pub fn layout(&self, text: &str, size: f32, color: skia::Color, face: FontFace, align: HAlign) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(match align {
            HAlign::Left => TextAlign::Left,
            HAlign::Center => TextAlign::Center,
            HAlign::Right => TextAlign::Right,
        });
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color, face);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        let width = paragraph.max_intrinsic_width().ceil() + 1.0;
        paragraph.layout(width);
        paragraph
    }

    /// Width of the widest line and total height, in pixels.
    pub fn measure(&self, text: &str, size: f32, face: FontFace) -> (f32, f32) {
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0), face, HAlign::Left);
        (p.longest_line(), p.height())
    }

    /// Draw `text` so that `(x, y)` is the anchor picked by `h`/`v`
    /// (e.g. Center/Center puts the block's middle on the point).
    #[allow(clippy::too_many_arguments)]
    pub fn draw_aligned(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: skia::Color,
        face: FontFace,
        h: HAlign,
        v: VAlign,
    ) {
        let mut p = self.layout(text, size, color, face, h);
        let w = p.max_width();
        let ht = p.height();
        let left = match h {
            HAlign::Left => x,
            HAlign::Center => x - w * 0.5,
            HAlign::Right => x - w,
        };
        let top = match v {
            VAlign::Top => y,
            VAlign::Center => y - ht * 0.5,
            VAlign::Bottom => y - ht,
        };
        p.paint(canvas, (left, top));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_parse_by_lowercase_name() {
        let faces: Vec<FontFace> = serde_json::from_str(r#"["regular","bold","italic"]"#).unwrap();
        assert_eq!(faces, vec![FontFace::Regular, FontFace::Bold, FontFace::Italic]);
        assert!(serde_json::from_str::<FontFace>(r#""mono""#).is_err());
    }
}
