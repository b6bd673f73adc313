//! Streak patterns laid over filled sketch shapes.
//!
//! The overlay gives fills a subtle hand-shaded texture. Each luminance category gets its own
//! pattern tint so the streaks stay visible on both light and dark fills.

use crate::theme::LuminanceCategory;
use std::fmt::Write as _;

const STREAKS_PATH_D: &str = include_str!("../../assets/streaks.svgpath");

fn pattern_fill(category: LuminanceCategory) -> &'static str {
    match category {
        LuminanceCategory::Bright => "rgba(0, 0, 0, 0.1)",
        LuminanceCategory::Normal => "rgba(0, 0, 0, 0.16)",
        LuminanceCategory::Dark => "rgba(0, 0, 0, 0.32)",
        LuminanceCategory::Darker => "rgba(255, 255, 255, 0.24)",
    }
}

fn blend_mode(category: LuminanceCategory) -> &'static str {
    match category {
        LuminanceCategory::Bright => "darken",
        LuminanceCategory::Normal => "color-burn",
        LuminanceCategory::Dark => "overlay",
        LuminanceCategory::Darker => "lighten",
    }
}

/// `<defs>` block with one `streaks-<category>` pattern per luminance category.
///
/// Emit once per document; overlays reference the patterns through their CSS class.
pub fn define_fill_patterns() -> String {
    let mut out = String::from("<defs>");
    for category in LuminanceCategory::ALL {
        let _ = write!(
            &mut out,
            r#"<pattern id="streaks-{category}" x="0" y="0" width="100" height="100" patternUnits="userSpaceOnUse"><path fill="{fill}" fill-rule="evenodd" clip-rule="evenodd" d="{d}" /></pattern>"#,
            fill = pattern_fill(category),
            d = STREAKS_PATH_D.trim(),
        );
    }
    out.push_str("</defs>");
    out
}

/// Stylesheet binding every `sketch-overlay-<category>` class to its pattern.
pub fn sketch_overlay_css() -> String {
    let mut out = String::new();
    for category in LuminanceCategory::ALL {
        let _ = write!(
            &mut out,
            ".sketch-overlay-{category}{{fill:url(#streaks-{category});mix-blend-mode:{blend}}}",
            blend = blend_mode(category),
        );
    }
    out
}
