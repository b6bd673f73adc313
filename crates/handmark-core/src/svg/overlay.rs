use super::ThemableElement;
use crate::Result;
use crate::theme::{LuminanceCategory, is_theme_color, is_unpainted};

/// Solid silhouette drawn over a sketched shape, textured by the streak patterns.
///
/// The rough strokes only approximate the outline and leave gaps in the fill; the overlay covers
/// the exact silhouette. Its paint comes from the `sketch-overlay-*` class, never from a fill
/// attribute.
#[derive(Debug, Clone)]
pub struct SketchOverlay {
    element: ThemableElement,
    fill: String,
}

impl SketchOverlay {
    pub fn new(element: ThemableElement, fill: impl Into<String>) -> Self {
        Self {
            element,
            fill: fill.into(),
        }
    }

    /// Renders the overlay, or nothing when the underlying fill paints nothing.
    pub fn render(&self) -> Result<String> {
        if is_unpainted(&self.fill) {
            return Ok(String::new());
        }
        let suffix = if is_theme_color(&self.fill) {
            self.fill.clone()
        } else {
            LuminanceCategory::of(&self.fill)?.to_string()
        };

        let mut el = self.element.clone();
        el.fill.clear();
        el.stroke.clear();
        el.class = format!("sketch-overlay-{suffix}");
        Ok(el.render())
    }
}
