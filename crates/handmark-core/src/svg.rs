//! SVG markup construction shared by all sketch renderers.

pub mod overlay;
pub mod patterns;

use crate::theme::is_theme_color;
use std::fmt::Write as _;

pub use overlay::SketchOverlay;
pub use patterns::{define_fill_patterns, sketch_overlay_css};

pub fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

pub fn fmt_into(out: &mut String, v: f64) {
    // Round-trippable decimal form (no exponent), without `-0` or tiny float noise from our own
    // arithmetic.
    if !v.is_finite() {
        out.push('0');
        return;
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }

    let _ = write!(out, "{v}");
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

pub fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => Some("&amp;"),
            b'<' => Some("&lt;"),
            b'>' => Some("&gt;"),
            b'"' => Some("&quot;"),
            b'\'' => Some("&#39;"),
            _ => None,
        };
        let Some(esc) = esc else {
            continue;
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

/// One SVG element whose fill/stroke may be theme color codes.
///
/// Theme codes (e.g. `N7`, `B1`) are emitted as `fill-<code>`/`stroke-<code>` classes so a
/// stylesheet can swap palettes; any other color is written as a plain attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemableElement {
    pub tag: &'static str,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rx: Option<f64>,
    pub ry: Option<f64>,
    pub d: String,
    pub transform: String,
    pub fill: String,
    pub stroke: String,
    pub class: String,
    pub style: String,
    /// Raw, already-escaped attributes appended verbatim (e.g. `marker-end="url(#m)"`).
    pub attributes: String,
    /// Text content, escaped on render.
    pub content: String,
}

impl ThemableElement {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    pub fn render_into(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);

        let numeric = [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
            ("rx", self.rx),
            ("ry", self.ry),
        ];
        for (name, value) in numeric {
            if let Some(v) = value {
                let _ = write!(out, r#" {name}="{}""#, fmt(v));
            }
        }
        if !self.d.is_empty() {
            out.push_str(r#" d=""#);
            escape_xml_into(out, &self.d);
            out.push('"');
        }
        if !self.transform.is_empty() {
            out.push_str(r#" transform=""#);
            escape_xml_into(out, &self.transform);
            out.push('"');
        }

        let mut classes: Vec<String> = Vec::new();
        if !self.class.is_empty() {
            classes.push(self.class.clone());
        }
        if !self.fill.is_empty() {
            if is_theme_color(&self.fill) {
                classes.push(format!("fill-{}", self.fill));
            } else {
                out.push_str(r#" fill=""#);
                escape_xml_into(out, &self.fill);
                out.push('"');
            }
        }
        if !self.stroke.is_empty() {
            if is_theme_color(&self.stroke) {
                classes.push(format!("stroke-{}", self.stroke));
            } else {
                out.push_str(r#" stroke=""#);
                escape_xml_into(out, &self.stroke);
                out.push('"');
            }
        }
        if !classes.is_empty() {
            out.push_str(r#" class=""#);
            escape_xml_into(out, &classes.join(" "));
            out.push('"');
        }
        if !self.style.is_empty() {
            out.push_str(r#" style=""#);
            escape_xml_into(out, &self.style);
            out.push('"');
        }
        if !self.attributes.is_empty() {
            out.push(' ');
            out.push_str(self.attributes.trim());
        }

        if self.content.is_empty() {
            out.push_str(" />");
        } else {
            out.push('>');
            escape_xml_into(out, &self.content);
            let _ = write!(out, "</{}>", self.tag);
        }
    }
}
