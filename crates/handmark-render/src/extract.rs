//! Reading the current sketch node back out of the sandbox.

use crate::Result;
use crate::sandbox::{SketchRequest, SketchSandbox};
use regex::Regex;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::OnceLock;
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RoughPathAttrs {
    pub d: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoughPathStyle {
    pub stroke: String,
    pub stroke_width: String,
    pub fill: String,
}

/// One child segment of a sketch node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RoughPath {
    pub attrs: RoughPathAttrs,
    #[serde(default)]
    pub style: RoughPathStyle,
}

impl RoughPath {
    pub fn style_css(&self) -> String {
        if self.style.stroke_width.is_empty() {
            String::new()
        } else {
            format!("stroke-width:{};", self.style.stroke_width)
        }
    }
}

fn float_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\.(\d+)").expect("float regex must compile"))
}

/// Cuts every decimal literal in `d` down to at most `max_fraction_digits` fractional digits.
///
/// Digits are dropped, never rounded, so the result is always a textual prefix of each literal.
pub fn truncate_decimals(d: &str, max_fraction_digits: usize) -> Cow<'_, str> {
    float_re().replace_all(d, |caps: &regex::Captures<'_>| {
        let int = &caps[1];
        let frac = &caps[2];
        let keep = frac.len().min(max_fraction_digits);
        format!("{int}.{}", &frac[..keep])
    })
}

/// Decodes the sandbox's current node and normalizes every path string.
pub fn extract_rough_paths<S: SketchSandbox + ?Sized>(
    sandbox: &S,
    precision: usize,
) -> Result<Vec<RoughPath>> {
    let json = sandbox.current_children()?;
    let mut paths: Vec<RoughPath> = serde_json::from_str(&json)?;
    for p in &mut paths {
        if let Cow::Owned(d) = truncate_decimals(&p.attrs.d, precision) {
            p.attrs.d = d;
        }
    }
    trace!(children = paths.len(), "extracted rough paths");
    Ok(paths)
}

pub fn extract_path_data(paths: Vec<RoughPath>) -> Vec<String> {
    paths.into_iter().map(|p| p.attrs.d).collect()
}

/// Evaluates `request` and reads its children back before anything else can touch the slot.
pub fn compute_rough_paths<S: SketchSandbox + ?Sized>(
    sandbox: &mut S,
    request: &SketchRequest,
    precision: usize,
) -> Result<Vec<RoughPath>> {
    sandbox.evaluate(request)?;
    extract_rough_paths(sandbox, precision)
}

pub fn compute_rough_path_data<S: SketchSandbox + ?Sized>(
    sandbox: &mut S,
    request: &SketchRequest,
    precision: usize,
) -> Result<Vec<String>> {
    compute_rough_paths(sandbox, request, precision).map(extract_path_data)
}
