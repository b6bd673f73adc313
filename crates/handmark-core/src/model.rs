//! Laid-out diagram descriptors consumed by the sketch renderers.
//!
//! Positions, sizes and label boxes are computed upstream; colors are already resolved to
//! either CSS colors or theme color codes (see [`crate::theme`]).

use crate::geom::{Point, point};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Inset of SQL column names from the row's left edge.
pub const NAME_PADDING: f64 = 10.0;
/// Inset of right-anchored type/constraint text from the row's right edge.
pub const TYPE_PADDING: f64 = 20.0;
/// Inset of class member visibility tokens from the row's left edge.
pub const PREFIX_PADDING: f64 = 10.0;
/// Fixed width reserved for the visibility token column of class rows.
pub const PREFIX_WIDTH: f64 = 20.0;
/// Inset of a table title from the header's left edge.
pub const HEADER_LABEL_PADDING: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<LayoutPoint> for Point {
    fn from(p: LayoutPoint) -> Self {
        point(p.x, p.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Square,
    Oval,
    Circle,
    SqlTable,
    Class,
    /// Any other outline; the caller supplies its SVG path data.
    #[serde(other)]
    Path,
}

/// A label together with its measured box.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub label: String,
    #[serde(default)]
    pub label_width: f64,
    #[serde(default)]
    pub label_height: f64,
}

impl Text {
    pub fn new(label: impl Into<String>, label_width: f64, label_height: f64) -> Self {
        Self {
            label: label.into(),
            label_width,
            label_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SqlColumn {
    pub name: Text,
    #[serde(rename = "type")]
    pub type_: Text,
    #[serde(default)]
    pub constraint: Vec<String>,
}

impl SqlColumn {
    /// Short form of the column constraints, e.g. `PK, FK`.
    pub fn constraint_abbr(&self) -> String {
        let mut out = String::new();
        for (idx, c) in self.constraint.iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            out.push_str(match c.as_str() {
                "primary_key" => "PK",
                "foreign_key" => "FK",
                "unique" => "UNQ",
                other => other,
            });
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SqlTable {
    #[serde(default)]
    pub columns: Vec<SqlColumn>,
}

fn visibility_token(visibility: &str) -> &'static str {
    match visibility {
        "private" => "-",
        "protected" => "#",
        _ => "+",
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub visibility: String,
}

impl ClassField {
    pub fn visibility_token(&self) -> &'static str {
        visibility_token(&self.visibility)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassMethod {
    pub name: String,
    #[serde(rename = "return")]
    pub return_: String,
    #[serde(default)]
    pub visibility: String,
}

impl ClassMethod {
    pub fn visibility_token(&self) -> &'static str {
        visibility_token(&self.visibility)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Class {
    #[serde(default)]
    pub fields: Vec<ClassField>,
    #[serde(default)]
    pub methods: Vec<ClassMethod>,
}

fn default_opacity() -> f64 {
    1.0
}

fn default_font_size() -> f64 {
    16.0
}

fn default_stroke_width() -> f64 {
    2.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: ShapeKind,
    pub pos: LayoutPoint,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_dash: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    pub fill: String,
    pub stroke: String,
    #[serde(default)]
    pub primary_accent_color: String,
    #[serde(default)]
    pub secondary_accent_color: String,
    #[serde(default)]
    pub neutral_accent_color: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub label_width: f64,
    #[serde(default)]
    pub label_height: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub sql_table: Option<SqlTable>,
    #[serde(default)]
    pub class: Option<Class>,
}

impl Shape {
    /// A plain shape with the given box; colors and typography take their usual defaults.
    pub fn new(
        id: impl Into<String>,
        kind: ShapeKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            pos: LayoutPoint::new(x, y),
            width,
            height,
            stroke_width: default_stroke_width(),
            stroke_dash: 0.0,
            opacity: default_opacity(),
            fill: "#FFFFFF".to_string(),
            stroke: "#0D32B2".to_string(),
            primary_accent_color: "#0D32B2".to_string(),
            secondary_accent_color: "#4A6FF3".to_string(),
            neutral_accent_color: "#676C7E".to_string(),
            label: String::new(),
            label_width: 0.0,
            label_height: 0.0,
            font_size: default_font_size(),
            sql_table: None,
            class: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [self.pos.x, self.pos.y, self.width, self.height, self.stroke_width]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(Error::InvalidShape {
                id: self.id.clone(),
                message: "position, size and stroke width must be finite".to_string(),
            });
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(Error::InvalidShape {
                id: self.id.clone(),
                message: format!(
                    "width and height must be positive (got {}x{})",
                    self.width, self.height
                ),
            });
        }
        Ok(())
    }

    pub fn css_style(&self) -> String {
        css_style(self.opacity, self.stroke_width, self.stroke_dash)
    }

    pub fn sql_columns(&self) -> &[SqlColumn] {
        self.sql_table
            .as_ref()
            .map(|t| t.columns.as_slice())
            .unwrap_or_default()
    }

    pub fn class_fields(&self) -> &[ClassField] {
        self.class
            .as_ref()
            .map(|c| c.fields.as_slice())
            .unwrap_or_default()
    }

    pub fn class_methods(&self) -> &[ClassMethod] {
        self.class
            .as_ref()
            .map(|c| c.methods.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arrowhead {
    #[default]
    None,
    Arrow,
    Triangle,
    UnfilledTriangle,
    Line,
    Diamond,
    FilledDiamond,
    Circle,
    FilledCircle,
    Box,
    FilledBox,
    Cross,
    CfOne,
    CfMany,
    CfOneRequired,
    CfManyRequired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub route: Vec<LayoutPoint>,
    pub stroke: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_dash: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub src_arrow: Arrowhead,
    #[serde(default)]
    pub dst_arrow: Arrowhead,
    #[serde(default)]
    pub animated: bool,
}

impl Connection {
    pub fn new(id: impl Into<String>, route: Vec<LayoutPoint>) -> Self {
        Self {
            id: id.into(),
            route,
            stroke: "#0D32B2".to_string(),
            stroke_width: default_stroke_width(),
            stroke_dash: 0.0,
            opacity: default_opacity(),
            src_arrow: Arrowhead::None,
            dst_arrow: Arrowhead::None,
            animated: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.route.len() < 2 {
            return Err(Error::InvalidRoute {
                id: self.id.clone(),
                points: self.route.len(),
            });
        }
        Ok(())
    }

    pub fn css_style(&self) -> String {
        css_style(self.opacity, self.stroke_width, self.stroke_dash)
    }
}

/// Dash and gap lengths for a dashed stroke; thicker strokes get proportionally tighter gaps.
pub fn stroke_dash_attributes(stroke_width: f64, dash_gap_size: f64) -> (f64, f64) {
    let scale = (-0.6 * stroke_width + 10.6).log10() * 0.5 + 0.5;
    let dash = stroke_width * dash_gap_size;
    let gap = scale * dash;
    (dash, gap)
}

fn css_style(opacity: f64, stroke_width: f64, stroke_dash: f64) -> String {
    let mut out = String::new();
    let _ = write!(&mut out, "stroke-width:{};", crate::svg::fmt(stroke_width));
    if opacity != 1.0 {
        let _ = write!(&mut out, "opacity:{};", crate::svg::fmt(opacity));
    }
    if stroke_dash != 0.0 {
        let (dash, gap) = stroke_dash_attributes(stroke_width, stroke_dash);
        let _ = write!(
            &mut out,
            "stroke-dasharray:{},{};",
            crate::svg::fmt(dash),
            crate::svg::fmt(gap)
        );
    }
    out
}
