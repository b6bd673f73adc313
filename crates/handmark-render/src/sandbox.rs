//! The sketch sandbox: a request/response boundary around the rough stroke generator.
//!
//! A sandbox holds exactly one "current node". [`SketchSandbox::evaluate`] replaces it with the
//! drawable produced for a request, and [`SketchSandbox::current_children`] serializes that
//! node's child segments for extraction. Callers must read the children before issuing the next
//! request; [`crate::SketchRenderer`] enforces this by taking `&mut self` for every render call.

mod rough;

pub use rough::RoughSandbox;

use crate::Result;
use handmark_core::SketchConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FillStyle {
    Solid,
    Hachure,
    Zigzag,
    CrossHatch,
    Dots,
    Dashed,
    ZigzagLine,
}

/// Style record passed with every request. `None` fields take the generator defaults
/// (roughness 1, bowing 1, stroke `#000`, stroke width 1, no fill, hachure fill style).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoughStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_style: Option<FillStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hachure_gap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f64>,
}

impl RoughStyle {
    /// The shared shape parameters: solid fill plus the configured weight, gap, bowing and seed.
    pub fn baseline(config: &SketchConfig) -> Self {
        Self {
            fill_weight: Some(config.fill_weight as f64),
            hachure_gap: Some(config.hachure_gap as f64),
            fill_style: Some(FillStyle::Solid),
            bowing: Some(config.bowing as f64),
            seed: Some(config.seed),
            ..Default::default()
        }
    }

    pub fn fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn stroke(mut self, stroke: impl Into<String>) -> Self {
        self.stroke = Some(stroke.into());
        self
    }

    pub fn stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = Some(stroke_width);
        self
    }

    pub fn fill_style(mut self, fill_style: FillStyle) -> Self {
        self.fill_style = Some(fill_style);
        self
    }

    pub fn fill_weight(mut self, fill_weight: f64) -> Self {
        self.fill_weight = Some(fill_weight);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn roughness(mut self, roughness: f64) -> Self {
        self.roughness = Some(roughness);
        self
    }
}

/// Geometry of one drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SketchShape {
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Centered at `(cx, cy)`.
    Ellipse {
        cx: f64,
        cy: f64,
        width: f64,
        height: f64,
    },
    Path {
        d: String,
    },
    LinearPath {
        points: Vec<[f64; 2]>,
    },
    Polygon {
        points: Vec<[f64; 2]>,
    },
    Circle {
        cx: f64,
        cy: f64,
        diameter: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
}

impl SketchShape {
    pub fn name(&self) -> &'static str {
        match self {
            SketchShape::Rectangle { .. } => "rectangle",
            SketchShape::Ellipse { .. } => "ellipse",
            SketchShape::Path { .. } => "path",
            SketchShape::LinearPath { .. } => "linearPath",
            SketchShape::Polygon { .. } => "polygon",
            SketchShape::Circle { .. } => "circle",
            SketchShape::Line { .. } => "line",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SketchRequest {
    #[serde(flatten)]
    pub shape: SketchShape,
    pub style: RoughStyle,
}

impl SketchRequest {
    pub fn new(shape: SketchShape, style: RoughStyle) -> Self {
        Self { shape, style }
    }

    pub fn rectangle(x: f64, y: f64, width: f64, height: f64, style: RoughStyle) -> Self {
        Self::new(
            SketchShape::Rectangle {
                x,
                y,
                width,
                height,
            },
            style,
        )
    }

    pub fn ellipse(cx: f64, cy: f64, width: f64, height: f64, style: RoughStyle) -> Self {
        Self::new(
            SketchShape::Ellipse {
                cx,
                cy,
                width,
                height,
            },
            style,
        )
    }

    pub fn path(d: impl Into<String>, style: RoughStyle) -> Self {
        Self::new(SketchShape::Path { d: d.into() }, style)
    }

    pub fn linear_path(points: &[[f64; 2]], style: RoughStyle) -> Self {
        Self::new(
            SketchShape::LinearPath {
                points: points.to_vec(),
            },
            style,
        )
    }

    pub fn polygon(points: &[[f64; 2]], style: RoughStyle) -> Self {
        Self::new(
            SketchShape::Polygon {
                points: points.to_vec(),
            },
            style,
        )
    }

    pub fn circle(cx: f64, cy: f64, diameter: f64, style: RoughStyle) -> Self {
        Self::new(SketchShape::Circle { cx, cy, diameter }, style)
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, style: RoughStyle) -> Self {
        Self::new(SketchShape::Line { x1, y1, x2, y2 }, style)
    }

    pub fn kind(&self) -> &'static str {
        self.shape.name()
    }
}

/// Request/response contract of the stroke generator.
pub trait SketchSandbox {
    /// Draws `request` into the current-node slot, replacing whatever was there.
    ///
    /// On error the slot is left empty.
    fn evaluate(&mut self, request: &SketchRequest) -> Result<()>;

    /// JSON array of the current node's children:
    /// `[{"attrs":{"d":".."},"style":{"stroke":"..","strokeWidth":"..","fill":".."}}]`,
    /// with every style key optional.
    fn current_children(&self) -> Result<String>;
}

impl<S: SketchSandbox + ?Sized> SketchSandbox for Box<S> {
    fn evaluate(&mut self, request: &SketchRequest) -> Result<()> {
        (**self).evaluate(request)
    }

    fn current_children(&self) -> Result<String> {
        (**self).current_children()
    }
}
