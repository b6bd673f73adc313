//! Sketched arrowheads at connector ends.
//!
//! Every sketchable kind maps to a fixed record: a primary drawing in a local frame with the tip at
//! the origin and the body extending towards -X, plus an optional secondary drawing. Each drawing
//! has its own pinned seed. The record is placed with `translate(end + adjust) rotate(angle)`.

use crate::Result;
use crate::extract::RoughPath;
use crate::renderer::SketchRenderer;
use crate::sandbox::{FillStyle, RoughStyle, SketchRequest, SketchSandbox};
use handmark_core::geom::{Point, Segment, vector_degrees};
use handmark_core::svg::{ThemableElement, fmt};
use handmark_core::{Arrowhead, Connection, Error as CoreError};
use tracing::debug;

const CHEVRON: &[[f64; 2]] = &[[-10.0, -4.0], [0.0, 0.0], [-10.0, 4.0]];
const DIAMOND: &[[f64; 2]] = &[
    [-20.0, 0.0],
    [-10.0, 5.0],
    [0.0, 0.0],
    [-10.0, -5.0],
    [-20.0, 0.0],
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    LinearPath(&'static [[f64; 2]]),
    Polygon(&'static [[f64; 2]]),
    Path(&'static str),
    Circle { cx: f64, cy: f64, diameter: f64 },
}

/// Fill of an arrowhead drawing: none, the connector's stroke color, or white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    None,
    Stroke,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchPart {
    pub geometry: Geometry,
    pub fill: Paint,
    pub fill_style: Option<FillStyle>,
    pub fill_weight: Option<f64>,
    pub seed: u64,
}

impl SketchPart {
    const fn outline(geometry: Geometry, seed: u64) -> Self {
        Self {
            geometry,
            fill: Paint::None,
            fill_style: None,
            fill_weight: None,
            seed,
        }
    }

    const fn solid(geometry: Geometry, fill: Paint, fill_weight: Option<f64>, seed: u64) -> Self {
        Self {
            geometry,
            fill,
            fill_style: Some(FillStyle::Solid),
            fill_weight,
            seed,
        }
    }

    pub fn request(&self, stroke: &str, stroke_width: f64) -> SketchRequest {
        let mut style = RoughStyle::default()
            .stroke_width(stroke_width)
            .stroke(stroke)
            .seed(self.seed);
        match self.fill {
            Paint::None => {}
            Paint::Stroke => style = style.fill(stroke),
            Paint::White => style = style.fill("white"),
        }
        style.fill_style = self.fill_style;
        style.fill_weight = self.fill_weight;
        match self.geometry {
            Geometry::LinearPath(points) => SketchRequest::linear_path(points, style),
            Geometry::Polygon(points) => SketchRequest::polygon(points, style),
            Geometry::Path(d) => SketchRequest::path(d, style),
            Geometry::Circle { cx, cy, diameter } => SketchRequest::circle(cx, cy, diameter, style),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Source,
    Destination,
}

impl End {
    fn as_str(self) -> &'static str {
        match self {
            End::Source => "source",
            End::Destination => "destination",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowheadSketch {
    pub primary: SketchPart,
    pub secondary: Option<SketchPart>,
}

const CROWS_FOOT_CIRCLE: Geometry = Geometry::Circle {
    cx: -20.0,
    cy: 0.0,
    diameter: 8.0,
};

static ARROW: ArrowheadSketch = ArrowheadSketch {
    primary: SketchPart::outline(Geometry::LinearPath(CHEVRON), 3),
    secondary: None,
};
static TRIANGLE: ArrowheadSketch = ArrowheadSketch {
    primary: SketchPart::solid(Geometry::Polygon(CHEVRON), Paint::Stroke, None, 2),
    secondary: None,
};
static DIAMOND_OPEN: ArrowheadSketch = ArrowheadSketch {
    primary: SketchPart::solid(Geometry::Polygon(DIAMOND), Paint::White, None, 1),
    secondary: None,
};
static DIAMOND_FILLED: ArrowheadSketch = ArrowheadSketch {
    primary: SketchPart {
        geometry: Geometry::Polygon(DIAMOND),
        fill: Paint::Stroke,
        fill_style: Some(FillStyle::Zigzag),
        fill_weight: Some(4.0),
        seed: 1,
    },
    secondary: None,
};
static CF_MANY_REQUIRED: ArrowheadSketch = ArrowheadSketch {
    primary: SketchPart::solid(
        Geometry::Path("M-15,-10 -15,10 M0,10 -15,0 M0,-10 -15,0"),
        Paint::Stroke,
        Some(4.0),
        2,
    ),
    secondary: None,
};
static CF_MANY: ArrowheadSketch = ArrowheadSketch {
    primary: SketchPart::solid(
        Geometry::Path("M0,10 -15,0 M0,-10 -15,0"),
        Paint::Stroke,
        Some(4.0),
        8,
    ),
    secondary: Some(SketchPart::solid(CROWS_FOOT_CIRCLE, Paint::White, Some(1.0), 4)),
};
static CF_ONE_REQUIRED: ArrowheadSketch = ArrowheadSketch {
    primary: SketchPart::solid(
        Geometry::Path("M-15,-10 -15,10 M-10,-10 -10,10"),
        Paint::Stroke,
        Some(4.0),
        2,
    ),
    secondary: None,
};
static CF_ONE: ArrowheadSketch = ArrowheadSketch {
    primary: SketchPart::solid(Geometry::Path("M-10,-10 -10,10"), Paint::Stroke, Some(4.0), 3),
    secondary: Some(SketchPart::solid(CROWS_FOOT_CIRCLE, Paint::White, Some(1.0), 5)),
};

/// The sketch record for `kind`, or `None` for kinds without a hand-drawn form.
pub fn arrowhead_sketch(kind: Arrowhead) -> Option<&'static ArrowheadSketch> {
    match kind {
        Arrowhead::Arrow => Some(&ARROW),
        Arrowhead::Triangle => Some(&TRIANGLE),
        Arrowhead::Diamond => Some(&DIAMOND_OPEN),
        Arrowhead::FilledDiamond => Some(&DIAMOND_FILLED),
        Arrowhead::CfManyRequired => Some(&CF_MANY_REQUIRED),
        Arrowhead::CfMany => Some(&CF_MANY),
        Arrowhead::CfOneRequired => Some(&CF_ONE_REQUIRED),
        Arrowhead::CfOne => Some(&CF_ONE),
        Arrowhead::None
        | Arrowhead::UnfilledTriangle
        | Arrowhead::Line
        | Arrowhead::Circle
        | Arrowhead::FilledCircle
        | Arrowhead::Box
        | Arrowhead::FilledBox
        | Arrowhead::Cross => None,
    }
}

impl<S: SketchSandbox> SketchRenderer<S> {
    /// Arrowheads for both ends of `connection`, joined by a single space.
    ///
    /// `src_adjust`/`dst_adjust` shift each head off its route endpoint. An end whose kind has no
    /// sketch record renders nothing and issues no sandbox request.
    pub fn arrowheads(
        &mut self,
        connection: &Connection,
        src_adjust: Point,
        dst_adjust: Point,
    ) -> Result<String> {
        connection.validate()?;
        debug!(
            id = %connection.id,
            src = ?connection.src_arrow,
            dst = ?connection.dst_arrow,
            "sketch arrowheads"
        );
        let mut heads = Vec::new();
        self.arrowhead_end(connection, End::Source, src_adjust, &mut heads)?;
        self.arrowhead_end(connection, End::Destination, dst_adjust, &mut heads)?;
        Ok(heads.join(" "))
    }

    fn arrowhead_end(
        &mut self,
        connection: &Connection,
        end: End,
        adjust: Point,
        heads: &mut Vec<String>,
    ) -> Result<()> {
        let route = &connection.route;
        // Both ends point outward: the source segment runs from the second point to the first.
        let (kind, segment) = match end {
            End::Source => (
                connection.src_arrow,
                Segment::new(route[1].into(), route[0].into()),
            ),
            End::Destination => {
                let n = route.len();
                (
                    connection.dst_arrow,
                    Segment::new(route[n - 2].into(), route[n - 1].into()),
                )
            }
        };
        let Some(sketch) = arrowhead_sketch(kind) else {
            if kind != Arrowhead::None {
                debug!(
                    id = %connection.id,
                    ?kind,
                    end = end.as_str(),
                    "arrowhead has no sketch form; skipped"
                );
            }
            return Ok(());
        };
        if segment.length() == 0.0 {
            return Err(CoreError::DegenerateSegment {
                id: connection.id.clone(),
                end: end.as_str(),
            }
            .into());
        }

        let tip = segment.end;
        let transform = format!(
            r#"transform="translate({} {}) rotate({})""#,
            fmt(tip.x + adjust.x),
            fmt(tip.y + adjust.y),
            fmt(vector_degrees(segment.to_vector()))
        );

        let mut paths: Vec<RoughPath> = Vec::new();
        for part in std::iter::once(&sketch.primary).chain(sketch.secondary.as_ref()) {
            let request = part.request(&connection.stroke, connection.stroke_width);
            paths.extend(self.sketch_paths(&request)?);
        }

        let mut el = ThemableElement::new("path");
        el.class = "connection".to_string();
        el.attributes = transform;
        for rp in paths {
            el.style = rp.style_css();
            el.d = rp.attrs.d;
            el.fill = rp.style.fill;
            el.stroke = rp.style.stroke;
            heads.push(el.render());
        }
        Ok(())
    }
}
