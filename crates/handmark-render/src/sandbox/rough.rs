//! Native sandbox backed by `roughr`, a Rust port of rough.js.
//!
//! Call ordering mirrors the rough.js generator so seeded output follows the same PRNG stream:
//! the outline is generated first, then the fill, and children are emitted fill-first.

use super::{FillStyle, RoughStyle, SketchRequest, SketchSandbox, SketchShape};
use crate::{Error, Result};
use euclid::default::Point2D;
use handmark_core::svg::fmt;
use handmark_core::theme::is_unpainted;
use roughr::core::{OpSet, OpType, Options, OptionsBuilder};
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;
use tracing::trace;

const DEFAULT_STROKE: &str = "#000";
const DEFAULT_STROKE_WIDTH: f64 = 1.0;
const DEFAULT_SEED: u64 = 1;
/// Extra roughness rough.js adds when a single-subpath path is filled by re-sketching it.
const FILL_SHAPE_ROUGHNESS_GAIN: f32 = 0.8;
const ELLIPSE_FILL_POINTS: usize = 32;

/// Kind of fill child: a solid silhouette or a hachure-style sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Fill,
    FillSketch,
}

#[derive(Debug, Clone, Serialize)]
struct ChildAttrs {
    d: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChildStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stroke_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct Child {
    attrs: ChildAttrs,
    style: ChildStyle,
}

/// One reusable generator instance with a single current-node slot.
pub struct RoughSandbox {
    defaults: Options,
    current: Option<Vec<Child>>,
}

impl std::fmt::Debug for RoughSandbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoughSandbox")
            .field("has_current", &self.current.is_some())
            .finish()
    }
}

impl RoughSandbox {
    /// Builds the generator's baseline options. Fails if they cannot be constructed.
    pub fn initialize() -> Result<Self> {
        let defaults = OptionsBuilder::default()
            .seed(DEFAULT_SEED)
            .roughness(1.0)
            .bowing(1.0)
            .stroke_width(DEFAULT_STROKE_WIDTH as f32)
            .fill_weight(-1.0)
            .hachure_gap(-1.0)
            .disable_multi_stroke(false)
            .disable_multi_stroke_fill(false)
            .build()
            .map_err(|e| Error::SandboxInit {
                message: e.to_string(),
            })?;
        Ok(Self {
            defaults,
            current: None,
        })
    }

    fn options_for(&self, kind: &'static str, style: &RoughStyle) -> Result<Options> {
        let mut o = self.defaults.clone();
        if let Some(seed) = style.seed {
            if seed == 0 {
                return Err(evaluation(kind, "seed must be non-zero"));
            }
            o.seed = Some(seed);
        }
        let numbers = [
            ("roughness", style.roughness),
            ("bowing", style.bowing),
            ("strokeWidth", style.stroke_width),
            ("fillWeight", style.fill_weight),
            ("hachureGap", style.hachure_gap),
        ];
        for (name, v) in numbers {
            if v.is_some_and(|v| !v.is_finite()) {
                return Err(evaluation(kind, format!("{name} must be finite")));
            }
        }
        if let Some(v) = style.roughness {
            o.roughness = Some(v as f32);
        }
        if let Some(v) = style.bowing {
            o.bowing = Some(v as f32);
        }
        if let Some(v) = style.stroke_width {
            o.stroke_width = Some(v as f32);
        }
        if let Some(v) = style.fill_weight {
            o.fill_weight = Some(v as f32);
        }
        if let Some(v) = style.hachure_gap {
            o.hachure_gap = Some(v as f32);
        }
        o.fill_style = Some(match style.fill_style.unwrap_or(FillStyle::Hachure) {
            FillStyle::Solid => roughr::core::FillStyle::Solid,
            FillStyle::Hachure => roughr::core::FillStyle::Hachure,
            FillStyle::Zigzag => roughr::core::FillStyle::ZigZag,
            FillStyle::CrossHatch => roughr::core::FillStyle::CrossHatch,
            FillStyle::Dots => roughr::core::FillStyle::Dots,
            FillStyle::Dashed => roughr::core::FillStyle::Dashed,
            FillStyle::ZigzagLine => roughr::core::FillStyle::ZigZagLine,
        });
        // Colors never influence geometry; the generator only needs to know whether to fill.
        o.fill = style
            .fill
            .as_deref()
            .filter(|f| !is_unpainted(f))
            .map(srgba_or_black);
        o.stroke = Some(srgba_or_black(style.stroke.as_deref().unwrap_or(DEFAULT_STROKE)));
        Ok(o)
    }

    fn draw(&self, request: &SketchRequest) -> Result<Vec<Child>> {
        let kind = request.kind();
        validate_shape(&request.shape)?;
        let style = &request.style;
        let mut o = self.options_for(kind, style)?;
        let has_fill = o.fill.is_some();
        let has_stroke = !style.stroke.as_deref().is_some_and(is_unpainted);

        let (fill, outline): (Option<(Layer, OpSet<f64>)>, OpSet<f64>) = match &request.shape {
            SketchShape::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                let (x, y, w, h) = (*x, *y, *width, *height);
                let outline = roughr::renderer::rectangle::<f64>(x, y, w, h, &mut o);
                let fill = has_fill.then(|| {
                    let corners = vec![
                        Point2D::new(x, y),
                        Point2D::new(x + w, y),
                        Point2D::new(x + w, y + h),
                        Point2D::new(x, y + h),
                    ];
                    fill_polygons(vec![corners], &mut o)
                });
                (fill, outline)
            }
            SketchShape::Ellipse {
                cx,
                cy,
                width,
                height,
            } => sketch_ellipse(*cx, *cy, *width, *height, has_fill, &mut o),
            SketchShape::Circle { cx, cy, diameter } => {
                sketch_ellipse(*cx, *cy, *diameter, *diameter, has_fill, &mut o)
            }
            SketchShape::Path { d } => sketch_path(d, has_fill, &mut o),
            SketchShape::LinearPath { points } => {
                let pts = to_points(points);
                let mut outline = OpSet {
                    op_set_type: roughr::core::OpSetType::Path,
                    ops: Vec::new(),
                    size: None,
                    path: None,
                };
                for pair in pts.windows(2) {
                    let seg = roughr::renderer::line::<f64>(
                        pair[0].x, pair[0].y, pair[1].x, pair[1].y, &mut o,
                    );
                    outline.ops.extend(seg.ops);
                }
                (None, outline)
            }
            SketchShape::Polygon { points } => {
                let pts = to_points(points);
                let outline = roughr::renderer::polygon::<f64>(&pts, &mut o);
                let fill = has_fill.then(|| fill_polygons(vec![pts.clone()], &mut o));
                (fill, outline)
            }
            SketchShape::Line { x1, y1, x2, y2 } => {
                let outline = roughr::renderer::line::<f64>(*x1, *y1, *x2, *y2, &mut o);
                (None, outline)
            }
        };

        let stroke = style
            .stroke
            .clone()
            .unwrap_or_else(|| DEFAULT_STROKE.to_string());
        let stroke_width = style.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH);
        let fill_color = style.fill.clone().unwrap_or_default();

        let mut children = Vec::with_capacity(2);
        if let Some((layer, opset)) = fill {
            let child_style = match layer {
                Layer::FillSketch => {
                    let weight = style.fill_weight.unwrap_or(-1.0);
                    let weight = if weight < 0.0 {
                        stroke_width / 2.0
                    } else {
                        weight
                    };
                    ChildStyle {
                        stroke: Some(fill_color.clone()),
                        stroke_width: Some(fmt(weight)),
                        fill: Some("none".to_string()),
                    }
                }
                Layer::Fill => ChildStyle {
                    stroke: Some("none".to_string()),
                    stroke_width: Some("0".to_string()),
                    fill: Some(fill_color.clone()),
                },
            };
            children.push(Child {
                attrs: ChildAttrs {
                    d: ops_to_d(&opset),
                },
                style: child_style,
            });
        }
        if has_stroke {
            children.push(Child {
                attrs: ChildAttrs {
                    d: ops_to_d(&outline),
                },
                style: ChildStyle {
                    stroke: Some(stroke),
                    stroke_width: Some(fmt(stroke_width)),
                    fill: Some("none".to_string()),
                },
            });
        }
        Ok(children)
    }
}

impl SketchSandbox for RoughSandbox {
    fn evaluate(&mut self, request: &SketchRequest) -> Result<()> {
        self.current = None;
        trace!(
            kind = request.kind(),
            seed = request.style.seed.unwrap_or(DEFAULT_SEED),
            "sketch evaluate"
        );
        let children = self.draw(request)?;
        self.current = Some(children);
        Ok(())
    }

    fn current_children(&self) -> Result<String> {
        let children = self.current.as_ref().ok_or(Error::NoCurrentNode)?;
        Ok(serde_json::to_string(children)?)
    }
}

fn evaluation(kind: &'static str, message: impl Into<String>) -> Error {
    Error::Evaluation {
        kind,
        message: message.into(),
    }
}

fn validate_shape(shape: &SketchShape) -> Result<()> {
    let kind = shape.name();
    let check_finite = |values: &[f64]| {
        if values.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(evaluation(kind, "geometry must be finite"))
        }
    };
    let check_positive = |values: &[f64]| {
        if values.iter().all(|v| *v > 0.0) {
            Ok(())
        } else {
            Err(evaluation(kind, "sizes must be positive"))
        }
    };
    let check_points = |points: &[[f64; 2]]| {
        if points.len() < 2 {
            return Err(evaluation(
                kind,
                format!("expected at least 2 points, got {}", points.len()),
            ));
        }
        if points.iter().flatten().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(evaluation(kind, "geometry must be finite"))
        }
    };

    match shape {
        SketchShape::Rectangle {
            x,
            y,
            width,
            height,
        } => {
            check_finite(&[*x, *y, *width, *height])?;
            check_positive(&[*width, *height])
        }
        SketchShape::Ellipse {
            cx,
            cy,
            width,
            height,
        } => {
            check_finite(&[*cx, *cy, *width, *height])?;
            check_positive(&[*width, *height])
        }
        SketchShape::Circle { cx, cy, diameter } => {
            check_finite(&[*cx, *cy, *diameter])?;
            check_positive(&[*diameter])
        }
        SketchShape::Line { x1, y1, x2, y2 } => check_finite(&[*x1, *y1, *x2, *y2]),
        SketchShape::LinearPath { points } | SketchShape::Polygon { points } => {
            check_points(points)
        }
        SketchShape::Path { d } => {
            if d.trim().is_empty() {
                return Err(evaluation(kind, "path data is empty"));
            }
            for segment in svgtypes::PathParser::from(d.as_str()) {
                segment.map_err(|e| evaluation(kind, format!("invalid path data: {e}")))?;
            }
            Ok(())
        }
    }
}

fn srgba_or_black(color: &str) -> roughr::Srgba {
    // Theme codes and other non-CSS colors are passed through to the output untouched.
    match svgtypes::Color::from_str(color.trim()) {
        Ok(c) => roughr::Srgba::new(
            c.red as f32 / 255.0,
            c.green as f32 / 255.0,
            c.blue as f32 / 255.0,
            c.alpha as f32 / 255.0,
        ),
        Err(_) => roughr::Srgba::new(0.0, 0.0, 0.0, 1.0),
    }
}

fn to_points(points: &[[f64; 2]]) -> Vec<Point2D<f64>> {
    points.iter().map(|[x, y]| Point2D::new(*x, *y)).collect()
}

fn fill_polygons(polygons: Vec<Vec<Point2D<f64>>>, o: &mut Options) -> (Layer, OpSet<f64>) {
    if o.fill_style == Some(roughr::core::FillStyle::Solid) {
        (
            Layer::Fill,
            roughr::renderer::solid_fill_polygon(&polygons, o),
        )
    } else {
        (
            Layer::FillSketch,
            roughr::renderer::pattern_fill_polygons(polygons, o),
        )
    }
}

fn sketch_ellipse(
    cx: f64,
    cy: f64,
    width: f64,
    height: f64,
    has_fill: bool,
    o: &mut Options,
) -> (Option<(Layer, OpSet<f64>)>, OpSet<f64>) {
    let outline = roughr::renderer::ellipse::<f64>(cx, cy, width, height, o);
    if !has_fill {
        return (None, outline);
    }
    if o.fill_style == Some(roughr::core::FillStyle::Solid) {
        let fill = roughr::renderer::ellipse::<f64>(cx, cy, width, height, o);
        return (Some((Layer::Fill, fill)), outline);
    }
    let (rx, ry) = (width / 2.0, height / 2.0);
    let perimeter: Vec<Point2D<f64>> = (0..ELLIPSE_FILL_POINTS)
        .map(|i| {
            let t = (i as f64) * std::f64::consts::TAU / (ELLIPSE_FILL_POINTS as f64);
            Point2D::new(cx + rx * t.cos(), cy + ry * t.sin())
        })
        .collect();
    (Some(fill_polygons(vec![perimeter], o)), outline)
}

fn sketch_path(
    d: &str,
    has_fill: bool,
    o: &mut Options,
) -> (Option<(Layer, OpSet<f64>)>, OpSet<f64>) {
    let distance = (1.0 + o.roughness.unwrap_or(1.0) as f64) / 2.0;
    let sets =
        roughr::points_on_path::points_on_path::<f64>(d.to_string(), Some(1.0), Some(distance));

    let outline = roughr::renderer::svg_path::<f64>(d.to_string(), o);
    if !has_fill {
        return (None, outline);
    }
    if o.fill_style != Some(roughr::core::FillStyle::Solid) {
        return (Some(fill_polygons(sets, o)), outline);
    }
    if sets.len() != 1 {
        return (Some(fill_polygons(sets, o)), outline);
    }

    // A single closed subpath is filled by re-sketching it as one merged stroke, continuing the
    // PRNG stream of the outline pass.
    let mut fill_opts = o.clone();
    fill_opts.disable_multi_stroke = Some(true);
    let base_rough = fill_opts.roughness.unwrap_or(1.0);
    fill_opts.roughness = Some(if base_rough != 0.0 {
        base_rough + FILL_SHAPE_ROUGHNESS_GAIN
    } else {
        0.0
    });
    let mut fill = roughr::renderer::svg_path::<f64>(d.to_string(), &mut fill_opts);
    fill.ops = fill
        .ops
        .into_iter()
        .enumerate()
        .filter_map(|(idx, op)| (idx == 0 || op.op != OpType::Move).then_some(op))
        .collect();
    (Some((Layer::Fill, fill)), outline)
}

fn ops_to_d(opset: &OpSet<f64>) -> String {
    let mut out = String::new();
    for op in &opset.ops {
        match op.op {
            OpType::Move => {
                let _ = write!(&mut out, "M{} {} ", op.data[0], op.data[1]);
            }
            OpType::BCurveTo => {
                let _ = write!(
                    &mut out,
                    "C{} {}, {} {}, {} {} ",
                    op.data[0], op.data[1], op.data[2], op.data[3], op.data[4], op.data[5]
                );
            }
            OpType::LineTo => {
                let _ = write!(&mut out, "L{} {} ", op.data[0], op.data[1]);
            }
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn children(sandbox: &RoughSandbox) -> Vec<serde_json::Value> {
        let json = sandbox.current_children().expect("children");
        serde_json::from_str(&json).expect("json array")
    }

    #[test]
    fn filled_rectangle_emits_fill_then_outline() {
        let mut sb = RoughSandbox::initialize().expect("init");
        let style = RoughStyle::default()
            .fill("#000")
            .stroke("#000")
            .stroke_width(2.0)
            .fill_style(FillStyle::Solid)
            .seed(1);
        sb.evaluate(&SketchRequest::rectangle(0.0, 0.0, 100.0, 50.0, style))
            .expect("evaluate");
        let c = children(&sb);
        assert_eq!(c.len(), 2);
        assert_eq!(c[0]["style"]["stroke"], "none");
        assert_eq!(c[0]["style"]["fill"], "#000");
        assert_eq!(c[1]["style"]["fill"], "none");
        assert_eq!(c[1]["style"]["strokeWidth"], "2");
        assert!(c[1]["attrs"]["d"].as_str().unwrap().starts_with('M'));
    }

    #[test]
    fn unfilled_line_has_only_an_outline() {
        let mut sb = RoughSandbox::initialize().expect("init");
        sb.evaluate(&SketchRequest::line(0.0, 10.0, 100.0, 10.0, RoughStyle::default()))
            .expect("evaluate");
        let c = children(&sb);
        assert_eq!(c.len(), 1);
        assert_eq!(c[0]["style"]["stroke"], "#000");
    }

    #[test]
    fn same_request_same_output() {
        let req = SketchRequest::ellipse(
            50.0,
            25.0,
            100.0,
            50.0,
            RoughStyle::default().fill("#fff").fill_style(FillStyle::Solid).seed(1),
        );
        let mut a = RoughSandbox::initialize().expect("init");
        let mut b = RoughSandbox::initialize().expect("init");
        a.evaluate(&req).expect("evaluate");
        b.evaluate(&req).expect("evaluate");
        // A reused sandbox must not carry PRNG state between requests either.
        a.evaluate(&req).expect("evaluate");
        assert_eq!(a.current_children().unwrap(), b.current_children().unwrap());
    }

    #[test]
    fn stroke_none_suppresses_outline() {
        let mut sb = RoughSandbox::initialize().expect("init");
        let style = RoughStyle::default()
            .fill("#abc")
            .stroke("none")
            .fill_style(FillStyle::Solid);
        sb.evaluate(&SketchRequest::polygon(
            &[[-10.0, -4.0], [0.0, 0.0], [-10.0, 4.0]],
            style,
        ))
        .expect("evaluate");
        let c = children(&sb);
        assert_eq!(c.len(), 1);
        assert_eq!(c[0]["style"]["fill"], "#abc");
    }

    #[test]
    fn children_before_evaluate_is_an_error() {
        let sb = RoughSandbox::initialize().expect("init");
        assert!(matches!(sb.current_children(), Err(Error::NoCurrentNode)));
    }

    #[test]
    fn failed_evaluation_clears_the_slot() {
        let mut sb = RoughSandbox::initialize().expect("init");
        sb.evaluate(&SketchRequest::line(0.0, 0.0, 1.0, 1.0, RoughStyle::default()))
            .expect("evaluate");
        let err = sb
            .evaluate(&SketchRequest::path("M 0 0 L oops", RoughStyle::default()))
            .unwrap_err();
        assert!(matches!(err, Error::Evaluation { kind: "path", .. }));
        assert!(matches!(sb.current_children(), Err(Error::NoCurrentNode)));
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        let mut sb = RoughSandbox::initialize().expect("init");
        let bad = [
            SketchRequest::rectangle(0.0, 0.0, 0.0, 10.0, RoughStyle::default()),
            SketchRequest::circle(0.0, f64::NAN, 8.0, RoughStyle::default()),
            SketchRequest::linear_path(&[[0.0, 0.0]], RoughStyle::default()),
            SketchRequest::path("", RoughStyle::default()),
            SketchRequest::line(0.0, 0.0, 1.0, 1.0, RoughStyle::default().seed(0)),
        ];
        for req in &bad {
            assert!(
                matches!(sb.evaluate(req), Err(Error::Evaluation { .. })),
                "{req:?}"
            );
        }
    }

    #[test]
    fn hachure_fill_is_sketched_in_the_fill_color() {
        let mut sb = RoughSandbox::initialize().expect("init");
        let style = RoughStyle::default().fill("#0D32B2").stroke_width(3.0).seed(2);
        let requests = [
            SketchRequest::polygon(&[[0.0, 0.0], [60.0, 0.0], [30.0, 40.0]], style.clone()),
            SketchRequest::ellipse(40.0, 20.0, 80.0, 40.0, style),
        ];
        for req in &requests {
            sb.evaluate(req).expect("evaluate");
            let c = children(&sb);
            assert_eq!(c.len(), 2, "{req:?}");
            assert_eq!(c[0]["style"]["stroke"], "#0D32B2");
            assert_eq!(c[0]["style"]["strokeWidth"], "1.5");
            assert_eq!(c[0]["style"]["fill"], "none");
            assert!(!c[0]["attrs"]["d"].as_str().unwrap().is_empty());
            assert_eq!(c[1]["style"]["strokeWidth"], "3");
        }
    }

    #[test]
    fn request_serializes_with_kind_tag() {
        let req = SketchRequest::circle(-20.0, 0.0, 8.0, RoughStyle::default().seed(4));
        let v = serde_json::to_value(&req).expect("json");
        assert_eq!(v["kind"], "circle");
        assert_eq!(v["diameter"], 8.0);
        assert_eq!(v["style"]["seed"], 4);
    }
}
