//! The rendering session: one sandbox, one configuration, many shapes.

use crate::Result;
use crate::extract::{RoughPath, compute_rough_path_data, compute_rough_paths};
use crate::sandbox::{RoughSandbox, RoughStyle, SketchRequest, SketchSandbox};
use handmark_core::model::LayoutPoint;
use handmark_core::svg::fmt;
use handmark_core::{Shape, ShapeKind, SketchConfig};
use std::fmt::Write as _;
use tracing::debug;

/// Owns the sandbox for the lifetime of a document render.
///
/// Every render call takes `&mut self`: a sketch request and the read of its result always run
/// back to back. Give each worker thread its own renderer.
#[derive(Debug)]
pub struct SketchRenderer<S: SketchSandbox = RoughSandbox> {
    sandbox: S,
    config: SketchConfig,
}

impl SketchRenderer<RoughSandbox> {
    pub fn new(config: SketchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sandbox: RoughSandbox::initialize()?,
            config,
        })
    }
}

impl<S: SketchSandbox> SketchRenderer<S> {
    pub fn with_sandbox(sandbox: S, config: SketchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { sandbox, config })
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn sandbox(&self) -> &S {
        &self.sandbox
    }

    pub fn into_sandbox(self) -> S {
        self.sandbox
    }

    /// Renders `shape` with the routine matching its kind.
    ///
    /// `path_data` is only consulted for free-form kinds, which are drawn from their outline paths.
    pub fn render_shape(&mut self, shape: &Shape, path_data: &[String]) -> Result<String> {
        match shape.kind {
            ShapeKind::Rectangle | ShapeKind::Square => self.rect(shape),
            ShapeKind::Oval | ShapeKind::Circle => self.oval(shape),
            ShapeKind::SqlTable => self.table(shape),
            ShapeKind::Class => self.class(shape),
            ShapeKind::Path => self.paths(shape, path_data),
        }
    }

    /// The fixed parameter set every shape sketch starts from.
    pub(crate) fn base_style(&self) -> RoughStyle {
        RoughStyle::baseline(&self.config)
    }

    /// Outline style for a shape body: filled and stroked so both layers come back.
    pub(crate) fn body_style(&self, shape: &Shape) -> RoughStyle {
        self.base_style()
            .fill("#000")
            .stroke("#000")
            .stroke_width(shape.stroke_width)
    }

    pub(crate) fn sketch(&mut self, request: &SketchRequest) -> Result<Vec<String>> {
        compute_rough_path_data(&mut self.sandbox, request, self.config.path_precision)
    }

    pub(crate) fn sketch_paths(&mut self, request: &SketchRequest) -> Result<Vec<RoughPath>> {
        compute_rough_paths(&mut self.sandbox, request, self.config.path_precision)
    }

    pub(crate) fn log_entry(&self, op: &'static str, shape: &Shape) {
        debug!(op, id = %shape.id, kind = ?shape.kind, "sketch render");
    }
}

pub(crate) fn translate(x: f64, y: f64) -> String {
    format!("translate({} {})", fmt(x), fmt(y))
}

/// `M x y L x y ...` through every route point.
pub fn route_path_data(route: &[LayoutPoint]) -> String {
    let mut out = String::new();
    for (i, p) in route.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(&mut out, "{cmd} {} {}", fmt(p.x), fmt(p.y));
    }
    out
}
