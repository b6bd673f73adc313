#![forbid(unsafe_code)]

//! Hand-drawn SVG rendering of laid-out shapes and connectors.
//!
//! A [`SketchRenderer`] owns one [`SketchSandbox`] and turns `handmark_core` descriptors into
//! markup fragments: rough stroke paths plus a solid overlay silhouette per shape.

pub mod arrowhead;
pub mod composite;
pub mod extract;
pub mod primitives;
pub mod renderer;
pub mod sandbox;

pub use extract::{RoughPath, RoughPathAttrs, RoughPathStyle};
pub use renderer::{SketchRenderer, route_path_data};
pub use sandbox::{FillStyle, RoughSandbox, RoughStyle, SketchRequest, SketchSandbox, SketchShape};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] handmark_core::Error),
    #[error("sketch sandbox failed to initialize: {message}")]
    SandboxInit { message: String },
    #[error("sketch evaluation failed for `{kind}`: {message}")]
    Evaluation { kind: &'static str, message: String },
    #[error("no current sketch node; evaluate a request before extracting")]
    NoCurrentNode,
    #[error("sketch result decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
