#![forbid(unsafe_code)]

//! Value model and pure helpers for hand-drawn diagram rendering.
//!
//! Shape/connection descriptors arrive fully laid out; this crate resolves their colors, anchors
//! labels inside boxes and builds the SVG elements the sketch renderer wraps around rough paths.

pub mod config;
pub mod error;
pub mod geom;
pub mod label;
pub mod model;
pub mod svg;
pub mod theme;

pub use config::SketchConfig;
pub use error::{Error, Result};
pub use label::LabelPosition;
pub use model::{
    Arrowhead, Class, ClassField, ClassMethod, Connection, LayoutPoint, Shape, ShapeKind,
    SqlColumn, SqlTable, Text,
};
