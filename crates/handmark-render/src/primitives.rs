//! Single-call sketch renderers: rectangle, ellipse, free-form paths and connectors.

use crate::Result;
use crate::renderer::{SketchRenderer, translate};
use crate::sandbox::{RoughStyle, SketchRequest, SketchSandbox};
use handmark_core::svg::{SketchOverlay, ThemableElement};
use handmark_core::theme::{connection_theme, shape_theme};
use handmark_core::{Connection, Shape};
use tracing::debug;

impl<S: SketchSandbox> SketchRenderer<S> {
    /// Stroke paths for the shape's body, each wrapped as a themed `shape` path element.
    pub(crate) fn body_paths(
        &mut self,
        shape: &Shape,
        request: &SketchRequest,
        transform: Option<String>,
        out: &mut String,
    ) -> Result<ThemableElement> {
        let paths = self.sketch(request)?;
        let mut el = ThemableElement::new("path");
        if let Some(t) = transform {
            el.transform = t;
        }
        (el.fill, el.stroke) = shape_theme(shape);
        el.class = "shape".to_string();
        el.style = shape.css_style();
        for d in paths {
            el.d = d;
            el.render_into(out);
        }
        Ok(el)
    }

    pub fn rect(&mut self, shape: &Shape) -> Result<String> {
        shape.validate()?;
        self.log_entry("rect", shape);
        let mut out = String::new();
        let request =
            SketchRequest::rectangle(0.0, 0.0, shape.width, shape.height, self.body_style(shape));
        let origin = translate(shape.pos.x, shape.pos.y);
        let body = self.body_paths(shape, &request, Some(origin.clone()), &mut out)?;

        let mut silhouette = ThemableElement::new("rect");
        silhouette.transform = origin;
        silhouette.width = Some(shape.width);
        silhouette.height = Some(shape.height);
        out.push_str(&SketchOverlay::new(silhouette, body.fill).render()?);
        Ok(out)
    }

    pub fn oval(&mut self, shape: &Shape) -> Result<String> {
        shape.validate()?;
        self.log_entry("oval", shape);
        let mut out = String::new();
        let (rx, ry) = (shape.width / 2.0, shape.height / 2.0);
        let request =
            SketchRequest::ellipse(rx, ry, shape.width, shape.height, self.body_style(shape));
        let body = self.body_paths(
            shape,
            &request,
            Some(translate(shape.pos.x, shape.pos.y)),
            &mut out,
        )?;

        let mut silhouette = ThemableElement::new("ellipse");
        silhouette.transform = translate(shape.pos.x + rx, shape.pos.y + ry);
        silhouette.rx = Some(rx);
        silhouette.ry = Some(ry);
        out.push_str(&SketchOverlay::new(silhouette, body.fill).render()?);
        Ok(out)
    }

    /// One sketch per outline path; each is followed by overlays over its own sketch paths.
    ///
    /// Path data is in absolute coordinates, so no transform is applied.
    pub fn paths(&mut self, shape: &Shape, paths: &[String]) -> Result<String> {
        shape.validate()?;
        self.log_entry("paths", shape);
        debug!(id = %shape.id, paths = paths.len(), "sketching outline paths");
        let mut out = String::new();
        for path in paths {
            let request = SketchRequest::path(path.as_str(), self.body_style(shape));
            let sketched = self.sketch(&request)?;

            let mut el = ThemableElement::new("path");
            (el.fill, el.stroke) = shape_theme(shape);
            el.class = "shape".to_string();
            el.style = shape.css_style();
            for d in &sketched {
                el.d.clone_from(d);
                el.render_into(&mut out);
            }

            let mut silhouette = ThemableElement::new("path");
            for d in sketched {
                silhouette.d = d;
                out.push_str(&SketchOverlay::new(silhouette.clone(), el.fill.as_str()).render()?);
            }
        }
        Ok(out)
    }

    /// Sketches a connector along `path_data`; `attrs` (markers and the like) pass through as-is.
    pub fn connection(
        &mut self,
        connection: &Connection,
        path_data: &str,
        attrs: &str,
    ) -> Result<String> {
        connection.validate()?;
        debug!(id = %connection.id, animated = connection.animated, "sketch connection");
        let style = RoughStyle::default()
            .roughness(self.config().connection_roughness as f64)
            .seed(self.config().seed);
        let paths = self.sketch(&SketchRequest::path(path_data, style))?;

        let mut el = ThemableElement::new("path");
        el.fill = "none".to_string();
        el.stroke = connection_theme(connection);
        el.class = if connection.animated {
            "connection animated-connection".to_string()
        } else {
            "connection".to_string()
        };
        el.style = connection.css_style();
        el.attributes = attrs.to_string();
        let mut out = String::new();
        for d in paths {
            el.d = d;
            el.render_into(&mut out);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::SketchRenderer;
    use handmark_core::{Connection, LayoutPoint, Shape, ShapeKind, SketchConfig};

    fn renderer() -> SketchRenderer {
        SketchRenderer::new(SketchConfig::default()).expect("renderer")
    }

    #[test]
    fn rect_places_paths_and_overlay_at_the_shape_origin() {
        let mut r = renderer();
        let shape = Shape::new("a", ShapeKind::Rectangle, 30.0, 40.0, 100.0, 50.0);
        let out = r.rect(&shape).expect("rect");
        assert!(out.contains(
            r##"transform="translate(30 40)" fill="#FFFFFF" stroke="#0D32B2" class="shape""##
        ));
        assert!(out.ends_with(
            r#"<rect width="100" height="50" transform="translate(30 40)" class="sketch-overlay-bright" />"#
        ));
    }

    #[test]
    fn oval_overlay_is_centered() {
        let mut r = renderer();
        let shape = Shape::new("o", ShapeKind::Oval, 0.0, 0.0, 80.0, 40.0);
        let out = r.oval(&shape).expect("oval");
        assert!(out.contains(r#"<ellipse rx="40" ry="20" transform="translate(40 20)""#));
    }

    #[test]
    fn transparent_fill_skips_the_overlay() {
        let mut r = renderer();
        let mut shape = Shape::new("a", ShapeKind::Rectangle, 0.0, 0.0, 10.0, 10.0);
        shape.fill = "transparent".to_string();
        let out = r.rect(&shape).expect("rect");
        assert!(!out.contains("sketch-overlay"));
    }

    #[test]
    fn invalid_shape_is_rejected_before_sketching() {
        let mut r = renderer();
        let shape = Shape::new("z", ShapeKind::Rectangle, 0.0, 0.0, 0.0, 10.0);
        assert!(matches!(
            r.rect(&shape),
            Err(crate::Error::Core(handmark_core::Error::InvalidShape { .. }))
        ));
    }

    #[test]
    fn connection_with_short_route_is_rejected() {
        let mut r = renderer();
        let conn = Connection::new("c", vec![LayoutPoint::new(0.0, 0.0)]);
        assert!(r.connection(&conn, "M 0 0 L 10 0", "").is_err());
    }
}
