//! Tables and class boxes: a sketched body, a header band and one row per member.
//!
//! The body is split into equal-height bands. A SQL table with `k` columns has `k + 1` bands
//! (header plus one per column); a class with `f` fields and `m` methods has `f + m + 2` (a double
//! height header plus one per member). Every member row is closed by a sketched divider line; a
//! class also always separates its fields from its methods, even when it has no fields.

use crate::Result;
use crate::renderer::{SketchRenderer, translate};
use crate::sandbox::{SketchRequest, SketchSandbox};
use handmark_core::geom::{GeoBox, point};
use handmark_core::model::{
    HEADER_LABEL_PADDING, NAME_PADDING, PREFIX_PADDING, PREFIX_WIDTH, TYPE_PADDING,
};
use handmark_core::svg::{SketchOverlay, ThemableElement, fmt};
use handmark_core::{LabelPosition, Shape};
use tracing::debug;

/// Baseline of a text line of height `h` whose box starts at `top`.
fn baseline(top: f64, h: f64) -> f64 {
    top + h * 3.0 / 4.0
}

fn text(x: f64, y: f64, fill: &str, class: &str, style: String, content: &str) -> ThemableElement {
    let mut el = ThemableElement::new("text");
    el.x = Some(x);
    el.y = Some(y);
    el.fill = fill.to_string();
    el.class = class.to_string();
    el.style = style;
    el.content = content.to_string();
    el
}

impl<S: SketchSandbox> SketchRenderer<S> {
    /// Header band sketch, painted with the shape's fill and left unstroked.
    fn header_band(&mut self, shape: &Shape, height: f64, out: &mut String) -> Result<()> {
        let request =
            SketchRequest::rectangle(0.0, 0.0, shape.width, height, self.base_style().fill("#000"));
        let paths = self.sketch(&request)?;
        let mut el = ThemableElement::new("path");
        el.transform = translate(shape.pos.x, shape.pos.y);
        el.fill.clone_from(&shape.fill);
        el.class = "class_header".to_string();
        for d in paths {
            el.d = d;
            el.render_into(out);
        }
        Ok(())
    }

    /// Horizontal divider across `row` at its top edge, in absolute coordinates. Only the fill is
    /// set.
    fn divider(
        &mut self,
        shape: &Shape,
        row: &GeoBox,
        class: &str,
        out: &mut String,
    ) -> Result<()> {
        let y = row.top_left.y;
        let request = SketchRequest::line(row.top_left.x, y, row.right(), y, self.base_style());
        let paths = self.sketch(&request)?;
        let mut el = ThemableElement::new("path");
        el.fill.clone_from(&shape.fill);
        el.class = class.to_string();
        for d in paths {
            el.d = d;
            el.render_into(out);
        }
        Ok(())
    }

    pub fn table(&mut self, shape: &Shape) -> Result<String> {
        shape.validate()?;
        self.log_entry("table", shape);
        let columns = shape.sql_columns();
        debug!(id = %shape.id, columns = columns.len(), "sketch table rows");

        let mut out = String::new();
        let request =
            SketchRequest::rectangle(0.0, 0.0, shape.width, shape.height, self.body_style(shape));
        self.body_paths(shape, &request, Some(translate(shape.pos.x, shape.pos.y)), &mut out)?;

        let body = GeoBox::new(point(shape.pos.x, shape.pos.y), shape.width, shape.height);
        let row_height = body.height / (1 + columns.len()) as f64;
        let header = GeoBox::new(body.top_left, body.width, row_height);
        self.header_band(shape, row_height, &mut out)?;

        if !shape.label.is_empty() {
            let tl = LabelPosition::InsideMiddleLeft.point_on_box(
                &header,
                HEADER_LABEL_PADDING,
                shape.label_width,
                shape.label_height,
            );
            text(
                tl.x,
                baseline(tl.y, shape.label_height),
                &shape.stroke,
                "text",
                format!("text-anchor:start;font-size:{}px", fmt(4.0 + shape.font_size)),
                &shape.label,
            )
            .render_into(&mut out);
        }

        let longest_name = columns
            .iter()
            .map(|c| c.name.label_width)
            .fold(0.0_f64, f64::max);
        let fs = shape.font_size;
        let mut row = GeoBox::new(
            point(body.top_left.x, body.top_left.y + header.height),
            body.width,
            row_height,
        );
        for column in columns {
            let name_tl =
                LabelPosition::InsideMiddleLeft.point_on_box(&row, NAME_PADDING, row.width, fs);
            let constraint_tr =
                LabelPosition::InsideMiddleRight.point_on_box(&row, TYPE_PADDING, 0.0, fs);
            let start = format!("text-anchor:start;font-size:{}px", fmt(fs));

            text(
                name_tl.x,
                baseline(name_tl.y, fs),
                &shape.primary_accent_color,
                "text",
                start.clone(),
                &column.name.label,
            )
            .render_into(&mut out);
            text(
                name_tl.x + longest_name + 2.0 * NAME_PADDING,
                baseline(name_tl.y, fs),
                &shape.neutral_accent_color,
                "text",
                start,
                &column.type_.label,
            )
            .render_into(&mut out);
            text(
                constraint_tr.x,
                baseline(constraint_tr.y, fs),
                &shape.secondary_accent_color,
                "text",
                format!("text-anchor:end;font-size:{}px;letter-spacing:2px", fmt(fs)),
                &column.constraint_abbr(),
            )
            .render_into(&mut out);

            row.top_left.y += row_height;
            self.divider(shape, &row, "", &mut out)?;
        }

        let mut silhouette = ThemableElement::new("rect");
        silhouette.transform = translate(shape.pos.x, shape.pos.y);
        silhouette.width = Some(shape.width);
        silhouette.height = Some(shape.height);
        out.push_str(&SketchOverlay::new(silhouette, shape.fill.as_str()).render()?);
        Ok(out)
    }

    pub fn class(&mut self, shape: &Shape) -> Result<String> {
        shape.validate()?;
        self.log_entry("class", shape);
        let fields = shape.class_fields();
        let methods = shape.class_methods();
        debug!(
            id = %shape.id,
            fields = fields.len(),
            methods = methods.len(),
            "sketch class rows"
        );

        let mut out = String::new();
        let request =
            SketchRequest::rectangle(0.0, 0.0, shape.width, shape.height, self.body_style(shape));
        self.body_paths(shape, &request, Some(translate(shape.pos.x, shape.pos.y)), &mut out)?;

        let body = GeoBox::new(point(shape.pos.x, shape.pos.y), shape.width, shape.height);
        let row_height = body.height / (2 + fields.len() + methods.len()) as f64;
        let header = GeoBox::new(body.top_left, body.width, 2.0 * row_height);
        self.header_band(shape, header.height, &mut out)?;

        let mut silhouette = ThemableElement::new("rect");
        silhouette.transform = translate(shape.pos.x, shape.pos.y);
        silhouette.width = Some(shape.width);
        silhouette.height = Some(header.height);
        out.push_str(&SketchOverlay::new(silhouette, shape.fill.as_str()).render()?);

        if !shape.label.is_empty() {
            let tl = LabelPosition::InsideMiddleCenter.point_on_box(
                &header,
                0.0,
                shape.label_width,
                shape.label_height,
            );
            text(
                tl.x + shape.label_width / 2.0,
                baseline(tl.y, shape.label_height),
                &shape.stroke,
                "text-mono",
                format!("text-anchor:middle;font-size:{}px", fmt(4.0 + shape.font_size)),
                &shape.label,
            )
            .render_into(&mut out);
        }

        let mut row = GeoBox::new(
            point(body.top_left.x, body.top_left.y + header.height),
            body.width,
            row_height,
        );
        for (i, field) in fields.iter().enumerate() {
            let name = field.name.as_str();
            class_row(shape, &row, field.visibility_token(), name, &field.type_, &mut out);
            row.top_left.y += row_height;
            // The last field is closed by the fields/methods separator below.
            if i + 1 < fields.len() {
                self.divider(shape, &row, "class_header", &mut out)?;
            }
        }
        // Always drawn, on the header's bottom edge when there are no fields.
        self.divider(shape, &row, "class_header", &mut out)?;

        for method in methods {
            let name = method.name.as_str();
            class_row(shape, &row, method.visibility_token(), name, &method.return_, &mut out);
            row.top_left.y += row_height;
            self.divider(shape, &row, "class_header", &mut out)?;
        }
        Ok(out)
    }
}

fn class_row(
    shape: &Shape,
    row: &GeoBox,
    prefix: &str,
    name: &str,
    type_text: &str,
    out: &mut String,
) {
    let fs = shape.font_size;
    let prefix_tl =
        LabelPosition::InsideMiddleLeft.point_on_box(row, PREFIX_PADDING, row.width, fs);
    let type_tr = LabelPosition::InsideMiddleRight.point_on_box(row, TYPE_PADDING, 0.0, fs);
    let start = format!("text-anchor:start;font-size:{}px", fmt(fs));

    text(
        prefix_tl.x,
        baseline(prefix_tl.y, fs),
        &shape.primary_accent_color,
        "text-mono",
        start.clone(),
        prefix,
    )
    .render_into(out);
    text(
        prefix_tl.x + PREFIX_WIDTH,
        baseline(prefix_tl.y, fs),
        &shape.fill,
        "text-mono",
        start,
        name,
    )
    .render_into(out);
    text(
        type_tr.x,
        baseline(type_tr.y, fs),
        &shape.secondary_accent_color,
        "text-mono",
        format!("text-anchor:end;font-size:{}px", fmt(fs)),
        type_text,
    )
    .render_into(out);
}
