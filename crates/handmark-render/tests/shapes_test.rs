mod common;

use common::{elements, recording_renderer, renderer};
use handmark_core::{Shape, ShapeKind};

#[test]
fn rect_scenario_emits_stroke_paths_and_one_sized_overlay() {
    let mut r = renderer();
    let mut shape = Shape::new("r", ShapeKind::Rectangle, 0.0, 0.0, 100.0, 50.0);
    shape.stroke_width = 2.0;

    let out = r.rect(&shape).expect("rect");
    let els = elements(&out);
    let (overlay_tag, overlay) = els.last().expect("overlay");
    assert_eq!(overlay_tag, "rect");
    assert_eq!(overlay["width"], "100");
    assert_eq!(overlay["height"], "50");
    assert_eq!(overlay["transform"], "translate(0 0)");
    assert!(overlay["class"].starts_with("sketch-overlay-"));
    assert!(!overlay.contains_key("fill"));

    let strokes: Vec<_> = els.iter().filter(|(tag, _)| tag == "path").collect();
    assert!(!strokes.is_empty());
    assert_eq!(strokes.len() + 1, els.len());
    for (_, attrs) in strokes {
        assert_eq!(attrs["class"], "shape");
        assert_eq!(attrs["transform"], "translate(0 0)");
        assert_eq!(attrs["style"], "stroke-width:2;");
    }

    let again = r.rect(&shape).expect("rect");
    assert_eq!(out, again);
}

#[test]
fn identical_sessions_render_identical_markup() {
    let shape = Shape::new("o", ShapeKind::Oval, 12.0, 8.0, 90.0, 60.0);
    let a = renderer().oval(&shape).expect("oval");
    let b = renderer().oval(&shape).expect("oval");
    assert_eq!(a, b);
}

#[test]
fn path_data_keeps_at_most_six_fraction_digits() {
    let mut r = renderer();
    let shape = Shape::new("p", ShapeKind::Path, 0.0, 0.0, 80.0, 80.0);
    let out = r
        .paths(&shape, &["M 0 0 L 80 0 L 40 80 Z".to_string()])
        .expect("paths");
    for (_, attrs) in elements(&out) {
        let d = &attrs["d"];
        for token in d.split(|c: char| !(c.is_ascii_digit() || c == '.')) {
            if let Some((_, frac)) = token.split_once('.') {
                assert!(frac.len() <= 6, "{token} in {d}");
            }
        }
    }
}

#[test]
fn each_outline_path_gets_its_own_sketch_and_overlays() {
    let mut r = recording_renderer();
    let shape = Shape::new("p", ShapeKind::Path, 0.0, 0.0, 80.0, 80.0);
    let paths = [
        "M 0 0 L 80 0 L 40 80 Z".to_string(),
        "M 10 10 L 20 10 L 15 20 Z".to_string(),
    ];
    let out = r.paths(&shape, &paths).expect("paths");
    assert_eq!(r.sandbox().count("path"), 2);

    let els = elements(&out);
    let shapes = els
        .iter()
        .filter(|(_, a)| a.get("class").map(String::as_str) == Some("shape"))
        .count();
    let overlays = els
        .iter()
        .filter(|(_, a)| a.get("class").is_some_and(|c| c.starts_with("sketch-overlay-")))
        .count();
    assert_eq!(shapes, overlays);
    assert!(els.iter().all(|(tag, a)| tag == "path" && !a.contains_key("transform")));
}

#[test]
fn oval_overlay_is_an_ellipse_at_the_center() {
    let mut r = recording_renderer();
    let shape = Shape::new("o", ShapeKind::Circle, 10.0, 20.0, 40.0, 40.0);
    let out = r.render_shape(&shape, &[]).expect("oval");
    assert_eq!(r.sandbox().count("ellipse"), 1);

    let els = elements(&out);
    let (tag, attrs) = els.last().expect("overlay");
    assert_eq!(tag, "ellipse");
    assert_eq!(attrs["rx"], "20");
    assert_eq!(attrs["ry"], "20");
    assert_eq!(attrs["transform"], "translate(30 40)");
}

#[test]
fn render_shape_dispatches_on_kind() {
    let mut r = recording_renderer();
    let square = Shape::new("s", ShapeKind::Square, 0.0, 0.0, 30.0, 30.0);
    r.render_shape(&square, &[]).expect("square");
    let hexagon = Shape::new("h", ShapeKind::Path, 0.0, 0.0, 30.0, 30.0);
    r.render_shape(&hexagon, &["M 0 15 L 15 0 L 30 15 L 15 30 Z".to_string()])
        .expect("path");

    let counts = r.sandbox().counts();
    assert_eq!(counts.get("rectangle"), Some(&1));
    assert_eq!(counts.get("path"), Some(&1));
    assert_eq!(counts.len(), 2);
}

#[test]
fn theme_colored_shape_uses_theme_classes() {
    let mut r = renderer();
    let mut shape = Shape::new("t", ShapeKind::Rectangle, 0.0, 0.0, 40.0, 20.0);
    shape.fill = "B6".to_string();
    shape.stroke = "B1".to_string();
    let out = r.rect(&shape).expect("rect");
    let els = elements(&out);
    assert_eq!(els[0].1["class"], "shape fill-B6 stroke-B1");
    assert_eq!(els.last().unwrap().1["class"], "sketch-overlay-B6");
}
