mod common;

use common::{elements, recording_renderer, renderer};
use handmark_core::geom::point;
use handmark_core::{Arrowhead, Connection, LayoutPoint};

fn route() -> Vec<LayoutPoint> {
    vec![
        LayoutPoint::new(0.0, 0.0),
        LayoutPoint::new(50.0, 0.0),
        LayoutPoint::new(100.0, 40.0),
    ]
}

#[test]
fn no_arrowheads_means_no_requests() {
    let mut r = recording_renderer();
    let conn = Connection::new("c", route());
    let out = r
        .arrowheads(&conn, point(0.0, 0.0), point(0.0, 0.0))
        .expect("arrowheads");
    assert_eq!(out, "");
    assert!(r.sandbox().requests.is_empty());
}

#[test]
fn reversed_route_mirrors_source_and_destination() {
    let adjust = point(-3.0, 1.5);

    let mut forward = Connection::new("f", route());
    forward.dst_arrow = Arrowhead::Triangle;
    let mut reversed = Connection::new("r", route().into_iter().rev().collect());
    reversed.src_arrow = Arrowhead::Triangle;

    let mut r = renderer();
    let at_dst = r
        .arrowheads(&forward, point(0.0, 0.0), adjust)
        .expect("dst");
    let at_src = r
        .arrowheads(&reversed, adjust, point(0.0, 0.0))
        .expect("src");
    assert!(!at_dst.is_empty());
    assert_eq!(at_dst, at_src);
}

#[test]
fn placement_follows_the_terminal_segments() {
    let mut conn = Connection::new("c", route());
    conn.src_arrow = Arrowhead::Arrow;
    conn.dst_arrow = Arrowhead::Arrow;
    let out = renderer()
        .arrowheads(&conn, point(0.0, 0.0), point(0.0, 0.0))
        .expect("arrowheads");

    let transforms: Vec<String> = elements(&out)
        .into_iter()
        .map(|(_, a)| a["transform"].clone())
        .collect();
    assert_eq!(transforms.first().map(String::as_str), Some("translate(0 0) rotate(180)"));
    let dst_angle = 40.0_f64.atan2(50.0).to_degrees();
    assert_eq!(
        transforms.last().map(String::as_str),
        Some(format!("translate(100 40) rotate({dst_angle})").as_str())
    );
}

#[test]
fn kind_without_sketch_form_skips_only_its_own_end() {
    let mut with_circle = Connection::new("a", route());
    with_circle.src_arrow = Arrowhead::Circle;
    with_circle.dst_arrow = Arrowhead::Diamond;
    let mut dst_only = with_circle.clone();
    dst_only.src_arrow = Arrowhead::None;

    let mut r = recording_renderer();
    let out = r
        .arrowheads(&with_circle, point(0.0, 0.0), point(0.0, 0.0))
        .expect("arrowheads");
    assert_eq!(r.sandbox().requests.len(), 1);
    assert_eq!(r.sandbox().count("polygon"), 1);

    let expected = renderer()
        .arrowheads(&dst_only, point(0.0, 0.0), point(0.0, 0.0))
        .expect("arrowheads");
    assert_eq!(out, expected);
}

#[test]
fn crows_foot_adds_a_circle_request() {
    let mut conn = Connection::new("c", route());
    conn.dst_arrow = Arrowhead::CfMany;
    let mut r = recording_renderer();
    let out = r
        .arrowheads(&conn, point(0.0, 0.0), point(0.0, 0.0))
        .expect("arrowheads");

    let requests = &r.sandbox().requests;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].kind(), "path");
    assert_eq!(requests[0].style.seed, Some(8));
    assert_eq!(requests[1].kind(), "circle");
    assert_eq!(requests[1].style.seed, Some(4));
    assert_eq!(requests[1].style.fill.as_deref(), Some("white"));

    let els = elements(&out);
    assert!(!els.is_empty());
    assert!(els.iter().all(|(tag, a)| tag == "path" && a["class"] == "connection"));
}

#[test]
fn heads_are_joined_by_a_space() {
    let mut conn = Connection::new("c", route());
    conn.src_arrow = Arrowhead::Arrow;
    let out = renderer()
        .arrowheads(&conn, point(0.0, 0.0), point(0.0, 0.0))
        .expect("arrowheads");
    let count = elements(&out).len();
    assert_eq!(out.matches("/> <path").count(), count - 1);
}

#[test]
fn zero_length_terminal_segment_is_an_error() {
    let mut conn = Connection::new(
        "c",
        vec![
            LayoutPoint::new(0.0, 0.0),
            LayoutPoint::new(0.0, 0.0),
            LayoutPoint::new(10.0, 0.0),
        ],
    );
    conn.src_arrow = Arrowhead::Arrow;
    let err = renderer()
        .arrowheads(&conn, point(0.0, 0.0), point(0.0, 0.0))
        .unwrap_err();
    assert!(matches!(
        err,
        handmark_render::Error::Core(handmark_core::Error::DegenerateSegment { end: "source", .. })
    ));
}
