//! Label anchoring inside a box.

use crate::geom::{GeoBox, Point, point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LabelPosition {
    InsideTopLeft,
    InsideTopCenter,
    InsideTopRight,
    InsideMiddleLeft,
    InsideMiddleCenter,
    InsideMiddleRight,
    InsideBottomLeft,
    InsideBottomCenter,
    InsideBottomRight,
}

impl LabelPosition {
    /// Top-left corner of a `width` x `height` label placed at this anchor of `b`.
    ///
    /// `padding` is applied against the edges the anchor hugs; centered axes ignore it.
    pub fn point_on_box(self, b: &GeoBox, padding: f64, width: f64, height: f64) -> Point {
        let tl = b.top_left;
        let left = tl.x + padding;
        let center_x = tl.x + b.width / 2.0 - width / 2.0;
        let right = tl.x + b.width - width - padding;
        let top = tl.y + padding;
        let middle = tl.y + b.height / 2.0 - height / 2.0;
        let bottom = tl.y + b.height - height - padding;

        match self {
            LabelPosition::InsideTopLeft => point(left, top),
            LabelPosition::InsideTopCenter => point(center_x, top),
            LabelPosition::InsideTopRight => point(right, top),
            LabelPosition::InsideMiddleLeft => point(left, middle),
            LabelPosition::InsideMiddleCenter => point(center_x, middle),
            LabelPosition::InsideMiddleRight => point(right, middle),
            LabelPosition::InsideBottomLeft => point(left, bottom),
            LabelPosition::InsideBottomCenter => point(center_x, bottom),
            LabelPosition::InsideBottomRight => point(right, bottom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> GeoBox {
        GeoBox::new(point(10.0, 100.0), 200.0, 40.0)
    }

    #[test]
    fn middle_left_hugs_left_edge_and_centers_vertically() {
        let p = LabelPosition::InsideMiddleLeft.point_on_box(&row(), 10.0, 200.0, 16.0);
        assert_eq!(p, point(20.0, 112.0));
    }

    #[test]
    fn middle_right_with_zero_width_is_the_right_edge_minus_padding() {
        let p = LabelPosition::InsideMiddleRight.point_on_box(&row(), 20.0, 0.0, 16.0);
        assert_eq!(p, point(190.0, 112.0));
    }

    #[test]
    fn middle_center_ignores_padding() {
        let p = LabelPosition::InsideMiddleCenter.point_on_box(&row(), 99.0, 50.0, 20.0);
        assert_eq!(p, point(85.0, 110.0));
    }

    #[test]
    fn bottom_right_corner() {
        let p = LabelPosition::InsideBottomRight.point_on_box(&row(), 5.0, 30.0, 10.0);
        assert_eq!(p, point(175.0, 125.0));
    }
}
