//! Bounds-dependent transforms for object-bounding-box units.

use crate::coords::{Rect, Transform};

/// Bounds of a drawing: `local` placed by `outer` when present.
#[inline]
pub fn drawing_bounds(local: Rect, outer: Option<&Transform>) -> Rect {
    match outer {
        Some(t) => t.transform_bounds(local),
        None => local,
    }
}

/// Maps the unit square onto the drawing bounds of `local`.
///
/// Scale is applied before translate, so `(0, 0)` lands on the bounds
/// origin and `(1, 1)` on the opposite corner. Zero-sized bounds yield a
/// non-invertible transform, which consumers must tolerate.
pub fn object_bounding_box_transform(local: Rect, outer: Option<&Transform>) -> Transform {
    let b = drawing_bounds(local, outer);
    Transform::scale(b.width, b.height).then(Transform::translate(b.x, b.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Point;

    #[test]
    fn unit_square_maps_onto_bounds() {
        let t = object_bounding_box_transform(Rect::new(10.0, 20.0, 100.0, 50.0), None);
        assert_eq!(t.apply(Point::new(0.0, 0.0)), Point::new(10.0, 20.0));
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(110.0, 70.0));
    }

    #[test]
    fn outer_transform_moves_bounds_first() {
        let outer = Transform::translate(5.0, 5.0).then(Transform::scale(2.0, 2.0));
        let t = object_bounding_box_transform(Rect::new(0.0, 0.0, 10.0, 10.0), Some(&outer));
        assert_eq!(t.apply(Point::new(0.0, 0.0)), Point::new(10.0, 10.0));
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(30.0, 30.0));
    }

    #[test]
    fn zero_height_bounds_collapse() {
        let t = object_bounding_box_transform(Rect::new(0.0, 5.0, 10.0, 0.0), None);
        assert!(!t.is_invertible());
        assert_eq!(t.apply(Point::new(0.5, 1.0)), Point::new(5.0, 5.0));
    }
}
