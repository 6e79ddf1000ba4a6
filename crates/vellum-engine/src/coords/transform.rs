use crate::document::values::parse_number_list;

use super::{Point, Rect};

/// 2D affine transform.
///
/// Maps `(x, y)` to `(sx·x + kx·y + tx, ky·x + sy·y + ty)`. Composition reads
/// left to right: `a.then(b)` applies `a` first, then `b`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub sx: f32,
    pub ky: f32,
    pub kx: f32,
    pub sy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self { sx: 1.0, ky: 0.0, kx: 0.0, sy: 1.0, tx: 0.0, ty: 0.0 }
    }

    /// SVG `matrix(a b c d e f)` order.
    #[inline]
    pub const fn from_row(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { sx: a, ky: b, kx: c, sy: d, tx: e, ty: f }
    }

    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self { sx: 1.0, ky: 0.0, kx: 0.0, sy: 1.0, tx, ty }
    }

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self { sx, ky: 0.0, kx: 0.0, sy, tx: 0.0, ty: 0.0 }
    }

    /// Rotation by `degrees`, clockwise in a y-down space.
    pub fn rotate(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self { sx: cos, ky: sin, kx: -sin, sy: cos, tx: 0.0, ty: 0.0 }
    }

    pub fn skew_x(degrees: f32) -> Self {
        Self { kx: degrees.to_radians().tan(), ..Self::identity() }
    }

    pub fn skew_y(degrees: f32) -> Self {
        Self { ky: degrees.to_radians().tan(), ..Self::identity() }
    }

    /// `self` followed by `next`.
    pub fn then(self, next: Transform) -> Transform {
        Transform {
            sx: next.sx * self.sx + next.kx * self.ky,
            ky: next.ky * self.sx + next.sy * self.ky,
            kx: next.sx * self.kx + next.kx * self.sy,
            sy: next.ky * self.kx + next.sy * self.sy,
            tx: next.sx * self.tx + next.kx * self.ty + next.tx,
            ty: next.ky * self.tx + next.sy * self.ty + next.ty,
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        self.sx * self.sy - self.kx * self.ky
    }

    /// False for collapsed transforms (e.g. a zero scale axis).
    #[inline]
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det.is_finite() && det != 0.0
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.sx * p.x + self.kx * p.y + self.tx,
            self.ky * p.x + self.sy * p.y + self.ty,
        )
    }

    /// Axis-aligned bounds of `rect` after transformation.
    pub fn transform_bounds(&self, rect: Rect) -> Rect {
        let corners = rect.corners().map(|c| self.apply(c));
        Rect::from_points(corners).unwrap_or(rect)
    }

    /// Parses an SVG transform list such as `translate(10 20) rotate(45)`.
    ///
    /// Unknown functions are ignored; parsing stops at the first malformed
    /// entry, keeping what was read so far. Returns `None` for an empty list.
    pub fn parse(input: &str) -> Option<Transform> {
        let mut out: Option<Transform> = None;
        let mut s = input.trim();

        while !s.is_empty() {
            let Some(open) = s.find('(') else { break };
            let name = s[..open].trim().trim_start_matches(',').trim();
            let Some(close) = s[open + 1..].find(')') else { break };
            let args = parse_number_list(&s[open + 1..open + 1 + close]);
            let arg = |i: usize| args.get(i).copied();

            let m = match name {
                "matrix" if args.len() >= 6 => {
                    Some(Transform::from_row(args[0], args[1], args[2], args[3], args[4], args[5]))
                }
                "translate" => Some(Transform::translate(arg(0).unwrap_or(0.0), arg(1).unwrap_or(0.0))),
                "scale" => {
                    let sx = arg(0).unwrap_or(1.0);
                    Some(Transform::scale(sx, arg(1).unwrap_or(sx)))
                }
                "rotate" => {
                    let a = arg(0).unwrap_or(0.0);
                    match (arg(1), arg(2)) {
                        (Some(cx), Some(cy)) => Some(
                            Transform::translate(-cx, -cy)
                                .then(Transform::rotate(a))
                                .then(Transform::translate(cx, cy)),
                        ),
                        _ => Some(Transform::rotate(a)),
                    }
                }
                "skewX" => Some(Transform::skew_x(arg(0).unwrap_or(0.0))),
                "skewY" => Some(Transform::skew_y(arg(0).unwrap_or(0.0))),
                _ => None,
            };

            // The rightmost function in the list is applied to points first.
            if let Some(m) = m {
                out = Some(match out {
                    Some(acc) => m.then(acc),
                    None => m,
                });
            }
            s = s[open + 1 + close + 1..].trim_start();
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    // ── composition ───────────────────────────────────────────────────────

    #[test]
    fn then_applies_left_first() {
        let t = Transform::scale(2.0, 3.0).then(Transform::translate(10.0, 20.0));
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(12.0, 23.0));

        let u = Transform::translate(10.0, 20.0).then(Transform::scale(2.0, 3.0));
        assert_eq!(u.apply(Point::new(1.0, 1.0)), Point::new(22.0, 63.0));
    }

    #[test]
    fn identity_is_neutral() {
        let t = Transform::from_row(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(t.then(Transform::identity()), t);
        assert_eq!(Transform::identity().then(t), t);
        assert!(Transform::default().is_identity());
    }

    #[test]
    fn zero_scale_is_not_invertible() {
        assert!(!Transform::scale(0.0, 5.0).is_invertible());
        assert!(Transform::rotate(30.0).is_invertible());
    }

    #[test]
    fn transform_bounds_of_rotation() {
        let b = Transform::rotate(90.0).transform_bounds(Rect::new(0.0, 0.0, 10.0, 5.0));
        assert!((b.x + 5.0).abs() < 1e-4);
        assert!((b.width - 5.0).abs() < 1e-4);
        assert!((b.height - 10.0).abs() < 1e-4);
    }

    // ── parse ─────────────────────────────────────────────────────────────

    #[test]
    fn parse_list_applies_rightmost_first() {
        let t = Transform::parse("translate(10, 20) scale(2)").unwrap();
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(12.0, 22.0));
    }

    #[test]
    fn parse_matrix_and_skew() {
        let t = Transform::parse("matrix(1 0 0 1 5 6)").unwrap();
        assert_eq!(t, Transform::translate(5.0, 6.0));
        let s = Transform::parse("skewX(45)").unwrap();
        assert!(close(s.apply(Point::new(0.0, 1.0)), Point::new(1.0, 1.0)));
    }

    #[test]
    fn parse_rotate_about_center() {
        let t = Transform::parse("rotate(180 5 5)").unwrap();
        assert!(close(t.apply(Point::new(0.0, 0.0)), Point::new(10.0, 10.0)));
    }

    #[test]
    fn parse_empty_or_unknown_is_none() {
        assert!(Transform::parse("").is_none());
        assert!(Transform::parse("perspective(3)").is_none());
    }

    #[test]
    fn parse_arguments_like_other_lengths() {
        let t = Transform::parse("translate(10px,-2e1) scale(2,3)").unwrap();
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(12.0, -17.0));
    }
}
