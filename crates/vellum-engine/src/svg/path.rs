//! SVG path data (`d` attribute) → absolute segments.
//!
//! Quadratics and arcs are normalized to cubics. Parsing stops at the first
//! malformed command, keeping the segments read so far.

use std::f32::consts::PI;

use crate::coords::Point;
use crate::scene::PathSeg;

pub fn parse_path_data(d: &str) -> Vec<PathSeg> {
    let mut segs = Vec::new();
    let mut p = PathParser::new(d);
    let mut cmd = ' ';
    let mut cur = Point::zero();
    let mut start = Point::zero();
    let mut last_cubic_ctrl: Option<Point> = None;
    let mut last_quad_ctrl: Option<Point> = None;

    while let Some(c) = p.next_command(&mut cmd) {
        let before = p.pos;
        let rel = c.is_ascii_lowercase();
        let offset = |pt: Point, cur: Point| if rel { pt + cur } else { pt };

        match c.to_ascii_uppercase() {
            'M' => {
                if let Some(pt) = p.next_point() {
                    cur = offset(pt, cur);
                    start = cur;
                    segs.push(PathSeg::MoveTo(cur));
                    // Further pairs are implicit line-tos.
                    while let Some(pt) = p.next_point() {
                        cur = offset(pt, cur);
                        segs.push(PathSeg::LineTo(cur));
                    }
                }
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            'L' => {
                while let Some(pt) = p.next_point() {
                    cur = offset(pt, cur);
                    segs.push(PathSeg::LineTo(cur));
                }
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            'H' => {
                while let Some(x) = p.next_number() {
                    cur.x = if rel { cur.x + x } else { x };
                    segs.push(PathSeg::LineTo(cur));
                }
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            'V' => {
                while let Some(y) = p.next_number() {
                    cur.y = if rel { cur.y + y } else { y };
                    segs.push(PathSeg::LineTo(cur));
                }
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            'C' => {
                while let Some((c1, c2, end)) = p.next_point3() {
                    let (c1, c2, end) = (offset(c1, cur), offset(c2, cur), offset(end, cur));
                    segs.push(PathSeg::CubicTo(c1, c2, end));
                    cur = end;
                    last_cubic_ctrl = Some(c2);
                }
                last_quad_ctrl = None;
            }
            'S' => {
                while let Some((c2, end)) = p.next_point2() {
                    let (c2, end) = (offset(c2, cur), offset(end, cur));
                    let c1 = last_cubic_ctrl.map_or(cur, |prev| prev.reflect_about(cur));
                    segs.push(PathSeg::CubicTo(c1, c2, end));
                    cur = end;
                    last_cubic_ctrl = Some(c2);
                }
                last_quad_ctrl = None;
            }
            'Q' => {
                while let Some((q, end)) = p.next_point2() {
                    let (q, end) = (offset(q, cur), offset(end, cur));
                    let (c1, c2) = quad_to_cubic(cur, q, end);
                    segs.push(PathSeg::CubicTo(c1, c2, end));
                    cur = end;
                    last_quad_ctrl = Some(q);
                }
                last_cubic_ctrl = None;
            }
            'T' => {
                while let Some(end) = p.next_point() {
                    let end = offset(end, cur);
                    let q = last_quad_ctrl.map_or(cur, |prev| prev.reflect_about(cur));
                    let (c1, c2) = quad_to_cubic(cur, q, end);
                    segs.push(PathSeg::CubicTo(c1, c2, end));
                    cur = end;
                    last_quad_ctrl = Some(q);
                }
                last_cubic_ctrl = None;
            }
            'A' => {
                while let Some(arc) = p.next_arc() {
                    let end = offset(arc.end, cur);
                    arc_to_cubics(cur, end, &arc, &mut segs);
                    cur = end;
                }
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            'Z' => {
                segs.push(PathSeg::Close);
                cur = start;
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            _ => break,
        }

        // A repeated command that consumed nothing means malformed data.
        if p.pos == before && !matches!(c, 'Z' | 'z') {
            break;
        }
    }

    segs
}

fn quad_to_cubic(p0: Point, q: Point, p1: Point) -> (Point, Point) {
    (p0.lerp(q, 2.0 / 3.0), p1.lerp(q, 2.0 / 3.0))
}

struct Arc {
    rx: f32,
    ry: f32,
    rotation: f32,
    large: bool,
    sweep: bool,
    end: Point,
}

/// Appends cubic approximations of an elliptical arc from `from` to `to`.
///
/// Uses the center parameterization from the SVG implementation notes and
/// splits the sweep into quarter turns at most.
fn arc_to_cubics(from: Point, to: Point, arc: &Arc, out: &mut Vec<PathSeg>) {
    let mut rx = arc.rx.abs();
    let mut ry = arc.ry.abs();
    if rx == 0.0 || ry == 0.0 || from == to {
        out.push(PathSeg::LineTo(to));
        return;
    }

    let (sin_phi, cos_phi) = arc.rotation.to_radians().sin_cos();

    let dx2 = (from.x - to.x) / 2.0;
    let dy2 = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    // Scale up radii that cannot span the endpoints.
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let num = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
    let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let coef = if den == 0.0 {
        0.0
    } else {
        let sign = if arc.large == arc.sweep { -1.0 } else { 1.0 };
        sign * (num / den).max(0.0).sqrt()
    };
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * (-ry * x1p / rx);

    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    let angle = |ux: f32, uy: f32, vx: f32, vy: f32| (ux * vy - uy * vx).atan2(ux * vx + uy * vy);
    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;

    let mut theta = angle(1.0, 0.0, ux, uy);
    let mut sweep = angle(ux, uy, vx, vy);
    if !arc.sweep && sweep > 0.0 {
        sweep -= 2.0 * PI;
    } else if arc.sweep && sweep < 0.0 {
        sweep += 2.0 * PI;
    }

    let count = (sweep.abs() / (PI / 2.0)).ceil().max(1.0) as usize;
    let delta = sweep / count as f32;
    let k = (4.0 / 3.0) * (delta / 4.0).tan();

    let map = |x: f32, y: f32| {
        let (x, y) = (rx * x, ry * y);
        Point::new(cx + cos_phi * x - sin_phi * y, cy + sin_phi * x + cos_phi * y)
    };

    for i in 0..count {
        let t1 = theta;
        let t2 = theta + delta;
        let (s1, c1) = t1.sin_cos();
        let (s2, c2) = t2.sin_cos();
        let end = if i + 1 == count { to } else { map(c2, s2) };
        out.push(PathSeg::CubicTo(map(c1 - k * s1, s1 + k * c1), map(c2 + k * s2, s2 - k * c2), end));
        theta = t2;
    }
}

struct PathParser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PathParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { bytes: input.as_bytes(), pos: 0 }
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || *b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Next explicit command letter, or the current one repeated when
    /// numbers follow.
    fn next_command(&mut self, current: &mut char) -> Option<char> {
        self.skip_separators();
        let b = *self.bytes.get(self.pos)?;
        if b.is_ascii_alphabetic() {
            self.pos += 1;
            *current = b as char;
            return Some(*current);
        }
        match *current {
            ' ' | 'Z' | 'z' => None,
            // Implicit repeats after a move-to are line-tos.
            'M' => Some('L'),
            'm' => Some('l'),
            c => Some(c),
        }
    }

    fn next_number(&mut self) -> Option<f32> {
        self.skip_separators();
        let start = self.pos;
        let mut end = start;
        let at = |i: usize| self.bytes.get(i).copied();

        if matches!(at(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let mut digits = false;
        while at(end).is_some_and(|b| b.is_ascii_digit()) {
            end += 1;
            digits = true;
        }
        if at(end) == Some(b'.') {
            end += 1;
            while at(end).is_some_and(|b| b.is_ascii_digit()) {
                end += 1;
                digits = true;
            }
        }
        if !digits {
            return None;
        }
        if matches!(at(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(at(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            if at(exp).is_some_and(|b| b.is_ascii_digit()) {
                while at(exp).is_some_and(|b| b.is_ascii_digit()) {
                    exp += 1;
                }
                end = exp;
            }
        }

        let text = std::str::from_utf8(&self.bytes[start..end]).ok()?;
        let value = text.parse::<f32>().ok()?;
        self.pos = end;
        Some(value)
    }

    /// Arc flags may be written without separators (`a1 1 0 01 5 5`).
    fn next_flag(&mut self) -> Option<bool> {
        self.skip_separators();
        let flag = match self.bytes.get(self.pos)? {
            b'0' => false,
            b'1' => true,
            _ => return None,
        };
        self.pos += 1;
        Some(flag)
    }

    fn next_point(&mut self) -> Option<Point> {
        let save = self.pos;
        let point = self.next_number().zip(self.next_number()).map(|(x, y)| Point::new(x, y));
        if point.is_none() {
            self.pos = save;
        }
        point
    }

    fn next_point2(&mut self) -> Option<(Point, Point)> {
        let save = self.pos;
        let out = self.next_point().zip(self.next_point());
        if out.is_none() {
            self.pos = save;
        }
        out
    }

    fn next_point3(&mut self) -> Option<(Point, Point, Point)> {
        let save = self.pos;
        let out = self
            .next_point2()
            .zip(self.next_point())
            .map(|((a, b), c)| (a, b, c));
        if out.is_none() {
            self.pos = save;
        }
        out
    }

    fn next_arc(&mut self) -> Option<Arc> {
        let save = self.pos;
        let arc = (|| {
            Some(Arc {
                rx: self.next_number()?,
                ry: self.next_number()?,
                rotation: self.next_number()?,
                large: self.next_flag()?,
                sweep: self.next_flag()?,
                end: self.next_point()?,
            })
        })();
        if arc.is_none() {
            self.pos = save;
        }
        arc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn absolute_and_relative_lines() {
        let segs = parse_path_data("M10 10 h5 v5 L0,0 l1-1z");
        assert_eq!(
            segs,
            vec![
                PathSeg::MoveTo(pt(10.0, 10.0)),
                PathSeg::LineTo(pt(15.0, 10.0)),
                PathSeg::LineTo(pt(15.0, 15.0)),
                PathSeg::LineTo(pt(0.0, 0.0)),
                PathSeg::LineTo(pt(1.0, -1.0)),
                PathSeg::Close,
            ]
        );
    }

    #[test]
    fn implicit_lineto_after_move() {
        let segs = parse_path_data("m1 1 2 2 3 3");
        assert_eq!(
            segs,
            vec![PathSeg::MoveTo(pt(1.0, 1.0)), PathSeg::LineTo(pt(3.0, 3.0)), PathSeg::LineTo(pt(6.0, 6.0))]
        );
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
        let segs = parse_path_data("M0 0 C0 10 10 10 10 0 S20 -10 20 0");
        assert_eq!(segs[2], PathSeg::CubicTo(pt(10.0, -10.0), pt(20.0, -10.0), pt(20.0, 0.0)));
    }

    #[test]
    fn quadratic_becomes_cubic() {
        let segs = parse_path_data("M0 0 Q3 3 6 0");
        let PathSeg::CubicTo(c1, c2, end) = segs[1] else { panic!("{segs:?}") };
        let close = |a: Point, b: Point| (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5;
        assert!(close(c1, pt(2.0, 2.0)), "{c1:?}");
        assert!(close(c2, pt(4.0, 2.0)), "{c2:?}");
        assert_eq!(end, pt(6.0, 0.0));
    }

    #[test]
    fn arcs_end_exactly_on_target() {
        let segs = parse_path_data("M0 0 A5 5 0 0 1 10 0");
        assert!(segs.len() >= 3);
        assert!(matches!(segs.last(), Some(PathSeg::CubicTo(_, _, end)) if *end == pt(10.0, 0.0)));
        // Compact flags.
        let compact = parse_path_data("M0 0a5 5 0 0110 0");
        assert_eq!(compact.len(), segs.len());
    }

    #[test]
    fn zero_radius_arc_is_a_line() {
        assert_eq!(parse_path_data("M0 0 A0 5 0 0 1 4 0")[1], PathSeg::LineTo(pt(4.0, 0.0)));
    }

    #[test]
    fn malformed_data_keeps_prefix() {
        let segs = parse_path_data("M0 0 L5 5 L oops 7");
        assert_eq!(segs, vec![PathSeg::MoveTo(pt(0.0, 0.0)), PathSeg::LineTo(pt(5.0, 5.0))]);
        assert!(parse_path_data("").is_empty());
        assert!(parse_path_data("10 10").is_empty());
    }
}
