//! Basic shapes and paths → `Geometry`.

use roxmltree::Node;

use crate::coords::Point;
use crate::document::values::{parse_number, parse_number_list};
use crate::scene::{FillRule, Geometry, PathSeg};

use super::path::parse_path_data;
use super::style;

/// Cubic approximation constant for quarter ellipses.
const KAPPA: f32 = 0.552_284_8;

/// Geometry of a shape element in its local space; `None` for elements
/// without a shape or with invalid dimensions.
pub fn build_geometry(node: Node<'_, '_>, optimize: bool) -> Option<Geometry> {
    let segments = match node.tag_name().name() {
        "rect" => rect(node)?,
        "circle" => {
            let r = length(node, "r")?;
            ellipse(length(node, "cx").unwrap_or(0.0), length(node, "cy").unwrap_or(0.0), r, r)?
        }
        "ellipse" => ellipse(
            length(node, "cx").unwrap_or(0.0),
            length(node, "cy").unwrap_or(0.0),
            length(node, "rx")?,
            length(node, "ry")?,
        )?,
        "line" => vec![
            PathSeg::MoveTo(Point::new(length(node, "x1").unwrap_or(0.0), length(node, "y1").unwrap_or(0.0))),
            PathSeg::LineTo(Point::new(length(node, "x2").unwrap_or(0.0), length(node, "y2").unwrap_or(0.0))),
        ],
        "polyline" => poly(node, false)?,
        "polygon" => poly(node, true)?,
        "path" => parse_path_data(node.attribute("d")?),
        _ => return None,
    };

    let in_clip = node.parent_element().is_some_and(|p| p.tag_name().name() == "clipPath");
    let rule_property = if in_clip { "clip-rule" } else { "fill-rule" };
    let mut geometry = Geometry::new(segments);
    geometry.fill_rule = style::computed(node, rule_property).map(FillRule::parse).unwrap_or_default();

    Some(if optimize { geometry.optimized() } else { geometry })
}

fn length(node: Node<'_, '_>, name: &str) -> Option<f32> {
    node.attribute(name).and_then(parse_number)
}

fn rect(node: Node<'_, '_>) -> Option<Vec<PathSeg>> {
    let x = length(node, "x").unwrap_or(0.0);
    let y = length(node, "y").unwrap_or(0.0);
    let w = length(node, "width")?;
    let h = length(node, "height")?;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }

    // A missing radius takes the other one's value.
    let rx = length(node, "rx").filter(|r| *r > 0.0);
    let ry = length(node, "ry").filter(|r| *r > 0.0);
    let (rx, ry) = match (rx, ry) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (0.0, 0.0),
    };
    let rx = rx.min(w / 2.0);
    let ry = ry.min(h / 2.0);

    if rx == 0.0 || ry == 0.0 {
        return Some(vec![
            PathSeg::MoveTo(Point::new(x, y)),
            PathSeg::LineTo(Point::new(x + w, y)),
            PathSeg::LineTo(Point::new(x + w, y + h)),
            PathSeg::LineTo(Point::new(x, y + h)),
            PathSeg::Close,
        ]);
    }

    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    let (r, b) = (x + w, y + h);
    let p = Point::new;
    Some(vec![
        PathSeg::MoveTo(p(x + rx, y)),
        PathSeg::LineTo(p(r - rx, y)),
        PathSeg::CubicTo(p(r - rx + kx, y), p(r, y + ry - ky), p(r, y + ry)),
        PathSeg::LineTo(p(r, b - ry)),
        PathSeg::CubicTo(p(r, b - ry + ky), p(r - rx + kx, b), p(r - rx, b)),
        PathSeg::LineTo(p(x + rx, b)),
        PathSeg::CubicTo(p(x + rx - kx, b), p(x, b - ry + ky), p(x, b - ry)),
        PathSeg::LineTo(p(x, y + ry)),
        PathSeg::CubicTo(p(x, y + ry - ky), p(x + rx - kx, y), p(x + rx, y)),
        PathSeg::Close,
    ])
}

fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32) -> Option<Vec<PathSeg>> {
    if rx <= 0.0 || ry <= 0.0 {
        return None;
    }
    let (ox, oy) = (rx * KAPPA, ry * KAPPA);
    let p = Point::new;
    Some(vec![
        PathSeg::MoveTo(p(cx + rx, cy)),
        PathSeg::CubicTo(p(cx + rx, cy + oy), p(cx + ox, cy + ry), p(cx, cy + ry)),
        PathSeg::CubicTo(p(cx - ox, cy + ry), p(cx - rx, cy + oy), p(cx - rx, cy)),
        PathSeg::CubicTo(p(cx - rx, cy - oy), p(cx - ox, cy - ry), p(cx, cy - ry)),
        PathSeg::CubicTo(p(cx + ox, cy - ry), p(cx + rx, cy - oy), p(cx + rx, cy)),
        PathSeg::Close,
    ])
}

fn poly(node: Node<'_, '_>, close: bool) -> Option<Vec<PathSeg>> {
    let nums = parse_number_list(node.attribute("points")?);
    let mut points = nums.chunks_exact(2).map(|c| Point::new(c[0], c[1]));
    let first = points.next()?;

    let mut segs = vec![PathSeg::MoveTo(first)];
    segs.extend(points.map(PathSeg::LineTo));
    if segs.len() < 2 {
        return None;
    }
    if close {
        segs.push(PathSeg::Close);
    }
    Some(segs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;

    fn geometry(xml: &str) -> Option<Geometry> {
        let doc = roxmltree::Document::parse(xml).unwrap();
        let node = doc.root_element().first_element_child().unwrap();
        build_geometry(node, false)
    }

    #[test]
    fn rect_outline_and_bounds() {
        let g = geometry(r#"<svg><rect x="10" y="20" width="100" height="50"/></svg>"#).unwrap();
        assert_eq!(g.segments.len(), 5);
        assert_eq!(g.bounds(), Some(Rect::new(10.0, 20.0, 100.0, 50.0)));
    }

    #[test]
    fn rounded_rect_stays_in_bounds() {
        let g = geometry(r#"<svg><rect width="10" height="10" rx="20"/></svg>"#).unwrap();
        assert_eq!(g.bounds(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(g.segments.iter().any(|s| matches!(s, PathSeg::CubicTo(..))));
    }

    #[test]
    fn invalid_dimensions_have_no_geometry() {
        assert!(geometry(r#"<svg><rect width="0" height="10"/></svg>"#).is_none());
        assert!(geometry(r#"<svg><circle r="-1"/></svg>"#).is_none());
        assert!(geometry(r#"<svg><polyline points="1 2"/></svg>"#).is_none());
        assert!(geometry(r#"<svg><g/></svg>"#).is_none());
    }

    #[test]
    fn circle_bounds() {
        let g = geometry(r#"<svg><circle cx="5" cy="5" r="5"/></svg>"#).unwrap();
        assert_eq!(g.bounds(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn fill_rule_follows_context() {
        let g = geometry(r#"<svg><polygon points="0 0 1 0 1 1" fill-rule="evenodd"/></svg>"#).unwrap();
        assert_eq!(g.fill_rule, FillRule::EvenOdd);

        let g = geometry(r#"<svg><clipPath><path d="M0 0 L1 1" clip-rule="evenodd"/></clipPath></svg>"#);
        assert!(g.is_none(), "clipPath is not a shape");
    }

    #[test]
    fn optimize_drops_repeated_points() {
        let doc = roxmltree::Document::parse(r#"<svg><path d="M0 0 L0 0 L1 1"/></svg>"#).unwrap();
        let node = doc.root_element().first_element_child().unwrap();
        assert_eq!(build_geometry(node, true).unwrap().segments.len(), 2);
        assert_eq!(build_geometry(node, false).unwrap().segments.len(), 3);
    }
}
