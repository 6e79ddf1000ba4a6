//! Fill and stroke resolution: paint text → brush / pen.

use log::{debug, warn};
use vellum_paint::{PaintSpec, RgbColor};

use crate::coords::{Point, Rect, Transform};
use crate::document::values::{parse_fraction, parse_number, parse_number_list, parse_opacity};
use crate::document::{DocumentModel, StyledNode, Units};
use crate::paint::{
    Brush, BrushContent, Color, ColorStop, Gradient, GradientShape, LineCap, LineJoin, MappingMode,
    PatternTile, Pen, SpreadMode,
};
use crate::ComposeError;

use super::Composer;

/// Longest `href` chain followed between paint servers.
const MAX_HREF_DEPTH: usize = 16;

/// Paint channel of a shape.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PaintTarget {
    Fill,
    Stroke,
}

impl PaintTarget {
    pub fn property(self) -> &'static str {
        match self {
            PaintTarget::Fill => "fill",
            PaintTarget::Stroke => "stroke",
        }
    }

    fn opacity_property(self) -> &'static str {
        match self {
            PaintTarget::Fill => "fill-opacity",
            PaintTarget::Stroke => "stroke-opacity",
        }
    }

    /// Paint used when the property is absent.
    pub fn default_paint(self) -> PaintSpec {
        match self {
            PaintTarget::Fill => PaintSpec::Color(RgbColor::from_rgb(0, 0, 0)),
            PaintTarget::Stroke => PaintSpec::None,
        }
    }
}

/// Parses paint text for composition.
///
/// Malformed text is logged and treated as unresolved.
pub fn parse_paint_lenient(value: &str) -> PaintSpec {
    PaintSpec::parse(value).unwrap_or_else(|e| {
        warn!("{}; treating paint as unresolved", ComposeError::from(e));
        PaintSpec::Unresolved
    })
}

/// Renderer color for a parsed RGB color.
#[inline]
pub fn to_color(rgb: &RgbColor) -> Color {
    let [r, g, b] = rgb.rgb;
    Color::from_srgb_u8(r, g, b, 255)
}

/// Value of the `color` property used by `currentColor`.
pub fn current_color<N: StyledNode>(node: &N) -> Color {
    node.style_property("color")
        .and_then(|v| RgbColor::parse(&v))
        .map(|c| to_color(&c))
        .unwrap_or(Color::black())
}

fn apply_opacity(brush: &mut Brush, opacity: f32) {
    if opacity >= 1.0 {
        return;
    }
    match &mut brush.content {
        BrushContent::Solid(c) => *c = c.with_opacity(opacity),
        BrushContent::Gradient(g) => {
            for stop in &mut g.stops {
                stop.color = stop.color.with_opacity(opacity);
            }
        }
        BrushContent::Pattern(_) => debug!("opacity {opacity} not applied to pattern brush"),
    }
}

impl<'d, D: DocumentModel> Composer<'d, D> {
    /// Effective paint specification of `node` for `target`.
    pub fn paint_spec(&self, node: &D::Node<'d>, target: PaintTarget) -> PaintSpec {
        match node.style_property(target.property()) {
            Some(value) => parse_paint_lenient(&value),
            None => target.default_paint(),
        }
    }

    /// Resolves the brush for one channel; `None` means "do not paint".
    pub fn resolve_brush(&mut self, node: &D::Node<'d>, target: PaintTarget) -> Option<Brush> {
        let spec = self.paint_spec(node, target);
        let mut brush = match &spec {
            PaintSpec::None | PaintSpec::Unresolved => None,
            // Only meaningful inside marker content, which is composed elsewhere.
            PaintSpec::ContextFill | PaintSpec::ContextStroke => None,
            PaintSpec::CurrentColor => Some(Brush::solid(current_color(node))),
            PaintSpec::Color(c) | PaintSpec::ColorWithFallbackIcc(c, _) => {
                Some(Brush::solid(to_color(c)))
            }
            PaintSpec::Uri(r) | PaintSpec::UriWithNoneFallback(r) => self.paint_server(r.id()),
            PaintSpec::UriWithCurrentColorFallback(r) => self
                .paint_server(r.id())
                .or_else(|| Some(Brush::solid(current_color(node)))),
            PaintSpec::UriWithColorFallback(r, c) | PaintSpec::UriWithColorIccFallback(r, c, _) => {
                self.paint_server(r.id()).or_else(|| Some(Brush::solid(to_color(c))))
            }
        }?;

        let opacity = node
            .style_property(target.opacity_property())
            .and_then(|v| parse_opacity(&v))
            .unwrap_or(1.0);
        apply_opacity(&mut brush, opacity);
        Some(brush)
    }

    /// Resolves the stroke pen; `None` when there is no stroke paint or the
    /// stroke width is not positive.
    pub fn resolve_pen(&mut self, node: &D::Node<'d>) -> Option<Pen> {
        let width = node
            .style_property("stroke-width")
            .and_then(|v| parse_number(&v))
            .unwrap_or(1.0);
        if width <= 0.0 {
            return None;
        }
        let brush = self.resolve_brush(node, PaintTarget::Stroke)?;

        let mut pen = Pen::new(brush, width);
        if let Some(v) = node.style_property("stroke-linecap") {
            pen.line_cap = LineCap::parse(&v);
        }
        if let Some(v) = node.style_property("stroke-linejoin") {
            pen.line_join = LineJoin::parse(&v);
        }
        if let Some(limit) = node.style_property("stroke-miterlimit").and_then(|v| parse_number(&v)) {
            pen.miter_limit = limit.max(1.0);
        }
        if let Some(v) = node.style_property("stroke-dasharray") {
            pen.dash_array = dash_array(&v);
        }
        Some(pen)
    }

    /// Brush for the paint server with the given id.
    ///
    /// Missing ids and elements that are not paint servers yield `None` so
    /// the caller can apply the paint's fallback.
    fn paint_server(&mut self, id: &str) -> Option<Brush> {
        let Some(server) = self.doc().element_by_id(id) else {
            warn!("paint server #{id} not found");
            return None;
        };
        let name = server.local_name().to_owned();
        match name.as_str() {
            "linearGradient" | "radialGradient" => self.gradient_brush(server),
            "pattern" => self.guarded(id, |c| c.pattern_brush(server)),
            other => {
                warn!("#{id} is a <{other}>, not a paint server");
                None
            }
        }
    }

    /// `node` followed by the elements its `href` chain points at.
    fn href_chain(&self, node: D::Node<'d>) -> Vec<D::Node<'d>> {
        let mut chain = vec![node];
        let mut current = node;
        while chain.len() < MAX_HREF_DEPTH {
            let Some(href) = current.attribute("href") else {
                break;
            };
            let id = href.trim().trim_start_matches('#');
            let Some(next) = self.doc().element_by_id(id) else {
                break;
            };
            if chain.iter().any(|n| n.element_id() == next.element_id()) {
                warn!("href cycle through #{id}");
                break;
            }
            chain.push(next);
            current = next;
        }
        chain
    }

    fn gradient_brush(&self, server: D::Node<'d>) -> Option<Brush> {
        let chain = self.href_chain(server);
        let attr = |name: &str| chain.iter().find_map(|n| n.attribute(name).map(str::to_owned));
        let number = |name: &str, default: f32| {
            attr(name).and_then(|v| parse_fraction(&v)).unwrap_or(default)
        };

        let units = Units::parse(attr("gradientUnits").as_deref(), Units::ObjectBoundingBox);
        let mapping = match units {
            Units::ObjectBoundingBox => MappingMode::RelativeToBoundingBox,
            Units::UserSpaceOnUse => MappingMode::Absolute,
        };

        let shape = if server.local_name() == "linearGradient" {
            GradientShape::Linear {
                start: Point::new(number("x1", 0.0), number("y1", 0.0)),
                end: Point::new(number("x2", 1.0), number("y2", 0.0)),
            }
        } else {
            let center = Point::new(number("cx", 0.5), number("cy", 0.5));
            GradientShape::Radial {
                center,
                radius: number("r", 0.5),
                focal: Point::new(number("fx", center.x), number("fy", center.y)),
            }
        };

        let stops = chain
            .iter()
            .map(gradient_stops)
            .find(|stops| !stops.is_empty())
            .unwrap_or_default();

        if stops.is_empty() {
            debug!("gradient without stops paints nothing");
            return None;
        }
        let content = if stops.len() == 1 {
            BrushContent::Solid(stops[0].color)
        } else {
            let gradient = Gradient {
                shape,
                stops,
                spread: attr("spreadMethod").map(|v| SpreadMode::parse(&v)).unwrap_or_default(),
                mapping,
                transform: attr("gradientTransform").and_then(|v| Transform::parse(&v)),
            };
            if gradient.is_valid() {
                BrushContent::Gradient(gradient)
            } else {
                debug!("degenerate gradient geometry; painting last stop");
                let last = gradient.stops[gradient.stops.len() - 1].color;
                BrushContent::Solid(last)
            }
        };
        Some(Brush::new(content, units == Units::UserSpaceOnUse))
    }

    fn pattern_brush(&mut self, server: D::Node<'d>) -> Option<Brush> {
        let chain = self.href_chain(server);
        let attr = |name: &str| chain.iter().find_map(|n| n.attribute(name).map(str::to_owned));
        let number = |name: &str| attr(name).and_then(|v| parse_fraction(&v)).unwrap_or(0.0);

        let tile = Rect::new(number("x"), number("y"), number("width"), number("height"));
        if tile.is_empty() {
            debug!("pattern with empty tile paints nothing");
            return None;
        }
        let units = Units::parse(attr("patternUnits").as_deref(), Units::ObjectBoundingBox);
        let transform = attr("patternTransform").and_then(|v| Transform::parse(&v));

        let Some(content_node) = chain.iter().copied().find(|n| !n.children().is_empty()) else {
            debug!("pattern without content paints nothing");
            return None;
        };
        let content = self.compose_content(content_node);

        let mapping = match units {
            Units::ObjectBoundingBox => MappingMode::RelativeToBoundingBox,
            Units::UserSpaceOnUse => MappingMode::Absolute,
        };
        let tile = PatternTile { content, tile, mapping, transform };
        Some(Brush::new(BrushContent::Pattern(Box::new(tile)), units == Units::UserSpaceOnUse))
    }
}

fn gradient_stops<N: StyledNode>(gradient: &N) -> Vec<ColorStop> {
    let mut stops: Vec<ColorStop> = Vec::new();
    for stop in gradient.children().into_iter().filter(|n| n.local_name() == "stop") {
        let offset = stop
            .attribute("offset")
            .and_then(parse_fraction)
            .unwrap_or(0.0)
            .clamp(0.0, 1.0);
        // Offsets never decrease.
        let offset = stops.last().map_or(offset, |prev| offset.max(prev.offset));

        let color = match stop.style_property("stop-color") {
            Some(v) => stop_color(&stop, v.trim()),
            None => Color::black(),
        };
        let opacity = stop
            .style_property("stop-opacity")
            .and_then(|v| parse_opacity(&v))
            .unwrap_or(1.0);
        stops.push(ColorStop::new(offset, color.with_opacity(opacity)));
    }
    stops
}

fn stop_color<N: StyledNode>(stop: &N, value: &str) -> Color {
    if value.eq_ignore_ascii_case("currentColor") {
        current_color(stop)
    } else if value.eq_ignore_ascii_case("transparent") {
        Color::transparent()
    } else {
        RgbColor::parse(value).map(|c| to_color(&c)).unwrap_or(Color::black())
    }
}

fn dash_array(value: &str) -> Vec<f32> {
    if value.trim() == "none" {
        return Vec::new();
    }
    let mut dashes = parse_number_list(value);
    if dashes.iter().any(|d| *d < 0.0) || dashes.iter().all(|d| *d == 0.0) {
        return Vec::new();
    }
    if dashes.len() % 2 == 1 {
        dashes.extend_from_within(..);
    }
    dashes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::SvgDocument;

    #[test]
    fn defaults_per_channel() {
        assert_eq!(PaintTarget::Fill.default_paint().to_string(), "#000000");
        assert_eq!(PaintTarget::Stroke.default_paint(), PaintSpec::None);
    }

    #[test]
    fn malformed_paint_is_unresolved() {
        assert_eq!(parse_paint_lenient("url(#grad"), PaintSpec::Unresolved);
        assert_eq!(parse_paint_lenient(" none ").kind(), vellum_paint::PaintKind::None);
    }

    #[test]
    fn dash_arrays() {
        assert_eq!(dash_array("5 3 2"), vec![5.0, 3.0, 2.0, 5.0, 3.0, 2.0]);
        assert_eq!(dash_array("4,2"), vec![4.0, 2.0]);
        assert!(dash_array("0 0").is_empty());
        assert!(dash_array("3 -1").is_empty());
        assert!(dash_array("none").is_empty());
    }

    #[test]
    fn opacity_reaches_every_stop() {
        let mut b = Brush::new(
            BrushContent::Gradient(Gradient {
                shape: GradientShape::Linear { start: Point::zero(), end: Point::new(1.0, 0.0) },
                stops: vec![ColorStop::new(0.0, Color::black()), ColorStop::new(1.0, Color::black())],
                spread: SpreadMode::Pad,
                mapping: MappingMode::RelativeToBoundingBox,
                transform: None,
            }),
            false,
        );
        apply_opacity(&mut b, 0.5);
        let BrushContent::Gradient(g) = &b.content else { unreachable!() };
        assert!(g.stops.iter().all(|s| s.color.a == 0.5));
    }

    #[test]
    fn transparent_and_current_color_stops() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg">
                <linearGradient id="g" color="red">
                    <stop offset="0" stop-color="transparent"/>
                    <stop offset="0.5" stop-color="CurrentColor"/>
                    <stop offset="1" stop-color="bogus"/>
                </linearGradient>
            </svg>"#,
        )
        .unwrap();
        let stops = gradient_stops(&doc.element_by_id("g").unwrap());
        assert_eq!(stops[0].color, Color::transparent());
        assert_eq!(stops[1].color, Color::from_srgb_u8(255, 0, 0, 255));
        assert_eq!(stops[2].color, Color::black());
    }
}
