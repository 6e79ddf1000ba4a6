//! Property lookup over roxmltree elements.
//!
//! Precedence, highest first: the element's `style` attribute, its
//! presentation attribute, then (for inherited properties) the nearest
//! ancestor declaring the property. `inherit` defers to the parent for any
//! property.

use roxmltree::Node;

use crate::document::RenderingHint;
use crate::document::values::style_declarations;

const INHERITED: &[&str] = &[
    "clip-rule",
    "color",
    "fill",
    "fill-opacity",
    "fill-rule",
    "marker",
    "marker-end",
    "marker-mid",
    "marker-start",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "visibility",
];

pub fn is_inherited(name: &str) -> bool {
    INHERITED.contains(&name)
}

/// Value declared on `node` itself, if any.
pub fn declared<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    let from_style = node
        .attribute("style")
        .and_then(|style| style_declarations(style).filter(|(n, _)| *n == name).last())
        .map(|(_, v)| v);
    from_style.or_else(|| node.attribute(name).map(str::trim))
}

/// Computed value of `name` for `node`.
pub fn computed<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    let mut current = Some(node);
    while let Some(n) = current.filter(|n| n.is_element()) {
        match declared(n, name) {
            Some("inherit") => {}
            Some(value) => return Some(value),
            None if !is_inherited(name) => return None,
            None => {}
        }
        current = n.parent_element();
    }
    None
}

pub fn rendering_hint(local_name: &str) -> RenderingHint {
    match local_name {
        "rect" | "circle" | "ellipse" | "line" | "polyline" | "polygon" | "path" => {
            RenderingHint::Shape
        }
        "svg" | "g" | "a" | "switch" => RenderingHint::Containers,
        "clipPath" => RenderingHint::Clipping,
        "mask" => RenderingHint::Masking,
        "marker" => RenderingHint::Markers,
        "image" => RenderingHint::Image,
        "text" => RenderingHint::Text,
        _ => RenderingHint::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_doc(xml: &str, f: impl FnOnce(&roxmltree::Document<'_>)) {
        let doc = roxmltree::Document::parse(xml).unwrap();
        f(&doc);
    }

    fn by_id<'a, 'i>(doc: &'a roxmltree::Document<'i>, id: &str) -> Node<'a, 'i> {
        doc.descendants().find(|n| n.attribute("id") == Some(id)).unwrap()
    }

    #[test]
    fn style_attribute_beats_presentation_attribute() {
        with_doc(r#"<svg><rect id="r" fill="blue" style="fill: red; fill: green"/></svg>"#, |doc| {
            assert_eq!(computed(by_id(doc, "r"), "fill"), Some("green"));
        });
    }

    #[test]
    fn inherited_properties_walk_ancestors() {
        with_doc(
            r#"<svg fill="red" opacity="0.5"><g stroke="blue"><rect id="r"/></g></svg>"#,
            |doc| {
                let r = by_id(doc, "r");
                assert_eq!(computed(r, "fill"), Some("red"));
                assert_eq!(computed(r, "stroke"), Some("blue"));
                assert_eq!(computed(r, "opacity"), None);
            },
        );
    }

    #[test]
    fn explicit_inherit_defers_to_parent() {
        with_doc(r#"<svg><g id="g" opacity="0.3"><rect id="r" opacity="inherit"/></g></svg>"#, |doc| {
            assert_eq!(computed(by_id(doc, "r"), "opacity"), Some("0.3"));
        });
    }

    #[test]
    fn hints_by_element_name() {
        assert_eq!(rendering_hint("path"), RenderingHint::Shape);
        assert_eq!(rendering_hint("g"), RenderingHint::Containers);
        assert_eq!(rendering_hint("clipPath"), RenderingHint::Clipping);
        assert_eq!(rendering_hint("linearGradient"), RenderingHint::None);
    }
}
