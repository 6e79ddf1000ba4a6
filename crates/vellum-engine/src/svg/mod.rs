//! Reference document model over `roxmltree`.
//!
//! Supports what composition needs: presentation attributes and inline
//! `style` declarations with inheritance, `href` / `xlink:href`, id lookup
//! and geometry for the basic shapes and paths. There is no CSS stylesheet
//! support.

mod path;
mod shapes;
mod style;

use std::collections::HashMap;

use roxmltree::{Document, Node, NodeId};

use crate::document::{DocumentModel, RenderingHint, StyledNode};
use crate::scene::Geometry;

pub use path::parse_path_data;

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// A parsed SVG document with an id index.
pub struct SvgDocument<'input> {
    doc: Document<'input>,
    ids: HashMap<String, NodeId>,
}

impl<'input> SvgDocument<'input> {
    pub fn parse(text: &'input str) -> Result<Self, roxmltree::Error> {
        Ok(Self::from_document(Document::parse(text)?))
    }

    /// Indexes element ids; the first element with a given id wins.
    pub fn from_document(doc: Document<'input>) -> Self {
        let mut ids = HashMap::new();
        for node in doc.descendants().filter(|n| n.is_element()) {
            if let Some(id) = node.attribute("id") {
                ids.entry(id.to_owned()).or_insert(node.id());
            }
        }
        log::debug!("svg: indexed {} ids", ids.len());
        Self { doc, ids }
    }

    #[inline]
    pub fn document(&self) -> &Document<'input> {
        &self.doc
    }
}

/// Element handle implementing [`StyledNode`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SvgNode<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> SvgNode<'a, 'input> {
    #[inline]
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }

    #[inline]
    pub fn xml(&self) -> Node<'a, 'input> {
        self.node
    }
}

impl StyledNode for SvgNode<'_, '_> {
    fn local_name(&self) -> &str {
        self.node.tag_name().name()
    }

    fn parent_node(&self) -> Option<Self> {
        self.node.parent_element().map(SvgNode::new)
    }

    fn children(&self) -> Vec<Self> {
        self.node.children().filter(|n| n.is_element()).map(SvgNode::new).collect()
    }

    fn rendering_hint(&self) -> RenderingHint {
        style::rendering_hint(self.local_name())
    }

    fn style_property(&self, name: &str) -> Option<String> {
        style::computed(self.node, name).map(str::to_owned)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "href" => self.node.attribute("href").or_else(|| self.node.attribute((XLINK_NS, "href"))),
            _ => self.node.attribute(name),
        }
    }
}

impl<'input> DocumentModel for SvgDocument<'input> {
    type Node<'a>
        = SvgNode<'a, 'input>
    where
        Self: 'a;

    fn root(&self) -> SvgNode<'_, 'input> {
        SvgNode::new(self.doc.root_element())
    }

    fn element_by_id(&self, id: &str) -> Option<SvgNode<'_, 'input>> {
        let node_id = *self.ids.get(id)?;
        self.doc.get_node(node_id).map(SvgNode::new)
    }

    fn build_geometry(&self, node: &SvgNode<'_, 'input>, optimize: bool) -> Option<Geometry> {
        shapes::build_geometry(node.node, optimize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
        <linearGradient id="base"/>
        <linearGradient id="derived" xlink:href="#base"/>
        <rect id="dup" width="1" height="1"/>
        <rect id="dup" width="2" height="2"/>
        <!-- comment -->
        <g id="g"><rect width="1" height="1"/>text</g>
    </svg>"##;

    #[test]
    fn xlink_href_is_visible_as_href() {
        let doc = SvgDocument::parse(DOC).unwrap();
        let derived = doc.element_by_id("derived").unwrap();
        assert_eq!(derived.attribute("href"), Some("#base"));
    }

    #[test]
    fn first_duplicate_id_wins() {
        let doc = SvgDocument::parse(DOC).unwrap();
        let node = doc.element_by_id("dup").unwrap();
        assert_eq!(node.attribute("width"), Some("1"));
        assert!(doc.element_by_id("missing").is_none());
    }

    #[test]
    fn children_are_elements_only() {
        let doc = SvgDocument::parse(DOC).unwrap();
        assert_eq!(doc.root().children().len(), 5);
        let g = doc.element_by_id("g").unwrap();
        assert_eq!(g.children().len(), 1);
        assert!(g.children()[0].parent_name_is("g"));
        assert_eq!(g.rendering_hint(), RenderingHint::Containers);
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(SvgDocument::parse("<svg>").is_err());
    }
}
