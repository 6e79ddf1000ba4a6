//! Read-only view of the source document.
//!
//! The composer never parses or mutates documents; it consumes them through
//! [`DocumentModel`] and [`StyledNode`]. `crate::svg` provides an
//! implementation over `roxmltree`.

use crate::scene::{DrawingStack, Geometry};

pub mod values;

/// Precomputed classification of a node guiding how it is composed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderingHint {
    None,
    Shape,
    Image,
    Text,
    /// `clipPath` elements.
    Clipping,
    /// `mask` elements.
    Masking,
    /// Grouping elements (`svg`, `g`, `a`, `switch`).
    Containers,
    /// `marker` elements.
    Markers,
}

/// Coordinate system for clip, mask and paint server content.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Units {
    UserSpaceOnUse,
    ObjectBoundingBox,
}

impl Units {
    /// Parses a units attribute, falling back to `default` for absent or
    /// unknown values.
    pub fn parse(value: Option<&str>, default: Units) -> Units {
        match value.map(str::trim) {
            Some("userSpaceOnUse") => Units::UserSpaceOnUse,
            Some("objectBoundingBox") => Units::ObjectBoundingBox,
            _ => default,
        }
    }
}

/// Per-node accessors.
pub trait StyledNode: Copy {
    fn local_name(&self) -> &str;

    fn parent_node(&self) -> Option<Self>;

    /// Element children in document order.
    fn children(&self) -> Vec<Self>;

    fn rendering_hint(&self) -> RenderingHint;

    /// Computed value of a style property, inheritance included.
    fn style_property(&self, name: &str) -> Option<String>;

    /// Raw attribute value.
    fn attribute(&self, name: &str) -> Option<&str>;

    fn element_id(&self) -> Option<&str> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    fn element_class(&self) -> Option<&str> {
        self.attribute("class").filter(|class| !class.is_empty())
    }

    fn parent_name_is(&self, name: &str) -> bool {
        self.parent_node().is_some_and(|p| p.local_name() == name)
    }
}

/// Document-level accessors.
pub trait DocumentModel {
    type Node<'a>: StyledNode
    where
        Self: 'a;

    fn root(&self) -> Self::Node<'_>;

    /// Element with the given id, if registered in the document.
    fn element_by_id(&self, id: &str) -> Option<Self::Node<'_>>;

    /// Geometry of a shape node in its local space, without its transform.
    ///
    /// Returns `None` for nodes with no shape.
    fn build_geometry(&self, node: &Self::Node<'_>, optimize: bool) -> Option<Geometry>;
}

/// External marker rendering, invoked after each composed shape.
pub trait MarkerRenderer<N> {
    fn render_markers(&self, node: &N, stack: &mut DrawingStack);
}

/// Marker renderer that draws nothing.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoMarkers;

impl<N> MarkerRenderer<N> for NoMarkers {
    fn render_markers(&self, _node: &N, _stack: &mut DrawingStack) {}
}
