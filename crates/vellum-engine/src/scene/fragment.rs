use crate::coords::{Rect, Transform};
use crate::paint::{Brush, Pen};

use super::{Geometry, MaskBrush};

/// Identity carried by an emitted fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentMeta {
    /// Element id, attached the first time an id is seen in a session.
    pub name: Option<String>,
    /// Runtime copy of the element id (only with runtime metadata enabled).
    pub id: Option<String>,
    /// CSS class (only with runtime metadata enabled).
    pub class: Option<String>,
}

impl FragmentMeta {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.id.is_none() && self.class.is_none()
    }
}

/// Leaf fragment: one geometry painted with an optional fill and stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryDrawing {
    pub geometry: Geometry,
    pub brush: Option<Brush>,
    pub pen: Option<Pen>,
    pub meta: FragmentMeta,
}

impl GeometryDrawing {
    #[inline]
    pub fn new(geometry: Geometry, brush: Option<Brush>, pen: Option<Pen>) -> Self {
        Self { geometry, brush, pen, meta: FragmentMeta::default() }
    }

    /// Geometry bounds in the parent's space. Stroke width is not included.
    #[inline]
    pub fn bounds(&self) -> Option<Rect> {
        self.geometry.bounds()
    }
}

/// Group fragment: ordered children plus the effects applied to all of them.
///
/// Effects are applied in the group's local space: `clip` and
/// `opacity_mask` are evaluated before `transform` maps the group into its
/// parent.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingGroup {
    pub children: Vec<DrawingFragment>,
    pub clip: Option<Geometry>,
    pub opacity_mask: Option<MaskBrush>,
    pub transform: Option<Transform>,
    /// Group opacity in `[0, 1]`.
    pub opacity: f32,
    pub meta: FragmentMeta,
}

impl Default for DrawingGroup {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            clip: None,
            opacity_mask: None,
            transform: None,
            opacity: 1.0,
            meta: FragmentMeta::default(),
        }
    }
}

impl DrawingGroup {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_child(&mut self, fragment: DrawingFragment) {
        self.children.push(fragment);
    }

    /// True when the group carries no effect: identity transform, no clip
    /// geometry, no mask and full opacity.
    ///
    /// Such a group must not be emitted as a wrapper.
    pub fn is_noop(&self) -> bool {
        self.transform.is_none_or(|t| t.is_identity())
            && self.clip.as_ref().is_none_or(Geometry::is_empty)
            && self.opacity_mask.is_none()
            && self.opacity >= 1.0
    }

    /// Union of the children's bounds, in the group's local space.
    pub fn children_bounds(&self) -> Option<Rect> {
        self.children
            .iter()
            .filter_map(DrawingFragment::bounds)
            .reduce(Rect::union)
    }

    /// Bounds in the parent's space. Clip and mask are not intersected.
    pub fn bounds(&self) -> Option<Rect> {
        let local = self.children_bounds()?;
        Some(match &self.transform {
            Some(t) => t.transform_bounds(local),
            None => local,
        })
    }

    /// All leaves below this group, depth-first.
    pub fn leaves(&self) -> Vec<&GeometryDrawing> {
        let mut out = Vec::new();
        collect_leaves(&self.children, &mut out);
        out
    }
}

fn collect_leaves<'a>(children: &'a [DrawingFragment], out: &mut Vec<&'a GeometryDrawing>) {
    for child in children {
        match child {
            DrawingFragment::Leaf(leaf) => out.push(leaf),
            DrawingFragment::Group(group) => collect_leaves(&group.children, out),
        }
    }
}

/// Node of the retained drawing tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingFragment {
    Leaf(GeometryDrawing),
    Group(DrawingGroup),
}

impl DrawingFragment {
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            DrawingFragment::Leaf(leaf) => leaf.bounds(),
            DrawingFragment::Group(group) => group.bounds(),
        }
    }

    pub fn meta(&self) -> &FragmentMeta {
        match self {
            DrawingFragment::Leaf(leaf) => &leaf.meta,
            DrawingFragment::Group(group) => &group.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut FragmentMeta {
        match self {
            DrawingFragment::Leaf(leaf) => &mut leaf.meta,
            DrawingFragment::Group(group) => &mut group.meta,
        }
    }

    #[inline]
    pub fn as_leaf(&self) -> Option<&GeometryDrawing> {
        match self {
            DrawingFragment::Leaf(leaf) => Some(leaf),
            DrawingFragment::Group(_) => None,
        }
    }

    #[inline]
    pub fn as_group(&self) -> Option<&DrawingGroup> {
        match self {
            DrawingFragment::Group(group) => Some(group),
            DrawingFragment::Leaf(_) => None,
        }
    }
}

impl From<GeometryDrawing> for DrawingFragment {
    fn from(leaf: GeometryDrawing) -> Self {
        DrawingFragment::Leaf(leaf)
    }
}

impl From<DrawingGroup> for DrawingFragment {
    fn from(group: DrawingGroup) -> Self {
        DrawingFragment::Group(group)
    }
}
