//! `clip-path` resolution and mapping.

use log::warn;

use crate::coords::{Rect, Transform};
use crate::document::{DocumentModel, RenderingHint, StyledNode, Units};
use crate::scene::Geometry;

use super::bounds::object_bounding_box_transform;
use super::composer::{is_hidden, node_transform};
use super::resolver::parse_paint_lenient;
use super::Composer;

/// A resolved `clipPath`: its combined geometry in clip units.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRef {
    pub geometry: Geometry,
    pub units: Units,
}

/// Places `clip` for a shape whose untransformed bounds are `local` and
/// whose own transform is `transform`.
///
/// Bounding-box clips are scaled onto the shape's drawing bounds; user-space
/// clips follow the shape transform.
pub fn map_clip(clip: ClipRef, local: Option<Rect>, transform: Option<&Transform>) -> Geometry {
    let mut geometry = clip.geometry;
    match clip.units {
        Units::ObjectBoundingBox => match local {
            Some(bounds) => geometry.push_transform(object_bounding_box_transform(bounds, transform)),
            None => geometry.segments.clear(),
        },
        Units::UserSpaceOnUse => {
            if let Some(t) = transform {
                geometry.push_transform(*t);
            }
        }
    }
    geometry
}

/// Id referenced by a `url(...)` property value, if any.
pub(super) fn referenced_id(value: &str) -> Option<String> {
    parse_paint_lenient(value).reference().map(|r| r.id().to_owned())
}

impl<'d, D: DocumentModel> Composer<'d, D> {
    /// Resolves the node's `clip-path` property.
    pub fn resolve_clip(&self, node: &D::Node<'d>) -> Option<ClipRef> {
        let value = node.style_property("clip-path")?;
        let id = referenced_id(&value)?;
        let Some(clip): Option<D::Node<'d>> = self.doc().element_by_id(&id) else {
            warn!("clip path #{id} not found");
            return None;
        };
        if clip.rendering_hint() != RenderingHint::Clipping {
            let name = clip.local_name().to_owned();
            warn!("#{id} is a <{name}>, not a clipPath");
            return None;
        }
        let units = Units::parse(clip.attribute("clipPathUnits"), Units::UserSpaceOnUse);

        let optimize = self.session.options().optimize_path;
        let parts = clip
            .children()
            .into_iter()
            .filter(|c| c.rendering_hint() == RenderingHint::Shape && !is_hidden(c))
            .filter_map(|c| {
                let mut g = self.doc().build_geometry(&c, optimize)?;
                if let Some(t) = node_transform(&c) {
                    g.push_transform(t);
                }
                Some(g)
            });
        let mut geometry = Geometry::combine(parts).unwrap_or_default();
        if let Some(t) = node_transform(&clip) {
            geometry.push_transform(t);
        }

        Some(ClipRef { geometry, units })
    }
}
