//! `mask` resolution and mapping.

use log::warn;

use crate::coords::{Rect, Transform};
use crate::document::{DocumentModel, RenderingHint, StyledNode, Units};
use crate::scene::{BoundsMapping, MaskBrush};

use super::alpha::adjust_drawing;
use super::clip::referenced_id;
use super::Composer;

/// A resolved `mask` element with its composed content.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskRef {
    pub brush: MaskBrush,
    /// `maskUnits`.
    pub units: Units,
    /// `maskContentUnits`.
    pub content_units: Units,
}

impl MaskRef {
    /// Mapping used when the mask region is relative to the drawing bounds.
    pub fn content_mapping(&self) -> BoundsMapping {
        match self.content_units {
            Units::ObjectBoundingBox => BoundsMapping::Matrix,
            Units::UserSpaceOnUse => BoundsMapping::Viewbox,
        }
    }
}

/// Places `mask` for a shape whose untransformed bounds are `local` and
/// whose own transform is `transform`.
pub fn map_mask(mask: MaskRef, local: Option<Rect>, transform: Option<&Transform>) -> MaskBrush {
    let mapping = mask.content_mapping();
    let mut brush = mask.brush;
    match mask.units {
        Units::ObjectBoundingBox => {
            if let Some(bounds) = local {
                brush.space = Some(mapping.map(bounds, transform));
            }
        }
        Units::UserSpaceOnUse => {
            if let Some(t) = transform {
                brush.push_transform(*t);
            }
        }
    }
    brush
}

impl<'d, D: DocumentModel> Composer<'d, D> {
    /// Resolves the node's `mask` property and composes the mask content.
    ///
    /// Bounding-box masks get their transparent colors replaced by opaque
    /// grays. A mask whose content cannot be adjusted is dropped; the node
    /// composes without it.
    pub fn resolve_mask(&mut self, node: &D::Node<'d>) -> Option<MaskRef> {
        let value = node.style_property("mask")?;
        let id = referenced_id(&value)?;
        let Some(mask) = self.doc().element_by_id(&id) else {
            warn!("mask #{id} not found");
            return None;
        };
        if mask.rendering_hint() != RenderingHint::Masking {
            let name = mask.local_name().to_owned();
            warn!("#{id} is a <{name}>, not a mask");
            return None;
        }

        let units = Units::parse(mask.attribute("maskUnits"), Units::ObjectBoundingBox);
        let content_units = Units::parse(mask.attribute("maskContentUnits"), Units::UserSpaceOnUse);

        let mut content = self.guarded(&id, |c| Some(c.compose_content(mask)))?;

        if units == Units::ObjectBoundingBox {
            if let Err(e) = adjust_drawing(&mut content) {
                warn!("mask #{id}: {e}; composing without mask");
                return None;
            }
        }

        Some(MaskRef { brush: MaskBrush::new(content), units, content_units })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::Session;
    use crate::coords::Point;
    use crate::scene::{DrawingGroup, PaintSpace, Stretch};
    use crate::svg::SvgDocument;

    fn mask(units: Units, content_units: Units) -> MaskRef {
        MaskRef { brush: MaskBrush::new(DrawingGroup::new()), units, content_units }
    }

    #[test]
    fn bounding_box_content_uses_matrix() {
        let m = map_mask(
            mask(Units::ObjectBoundingBox, Units::ObjectBoundingBox),
            Some(Rect::new(10.0, 20.0, 100.0, 50.0)),
            None,
        );
        let Some(PaintSpace::Matrix(t)) = m.space else { panic!("{:?}", m.space) };
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(110.0, 70.0));
    }

    #[test]
    fn user_space_content_uses_viewbox() {
        let shape = Transform::scale(2.0, 2.0);
        let m = map_mask(
            mask(Units::ObjectBoundingBox, Units::UserSpaceOnUse),
            Some(Rect::new(0.0, 0.0, 5.0, 5.0)),
            Some(&shape),
        );
        let b = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(m.space, Some(PaintSpace::Viewbox { viewbox: b, viewport: b, stretch: Stretch::Uniform }));
    }

    #[test]
    fn user_space_mask_follows_shape_transform() {
        let shape = Transform::translate(3.0, 4.0);
        let m = map_mask(mask(Units::UserSpaceOnUse, Units::UserSpaceOnUse), None, Some(&shape));
        assert_eq!(m.space, Some(PaintSpace::Matrix(shape)));
        let m = map_mask(mask(Units::UserSpaceOnUse, Units::UserSpaceOnUse), None, None);
        assert_eq!(m.space, None);
    }

    #[test]
    fn resolves_only_mask_elements() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg">
                <mask id="m" maskUnits="userSpaceOnUse"><rect width="1" height="1" fill="white"/></mask>
                <rect id="a" width="1" height="1" mask="url(#m)"/>
                <rect id="b" width="1" height="1" mask="url(#a)"/>
            </svg>"#,
        )
        .unwrap();
        let mut session = Session::default();
        let mut composer = Composer::new(&doc, &mut session);

        let mask = composer.resolve_mask(&doc.element_by_id("a").unwrap()).unwrap();
        assert_eq!(mask.units, Units::UserSpaceOnUse);
        assert_eq!(mask.content_units, Units::UserSpaceOnUse);
        assert_eq!(mask.brush.content.leaves().len(), 1);

        assert!(composer.resolve_mask(&doc.element_by_id("b").unwrap()).is_none());
    }
}
