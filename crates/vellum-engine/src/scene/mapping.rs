use crate::compose::bounds::{drawing_bounds, object_bounding_box_transform};
use crate::coords::{Rect, Transform};

use super::DrawingGroup;

/// How a viewbox is fitted into a viewport.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Stretch {
    None,
    Fill,
    #[default]
    Uniform,
    UniformToFill,
}

/// Mapping from brush content space into the space of the painted drawing.
///
/// A backend either consumes a plain matrix, or a viewbox fitted into a
/// viewport. `transform` flattens both into a matrix for backends that only
/// understand matrices.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PaintSpace {
    Matrix(Transform),
    Viewbox { viewbox: Rect, viewport: Rect, stretch: Stretch },
}

impl PaintSpace {
    pub fn transform(&self) -> Transform {
        match *self {
            PaintSpace::Matrix(t) => t,
            PaintSpace::Viewbox { viewbox, viewport, stretch } => fit(viewbox, viewport, stretch),
        }
    }
}

fn fit(viewbox: Rect, viewport: Rect, stretch: Stretch) -> Transform {
    if viewbox.width == 0.0 || viewbox.height == 0.0 {
        return Transform::translate(viewport.x - viewbox.x, viewport.y - viewbox.y);
    }
    let sx = viewport.width / viewbox.width;
    let sy = viewport.height / viewbox.height;
    let (sx, sy) = match stretch {
        Stretch::None => (1.0, 1.0),
        Stretch::Fill => (sx, sy),
        Stretch::Uniform => (sx.min(sy), sx.min(sy)),
        Stretch::UniformToFill => (sx.max(sy), sx.max(sy)),
    };
    // Center the scaled viewbox in the viewport.
    let dx = viewport.x + (viewport.width - viewbox.width * sx) / 2.0 - viewbox.x * sx;
    let dy = viewport.y + (viewport.height - viewbox.height * sy) / 2.0 - viewbox.y * sy;
    Transform::scale(sx, sy).then(Transform::translate(dx, dy))
}

/// Strategy for mapping bounding-box-relative content onto a drawing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BoundsMapping {
    /// Unit square scaled onto the drawing bounds.
    Matrix,
    /// Content fitted into the drawing bounds (absolute, uniform stretch).
    Viewbox,
}

impl BoundsMapping {
    /// Builds the paint space for a drawing whose untransformed bounds are
    /// `local`, placed by `outer`.
    pub fn map(self, local: Rect, outer: Option<&Transform>) -> PaintSpace {
        match self {
            BoundsMapping::Matrix => PaintSpace::Matrix(object_bounding_box_transform(local, outer)),
            BoundsMapping::Viewbox => {
                let bounds = drawing_bounds(local, outer);
                PaintSpace::Viewbox { viewbox: bounds, viewport: bounds, stretch: Stretch::Uniform }
            }
        }
    }
}

/// Opacity mask: a drawing whose alpha modulates the masked group.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskBrush {
    pub content: Box<DrawingGroup>,
    /// `None` draws the content in the masked group's space unchanged.
    pub space: Option<PaintSpace>,
}

impl MaskBrush {
    #[inline]
    pub fn new(content: DrawingGroup) -> Self {
        Self { content: Box::new(content), space: None }
    }

    /// Composes `transform` after the current mapping.
    pub fn push_transform(&mut self, transform: Transform) {
        self.space = Some(PaintSpace::Matrix(match self.space {
            Some(space) => space.transform().then(transform),
            None => transform,
        }));
    }
}
