use crate::coords::{Rect, Transform};
use crate::scene::DrawingGroup;

use super::{Color, Gradient, MappingMode};

/// Tiled drawing used as a brush (SVG `<pattern>`).
#[derive(Debug, Clone, PartialEq)]
pub struct PatternTile {
    pub content: DrawingGroup,
    /// Tile rectangle, interpreted according to `mapping`.
    pub tile: Rect,
    pub mapping: MappingMode,
    pub transform: Option<Transform>,
}

/// Closed set of brush contents.
#[derive(Debug, Clone, PartialEq)]
pub enum BrushContent {
    Solid(Color),
    Gradient(Gradient),
    Pattern(Box<PatternTile>),
}

impl BrushContent {
    /// Name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BrushContent::Solid(_) => "solid",
            BrushContent::Gradient(_) => "gradient",
            BrushContent::Pattern(_) => "pattern",
        }
    }
}

/// Paint source for filling geometry or a pen.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub content: BrushContent,
    /// Brush-space transform. `None` is identity.
    pub transform: Option<Transform>,
    /// Whether the shape transform must also be applied to this brush.
    ///
    /// Set for paint servers defined in user space; solid colors and
    /// bounding-box-relative brushes follow the geometry by construction.
    pub transformable: bool,
}

impl Brush {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Self { content: BrushContent::Solid(color), transform: None, transformable: false }
    }

    #[inline]
    pub fn new(content: BrushContent, transformable: bool) -> Self {
        Self { content, transform: None, transformable }
    }

    /// Appends `transform` after any transform the brush already carries.
    ///
    /// An absent or identity brush transform is replaced outright.
    pub fn push_transform(&mut self, transform: Transform) {
        self.transform = Some(match self.transform {
            Some(existing) if !existing.is_identity() => existing.then(transform),
            _ => transform,
        });
    }

    pub fn is_opaque(&self) -> bool {
        match &self.content {
            BrushContent::Solid(c) => c.is_opaque(),
            BrushContent::Gradient(g) => g.is_opaque(),
            // Conservative: tiles may leave gaps.
            BrushContent::Pattern(_) => false,
        }
    }
}
