//! Alpha adjustment for object-bounding-box mask content.
//!
//! A fully transparent color inside a mask would hide whatever the mask is
//! applied to. Such colors are replaced by an opaque gray derived from their
//! channels.

use crate::error::ComposeError;
use crate::paint::{Brush, BrushContent, Color};
use crate::scene::{DrawingFragment, DrawingGroup};

/// Returns `color` unchanged unless it is fully transparent; otherwise an
/// opaque gray at `(min + max) / 2` of its linear channels.
pub fn adjust_color(color: Color) -> Color {
    if !color.is_transparent() {
        return color;
    }
    let [r, g, b] = color.to_linear();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let mid = (min + max) / 2.0;
    Color::from_linear(mid, mid, mid, 1.0)
}

/// Adjusts every color of a solid or gradient brush.
pub fn adjust_brush(brush: &mut Brush) -> Result<(), ComposeError> {
    let kind = brush.content.kind_name();
    match &mut brush.content {
        BrushContent::Solid(c) => *c = adjust_color(*c),
        BrushContent::Gradient(g) => {
            for stop in &mut g.stops {
                stop.color = adjust_color(stop.color);
            }
        }
        BrushContent::Pattern(_) => {
            return Err(ComposeError::UnsupportedMaskContent { kind });
        }
    }
    Ok(())
}

/// Walks `group` and adjusts every fill and stroke brush below it.
///
/// Stops at the first unsupported brush; the group is then partially
/// adjusted and should be discarded.
pub fn adjust_drawing(group: &mut DrawingGroup) -> Result<(), ComposeError> {
    for child in &mut group.children {
        match child {
            DrawingFragment::Leaf(leaf) => {
                if let Some(brush) = leaf.brush.as_mut() {
                    adjust_brush(brush)?;
                }
                if let Some(pen) = leaf.pen.as_mut() {
                    adjust_brush(&mut pen.brush)?;
                }
            }
            DrawingFragment::Group(inner) => adjust_drawing(inner)?,
        }
    }
    Ok(())
}
