//! Coordinate and geometry types shared by the drawing tree and the composer.
//!
//! Canonical space:
//! - SVG user units
//! - Origin top-left
//! - +X right, +Y down

mod point;
mod rect;
mod transform;

pub use point::Point;
pub use rect::Rect;
pub use transform::Transform;
