//! Renderer-native paint model.
//!
//! Scope:
//! - color representation (straight-alpha sRGB)
//! - brushes (solid, gradient, pattern) and pens
//!
//! Paint *specifications* (the text of `fill` / `stroke`) live in the
//! `vellum-paint` crate; this module holds what they resolve to.

pub mod brush;
pub mod color;
pub mod gradient;
pub mod pen;

pub use brush::{Brush, BrushContent, PatternTile};
pub use color::Color;
pub use gradient::{ColorStop, Gradient, GradientShape, MappingMode, SpreadMode};
pub use pen::{LineCap, LineJoin, Pen};
