use crate::coords::{Point, Transform};

use super::Color;

/// Gradient spread behavior outside the [0, 1] range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    #[default]
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

impl SpreadMode {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "reflect" => SpreadMode::Reflect,
            "repeat" => SpreadMode::Repeat,
            _ => SpreadMode::Pad,
        }
    }
}

/// How brush coordinates are interpreted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum MappingMode {
    /// Coordinates are fractions of the painted geometry's bounds.
    #[default]
    RelativeToBoundingBox,
    /// Coordinates are user units.
    Absolute,
}

/// A single gradient stop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GradientShape {
    Linear { start: Point, end: Point },
    Radial { center: Point, radius: f32, focal: Point },
}

/// Linear or radial gradient.
///
/// Semantics:
/// - shape coordinates follow `mapping`
/// - `transform` is the gradient's own `gradientTransform`, applied in its
///   coordinate space before any brush transform
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub shape: GradientShape,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
    pub mapping: MappingMode,
    pub transform: Option<Transform>,
}

impl Gradient {
    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        let shape_ok = match self.shape {
            GradientShape::Linear { start, end } => start.is_finite() && end.is_finite(),
            GradientShape::Radial { center, radius, focal } => {
                center.is_finite() && focal.is_finite() && radius.is_finite() && radius > 0.0
            }
        };
        shape_ok
            && !self.stops.is_empty()
            && self.stops.iter().all(|s| s.offset.is_finite() && s.color.is_finite())
    }

    /// A gradient whose stops are all opaque.
    pub fn is_opaque(&self) -> bool {
        self.stops.iter().all(|s| s.color.is_opaque())
    }
}
