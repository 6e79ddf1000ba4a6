use super::Brush;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "round" => LineCap::Round,
            "square" => LineCap::Square,
            _ => LineCap::Butt,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "round" => LineJoin::Round,
            "bevel" => LineJoin::Bevel,
            _ => LineJoin::Miter,
        }
    }
}

/// Stroke description: a brush plus line style.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub brush: Brush,
    pub thickness: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f32,
    /// Alternating dash / gap lengths in user units. Empty = solid line.
    pub dash_array: Vec<f32>,
}

impl Pen {
    #[inline]
    pub fn new(brush: Brush, thickness: f32) -> Self {
        Self {
            brush,
            thickness,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 4.0,
            dash_array: Vec::new(),
        }
    }
}
