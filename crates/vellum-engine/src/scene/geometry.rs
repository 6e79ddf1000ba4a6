use crate::coords::{Point, Rect, Transform};

/// One path command in absolute user units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathSeg {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    Close,
}

impl PathSeg {
    fn map(self, t: &Transform) -> PathSeg {
        match self {
            PathSeg::MoveTo(p) => PathSeg::MoveTo(t.apply(p)),
            PathSeg::LineTo(p) => PathSeg::LineTo(t.apply(p)),
            PathSeg::CubicTo(a, b, c) => PathSeg::CubicTo(t.apply(a), t.apply(b), t.apply(c)),
            PathSeg::Close => PathSeg::Close,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillRule {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "evenodd" => FillRule::EvenOdd,
            _ => FillRule::NonZero,
        }
    }
}

/// Path geometry with an optional render transform.
///
/// Segments stay in the shape's local space; `transform` maps them into the
/// parent group's space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub segments: Vec<PathSeg>,
    pub fill_rule: FillRule,
    pub transform: Option<Transform>,
}

impl Geometry {
    #[inline]
    pub fn new(segments: Vec<PathSeg>) -> Self {
        Self { segments, fill_rule: FillRule::NonZero, transform: None }
    }

    /// True when nothing would be drawn: no line or curve segments.
    pub fn is_empty(&self) -> bool {
        !self
            .segments
            .iter()
            .any(|s| matches!(s, PathSeg::LineTo(_) | PathSeg::CubicTo(..)))
    }

    fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().flat_map(|s| {
            let pts: [Option<Point>; 3] = match *s {
                PathSeg::MoveTo(p) | PathSeg::LineTo(p) => [Some(p), None, None],
                PathSeg::CubicTo(a, b, c) => [Some(a), Some(b), Some(c)],
                PathSeg::Close => [None, None, None],
            };
            pts.into_iter().flatten()
        })
    }

    /// Bounds of the segments ignoring `transform`.
    ///
    /// Curve control points are included, so curved bounds are conservative.
    pub fn local_bounds(&self) -> Option<Rect> {
        Rect::from_points(self.points())
    }

    /// Bounds after `transform`.
    pub fn bounds(&self) -> Option<Rect> {
        match &self.transform {
            Some(t) => Rect::from_points(self.points().map(|p| t.apply(p))),
            None => self.local_bounds(),
        }
    }

    /// Segments with `transform` applied.
    pub fn baked_segments(&self) -> Vec<PathSeg> {
        match &self.transform {
            Some(t) => self.segments.iter().map(|s| s.map(t)).collect(),
            None => self.segments.clone(),
        }
    }

    /// Composes `transform` after whatever transform the geometry already carries.
    pub fn push_transform(&mut self, transform: Transform) {
        self.transform = Some(match self.transform {
            Some(existing) => existing.then(transform),
            None => transform,
        });
    }

    /// Concatenates geometries into one path, baking each part's transform.
    ///
    /// The fill rule of the first part wins. Returns `None` when every part is empty.
    pub fn combine<I: IntoIterator<Item = Geometry>>(parts: I) -> Option<Geometry> {
        let mut out: Option<Geometry> = None;
        for part in parts {
            if part.is_empty() {
                continue;
            }
            let baked = part.baked_segments();
            match out.as_mut() {
                Some(g) => g.segments.extend(baked),
                None => {
                    out = Some(Geometry { segments: baked, fill_rule: part.fill_rule, transform: None })
                }
            }
        }
        out
    }

    /// Drops line segments that do not move the pen.
    pub fn optimized(mut self) -> Geometry {
        let mut current: Option<Point> = None;
        self.segments.retain(|s| match *s {
            PathSeg::MoveTo(p) => {
                current = Some(p);
                true
            }
            PathSeg::LineTo(p) => {
                let keep = current != Some(p);
                current = Some(p);
                keep
            }
            PathSeg::CubicTo(_, _, p) => {
                current = Some(p);
                true
            }
            PathSeg::Close => true,
        });
        self
    }
}
