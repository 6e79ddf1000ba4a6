use std::fmt;

use crate::color::{parse_color_with_icc, starts_with_ignore_case, IccColor, RgbColor};
use crate::error::PaintError;
use crate::kind::{classify, ColorRequirement, PaintFlags, PaintKind};

/// The content of a `url(...)` reference, kept byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaintRef {
    raw: String,
}

impl PaintRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The text between `url(` and `)` exactly as written.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The referenced element id: quotes and the leading `#` removed.
    pub fn id(&self) -> &str {
        let s = self.raw.trim();
        let s = s
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .or_else(|| s.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
            .unwrap_or(s);
        s.strip_prefix('#').unwrap_or(s)
    }
}

/// Borrowed view of the color carried by a paint.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PaintColor<'a> {
    /// Resolved later against the element's `color` property.
    CurrentColor,
    Rgb(&'a RgbColor),
}

/// A resolved paint specification.
///
/// Each variant carries exactly the fields its kind requires, so a reference
/// or color can never be present without the matching kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaintSpec {
    None,
    CurrentColor,
    ContextFill,
    ContextStroke,
    Color(RgbColor),
    ColorWithFallbackIcc(RgbColor, IccColor),
    Uri(PaintRef),
    UriWithNoneFallback(PaintRef),
    UriWithCurrentColorFallback(PaintRef),
    UriWithColorFallback(PaintRef, RgbColor),
    UriWithColorIccFallback(PaintRef, RgbColor, IccColor),
    Unresolved,
}

impl PaintSpec {
    /// Parses a paint value.
    ///
    /// Unrecognized text degrades to [`PaintSpec::Unresolved`]; the only error is
    /// a `url(` without a closing parenthesis.
    ///
    /// `context-fill` and `context-stroke` are terminal: a preceding `url(...)`
    /// is dropped rather than combined with them.
    pub fn parse(input: &str) -> Result<Self, PaintError> {
        let trimmed = input.trim();
        let mut rest = trimmed;
        let mut flags = PaintFlags::default();
        let mut reference = None;

        if starts_with_ignore_case(rest, "url(") {
            let close = rest.find(')').ok_or_else(|| PaintError::InvalidPaintSyntax {
                input: trimmed.to_owned(),
            })?;
            reference = Some(PaintRef::new(&rest[4..close]));
            flags.uri = true;
            rest = rest[close + 1..].trim();
        }

        let mut rgb = None;
        let mut icc = None;

        if rest.eq_ignore_ascii_case("currentColor") {
            flags.current_color = true;
        } else if rest.eq_ignore_ascii_case("context-fill") || rest.eq_ignore_ascii_case("contextFill") {
            return Ok(PaintSpec::ContextFill);
        } else if rest.eq_ignore_ascii_case("context-stroke")
            || rest.eq_ignore_ascii_case("contextStroke")
        {
            return Ok(PaintSpec::ContextStroke);
        } else if rest.eq_ignore_ascii_case("none")
            || rest.eq_ignore_ascii_case("transparent")
            || rest.eq_ignore_ascii_case("null")
        {
            flags.none = true;
        } else if !rest.is_empty() {
            if let Some((color, icc_color)) = parse_color_with_icc(rest) {
                flags.rgb = true;
                flags.icc = icc_color.is_some();
                rgb = Some(color);
                icc = icc_color;
            }
        }

        Ok(Self::assemble(classify(flags), reference, rgb, icc))
    }

    /// Builds a paint from explicit parts, rejecting any part that does not
    /// match `kind`.
    ///
    /// For the current-color kinds `rgb` is ignored; for every other kind
    /// without a color it must be absent. `icc` is only read by the ICC kinds.
    pub fn from_parts(
        kind: PaintKind,
        reference: Option<&str>,
        rgb: Option<&str>,
        icc: Option<&str>,
    ) -> Result<Self, PaintError> {
        let reference = match (kind.has_uri(), reference) {
            (true, Some(r)) => Some(PaintRef::new(r)),
            (true, None) => return Err(PaintError::InvalidArgument("Missing URI")),
            (false, Some(_)) => return Err(PaintError::InvalidArgument("URI must be null")),
            (false, None) => None,
        };

        let (rgb, icc) = match kind.color_requirement() {
            ColorRequirement::CurrentColor => (None, None),
            ColorRequirement::Rgb => {
                let text = non_empty(rgb).ok_or(PaintError::InvalidArgument("Missing RGB color"))?;
                let color =
                    RgbColor::parse(text).ok_or(PaintError::InvalidArgument("Invalid RGB color"))?;
                (Some(color), None)
            }
            ColorRequirement::RgbAndIcc => {
                let (Some(rgb_text), Some(icc_text)) = (non_empty(rgb), non_empty(icc)) else {
                    return Err(PaintError::InvalidArgument("Missing RGB or ICC color"));
                };
                let color = RgbColor::parse(rgb_text)
                    .ok_or(PaintError::InvalidArgument("Invalid RGB color"))?;
                let icc_color =
                    IccColor::parse(icc_text).ok_or(PaintError::InvalidArgument("Invalid ICC color"))?;
                (Some(color), Some(icc_color))
            }
            ColorRequirement::Nothing => {
                if rgb.is_some() {
                    return Err(PaintError::InvalidArgument("rgbColor must be null"));
                }
                (None, None)
            }
        };

        Ok(Self::assemble(kind, reference, rgb, icc))
    }

    // Callers guarantee the parts match `kind`; any mismatch degrades to Unresolved.
    fn assemble(
        kind: PaintKind,
        reference: Option<PaintRef>,
        rgb: Option<RgbColor>,
        icc: Option<IccColor>,
    ) -> Self {
        match (kind, reference, rgb, icc) {
            (PaintKind::None, _, _, _) => PaintSpec::None,
            (PaintKind::CurrentColor, _, _, _) => PaintSpec::CurrentColor,
            (PaintKind::ContextFill, _, _, _) => PaintSpec::ContextFill,
            (PaintKind::ContextStroke, _, _, _) => PaintSpec::ContextStroke,
            (PaintKind::Color, _, Some(c), _) => PaintSpec::Color(c),
            (PaintKind::ColorWithFallbackIcc, _, Some(c), Some(i)) => {
                PaintSpec::ColorWithFallbackIcc(c, i)
            }
            (PaintKind::Uri, Some(r), _, _) => PaintSpec::Uri(r),
            (PaintKind::UriWithNoneFallback, Some(r), _, _) => PaintSpec::UriWithNoneFallback(r),
            (PaintKind::UriWithCurrentColorFallback, Some(r), _, _) => {
                PaintSpec::UriWithCurrentColorFallback(r)
            }
            (PaintKind::UriWithColorFallback, Some(r), Some(c), _) => {
                PaintSpec::UriWithColorFallback(r, c)
            }
            (PaintKind::UriWithColorIccFallback, Some(r), Some(c), Some(i)) => {
                PaintSpec::UriWithColorIccFallback(r, c, i)
            }
            _ => PaintSpec::Unresolved,
        }
    }

    pub fn kind(&self) -> PaintKind {
        match self {
            PaintSpec::None => PaintKind::None,
            PaintSpec::CurrentColor => PaintKind::CurrentColor,
            PaintSpec::ContextFill => PaintKind::ContextFill,
            PaintSpec::ContextStroke => PaintKind::ContextStroke,
            PaintSpec::Color(_) => PaintKind::Color,
            PaintSpec::ColorWithFallbackIcc(..) => PaintKind::ColorWithFallbackIcc,
            PaintSpec::Uri(_) => PaintKind::Uri,
            PaintSpec::UriWithNoneFallback(_) => PaintKind::UriWithNoneFallback,
            PaintSpec::UriWithCurrentColorFallback(_) => PaintKind::UriWithCurrentColorFallback,
            PaintSpec::UriWithColorFallback(..) => PaintKind::UriWithColorFallback,
            PaintSpec::UriWithColorIccFallback(..) => PaintKind::UriWithColorIccFallback,
            PaintSpec::Unresolved => PaintKind::Unresolved,
        }
    }

    pub fn reference(&self) -> Option<&PaintRef> {
        match self {
            PaintSpec::Uri(r)
            | PaintSpec::UriWithNoneFallback(r)
            | PaintSpec::UriWithCurrentColorFallback(r)
            | PaintSpec::UriWithColorFallback(r, _)
            | PaintSpec::UriWithColorIccFallback(r, _, _) => Some(r),
            _ => None,
        }
    }

    pub fn color(&self) -> Option<PaintColor<'_>> {
        match self {
            PaintSpec::CurrentColor | PaintSpec::UriWithCurrentColorFallback(_) => {
                Some(PaintColor::CurrentColor)
            }
            PaintSpec::Color(c)
            | PaintSpec::ColorWithFallbackIcc(c, _)
            | PaintSpec::UriWithColorFallback(_, c)
            | PaintSpec::UriWithColorIccFallback(_, c, _) => Some(PaintColor::Rgb(c)),
            _ => None,
        }
    }

    pub fn icc_color(&self) -> Option<&IccColor> {
        match self {
            PaintSpec::ColorWithFallbackIcc(_, i) | PaintSpec::UriWithColorIccFallback(_, _, i) => {
                Some(i)
            }
            _ => None,
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

impl fmt::Display for PaintSpec {
    /// Canonical text: `url(<ref>)[ <fallback>]` or the bare fallback.
    ///
    /// `Unresolved` serializes as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaintSpec::None => f.write_str("none"),
            PaintSpec::CurrentColor => f.write_str("currentColor"),
            PaintSpec::ContextFill => f.write_str("context-fill"),
            PaintSpec::ContextStroke => f.write_str("context-stroke"),
            PaintSpec::Color(c) => write!(f, "{c}"),
            PaintSpec::ColorWithFallbackIcc(c, i) => write!(f, "{c} {i}"),
            PaintSpec::Uri(r) => write!(f, "url({})", r.as_str()),
            PaintSpec::UriWithNoneFallback(r) => write!(f, "url({}) none", r.as_str()),
            PaintSpec::UriWithCurrentColorFallback(r) => {
                write!(f, "url({}) currentColor", r.as_str())
            }
            PaintSpec::UriWithColorFallback(r, c) => write!(f, "url({}) {c}", r.as_str()),
            PaintSpec::UriWithColorIccFallback(r, c, i) => {
                write!(f, "url({}) {c} {i}", r.as_str())
            }
            PaintSpec::Unresolved => Ok(()),
        }
    }
}
