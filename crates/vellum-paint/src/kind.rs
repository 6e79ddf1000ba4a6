/// Discriminant of a [`PaintSpec`](crate::PaintSpec).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PaintKind {
    None,
    CurrentColor,
    ContextFill,
    ContextStroke,
    Color,
    ColorWithFallbackIcc,
    Uri,
    UriWithNoneFallback,
    UriWithCurrentColorFallback,
    UriWithColorFallback,
    UriWithColorIccFallback,
    Unresolved,
}

/// Which color payload a kind requires.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ColorRequirement {
    Nothing,
    CurrentColor,
    Rgb,
    RgbAndIcc,
}

impl PaintKind {
    pub const ALL: [PaintKind; 12] = [
        PaintKind::None,
        PaintKind::CurrentColor,
        PaintKind::ContextFill,
        PaintKind::ContextStroke,
        PaintKind::Color,
        PaintKind::ColorWithFallbackIcc,
        PaintKind::Uri,
        PaintKind::UriWithNoneFallback,
        PaintKind::UriWithCurrentColorFallback,
        PaintKind::UriWithColorFallback,
        PaintKind::UriWithColorIccFallback,
        PaintKind::Unresolved,
    ];

    /// True for every `Uri*` kind; those and only those carry a reference.
    #[inline]
    pub fn has_uri(self) -> bool {
        matches!(
            self,
            PaintKind::Uri
                | PaintKind::UriWithNoneFallback
                | PaintKind::UriWithCurrentColorFallback
                | PaintKind::UriWithColorFallback
                | PaintKind::UriWithColorIccFallback
        )
    }

    #[inline]
    pub fn color_requirement(self) -> ColorRequirement {
        match self {
            PaintKind::CurrentColor | PaintKind::UriWithCurrentColorFallback => {
                ColorRequirement::CurrentColor
            }
            PaintKind::Color | PaintKind::UriWithColorFallback => ColorRequirement::Rgb,
            PaintKind::ColorWithFallbackIcc | PaintKind::UriWithColorIccFallback => {
                ColorRequirement::RgbAndIcc
            }
            _ => ColorRequirement::Nothing,
        }
    }
}

/// What the parser detected in a paint string, independent of what it implies.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PaintFlags {
    pub uri: bool,
    pub rgb: bool,
    pub icc: bool,
    pub none: bool,
    pub current_color: bool,
}

/// Maps detected features onto exactly one kind.
///
/// Precedence within each half of the table: color, then `none`, then
/// `currentColor`. `icc` only matters together with `rgb`.
pub const fn classify(flags: PaintFlags) -> PaintKind {
    match (flags.uri, flags.rgb, flags.icc, flags.none, flags.current_color) {
        (true, true, true, _, _) => PaintKind::UriWithColorIccFallback,
        (true, true, false, _, _) => PaintKind::UriWithColorFallback,
        (true, false, _, true, _) => PaintKind::UriWithNoneFallback,
        (true, false, _, false, true) => PaintKind::UriWithCurrentColorFallback,
        (true, false, _, false, false) => PaintKind::Uri,
        (false, true, true, _, _) => PaintKind::ColorWithFallbackIcc,
        (false, true, false, _, _) => PaintKind::Color,
        (false, false, _, true, _) => PaintKind::None,
        (false, false, _, false, true) => PaintKind::CurrentColor,
        (false, false, _, false, false) => PaintKind::Unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(uri: bool, rgb: bool, icc: bool, none: bool, current_color: bool) -> PaintFlags {
        PaintFlags { uri, rgb, icc, none, current_color }
    }

    // ── without uri ───────────────────────────────────────────────────────

    #[test]
    fn nothing_detected_is_unresolved() {
        assert_eq!(classify(PaintFlags::default()), PaintKind::Unresolved);
    }

    #[test]
    fn plain_keywords_and_colors() {
        assert_eq!(classify(flags(false, false, false, true, false)), PaintKind::None);
        assert_eq!(classify(flags(false, false, false, false, true)), PaintKind::CurrentColor);
        assert_eq!(classify(flags(false, true, false, false, false)), PaintKind::Color);
        assert_eq!(
            classify(flags(false, true, true, false, false)),
            PaintKind::ColorWithFallbackIcc
        );
    }

    #[test]
    fn icc_without_rgb_is_ignored() {
        assert_eq!(classify(flags(false, false, true, false, false)), PaintKind::Unresolved);
        assert_eq!(classify(flags(true, false, true, false, false)), PaintKind::Uri);
    }

    // ── with uri ──────────────────────────────────────────────────────────

    #[test]
    fn bare_uri() {
        assert_eq!(classify(flags(true, false, false, false, false)), PaintKind::Uri);
    }

    #[test]
    fn uri_fallbacks() {
        assert_eq!(
            classify(flags(true, false, false, true, false)),
            PaintKind::UriWithNoneFallback
        );
        assert_eq!(
            classify(flags(true, false, false, false, true)),
            PaintKind::UriWithCurrentColorFallback
        );
        assert_eq!(
            classify(flags(true, true, false, false, false)),
            PaintKind::UriWithColorFallback
        );
        assert_eq!(
            classify(flags(true, true, true, false, false)),
            PaintKind::UriWithColorIccFallback
        );
    }

    #[test]
    fn color_wins_over_keywords() {
        assert_eq!(classify(flags(false, true, false, true, true)), PaintKind::Color);
        assert_eq!(classify(flags(false, false, false, true, true)), PaintKind::None);
    }

    // ── kind properties ───────────────────────────────────────────────────

    #[test]
    fn uri_kinds_are_exactly_the_uri_prefixed_ones() {
        let uri_kinds: Vec<_> = PaintKind::ALL.iter().filter(|k| k.has_uri()).collect();
        assert_eq!(uri_kinds.len(), 5);
        assert!(!PaintKind::Unresolved.has_uri());
        assert!(!PaintKind::ContextFill.has_uri());
    }

    #[test]
    fn color_requirements() {
        assert_eq!(PaintKind::None.color_requirement(), ColorRequirement::Nothing);
        assert_eq!(PaintKind::Uri.color_requirement(), ColorRequirement::Nothing);
        assert_eq!(
            PaintKind::UriWithCurrentColorFallback.color_requirement(),
            ColorRequirement::CurrentColor
        );
        assert_eq!(PaintKind::Color.color_requirement(), ColorRequirement::Rgb);
        assert_eq!(
            PaintKind::UriWithColorIccFallback.color_requirement(),
            ColorRequirement::RgbAndIcc
        );
    }
}
