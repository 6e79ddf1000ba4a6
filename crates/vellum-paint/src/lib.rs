//! Paint specifications for SVG `fill` / `stroke` values.
//!
//! This crate is intentionally dependency-free so it can be consumed by
//! document tooling without pulling in the drawing engine.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`paint`] | `PaintSpec`, `PaintRef`, `PaintColor` |
//! | [`kind`] | `PaintKind`, `PaintFlags`, the `classify` table |
//! | [`color`] | `RgbColor`, `IccColor` |
//! | [`error`] | `PaintError` |
//!
//! # Quick start
//!
//! ```rust
//! use vellum_paint::{PaintKind, PaintSpec};
//!
//! let paint = PaintSpec::parse("url(#sunset) #ff8800").unwrap();
//! assert_eq!(paint.kind(), PaintKind::UriWithColorFallback);
//! assert_eq!(paint.reference().unwrap().id(), "sunset");
//! assert_eq!(paint.to_string(), "url(#sunset) #ff8800");
//! ```

pub mod color;
pub mod error;
pub mod kind;
pub mod paint;

pub use color::{IccColor, RgbColor};
pub use error::PaintError;
pub use kind::{classify, ColorRequirement, PaintFlags, PaintKind};
pub use paint::{PaintColor, PaintRef, PaintSpec};

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn kind(src: &str) -> PaintKind {
        PaintSpec::parse(src).unwrap().kind()
    }

    fn canonical(src: &str) -> String {
        PaintSpec::parse(src).unwrap().to_string()
    }

    // ── kinds ─────────────────────────────────────────────────────────────

    #[test] fn bare_uri() {
        let p = PaintSpec::parse("url(#a)").unwrap();
        assert_eq!(p.kind(), PaintKind::Uri);
        assert_eq!(p.reference().unwrap().id(), "a");
        assert_eq!(p.color(), None);
    }
    #[test] fn uri_none() { assert_eq!(kind("url(#a) none"), PaintKind::UriWithNoneFallback); }
    #[test] fn uri_current_color() {
        assert_eq!(kind("url(#a) currentColor"), PaintKind::UriWithCurrentColorFallback);
    }
    #[test] fn uri_color() {
        let p = PaintSpec::parse("url(#a) red").unwrap();
        assert_eq!(p.kind(), PaintKind::UriWithColorFallback);
        match p.color() {
            Some(PaintColor::Rgb(c)) => assert_eq!(c.rgb, [255, 0, 0]),
            other => panic!("unexpected color {other:?}"),
        }
    }
    #[test] fn uri_color_icc() {
        let p = PaintSpec::parse("url(#a) #fff icc-color(p, 1, 0)").unwrap();
        assert_eq!(p.kind(), PaintKind::UriWithColorIccFallback);
        assert_eq!(p.icc_color().unwrap().profile(), "p");
    }
    #[test] fn none_keywords() {
        assert_eq!(kind("none"), PaintKind::None);
        assert_eq!(kind("transparent"), PaintKind::None);
        assert_eq!(kind("NULL"), PaintKind::None);
    }
    #[test] fn current_color() {
        let p = PaintSpec::parse("currentcolor").unwrap();
        assert_eq!(p.kind(), PaintKind::CurrentColor);
        assert_eq!(p.color(), Some(PaintColor::CurrentColor));
    }
    #[test] fn plain_color() { assert_eq!(kind("  #123456 "), PaintKind::Color); }
    #[test] fn color_with_icc() {
        assert_eq!(kind("#fff icc-color(p, 1)"), PaintKind::ColorWithFallbackIcc);
    }
    #[test] fn context_paints() {
        assert_eq!(kind("context-fill"), PaintKind::ContextFill);
        assert_eq!(kind("contextStroke"), PaintKind::ContextStroke);
    }
    #[test] fn context_fill_drops_preceding_uri() {
        let p = PaintSpec::parse("url(#x) context-fill").unwrap();
        assert_eq!(p, PaintSpec::ContextFill);
        assert!(p.reference().is_none());
        assert!(p.color().is_none());
    }
    #[test] fn unknown_text_is_unresolved() {
        assert_eq!(kind("bogus"), PaintKind::Unresolved);
        assert_eq!(kind(""), PaintKind::Unresolved);
        assert_eq!(kind("url(#a) bogus"), PaintKind::Uri);
    }
    #[test] fn uppercase_url_prefix() { assert_eq!(kind("URL(#g)"), PaintKind::Uri); }

    // ── errors ────────────────────────────────────────────────────────────

    #[test] fn unterminated_url_is_a_syntax_error() {
        assert_eq!(
            PaintSpec::parse("url(#grad"),
            Err(PaintError::InvalidPaintSyntax { input: "url(#grad".into() })
        );
    }

    // ── serialization ─────────────────────────────────────────────────────

    #[test] fn round_trips_normalized_text() {
        assert_eq!(canonical("  url(#a)   none "), "url(#a) none");
        assert_eq!(canonical("NONE"), "none");
        assert_eq!(canonical("transparent"), "none");
        assert_eq!(canonical("CURRENTCOLOR"), "currentColor");
        assert_eq!(canonical("contextFill"), "context-fill");
        assert_eq!(canonical("#AbCdEf"), "#AbCdEf");
        assert_eq!(canonical("url( 'x.svg#g' ) rgb(1,2,3)"), "url( 'x.svg#g' ) rgb(1,2,3)");
        assert_eq!(canonical("#fff  icc-color(p, 1)"), "#fff icc-color(p, 1)");
        assert_eq!(canonical("bogus"), "");
    }

    #[test] fn serialization_is_stable() {
        for src in ["url(#a)", "url(#a) none", "url(#a) currentColor", "red", "none",
                    "currentColor", "context-stroke", "url(#a) #fff icc-color(p, 1)"] {
            let once = canonical(src);
            assert_eq!(canonical(&once), once, "{src}");
        }
    }

    #[test] fn quoted_reference_id() {
        let p = PaintSpec::parse("url(\"#g\")").unwrap();
        assert_eq!(p.reference().unwrap().id(), "g");
        assert_eq!(p.reference().unwrap().as_str(), "\"#g\"");
    }

    // ── explicit construction ─────────────────────────────────────────────

    #[test] fn from_parts_missing_uri() {
        assert_eq!(
            PaintSpec::from_parts(PaintKind::Uri, None, None, None),
            Err(PaintError::InvalidArgument("Missing URI"))
        );
    }
    #[test] fn from_parts_unexpected_uri() {
        assert_eq!(
            PaintSpec::from_parts(PaintKind::None, Some("#a"), None, None),
            Err(PaintError::InvalidArgument("URI must be null"))
        );
    }
    #[test] fn from_parts_missing_rgb() {
        assert_eq!(
            PaintSpec::from_parts(PaintKind::Color, None, Some(""), None),
            Err(PaintError::InvalidArgument("Missing RGB color"))
        );
    }
    #[test] fn from_parts_missing_icc() {
        assert_eq!(
            PaintSpec::from_parts(PaintKind::ColorWithFallbackIcc, None, Some("#fff"), None),
            Err(PaintError::InvalidArgument("Missing RGB or ICC color"))
        );
    }
    #[test] fn from_parts_unexpected_rgb() {
        assert_eq!(
            PaintSpec::from_parts(PaintKind::Uri, Some("#a"), Some("red"), None),
            Err(PaintError::InvalidArgument("rgbColor must be null"))
        );
    }
    #[test] fn from_parts_builds_every_valid_shape() {
        let p = PaintSpec::from_parts(PaintKind::UriWithColorIccFallback, Some("#g"), Some("red"),
                                      Some("icc-color(p, 0.5)")).unwrap();
        assert_eq!(p.to_string(), "url(#g) red icc-color(p, 0.5)");

        let p = PaintSpec::from_parts(PaintKind::UriWithCurrentColorFallback, Some("#g"),
                                      Some("ignored"), None).unwrap();
        assert_eq!(p, PaintSpec::UriWithCurrentColorFallback(PaintRef::new("#g")));

        let p = PaintSpec::from_parts(PaintKind::ContextFill, None, None, None).unwrap();
        assert_eq!(p.kind(), PaintKind::ContextFill);
    }
    #[test] fn from_parts_matches_parser() {
        let built = PaintSpec::from_parts(PaintKind::UriWithColorFallback, Some("#a"),
                                          Some("#00ff00"), None).unwrap();
        assert_eq!(built, PaintSpec::parse("url(#a) #00ff00").unwrap());
    }
}
