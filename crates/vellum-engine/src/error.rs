use std::fmt;

use vellum_paint::PaintError;

/// Failure inside one composition step.
///
/// None of these abort a document: the affected channel, mask or paint is
/// dropped and composition continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// Mask content carries a brush whose colors cannot be alpha-adjusted.
    UnsupportedMaskContent { kind: &'static str },
    Paint(PaintError),
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeError::UnsupportedMaskContent { kind } => {
                write!(f, "unsupported mask content: {kind} brush")
            }
            ComposeError::Paint(e) => write!(f, "paint: {e}"),
        }
    }
}

impl std::error::Error for ComposeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComposeError::Paint(e) => Some(e),
            ComposeError::UnsupportedMaskContent { .. } => None,
        }
    }
}

impl From<PaintError> for ComposeError {
    fn from(e: PaintError) -> Self {
        ComposeError::Paint(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn paint_errors_keep_their_source() {
        let e = ComposeError::from(PaintError::InvalidArgument("Missing URI"));
        assert!(e.to_string().starts_with("paint: "));
        assert!(e.source().is_some());
        let m = ComposeError::UnsupportedMaskContent { kind: "pattern" };
        assert_eq!(m.to_string(), "unsupported mask content: pattern brush");
        assert!(m.source().is_none());
    }
}
