use std::fmt;

/// Failure while parsing or constructing a paint specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintError {
    /// A `url(` reference without its closing parenthesis.
    ///
    /// Callers composing a drawing substitute [`PaintSpec::Unresolved`](crate::PaintSpec::Unresolved).
    InvalidPaintSyntax { input: String },
    /// Contract violation of [`PaintSpec::from_parts`](crate::PaintSpec::from_parts).
    InvalidArgument(&'static str),
}

impl fmt::Display for PaintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaintError::InvalidPaintSyntax { input } => {
                write!(f, "invalid paint syntax: unterminated url() in {input:?}")
            }
            PaintError::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
        }
    }
}

impl std::error::Error for PaintError {}
