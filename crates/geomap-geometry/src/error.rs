//! Codec error type

/// Errors raised when text or bytes cannot be turned into a supported geometry
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum WktError {
    #[error("empty geometry text")]
    Empty,

    #[error("unsupported geometry type '{0}'")]
    UnsupportedType(String),

    #[error("expected {expected} at position {position}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        position: usize,
    },

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("coordinate at position {position} has {found} ordinates, expected 2")]
    CoordinateArity { found: usize, position: usize },

    #[error("{kind} needs at least {min} points, found {found}")]
    TooFewPoints {
        kind: &'static str,
        min: usize,
        found: usize,
    },

    #[error("polygon ring {0} is not closed")]
    UnclosedRing(usize),

    #[error("unexpected trailing input at position {0}")]
    TrailingInput(usize),

    #[error("invalid EWKB: {0}")]
    InvalidEwkb(String),
}
