use crate::Scalar;

/// Errors produced by this crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Quadratic equation without `t^2` and `t` terms (`a == 0 && b == 0`)
    #[error("degenerate quadratic equation a={a} b={b} c={c}")]
    DegenerateQuadratic { a: Scalar, b: Scalar, c: Scalar },
    /// Rectangle with negative or non-finite extents
    #[error("invalid rectangle: {reason}")]
    InvalidRect { reason: String },
    /// Malformed SVG path data
    #[error("failed to parse path at offset {offset}: {reason}")]
    Parse { reason: String, offset: usize },
    /// Path command which is valid SVG but can not be handled
    #[error("unsupported path command '{cmd}' at offset {offset}")]
    UnsupportedCommand { cmd: char, offset: usize },
    /// JSON error
    #[cfg(feature = "serde")]
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error propagated while reading input
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Error> for std::io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Io(error) => error,
            _ => Self::new(std::io::ErrorKind::InvalidData, error),
        }
    }
}
