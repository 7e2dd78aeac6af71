use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NnError>;

#[derive(Error, Debug)]
pub enum NnError {
    /// A vector does not have the width the receiving layer expects.
    #[error("shape mismatch in {context}: expected {expected} values, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid learning rate: {0}")]
    InvalidLearningRate(f64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NnError {
    /// Returns `Ok(())` when `actual == expected`, otherwise a `ShapeMismatch`.
    pub(crate) fn check_len(context: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(NnError::ShapeMismatch { context, expected, actual })
        }
    }
}
