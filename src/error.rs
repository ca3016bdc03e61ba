use thiserror::Error;

/// Errors surfaced to the caller. Absent inputs are not errors: every metric maps
/// them to a 0.0 score.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("Inputs must have the same length. Got {left} and {right}.")]
    LengthMismatch { left: usize, right: usize },
    #[error("`{name}` must be a finite, non-negative number. Got {value}.")]
    InvalidCost { name: &'static str, value: f64 },
    #[error("{0}")]
    InvalidArgument(String),
}

pub type SimResult<T> = Result<T, SimError>;
