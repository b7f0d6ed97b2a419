use thiserror::Error;

/// Custom error type for the ZeroDiff core.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum ZeroDiffError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Shape mismatch during gradient accumulation: expected {expected:?}, got {actual:?}")]
    GradientAccumulationShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Operation {op} does not implement {rule}")]
    NotImplemented { op: String, rule: &'static str },

    #[error("Operation {op} was applied to an empty input list")]
    EmptyInputList { op: String },

    #[error("Backward pass failed: {0}")]
    BackwardError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
