use thiserror::Error;

/// Errors raised while encoding a model graph into a JSON value.
///
/// Decoding never fails: mismatched or unknown input is skipped instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("property `{property}` holds a non-finite number")]
    NonFiniteNumber { property: String },
    #[error("model nesting exceeds the depth limit of {limit}")]
    DepthExceeded { limit: usize },
}
