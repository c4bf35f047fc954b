/// Why a JSON value could not be mapped to a Solidity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UnsupportedReason {
    /// The number is fractional, non-finite, or does not fit a 64-bit integer.
    #[error("number is not a 64-bit integer")]
    NonInteger,
    /// Arrays must have at least one element to infer the element type.
    #[error("array is empty")]
    EmptyArray,
    /// `null` is only allowed as an object field value, where it is omitted.
    #[error("null array element")]
    Null,
    /// Array elements infer to incompatible types.
    #[error("array elements have mismatched types")]
    MixedArray,
}

/// Errors produced by [`crate::infer_types`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    /// A value cannot be mapped to a Solidity type.
    #[error("unsupported value for typed-data inference at `{path}`: {reason}")]
    UnsupportedValue {
        /// Dotted path to the offending value.
        path: String,
        /// The reason the value was rejected.
        reason: UnsupportedReason,
    },
    /// Inference input must be a JSON object.
    #[error("typed-data inference requires a JSON object")]
    NotAnObject,
}

impl InferenceError {
    pub(crate) fn unsupported(path: &str, reason: UnsupportedReason) -> Self {
        Self::UnsupportedValue { path: path.to_string(), reason }
    }
}
