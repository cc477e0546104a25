//! SDK error types.
//!
//! Provides error types for parsing and validating SDK values.

/// SDK errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// A string did not name any variant of the given enumeration.
    #[error("unknown {kind}: {value}")]
    UnknownVariant {
        /// Name of the enumeration being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// Invalid lot count.
    #[error("invalid lots: {0}")]
    InvalidLots(String),

    /// Invalid price value.
    #[error("invalid price: {0}")]
    InvalidPrice(String),
}

impl SdkError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}
