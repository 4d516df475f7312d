use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// A directive carried a merge-mode name that is not one of the four
    /// known modes.
    #[error("unsupported merge mode: {0:?}")]
    UnsupportedMergeMode(String),

    #[error("invalid qualified name {input:?}: {reason}")]
    InvalidQualifiedName { input: String, reason: String },

    #[error("invalid type reference {input:?}: {reason}")]
    InvalidTypeRef { input: String, reason: String },
}
