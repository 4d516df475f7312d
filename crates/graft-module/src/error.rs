use graft_types::QualifiedName;
use thiserror::Error;

/// Errors produced by module lookup and (de)serialization.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// The locator found no type/method matching the lookup. Covers a
    /// missing type, a missing method name, and a signature with no match.
    #[error("method not found: {type_name}::{method}")]
    MethodNotFound {
        type_name: QualifiedName,
        method: String,
    },

    /// The method exists but has no body to merge (abstract or extern).
    #[error("method {type_name}::{method} has no body")]
    MalformedBody {
        type_name: QualifiedName,
        method: String,
    },

    #[error("invalid module magic: expected {expected}, got {actual}")]
    InvalidMagic { expected: String, actual: String },

    #[error("unsupported module format version: {0}")]
    UnsupportedVersion(u32),

    #[error("corrupt module: {reason}")]
    CorruptModule { reason: String },

    #[error("CRC32 mismatch in module payload")]
    CrcMismatch,

    #[error("module checksum mismatch")]
    ChecksumMismatch,

    #[error("decompression failed: {0}")]
    DecompressionFailed(String),

    #[error("compression failed: {0}")]
    CompressionFailed(String),

    #[error("module encoding error: {0}")]
    Codec(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for module results.
pub type ModuleResult<T> = Result<T, ModuleError>;
