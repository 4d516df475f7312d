use thiserror::Error;

/// Errors produced while loading manifests or applying patches.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("module error: {0}")]
    Module(#[from] graft_module::ModuleError),

    #[error("type error: {0}")]
    Type(#[from] graft_types::TypeError),

    #[error("invalid manifest {path}: {reason}")]
    Manifest { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for patcher results.
pub type PatchResult<T> = Result<T, PatchError>;
