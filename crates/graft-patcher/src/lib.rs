//! Patch orchestrator for graft.
//!
//! Drives one patching invocation end-to-end: load the target module once,
//! locate and compose every declared patch in order, install each merged
//! body in place, and serialize the result once. Directives are explicit
//! values (usually loaded from a TOML manifest); nothing is discovered by
//! introspection.
//!
//! # Key Types
//!
//! - [`PatchSource`] / [`PatchEntry`] — A compiled patch module plus the
//!   explicit list of patches drawn from it
//! - [`apply_patches`] — One load, N composes, one serialize; fail-fast
//! - [`apply_to_module`] — The in-memory locate/compose/install loop
//! - [`load_manifest`] — TOML manifest to patch sources
//!
//! Directives targeting the same module must be applied from one call (the
//! in-place mutation is not safe for concurrent writers); directives for
//! independent modules may run concurrently from separate invocations.

pub mod apply;
pub mod error;
pub mod manifest;
pub mod source;

pub use apply::{apply_patches, apply_to_module};
pub use error::{PatchError, PatchResult};
pub use manifest::load_manifest;
pub use source::{PatchEntry, PatchSource};
