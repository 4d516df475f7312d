//! Merge engine for graft.
//!
//! Combines two method bodies (a base and a patch) into one under a declared
//! [`MergeMode`](graft_types::MergeMode). Every merge is a pure, synchronous
//! transformation over owned data: inputs are consumed, the output aliases
//! neither, and independent merges are safe to run concurrently.
//!
//! # Key Types
//!
//! - [`merge_variables`] / [`SlotRemap`] — Variable-table merging plus the
//!   slot-renumbering record for callers that address slots by index
//! - [`merge_instructions`] — Instruction-stream merging with the
//!   mode-appropriate terminator and no-op cleanup
//! - [`compose`] / [`compose_with_remap`] — One merge operation end-to-end,
//!   producing the replacement method body
//!
//! The engine does not verify the merged stream semantically (stack balance,
//! branch-target validity); both inputs are trusted to be well-formed.

pub mod compose;
pub mod instructions;
pub mod variables;

pub use compose::{compose, compose_with_remap};
pub use instructions::merge_instructions;
pub use variables::{merge_variables, SlotRemap};
