//! Foundation types for graft.
//!
//! This crate provides the instruction, variable, and naming types shared by
//! the rest of the graft toolkit. Every other graft crate depends on
//! `graft-types`.
//!
//! # Key Types
//!
//! - [`Opcode`] / [`Instruction`] — An opcode tag plus operands; opaque to the
//!   merge engine except for the terminator and no-op classifications
//! - [`InstructionStream`] — Ordered, owned instruction sequence with
//!   concatenation, positional insertion, and cleanup filters
//! - [`LocalSlot`] / [`VariableTable`] — Positionally indexed local variables
//! - [`MethodBody`] — Instructions + locals + the return-value flag
//! - [`QualifiedName`] / [`TypeRef`] — Structural names for types; comparison
//!   never consults a live type system
//! - [`MergeMode`] / [`PatchDirective`] — What to patch, where, and how

pub mod body;
pub mod directive;
pub mod error;
pub mod instr;
pub mod locals;
pub mod names;
pub mod opcode;

pub use body::MethodBody;
pub use directive::{MergeMode, PatchDirective};
pub use error::TypeError;
pub use instr::{Instruction, InstructionStream, Operand};
pub use locals::{LocalSlot, VariableTable};
pub use names::{QualifiedName, TypeRef};
pub use opcode::Opcode;
