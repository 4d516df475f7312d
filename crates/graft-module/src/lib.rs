//! Module container for graft.
//!
//! A module is the unit of compiled code that patching operates on: a named
//! collection of types, each holding methods with optional bodies. This
//! crate provides the in-memory model, the method locator, and the binary
//! `.gmod` format.
//!
//! # Architecture
//!
//! - **Model**: [`Module`] / [`TypeDef`] / [`MethodDef`], built
//!   programmatically via builder methods
//! - **Locator**: [`Module::find_method`] resolves a qualified type name,
//!   method name, and optional structural parameter signature; first match
//!   wins
//! - **Format**: zstd-compressed bincode payload with a CRC32 and a BLAKE3
//!   trailer checksum, read and written by [`read_module`] / [`write_module`]

pub mod error;
pub mod format;
pub mod module;

pub use error::{ModuleError, ModuleResult};
pub use format::{module_from_bytes, module_to_bytes, read_module, write_module};
pub use module::{signatures_match, MethodDef, Module, TypeDef};
