//! Merge modes and patch directives.

use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;
use crate::names::{QualifiedName, TypeRef};

/// How a patch method body is combined with a base method body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MergeMode {
    /// Patch instructions run before the base body.
    Prefix,
    /// Patch instructions run after the base body.
    Postfix,
    /// The patch body replaces the base body entirely.
    Replace,
    /// Patch instructions are spliced into the base body at a declared
    /// offset. Instruction-level only: variable tables are never merged
    /// under this mode.
    Custom,
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergeMode::Prefix => "prefix",
            MergeMode::Postfix => "postfix",
            MergeMode::Replace => "replace",
            MergeMode::Custom => "custom",
        };
        f.write_str(name)
    }
}

impl FromStr for MergeMode {
    type Err = TypeError;

    /// Parse a lowercase mode name. This is the single point where an
    /// unrecognized mode enters the system, and it is rejected here;
    /// everything downstream works over the closed enum.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prefix" => Ok(MergeMode::Prefix),
            "postfix" => Ok(MergeMode::Postfix),
            "replace" => Ok(MergeMode::Replace),
            "custom" => Ok(MergeMode::Custom),
            other => Err(TypeError::UnsupportedMergeMode(other.to_string())),
        }
    }
}

/// A declarative patching record: what to patch, where, and how.
///
/// Constructed once (usually from a manifest), consumed once per patch
/// application, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchDirective {
    /// Container-qualified name of the type holding the target method.
    pub target_type: QualifiedName,
    /// Name of the target method.
    pub target_method: String,
    /// Optional parameter-type signature for overload disambiguation.
    /// `None` means the first method with a matching name wins.
    pub parameter_signature: Option<Vec<TypeRef>>,
    pub mode: MergeMode,
    /// Insertion offset, meaningful only for [`MergeMode::Custom`].
    pub custom_offset: usize,
}

impl PatchDirective {
    pub fn new(
        target_type: QualifiedName,
        target_method: impl Into<String>,
        mode: MergeMode,
    ) -> Self {
        Self {
            target_type,
            target_method: target_method.into(),
            parameter_signature: None,
            mode,
            custom_offset: 0,
        }
    }

    /// Restrict the target lookup to a specific parameter signature.
    pub fn with_signature(mut self, signature: Vec<TypeRef>) -> Self {
        self.parameter_signature = Some(signature);
        self
    }

    /// Set the insertion offset for [`MergeMode::Custom`].
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.custom_offset = offset;
        self
    }
}
