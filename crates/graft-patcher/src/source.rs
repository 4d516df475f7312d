//! Patch sources: a compiled patch module plus the directives drawn from it.

use graft_module::Module;
use graft_types::{PatchDirective, QualifiedName};

/// One patch to apply: where the patch body lives in its module, and the
/// directive describing the target and merge mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchEntry {
    /// Qualified name of the type holding the patch method.
    pub patch_type: QualifiedName,
    /// Name of the patch method inside `patch_type`.
    pub patch_method: String,
    pub directive: PatchDirective,
}

/// A compiled patch module and the explicit list of patches drawn from it.
///
/// The list is constructed statically by the caller (usually from a
/// manifest); the core never discovers patches by introspection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchSource {
    pub module: Module,
    pub entries: Vec<PatchEntry>,
}

impl PatchSource {
    pub fn new(module: Module) -> Self {
        Self {
            module,
            entries: Vec::new(),
        }
    }

    /// Append an entry, builder style.
    pub fn with_entry(mut self, entry: PatchEntry) -> Self {
        self.entries.push(entry);
        self
    }
}
