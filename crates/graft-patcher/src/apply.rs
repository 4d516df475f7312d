//! The locate, compose, install, serialize pipeline.

use std::path::Path;

use tracing::{debug, info};

use graft_merge::compose;
use graft_module::{read_module, write_module, Module, ModuleError};

use crate::error::PatchResult;
use crate::source::{PatchEntry, PatchSource};

/// Apply every entry of every source to `module`, in declaration order.
/// Returns the number of entries applied.
///
/// Fail-fast: the first failing entry aborts the whole call. Failures are
/// structural (missing method, bodyless target), never transient, so
/// nothing is retried.
pub fn apply_to_module(module: &mut Module, sources: &[PatchSource]) -> PatchResult<usize> {
    let mut applied = 0;
    for source in sources {
        for entry in &source.entries {
            apply_entry(module, &source.module, entry)?;
            applied += 1;
        }
    }
    Ok(applied)
}

/// Apply patches to the module at `source_path` and write the result to
/// `dest_path`: one load, N composes, one serialize.
///
/// Nothing is written unless every entry applies; a partially patched
/// artifact is never produced.
pub fn apply_patches(
    source_path: &Path,
    dest_path: &Path,
    sources: &[PatchSource],
) -> PatchResult<()> {
    let mut module = read_module(source_path)?;
    let applied = apply_to_module(&mut module, sources)?;
    write_module(&module, dest_path)?;
    info!(
        applied,
        dest = %dest_path.display(),
        "wrote patched module"
    );
    Ok(())
}

fn apply_entry(
    target: &mut Module,
    patch_module: &Module,
    entry: &PatchEntry,
) -> PatchResult<()> {
    let directive = &entry.directive;

    let patch_method =
        patch_module.find_method(&entry.patch_type, &entry.patch_method, None)?;
    let patch_body = patch_method
        .body
        .clone()
        .ok_or_else(|| ModuleError::MalformedBody {
            type_name: entry.patch_type.clone(),
            method: entry.patch_method.clone(),
        })?;

    for instruction in patch_body.instructions.iter() {
        debug!(%instruction, "patch instruction");
    }

    let method = target.find_method_mut(
        &directive.target_type,
        &directive.target_method,
        directive.parameter_signature.as_deref(),
    )?;
    let base_body = method.body.take().ok_or_else(|| ModuleError::MalformedBody {
        type_name: directive.target_type.clone(),
        method: directive.target_method.clone(),
    })?;

    method.body = Some(compose(base_body, patch_body, directive));

    info!(
        target_type = %directive.target_type,
        target_method = %directive.target_method,
        mode = %directive.mode,
        "applied patch"
    );
    Ok(())
}
