//! TOML patch manifests.
//!
//! A manifest declares patch sources and their entries:
//!
//! ```toml
//! [[source]]
//! module = "hooks.gmod"
//!
//! [[source.patch]]
//! patch-type = "hooks.Damage"
//! patch-method = "clamp"
//! target-type = "game.Player"
//! target-method = "apply_damage"
//! mode = "prefix"
//!
//! [[source.patch]]
//! patch-type = "hooks.Damage"
//! patch-method = "audit"
//! target-type = "game.Player"
//! target-method = "apply_damage"
//! parameters = ["core.Int"]
//! mode = "custom"
//! offset = 2
//! ```
//!
//! Module paths are resolved relative to the manifest's directory.
//! `parameters` is optional (omitted means no overload disambiguation) and
//! `offset` defaults to 0. Mode strings go through
//! [`MergeMode::from_str`](graft_types::MergeMode), so an unrecognized mode
//! is rejected as `UnsupportedMergeMode` while the manifest is loaded, long
//! before any merge runs.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use graft_module::read_module;
use graft_types::{MergeMode, PatchDirective, QualifiedName, TypeRef};

use crate::error::{PatchError, PatchResult};
use crate::source::{PatchEntry, PatchSource};

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default, rename = "source")]
    sources: Vec<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    module: PathBuf,
    #[serde(default, rename = "patch")]
    patches: Vec<RawPatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawPatch {
    patch_type: String,
    patch_method: String,
    target_type: String,
    target_method: String,
    #[serde(default)]
    parameters: Option<Vec<String>>,
    mode: String,
    #[serde(default)]
    offset: usize,
}

/// Load a manifest and every patch module it references.
pub fn load_manifest(path: &Path) -> PatchResult<Vec<PatchSource>> {
    let manifest_err = |reason: String| PatchError::Manifest {
        path: path.display().to_string(),
        reason,
    };

    let text = std::fs::read_to_string(path).map_err(|e| manifest_err(e.to_string()))?;
    let raw: RawManifest = toml::from_str(&text).map_err(|e| manifest_err(e.to_string()))?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    raw.sources
        .into_iter()
        .map(|source| load_source(dir, source))
        .collect()
}

fn load_source(dir: &Path, raw: RawSource) -> PatchResult<PatchSource> {
    let module = read_module(&dir.join(&raw.module))?;
    let entries = raw
        .patches
        .into_iter()
        .map(entry_from_raw)
        .collect::<PatchResult<Vec<_>>>()?;
    Ok(PatchSource { module, entries })
}

fn entry_from_raw(raw: RawPatch) -> PatchResult<PatchEntry> {
    let mode: MergeMode = raw.mode.parse()?;
    let target_type: QualifiedName = raw.target_type.parse()?;
    let patch_type: QualifiedName = raw.patch_type.parse()?;

    let mut directive =
        PatchDirective::new(target_type, raw.target_method, mode).with_offset(raw.offset);
    if let Some(parameters) = raw.parameters {
        let signature = parameters
            .iter()
            .map(|p| p.parse::<TypeRef>())
            .collect::<Result<Vec<_>, _>>()?;
        directive = directive.with_signature(signature);
    }

    Ok(PatchEntry {
        patch_type,
        patch_method: raw.patch_method,
        directive,
    })
}
