//! Persisted manifest forms.
//!
//! Two shapes go to disk: the minimal form consumed by downstream tooling
//! (`{version, facets: {name: {selectors}}}`) and the extended form, which
//! is the full [`Manifest`] including root, proofs, and `init_sequence`.
//! Both serialize with stable key order.

use crate::builder::Manifest;
use crate::error::ManifestError;
use serde::{Deserialize, Serialize};
use shared_types::Selector;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Minimal per-module record: selectors only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimalEntry {
    /// Hex-encoded selectors.
    pub selectors: Vec<String>,
}

/// The minimal manifest form consumed by downstream tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimalManifest {
    /// Version string.
    pub version: String,
    /// Module name → selectors.
    pub facets: BTreeMap<String, MinimalEntry>,
}

impl MinimalManifest {
    /// Projects a full manifest down to the minimal form.
    #[must_use]
    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self {
            version: manifest.version.clone(),
            facets: manifest
                .facets
                .iter()
                .map(|(name, entry)| {
                    (
                        name.clone(),
                        MinimalEntry {
                            selectors: entry.selectors.iter().map(Selector::to_hex).collect(),
                        },
                    )
                })
                .collect(),
        }
    }
}

/// Writes the extended manifest as pretty JSON.
pub fn save_manifest(manifest: &Manifest, path: &Path) -> Result<(), ManifestError> {
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(path, json)?;
    Ok(())
}

/// Reads an extended manifest back from JSON.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Writes the minimal manifest as pretty JSON.
pub fn save_minimal(manifest: &MinimalManifest, path: &Path) -> Result<(), ManifestError> {
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(path, json)?;
    Ok(())
}

/// Reads a minimal manifest, checking the version when one is expected.
pub fn load_minimal(
    path: &Path,
    expected_version: Option<&str>,
) -> Result<MinimalManifest, ManifestError> {
    let json = fs::read_to_string(path)?;
    let manifest: MinimalManifest = serde_json::from_str(&json)?;
    if let Some(expected) = expected_version {
        if manifest.version != expected {
            return Err(ManifestError::VersionMismatch {
                found: manifest.version,
                expected: expected.to_string(),
            });
        }
    }
    Ok(manifest)
}
