//! JSON manifest-backed store implementation.
//!
//! A `.mstore` file is a JSON document describing the models and languages a
//! store contains. This is the reference [`StoreProbe`] used by the CLI and
//! tests; production deployments plug in their own database-backed probe.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{LanguageRow, ModelRow, StoreConnection, StoreError, StoreProbe};

/// File extension identifying a model store.
pub const STORE_FILE_EXT: &str = "mstore";

/// Schema version written by this runtime.
pub const SCHEMA_VERSION: u32 = 3;

/// On-disk shape of a `.mstore` manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreManifest {
    pub schema_version: u32,
    #[serde(default)]
    pub models: Vec<ManifestModel>,
    #[serde(default)]
    pub languages: Vec<LanguageRow>,
}

/// One model declaration inside a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestModel {
    pub name: String,
    #[serde(default)]
    pub version: String,
    /// Content-derived digest. Optional: derived from name/version when absent.
    #[serde(default)]
    pub digest: String,
    #[serde(default)]
    pub default_lang_code: String,
}

impl StoreManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json)
            .map_err(|e| StoreError::InvalidFormat(format!("invalid manifest JSON: {}", e)))
    }

    /// Load a manifest from a file on disk.
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        if !path.is_file() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Hex sha256 over a model's identifying fields, used when a manifest row
/// carries no digest of its own.
pub fn derive_digest(name: &str, version: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(b"/");
    hasher.update(version.as_bytes());
    hex::encode(hasher.finalize())
}

/// Open connection over a parsed manifest.
///
/// The whole document is read eagerly at open time; row accessors never touch
/// the filesystem again.
pub struct ManifestConnection {
    manifest: StoreManifest,
    path: PathBuf,
    closed: bool,
}

impl StoreConnection for ManifestConnection {
    fn schema_version(&self) -> Result<u32, StoreError> {
        Ok(self.manifest.schema_version)
    }

    fn model_rows(&self) -> Result<Vec<ModelRow>, StoreError> {
        let rows = self
            .manifest
            .models
            .iter()
            .map(|m| ModelRow {
                digest: if m.digest.is_empty() {
                    derive_digest(&m.name, &m.version)
                } else {
                    m.digest.clone()
                },
                name: m.name.clone(),
                default_lang_code: m.default_lang_code.clone(),
            })
            .collect();
        Ok(rows)
    }

    fn language_rows(&self) -> Result<Vec<LanguageRow>, StoreError> {
        Ok(self.manifest.languages.clone())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        if self.closed {
            return Err(StoreError::AlreadyClosed);
        }
        self.closed = true;
        tracing::debug!(path = %self.path.display(), "closed store connection");
        Ok(())
    }
}

/// [`StoreProbe`] for `.mstore` manifest files.
#[derive(Debug, Default, Clone)]
pub struct ManifestProbe;

impl ManifestProbe {
    pub fn new() -> Self {
        Self
    }
}

impl StoreProbe for ManifestProbe {
    fn open(&self, path: &Path) -> Result<Box<dyn StoreConnection>, StoreError> {
        let manifest = StoreManifest::from_file(path)?;
        Ok(Box::new(ManifestConnection {
            manifest,
            path: path.to_path_buf(),
            closed: false,
        }))
    }
}
