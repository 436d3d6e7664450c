//! Registry entry types: one record per unique model.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::{LanguageRow, StoreRecord};

use super::language::LanguageMatcher;

/// One unique model in the registry.
///
/// Holds the model's identity, the store record owning its connection, and
/// metadata derived at build time. Entries are immutable once installed; a
/// refresh replaces the whole sequence.
pub struct ModelEntry {
    /// Content-derived identifier, unique across the registry (dedup key).
    pub digest: String,
    /// Human-readable model name, not guaranteed unique.
    pub name: String,
    /// Store-level record owning the connection; shared by every entry that
    /// came from the same store file.
    pub store: Arc<StoreRecord>,
    /// Directory containing this model's executable artifacts.
    pub bin_dir: PathBuf,
    /// Configured run-log directory for this model.
    pub log_dir: PathBuf,
    /// Whether the run-log directory exists and is usable.
    pub log_enabled: bool,
    /// Supported language codes, default language first, rest in store order.
    pub lang_codes: Vec<String>,
    /// Full language metadata as reported by the store.
    pub lang_meta: Vec<LanguageRow>,
    /// Match structure built once from `lang_codes`.
    pub matcher: LanguageMatcher,
    /// Whether full model metadata has been loaded (lazily, elsewhere).
    pub meta_full: bool,
}

impl ModelEntry {
    /// Shallow public snapshot of this entry, safe to hand to callers.
    pub fn basic(&self) -> ModelBasic {
        ModelBasic {
            name: self.name.clone(),
            digest: self.digest.clone(),
            bin_dir: self.bin_dir.clone(),
            log_dir: self.log_dir.clone(),
            log_enabled: self.log_enabled,
        }
    }
}

impl std::fmt::Debug for ModelEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelEntry")
            .field("digest", &self.digest)
            .field("name", &self.name)
            .field("bin_dir", &self.bin_dir)
            .field("lang_codes", &self.lang_codes)
            .finish()
    }
}

/// Basic model info: identity and file locations, no live connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelBasic {
    pub name: String,
    pub digest: String,
    pub bin_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_enabled: bool,
}
