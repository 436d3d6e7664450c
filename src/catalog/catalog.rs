//! The model catalog: lock-protected registry with atomic refresh.
//!
//! One `ModelCatalog` instance is shared by every collaborator (request
//! handlers, the background refresh task, the CLI). All fields live behind a
//! single read-write lock, so directory configuration and the entry sequence
//! are always observed consistently together.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{info, warn};

use crate::store::{StoreError, StoreProbe, StoreRecord};

use super::builder::{build_snapshot, CatalogSnapshot};
use super::discovery::{discover_stores, DiscoveryError};
use super::entry::{ModelBasic, ModelEntry};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Model root directory not found or not accessible: {0}")]
    RootDirMissing(PathBuf),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// A previous snapshot's connection failed to close. The new registry
    /// state is installed regardless; callers should treat this as degraded,
    /// not corrupt.
    #[error("Close store connection failed: {0}")]
    CloseStore(#[source] StoreError),
}

struct CatalogState {
    root_dir: PathBuf,
    root_enabled: bool,
    log_root_dir: PathBuf,
    log_enabled: bool,
    entries: Vec<ModelEntry>,
    stores: Vec<Arc<StoreRecord>>,
}

impl CatalogState {
    /// Index of the entry with exactly this digest. Lock must be held.
    fn index_by_digest(&self, digest: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.digest == digest)
    }

    /// Index by digest, else first index by name. Lock must be held.
    ///
    /// One pass: an exact digest match returns immediately; otherwise the
    /// first name match (in current sequence order) is remembered. This lets
    /// callers pass either a precise digest or a convenient, possibly
    /// ambiguous, model name.
    fn index_by_digest_or_name(&self, token: &str) -> Option<usize> {
        let mut by_name = None;
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.digest == token {
                return Some(i);
            }
            if by_name.is_none() && entry.name == token {
                by_name = Some(i);
            }
        }
        by_name
    }
}

/// Concurrency-safe registry of simulation models discovered on disk.
pub struct ModelCatalog {
    probe: Box<dyn StoreProbe>,
    state: RwLock<CatalogState>,
}

impl ModelCatalog {
    /// Create an empty catalog using `probe` to open store files.
    pub fn new(probe: Box<dyn StoreProbe>) -> Self {
        Self {
            probe,
            state: RwLock::new(CatalogState {
                root_dir: PathBuf::new(),
                root_enabled: false,
                log_root_dir: PathBuf::new(),
                log_enabled: false,
                entries: Vec::new(),
                stores: Vec::new(),
            }),
        }
    }

    /// Rebuild the registry from current disk state and atomically replace
    /// the previous one.
    ///
    /// `root_dir` must exist; otherwise the call fails and the previous state
    /// stays fully live. `log_root_dir` is optional: if missing, run logging
    /// is disabled but refresh proceeds. Discovery and store probing run
    /// before the lock is taken, so concurrent readers keep seeing the old,
    /// fully consistent registry throughout the build. Connections of the
    /// superseded snapshot are closed after the swap; the first close failure
    /// is surfaced while the new state stays installed.
    pub fn refresh(&self, root_dir: &Path, log_root_dir: &Path) -> Result<(), CatalogError> {
        if !is_usable_dir(root_dir) {
            return Err(CatalogError::RootDirMissing(root_dir.to_path_buf()));
        }
        let log_enabled = is_usable_dir(log_root_dir);

        let paths = discover_stores(root_dir)?;
        let snapshot = build_snapshot(self.probe.as_ref(), &paths, log_root_dir, log_enabled);
        info!(
            stores = snapshot.stores.len(),
            models = snapshot.entries.len(),
            root = %root_dir.display(),
            "model catalog refreshed"
        );
        metrics::counter!("catalog_refresh_total").increment(1);
        metrics::gauge!("catalog_models").set(snapshot.entries.len() as f64);

        // Swap: after this block the old snapshot is only reachable here.
        let old = {
            let mut state = self.state.write();
            state.root_dir = root_dir.to_path_buf();
            state.root_enabled = true;
            state.log_root_dir = log_root_dir.to_path_buf();
            state.log_enabled = log_enabled;
            let old_entries = std::mem::replace(&mut state.entries, snapshot.entries);
            let old_stores = std::mem::replace(&mut state.stores, snapshot.stores);
            CatalogSnapshot {
                entries: old_entries,
                stores: old_stores,
            }
        };

        match close_stores(&old.stores) {
            Some(err) => Err(CatalogError::CloseStore(err)),
            None => Ok(()),
        }
    }

    /// Close every store connection and clear the registry.
    ///
    /// Every close is attempted regardless of earlier failures; the first
    /// error encountered is returned. Idempotent: a second call finds an
    /// empty registry and succeeds.
    pub fn close(&self) -> Result<(), CatalogError> {
        let mut state = self.state.write();
        let first_err = close_stores(&state.stores);
        state.entries.clear();
        state.stores.clear();
        match first_err {
            Some(err) => Err(CatalogError::CloseStore(err)),
            None => Ok(()),
        }
    }

    /// Configured model root directory and whether it is usable.
    pub fn root_dir(&self) -> (PathBuf, bool) {
        let state = self.state.read();
        (state.root_dir.clone(), state.root_enabled)
    }

    /// Configured default run-log directory and whether it is usable.
    pub fn log_root_dir(&self) -> (PathBuf, bool) {
        let state = self.state.read();
        (state.log_root_dir.clone(), state.log_enabled)
    }

    /// Number of models currently in the registry.
    pub fn model_count(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Digests of all models, in registry order.
    pub fn all_digests(&self) -> Vec<String> {
        let state = self.state.read();
        state.entries.iter().map(|e| e.digest.clone()).collect()
    }

    /// Basic info for all models, in registry order.
    pub fn all_basics(&self) -> Vec<ModelBasic> {
        let state = self.state.read();
        state.entries.iter().map(ModelEntry::basic).collect()
    }

    /// Basic info for the model with exactly this digest.
    pub fn basic_by_digest(&self, digest: &str) -> Option<ModelBasic> {
        let state = self.state.read();
        state
            .index_by_digest(digest)
            .map(|i| state.entries[i].basic())
    }

    /// Basic info by digest, else by first matching name.
    pub fn basic_by_digest_or_name(&self, token: &str) -> Option<ModelBasic> {
        let state = self.state.read();
        state
            .index_by_digest_or_name(token)
            .map(|i| state.entries[i].basic())
    }

    /// Ordered language codes (default first) for a model.
    pub fn language_codes(&self, digest: &str) -> Option<Vec<String>> {
        let state = self.state.read();
        state
            .index_by_digest(digest)
            .map(|i| state.entries[i].lang_codes.clone())
    }

    /// Best supported language code for an ordered preference list.
    pub fn match_language(&self, digest: &str, preferred: &[&str]) -> Option<String> {
        let state = self.state.read();
        let i = state.index_by_digest(digest)?;
        state.entries[i].matcher.matched(preferred).map(String::from)
    }
}

impl std::fmt::Debug for ModelCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("ModelCatalog")
            .field("root_dir", &state.root_dir)
            .field("models", &state.entries.len())
            .finish()
    }
}

/// A directory is usable if set, not the bare current-dir marker, and present.
fn is_usable_dir(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path != Path::new(".") && path.is_dir()
}

/// Close each store record, continuing past failures; first error returned.
fn close_stores(stores: &[Arc<StoreRecord>]) -> Option<StoreError> {
    let mut first_err = None;
    for record in stores {
        if let Err(err) = record.close() {
            warn!(
                path = %record.path().display(),
                error = %err,
                "close store connection failed"
            );
            if first_err.is_none() {
                first_err = Some(err);
            }
        }
    }
    first_err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{LanguageRow, ModelRow, StoreConnection};

    use super::super::language::LanguageMatcher;

    struct NopConn;

    impl StoreConnection for NopConn {
        fn schema_version(&self) -> Result<u32, StoreError> {
            Ok(crate::store::MIN_SCHEMA_VERSION)
        }
        fn model_rows(&self) -> Result<Vec<ModelRow>, StoreError> {
            Ok(vec![])
        }
        fn language_rows(&self) -> Result<Vec<LanguageRow>, StoreError> {
            Ok(vec![])
        }
        fn close(&mut self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn entry(digest: &str, name: &str) -> ModelEntry {
        ModelEntry {
            digest: digest.into(),
            name: name.into(),
            store: Arc::new(StoreRecord::new("x.mstore".into(), Box::new(NopConn))),
            bin_dir: PathBuf::from("bin"),
            log_dir: PathBuf::new(),
            log_enabled: false,
            lang_codes: vec!["en".into()],
            lang_meta: vec![],
            matcher: LanguageMatcher::new(["en"]),
            meta_full: false,
        }
    }

    fn state_with(entries: Vec<ModelEntry>) -> CatalogState {
        CatalogState {
            root_dir: PathBuf::new(),
            root_enabled: false,
            log_root_dir: PathBuf::new(),
            log_enabled: false,
            entries,
            stores: vec![],
        }
    }

    #[test]
    fn test_index_by_digest() {
        let state = state_with(vec![entry("d1", "One"), entry("d2", "Two")]);
        assert_eq!(state.index_by_digest("d2"), Some(1));
        assert_eq!(state.index_by_digest("nope"), None);
    }

    #[test]
    fn test_digest_preferred_over_name() {
        // An entry named like another entry's digest must not shadow it.
        let state = state_with(vec![entry("d1", "d2"), entry("d2", "Two")]);
        assert_eq!(state.index_by_digest_or_name("d2"), Some(1));
    }

    #[test]
    fn test_name_fallback_takes_first() {
        let state = state_with(vec![
            entry("d1", "Road"),
            entry("d2", "Road"),
        ]);
        assert_eq!(state.index_by_digest_or_name("Road"), Some(0));
        assert_eq!(state.index_by_digest_or_name("missing"), None);
    }

    #[test]
    fn test_usable_dir_rejects_empty_and_dot() {
        assert!(!is_usable_dir(Path::new("")));
        assert!(!is_usable_dir(Path::new(".")));
        assert!(!is_usable_dir(Path::new("/definitely/not/a/dir")));
    }
}
