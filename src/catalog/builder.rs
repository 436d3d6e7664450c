//! Catalog builder: probe discovered stores and produce a deduplicated
//! snapshot of registry entries.
//!
//! Runs entirely outside the catalog lock; a slow disk or a large store set
//! never blocks readers of the previous registry.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::store::{
    LanguageRow, ModelRow, StoreProbe, StoreRecord, MIN_SCHEMA_VERSION,
};

use super::entry::ModelEntry;
use super::language::LanguageMatcher;

/// Fully built replacement state for the catalog: the deduplicated entry
/// sequence plus one record per store that contributed at least one entry.
pub(crate) struct CatalogSnapshot {
    pub entries: Vec<ModelEntry>,
    pub stores: Vec<Arc<StoreRecord>>,
}

impl CatalogSnapshot {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            stores: Vec::new(),
        }
    }
}

/// Build registry entries from discovered store paths, in discovery order.
///
/// Per-store failures (open, schema, empty model list, missing languages) are
/// logged and skipped; they never abort the build. A model digest already
/// accepted from an earlier path wins over later copies. Stores whose every
/// row is discarded are closed here rather than retained.
pub(crate) fn build_snapshot(
    probe: &dyn StoreProbe,
    paths: &[PathBuf],
    log_dir: &Path,
    log_enabled: bool,
) -> CatalogSnapshot {
    let mut snapshot = CatalogSnapshot::empty();
    let mut seen_digests: HashSet<String> = HashSet::new();

    for path in paths {
        let conn = match probe.open(path) {
            Ok(conn) => conn,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot open store, skipping");
                continue;
            }
        };

        let version = conn.schema_version().unwrap_or(0);
        if version < MIN_SCHEMA_VERSION {
            warn!(
                path = %path.display(),
                version,
                min = MIN_SCHEMA_VERSION,
                "incompatible store schema, skipping"
            );
            close_discarded(path, conn);
            continue;
        }

        let rows = match conn.model_rows() {
            Ok(rows) if !rows.is_empty() => rows,
            Ok(_) => {
                warn!(path = %path.display(), "empty store, no models found, skipping");
                close_discarded(path, conn);
                continue;
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read model list, skipping");
                close_discarded(path, conn);
                continue;
            }
        };

        let languages = match conn.language_rows() {
            Ok(langs) if !langs.is_empty() => langs,
            Ok(_) | Err(_) => {
                warn!(path = %path.display(), "no languages found in store, skipping");
                close_discarded(path, conn);
                continue;
            }
        };

        let bin_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let record = Arc::new(StoreRecord::new(path.clone(), conn));
        let mut accepted = 0usize;

        for row in rows {
            if seen_digests.contains(&row.digest) {
                info!(
                    name = %row.name,
                    digest = %row.digest,
                    path = %path.display(),
                    "model already present from another store, skipping duplicate"
                );
                continue;
            }
            seen_digests.insert(row.digest.clone());
            snapshot.entries.push(make_entry(
                row,
                &languages,
                record.clone(),
                bin_dir.clone(),
                log_dir.to_path_buf(),
                log_enabled,
            ));
            accepted += 1;
        }

        if accepted > 0 {
            snapshot.stores.push(record);
        } else {
            // Every row was a duplicate; nothing references this store.
            info!(path = %path.display(), "store contributed no entries, closing");
            if let Err(err) = record.close() {
                warn!(path = %path.display(), error = %err, "close store connection failed");
            }
        }
    }

    snapshot
}

/// Build one entry, ordering language codes default-first.
fn make_entry(
    row: ModelRow,
    languages: &[LanguageRow],
    store: Arc<StoreRecord>,
    bin_dir: PathBuf,
    log_dir: PathBuf,
    log_enabled: bool,
) -> ModelEntry {
    let mut codes: Vec<String> = Vec::with_capacity(languages.len());
    for lang in languages {
        if lang.code == row.default_lang_code {
            codes.insert(0, lang.code.clone());
        } else {
            codes.push(lang.code.clone());
        }
    }
    let matcher = LanguageMatcher::new(codes.iter().cloned());

    ModelEntry {
        digest: row.digest,
        name: row.name,
        store,
        bin_dir,
        log_dir,
        log_enabled,
        lang_codes: codes,
        lang_meta: languages.to_vec(),
        matcher,
        meta_full: false,
    }
}

fn close_discarded(path: &Path, mut conn: Box<dyn crate::store::StoreConnection>) {
    if let Err(err) = conn.close() {
        warn!(path = %path.display(), error = %err, "close store connection failed");
    }
}
