//! Store-file discovery: walk a model root directory for `.mstore` files.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

use crate::store::STORE_FILE_EXT;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Model root directory not accessible: {path}: {source}")]
    RootNotAccessible {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// List every store file under `root`, lexicographically sorted by path.
///
/// Extension matching is case-insensitive. A traversal failure at the root is
/// fatal; failures on sub-paths (e.g. permission denied on a subdirectory) are
/// logged and skipped. Path sort order is a deliberate policy: it makes "which
/// copy wins" deterministic when the same model digest appears in several
/// stores, and matches name-sorted order under the common naming convention.
pub fn discover_stores(root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut paths: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                if err.depth() == 0 {
                    return Err(DiscoveryError::RootNotAccessible {
                        path: root.to_path_buf(),
                        source: err,
                    });
                }
                warn!(
                    path = %err.path().unwrap_or(root).display(),
                    error = %err,
                    "skipping unreadable path during store discovery"
                );
                continue;
            }
        };

        if entry.file_type().is_file() && has_store_ext(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    paths.sort();
    Ok(paths)
}

fn has_store_ext(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(STORE_FILE_EXT))
        .unwrap_or(false)
}
