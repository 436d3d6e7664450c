//! Store access seam: probing model store files and holding their connections.
//!
//! The catalog never talks to a store format directly; it consumes the
//! [`StoreProbe`] / [`StoreConnection`] traits. A JSON-manifest reference
//! implementation lives in [`manifest`].

pub mod manifest;

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use manifest::{ManifestProbe, StoreManifest, STORE_FILE_EXT};

/// Oldest store schema this runtime can read.
pub const MIN_SCHEMA_VERSION: u32 = 2;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid store format: {0}")]
    InvalidFormat(String),

    #[error("Incompatible store schema version {found} (minimum {min})")]
    IncompatibleSchema { found: u32, min: u32 },

    #[error("Store connection already closed")]
    AlreadyClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One model row as reported by a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRow {
    /// Content-derived identifier, unique per model version.
    pub digest: String,
    /// Human-readable model name (not necessarily unique).
    pub name: String,
    /// Language code the model designates as primary.
    pub default_lang_code: String,
}

/// One language row as reported by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRow {
    /// BCP-47-ish language code, e.g. "en" or "fr-CA".
    pub code: String,
    /// Display name of the language in that language.
    pub name: String,
}

/// Open connection to one store file.
///
/// Implementations report their schema version and the model/language rows
/// found inside. `close` releases whatever the connection holds; the catalog
/// guarantees it is invoked at most once per connection via [`StoreRecord`].
pub trait StoreConnection: Send + Sync {
    fn schema_version(&self) -> Result<u32, StoreError>;
    fn model_rows(&self) -> Result<Vec<ModelRow>, StoreError>;
    fn language_rows(&self) -> Result<Vec<LanguageRow>, StoreError>;
    fn close(&mut self) -> Result<(), StoreError>;
}

/// Opens a connection to a candidate store file.
pub trait StoreProbe: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn StoreConnection>, StoreError>;
}

/// Store-level resource record: owns the open connection for one store file.
///
/// Every catalog entry derived from a store references the same record, so a
/// connection shared by many model rows is released exactly once, when the
/// snapshot holding the record is retired.
pub struct StoreRecord {
    path: PathBuf,
    conn: Mutex<Option<Box<dyn StoreConnection>>>,
}

impl StoreRecord {
    pub fn new(path: PathBuf, conn: Box<dyn StoreConnection>) -> Self {
        Self {
            path,
            conn: Mutex::new(Some(conn)),
        }
    }

    /// Path of the store file this record was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against the live connection, if it has not been closed yet.
    ///
    /// This is the seam for loading full model metadata on demand: entries
    /// start with `meta_full == false` and a metadata layer re-reads the
    /// store through the entry's record when a caller asks for more than
    /// the basic snapshot.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&dyn StoreConnection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let guard = self.conn.lock();
        match guard.as_deref() {
            Some(conn) => f(conn),
            None => Err(StoreError::AlreadyClosed),
        }
    }

    /// Close the underlying connection. Exactly-once: the connection is taken
    /// out of the record, so a second call is a no-op returning `Ok`.
    pub fn close(&self) -> Result<(), StoreError> {
        let taken = self.conn.lock().take();
        match taken {
            Some(mut conn) => conn.close(),
            None => Ok(()),
        }
    }

    /// Whether the connection is still open.
    pub fn is_open(&self) -> bool {
        self.conn.lock().is_some()
    }
}

impl std::fmt::Debug for StoreRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreRecord")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .finish()
    }
}
