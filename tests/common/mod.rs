//! Shared test support: a scripted store probe with close accounting.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use simcat_core::store::{
    LanguageRow, ModelRow, StoreConnection, StoreError, StoreProbe,
};

/// What the probe should report for one path.
#[derive(Clone)]
pub enum StoreSpec {
    /// `open` fails outright.
    OpenFails,
    /// A store with the given contents.
    Store {
        schema: u32,
        models: Vec<ModelRow>,
        languages: Vec<LanguageRow>,
        close_fails: bool,
    },
}

struct Inner {
    specs: Mutex<HashMap<PathBuf, StoreSpec>>,
    closes: Mutex<HashMap<PathBuf, usize>>,
    opens: AtomicUsize,
    open_delay: Mutex<Option<Duration>>,
}

/// Scripted [`StoreProbe`]. Clones share state, so tests can hand one clone
/// to the catalog and keep another to inspect open/close counts.
#[derive(Clone)]
pub struct MockProbe {
    inner: Arc<Inner>,
}

impl MockProbe {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                specs: Mutex::new(HashMap::new()),
                closes: Mutex::new(HashMap::new()),
                opens: AtomicUsize::new(0),
                open_delay: Mutex::new(None),
            }),
        }
    }

    /// Script a healthy store at `path`.
    ///
    /// `models` are `(digest, name, default_lang_code)` triples; `languages`
    /// are `(code, display_name)` pairs.
    pub fn add_store(
        &self,
        path: impl Into<PathBuf>,
        models: &[(&str, &str, &str)],
        languages: &[(&str, &str)],
    ) {
        self.add_store_spec(
            path,
            StoreSpec::Store {
                schema: simcat_core::store::MIN_SCHEMA_VERSION,
                models: models
                    .iter()
                    .map(|(digest, name, lang)| ModelRow {
                        digest: digest.to_string(),
                        name: name.to_string(),
                        default_lang_code: lang.to_string(),
                    })
                    .collect(),
                languages: languages
                    .iter()
                    .map(|(code, name)| LanguageRow {
                        code: code.to_string(),
                        name: name.to_string(),
                    })
                    .collect(),
                close_fails: false,
            },
        );
    }

    pub fn add_store_spec(&self, path: impl Into<PathBuf>, spec: StoreSpec) {
        self.inner.specs.lock().unwrap().insert(path.into(), spec);
    }

    /// Delay every `open` call; used to hold a refresh in its build phase.
    pub fn set_open_delay(&self, delay: Duration) {
        *self.inner.open_delay.lock().unwrap() = Some(delay);
    }

    pub fn open_count(&self) -> usize {
        self.inner.opens.load(Ordering::SeqCst)
    }

    pub fn close_count(&self, path: impl AsRef<Path>) -> usize {
        self.inner
            .closes
            .lock()
            .unwrap()
            .get(path.as_ref())
            .copied()
            .unwrap_or(0)
    }

    pub fn total_closes(&self) -> usize {
        self.inner.closes.lock().unwrap().values().sum()
    }
}

impl StoreProbe for MockProbe {
    fn open(&self, path: &Path) -> Result<Box<dyn StoreConnection>, StoreError> {
        if let Some(delay) = *self.inner.open_delay.lock().unwrap() {
            std::thread::sleep(delay);
        }
        self.inner.opens.fetch_add(1, Ordering::SeqCst);

        let spec = self
            .inner
            .specs
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_path_buf()))?;

        match spec {
            StoreSpec::OpenFails => Err(StoreError::InvalidFormat(format!(
                "scripted open failure: {}",
                path.display()
            ))),
            StoreSpec::Store {
                schema,
                models,
                languages,
                close_fails,
            } => Ok(Box::new(MockConnection {
                path: path.to_path_buf(),
                schema,
                models,
                languages,
                close_fails,
                inner: self.inner.clone(),
            })),
        }
    }
}

struct MockConnection {
    path: PathBuf,
    schema: u32,
    models: Vec<ModelRow>,
    languages: Vec<LanguageRow>,
    close_fails: bool,
    inner: Arc<Inner>,
}

impl StoreConnection for MockConnection {
    fn schema_version(&self) -> Result<u32, StoreError> {
        Ok(self.schema)
    }

    fn model_rows(&self) -> Result<Vec<ModelRow>, StoreError> {
        Ok(self.models.clone())
    }

    fn language_rows(&self) -> Result<Vec<LanguageRow>, StoreError> {
        Ok(self.languages.clone())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        *self
            .inner
            .closes
            .lock()
            .unwrap()
            .entry(self.path.clone())
            .or_insert(0) += 1;
        if self.close_fails {
            return Err(StoreError::InvalidFormat(format!(
                "scripted close failure: {}",
                self.path.display()
            )));
        }
        Ok(())
    }
}

/// Create `name.mstore` under `dir` with the given JSON content.
pub fn write_store_file(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(format!("{}.mstore", name));
    std::fs::write(&path, json).unwrap();
    path
}

/// Minimal valid manifest JSON for one model.
pub fn manifest_json(digest: &str, name: &str, default_lang: &str) -> String {
    format!(
        r#"{{
            "schema_version": 3,
            "models": [
                {{"name": "{name}", "version": "1.0", "digest": "{digest}", "default_lang_code": "{default_lang}"}}
            ],
            "languages": [
                {{"code": "en", "name": "English"}},
                {{"code": "fr", "name": "Français"}},
                {{"code": "de", "name": "Deutsch"}}
            ]
        }}"#
    )
}
