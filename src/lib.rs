//! SIMCAT model catalog core.
//!
//! A concurrency-safe registry of simulation models discovered on disk. Store
//! files are found under a configured root directory, probed through the
//! [`store::StoreProbe`] seam, deduplicated by content digest, and exposed to
//! concurrent callers through atomic lookup/refresh operations.
//!
//! # Guarantees
//!
//! - A refresh builds the replacement registry entirely outside the catalog
//!   lock; readers see the old state until the swap, never a torn one.
//! - Model digests are unique across the registry: the first copy found in
//!   path-sort order wins when stores are mirrored.
//! - Each store connection is owned by exactly one snapshot and closed
//!   exactly once, when that snapshot is retired.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod store;
pub mod telemetry;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

pub use catalog::{CatalogError, ModelBasic, ModelCatalog};
pub use config::EnvConfig;
pub use store::{ManifestProbe, StoreProbe};

/// Wired-up catalog service: the shared catalog plus its configuration.
///
/// Collaborators receive the [`ModelCatalog`] by `Arc`, never through process
/// globals.
pub struct CatalogRuntime {
    config: EnvConfig,
    catalog: Arc<ModelCatalog>,
}

impl CatalogRuntime {
    /// Create a runtime using the manifest-file store probe.
    pub fn new(config: EnvConfig) -> Self {
        Self::with_probe(config, Box::new(ManifestProbe::new()))
    }

    /// Create a runtime with a custom store probe (e.g. a database layer).
    pub fn with_probe(config: EnvConfig, probe: Box<dyn StoreProbe>) -> Self {
        Self {
            config,
            catalog: Arc::new(ModelCatalog::new(probe)),
        }
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn catalog(&self) -> Arc<ModelCatalog> {
        self.catalog.clone()
    }

    /// Refresh the catalog from the configured directories.
    pub fn refresh(&self) -> Result<(), CatalogError> {
        self.catalog
            .refresh(&self.config.model_dir, &self.config.model_log_dir)
    }

    /// Start the periodic refresh task if an interval is configured.
    ///
    /// Returns the cancellation token controlling the task, or `None` when
    /// `refresh_interval` is zero.
    pub fn spawn_auto_refresh(&self) -> Option<CancellationToken> {
        if self.config.refresh_interval.is_zero() {
            return None;
        }
        let token = CancellationToken::new();
        catalog::auto::spawn_refresh_task(
            self.catalog(),
            self.config.model_dir.clone(),
            self.config.model_log_dir.clone(),
            self.config.refresh_interval,
            token.clone(),
        );
        Some(token)
    }
}
