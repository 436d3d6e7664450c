//! Periodic background refresh of the model catalog.
//!
//! A long-running service keeps the registry in sync with disk without
//! administrative calls. Failures are logged and retried on the next tick.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::catalog::ModelCatalog;

/// Spawn a task that refreshes `catalog` every `interval` until `token` is
/// cancelled. The first refresh happens after one full interval; callers
/// wanting an immediate load call [`ModelCatalog::refresh`] themselves first.
pub fn spawn_refresh_task(
    catalog: Arc<ModelCatalog>,
    root_dir: PathBuf,
    log_root_dir: PathBuf,
    interval: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await; // first tick fires immediately, skip it

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("catalog refresh task stopped");
                    return;
                }
                _ = ticker.tick() => {
                    // Refresh does blocking disk I/O; keep it off the async workers.
                    let catalog = catalog.clone();
                    let root = root_dir.clone();
                    let log_root = log_root_dir.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        catalog.refresh(&root, &log_root)
                    })
                    .await;

                    match result {
                        Ok(Ok(())) => {}
                        Ok(Err(err)) => {
                            warn!(error = %err, "periodic catalog refresh failed");
                        }
                        Err(err) => {
                            warn!(error = %err, "catalog refresh task panicked");
                        }
                    }
                }
            }
        }
    })
}
