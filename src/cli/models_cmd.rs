// Copyright 2025-2026 SIMCAT Contributors
// SPDX-License-Identifier: Apache-2.0

//! Models CLI subcommands: list, digests.
//!
//! Builds a catalog from the configured model directory, refreshes it once,
//! and prints what was found.

use crate::catalog::ModelBasic;
use crate::{CatalogRuntime, EnvConfig};

/// Run `models list`: scan the model directory and print a table.
///
/// Returns exit code: 0 on success, 2 on refresh failure.
pub fn run_list(config: EnvConfig) -> i32 {
    match scan(config) {
        Ok(models) => {
            print_models(&models);
            0
        }
        Err(e) => {
            eprintln!("Error refreshing model catalog: {}", e);
            eprintln!("Is SIMCAT_MODEL_DIR set to an existing directory?");
            2
        }
    }
}

/// Run `models digests`: scan and print one digest per line.
pub fn run_digests(config: EnvConfig) -> i32 {
    match scan(config) {
        Ok(models) => {
            for m in &models {
                println!("{}", m.digest);
            }
            0
        }
        Err(e) => {
            eprintln!("Error refreshing model catalog: {}", e);
            2
        }
    }
}

fn scan(config: EnvConfig) -> Result<Vec<ModelBasic>, crate::CatalogError> {
    let runtime = CatalogRuntime::new(config);
    runtime.refresh()?;
    Ok(runtime.catalog().all_basics())
}

/// Format and print model rows to stdout.
pub fn print_models(models: &[ModelBasic]) {
    if models.is_empty() {
        println!("No models found.");
        return;
    }

    println!("{:<28} {:<34} {:<6} {}", "NAME", "DIGEST", "LOGS", "BIN DIR");
    println!("{}", "-".repeat(84));

    for m in models {
        println!(
            "{:<28} {:<34} {:<6} {}",
            truncate(&m.name, 27),
            truncate(&m.digest, 33),
            if m.log_enabled { "on" } else { "off" },
            m.bin_dir.display(),
        );
    }

    println!("{}", "-".repeat(84));
    println!("{} model(s)", models.len());
}

/// First `max` characters of `s`. Cuts on a char boundary, so multibyte
/// names never split mid-character.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
