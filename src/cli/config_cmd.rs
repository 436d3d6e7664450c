// Copyright 2025-2026 SIMCAT Contributors
// SPDX-License-Identifier: Apache-2.0

//! Config CLI subcommands: show, defaults.
//!
//! These commands read configuration directly from environment variables.

use crate::config::{self, EffectiveConfig};

/// Print effective config as key-value pairs to stdout.
pub fn run_show() {
    let cfg = config::load().effective_config();
    print_config(&cfg);
}

/// Print documented default values to stdout.
pub fn run_defaults() {
    println!("SIMCAT_MODEL_DIR=models");
    println!("SIMCAT_MODEL_LOG_DIR=");
    println!("SIMCAT_REFRESH_INTERVAL=0");
    println!("SIMCAT_LOG_FORMAT=json");
    println!("SIMCAT_LOG_LEVEL=info");
    println!("SIMCAT_LOG_FILE=");
}

fn print_config(cfg: &EffectiveConfig) {
    println!("SIMCAT_MODEL_DIR={}", cfg.model_dir);
    println!("SIMCAT_MODEL_LOG_DIR={}", cfg.model_log_dir);
    println!("SIMCAT_REFRESH_INTERVAL={}", cfg.refresh_interval_secs);
    println!("SIMCAT_LOG_FORMAT={:?}", cfg.log_format);
    println!("SIMCAT_LOG_LEVEL={}", cfg.log_level);
    println!("SIMCAT_LOG_FILE={}", cfg.log_file);
}
