// Copyright 2025-2026 SIMCAT Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI module for SIMCAT catalog commands.
//!
//! Commands operate directly on a catalog built from the configured model
//! directory; no running server is required.
//!
//! ## Usage
//!
//! ```bash
//! simcat models list      # Scan the model directory and list models
//! simcat models digests   # List model digests only
//! simcat config show      # Show effective configuration
//! ```

pub mod config_cmd;
pub mod models_cmd;

pub use models_cmd::{run_digests, run_list};
