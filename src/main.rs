//! SIMCAT entry point.
//!
//! Command dispatch for the model catalog CLI:
//!
//! - `simcat models list` - Scan the model directory and list models
//! - `simcat models digests` - List model digests only
//! - `simcat config show` - Show effective configuration
//! - `simcat config defaults` - Show documented defaults

use std::process::ExitCode;

use simcat_core::telemetry::{init_logging, LogFormat};
use simcat_core::{cli, config};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    let cfg = config::load();
    // CLI output goes to stdout; keep log lines human-readable on stderr.
    let log = simcat_core::telemetry::LogConfig {
        format: LogFormat::Pretty,
        ..cfg.log.clone()
    };
    if let Err(e) = init_logging(&log) {
        eprintln!("Warning: logging not initialized: {}", e);
    }

    match command {
        "models" => {
            let subcommand = args.get(2).map(|s| s.as_str()).unwrap_or("list");
            match subcommand {
                "list" => ExitCode::from(cli::run_list(cfg) as u8),
                "digests" => ExitCode::from(cli::run_digests(cfg) as u8),
                _ => {
                    eprintln!("Unknown models subcommand: {}", subcommand);
                    print_usage();
                    ExitCode::FAILURE
                }
            }
        }
        "config" => {
            let subcommand = args.get(2).map(|s| s.as_str()).unwrap_or("show");
            match subcommand {
                "show" => {
                    cli::config_cmd::run_show();
                    ExitCode::SUCCESS
                }
                "defaults" => {
                    cli::config_cmd::run_defaults();
                    ExitCode::SUCCESS
                }
                _ => {
                    eprintln!("Unknown config subcommand: {}", subcommand);
                    print_usage();
                    ExitCode::FAILURE
                }
            }
        }
        "version" | "--version" | "-V" => {
            println!("simcat {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "simcat - simulation model catalog v{}

USAGE:
    simcat [COMMAND] [SUBCOMMAND]

COMMANDS:
    models list      Scan the model directory and list models
    models digests   List model digests only
    config show      Show effective configuration
    config defaults  Show documented default values
    version          Show version information
    help             Show this help message

ENVIRONMENT:
    SIMCAT_MODEL_DIR         Root directory scanned for .mstore files (default: models)
    SIMCAT_MODEL_LOG_DIR     Run-log directory; empty disables run logs
    SIMCAT_REFRESH_INTERVAL  Periodic refresh interval in seconds (0 = off)
    SIMCAT_LOG_LEVEL         Tracing filter directives (default: info)

EXIT CODES:
    0  Success
    1  Usage error
    2  Catalog refresh failure
",
        version
    );
}
