//! Config validation CLI tool
//!
//! Validates an eventstatusd configuration file and reports any errors.

use eventstatus_util::{default_config_path, format_timestamp};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates an eventstatusd configuration file.");
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config {}", default_path.display());
            eprintln!("  validate-config config.example.toml");
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match eventstatus_config::load_config(&config_path) {
        Ok(catalog) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", eventstatus_config::CURRENT_CONFIG_VERSION);
            println!("  Socket: {}", catalog.service.socket_path.display());
            println!(
                "  Default review duration: {}h",
                catalog.service.default_review_duration_hours
            );
            println!("  Events: {}", catalog.events.len());

            if !catalog.events.is_empty() {
                println!();
                println!("Events:");
                for event in &catalog.events {
                    println!(
                        "  - {}: ends {}, review {}h",
                        event.group_id,
                        format_timestamp(&event.end_date),
                        event.review_duration_hours
                    );
                }
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                eventstatus_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                eventstatus_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                eventstatus_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                eventstatus_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        eventstatus_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
