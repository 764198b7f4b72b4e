//! Prints the identifiers stored back to back in a file.
//!
//! Usage: `dataident <file> [config]`
//!
//! Settings come from the given config file, or `dataident.toml` when present,
//! with `DATAIDENT__*` environment overrides. Logging honours `RUST_LOG` and
//! falls back to the configured `log_filter`.
use std::fs;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dataident::codec::read_identifier_with;
use dataident::settings::Settings;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: dataident <file> [config]");
        return ExitCode::from(2);
    };
    let config = args.next();

    let settings = match Settings::load(config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(%path, error = %e, "could not read file");
            return ExitCode::FAILURE;
        }
    };
    let mut remaining = bytes.as_slice();
    let mut count = 0usize;
    while !remaining.is_empty() {
        let offset = bytes.len() - remaining.len();
        match read_identifier_with(&mut remaining, &settings.codec) {
            Ok(identifier) => {
                println!("{:>8}  {}", offset, identifier);
                count += 1;
            }
            Err(e) => {
                error!(offset, error = %e, "stopped reading");
                return ExitCode::FAILURE;
            }
        }
    }
    info!(count, %path, "done");
    ExitCode::SUCCESS
}
