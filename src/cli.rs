use std::path::{Path, PathBuf};
use std::process;

/// Same subscriber setup for every binary; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}

/// Unwrap the positional input, or print usage and exit 1.
pub fn require_input(input: Option<PathBuf>, usage: &str) -> PathBuf {
    match input {
        Some(path) => path,
        None => {
            eprintln!("Usage: {}", usage);
            process::exit(1);
        }
    }
}

pub fn print_done(what: &str, output: &Path) {
    println!("✅ {} written to {}", what, output.display());
}
