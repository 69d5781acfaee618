use std::path::PathBuf;

use clap::Parser;
use digest_press::cli;
use digest_press::config::Settings;
use digest_press::convert::{self, PNG_EXTENSION};

#[derive(Parser)]
#[command(name = "digest-cover-png", about = "Screenshot a cover HTML file into a PNG")]
struct Cli {
    /// Cover HTML file
    input: Option<PathBuf>,
    /// Output PNG (default: input with .png)
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::init_tracing();
    let args = Cli::parse();
    let input = cli::require_input(args.input, "digest-cover-png <cover.html> [output.png]");
    let output = args
        .output
        .unwrap_or_else(|| convert::default_output(&input, PNG_EXTENSION));

    let settings = Settings::load();
    convert::snapshot_cover(&input, &output, &settings.snapshot_options()).await?;
    cli::print_done("Cover image", &output);
    Ok(())
}
