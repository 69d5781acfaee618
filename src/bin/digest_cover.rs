use std::path::PathBuf;

use clap::Parser;
use digest_press::cli;
use digest_press::config::Settings;
use digest_press::convert::{self, COVER_EXTENSION, PNG_EXTENSION};

#[derive(Parser)]
#[command(name = "digest-cover", about = "Render the 900x383 cover card HTML for a markdown digest")]
struct Cli {
    /// Digest markdown file
    input: Option<PathBuf>,
    /// Output HTML (default: input with .cover.html)
    output: Option<PathBuf>,
    /// Also rasterize the cover to PNG next to the HTML
    #[arg(long)]
    png: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::init_tracing();
    let args = Cli::parse();
    let input = cli::require_input(args.input, "digest-cover <input.md> [output.html]");
    let output = args
        .output
        .unwrap_or_else(|| convert::default_output(&input, COVER_EXTENSION));

    let settings = Settings::load();
    convert::convert_cover(&input, &output, &settings.render_options()).await?;
    cli::print_done("Cover", &output);

    if args.png {
        let png = convert::default_output(&output, PNG_EXTENSION);
        convert::snapshot_cover(&output, &png, &settings.snapshot_options()).await?;
        cli::print_done("Cover image", &png);
    }
    Ok(())
}
