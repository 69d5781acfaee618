use std::path::PathBuf;

use clap::Parser;
use digest_press::cli;
use digest_press::config::Settings;
use digest_press::convert::{self, ARTICLE_EXTENSION};

#[derive(Parser)]
#[command(name = "digest-html", about = "Convert a markdown digest into inline-styled article HTML")]
struct Cli {
    /// Digest markdown file
    input: Option<PathBuf>,
    /// Output HTML (default: input with .html)
    output: Option<PathBuf>,
    /// Also write the parsed digest as JSON
    #[arg(long)]
    model: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::init_tracing();
    let args = Cli::parse();
    let input = cli::require_input(args.input, "digest-html <input.md> [output.html]");
    let output = args
        .output
        .unwrap_or_else(|| convert::default_output(&input, ARTICLE_EXTENSION));

    let settings = Settings::load();
    let digest = convert::convert_article(&input, &output, &settings.render_options()).await?;

    if let Some(model_path) = args.model {
        let json = serde_json::to_string_pretty(&digest)?;
        tokio::fs::write(&model_path, json).await?;
        cli::print_done("Model", &model_path);
    }

    cli::print_done("Article", &output);
    Ok(())
}
