use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::model::Digest;
use crate::parser::{parse_cover_data, parse_digest};
use crate::render::{render_article, render_cover, RenderOptions};
use crate::snapshot::{self, SnapshotOptions};

pub const ARTICLE_EXTENSION: &str = "html";
pub const COVER_EXTENSION: &str = "cover.html";
pub const PNG_EXTENSION: &str = "png";

/// Output path used when none is given: the input with its extension replaced.
pub fn default_output(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

/// Markdown digest → inline-styled article HTML. Returns the parsed digest.
pub async fn convert_article(input: &Path, output: &Path, opts: &RenderOptions) -> io::Result<Digest> {
    let markdown = tokio::fs::read_to_string(input).await?;
    let digest = parse_digest(&markdown);
    let html = render_article(&digest, opts);
    tokio::fs::write(output, html).await?;
    info!("Wrote article {}", output.display());
    Ok(digest)
}

/// Markdown digest → 900×383 cover HTML.
pub async fn convert_cover(input: &Path, output: &Path, opts: &RenderOptions) -> io::Result<()> {
    let markdown = tokio::fs::read_to_string(input).await?;
    let data = parse_cover_data(&markdown);
    let html = render_cover(&data, opts);
    tokio::fs::write(output, html).await?;
    info!("Wrote cover {}", output.display());
    Ok(())
}

/// Cover HTML → PNG via headless browser.
pub async fn snapshot_cover(input: &Path, output: &Path, opts: &SnapshotOptions) -> anyhow::Result<()> {
    // Chromium renders an error page for a missing file instead of failing.
    tokio::fs::metadata(input).await?;
    snapshot::capture(input, output, opts).await
}
