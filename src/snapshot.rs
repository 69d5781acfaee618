//! Rasterize the cover card with headless Chromium.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, CaptureScreenshotParams};
use chromiumoxide::Page;
use futures::StreamExt;
use tracing::{debug, info, warn};
use url::Url;

use crate::render::cover::{COVER_HEIGHT, COVER_WIDTH};

const READY_SCRIPT: &str = r#"
    (function() {
        return {
            readyState: document.readyState,
            imagesLoaded: Array.from(document.images).every(img => img.complete)
        };
    })()
"#;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotOptions {
    /// Explicit browser binary; chromiumoxide's own lookup is used otherwise.
    pub chromium_path: Option<PathBuf>,
    pub device_scale: f64,
    /// Grace period after load before capturing, standing in for network idle.
    pub settle: Duration,
    pub load_timeout: Duration,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        SnapshotOptions {
            chromium_path: None,
            device_scale: 2.0,
            settle: Duration::from_millis(300),
            load_timeout: Duration::from_secs(10),
        }
    }
}

/// Capture `html_path` at the cover viewport and write a PNG to `png_path`.
pub async fn capture(html_path: &Path, png_path: &Path, opts: &SnapshotOptions) -> Result<()> {
    let abs = std::path::absolute(html_path)?;
    let url = Url::from_file_path(&abs)
        .map_err(|_| anyhow!("Cannot build file URL for {}", abs.display()))?;

    let mut builder = BrowserConfig::builder()
        .window_size(COVER_WIDTH, COVER_HEIGHT)
        .arg("--hide-scrollbars")
        .arg("--no-first-run");
    if let Some(path) = &opts.chromium_path {
        builder = builder.chrome_executable(path);
    }
    let config = builder.build().map_err(anyhow::Error::msg)?;

    info!("Launching headless browser for {}", url);
    let (mut browser, mut handler) = Browser::launch(config).await?;
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                debug!("Browser handler error: {}", e);
            }
        }
    });

    let result = shoot(&browser, url.as_str(), opts).await;

    if let Err(e) = browser.close().await {
        warn!("Browser did not close cleanly: {}", e);
    }
    if let Err(e) = handler_task.await {
        debug!("Browser handler task ended abnormally: {}", e);
    }

    let png = result?;
    tokio::fs::write(png_path, &png).await?;
    info!("Wrote {} ({} bytes)", png_path.display(), png.len());
    Ok(())
}

async fn shoot(browser: &Browser, url: &str, opts: &SnapshotOptions) -> Result<Vec<u8>> {
    let page = browser.new_page("about:blank").await?;
    page.execute(
        SetDeviceMetricsOverrideParams::builder()
            .width(COVER_WIDTH as i64)
            .height(COVER_HEIGHT as i64)
            .device_scale_factor(opts.device_scale)
            .mobile(false)
            .build()
            .map_err(anyhow::Error::msg)?,
    )
    .await?;

    page.goto(url).await?;
    wait_for_load(&page, opts.load_timeout).await;
    tokio::time::sleep(opts.settle).await;

    let params = CaptureScreenshotParams {
        format: Some(CaptureScreenshotFormat::Png),
        ..Default::default()
    };
    let png = page.screenshot(params).await?;
    Ok(png)
}

/// Poll until the document and its images report complete, or give up at `timeout`.
async fn wait_for_load(page: &Page, timeout: Duration) {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if let Ok(result) = page.evaluate(READY_SCRIPT).await {
            if let Ok(value) = result.into_value::<serde_json::Value>() {
                let complete = value.get("readyState").and_then(|v| v.as_str()) == Some("complete");
                let images = value
                    .get("imagesLoaded")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
                if complete && images {
                    debug!("Cover loaded after {:?}", start.elapsed());
                    return;
                }
            }
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    warn!("Cover not fully loaded after {:?}, capturing anyway", timeout);
}
