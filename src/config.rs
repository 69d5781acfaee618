use std::path::PathBuf;
use std::time::Duration;

use ::config::{Config, Environment};
use serde::Deserialize;
use tracing::warn;

use crate::render::{RenderOptions, DEFAULT_BRAND, DEFAULT_CALL_TO_ACTION, DEFAULT_FOOTER_FILTER};
use crate::snapshot::SnapshotOptions;

const ENV_PREFIX: &str = "DIGEST";

/// Runtime settings, read from `DIGEST_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub brand: String,
    pub call_to_action: String,
    /// Empty string disables footer filtering.
    pub footer_filter: String,
    pub show_tag_cloud: bool,
    pub chromium_path: Option<PathBuf>,
    pub device_scale: f64,
    pub settle_ms: u64,
    pub load_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            brand: DEFAULT_BRAND.to_string(),
            call_to_action: DEFAULT_CALL_TO_ACTION.to_string(),
            footer_filter: DEFAULT_FOOTER_FILTER.to_string(),
            show_tag_cloud: true,
            chromium_path: None,
            device_scale: 2.0,
            settle_ms: 300,
            load_timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Load from the environment, falling back to defaults on any error.
    pub fn load() -> Settings {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Settings {
        let built = Config::builder()
            .add_source(env.try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize::<Settings>());
        match built {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Invalid {}_* settings, using defaults: {}", ENV_PREFIX, e);
                Settings::default()
            }
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            brand: self.brand.clone(),
            call_to_action: self.call_to_action.clone(),
            footer_filter: Some(self.footer_filter.clone()).filter(|f| !f.is_empty()),
            show_tag_cloud: self.show_tag_cloud,
        }
    }

    pub fn snapshot_options(&self) -> SnapshotOptions {
        SnapshotOptions {
            chromium_path: self.chromium_path.clone(),
            device_scale: self.device_scale,
            settle: Duration::from_millis(self.settle_ms),
            load_timeout: Duration::from_secs(self.load_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Settings::from_env(env(&[])), Settings::default());
    }

    #[test]
    fn reads_prefixed_vars() {
        let s = Settings::from_env(env(&[
            ("DIGEST_BRAND", "周报"),
            ("DIGEST_SHOW_TAG_CLOUD", "false"),
            ("DIGEST_DEVICE_SCALE", "3"),
            ("DIGEST_FOOTER_FILTER", ""),
        ]));
        assert_eq!(s.brand, "周报");
        assert!(!s.show_tag_cloud);
        assert_eq!(s.device_scale, 3.0);
        assert_eq!(s.render_options().footer_filter, None);
    }

    #[test]
    fn bad_value_falls_back() {
        let s = Settings::from_env(env(&[("DIGEST_SETTLE_MS", "soon")]));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn default_render_options_match() {
        assert_eq!(Settings::default().render_options(), RenderOptions::default());
    }
}
