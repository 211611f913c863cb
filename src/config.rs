//! Widget configuration

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::model::Category;

/// Environment variable pointing at a JSON config file
pub const CONFIG_ENV: &str = "REQUESTARR_CARD_CONFIG";

pub const DEFAULT_HEADER: &str = "Media Requests";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub header: String,
    pub debounce_ms: u64,
    pub min_query_len: usize,
    pub default_category: Category,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            default_category: Category::Film,
        }
    }
}

impl CardConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CardConfig = serde_json::from_str(json).context("invalid card config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Loads from [`CONFIG_ENV`] if set, defaults otherwise
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.debounce_ms == 0 {
            bail!("debounce_ms must be greater than zero");
        }
        Ok(())
    }
}
