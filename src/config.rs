//! Configuration layering: defaults, then `config.json`, then environment,
//! then explicit overrides from the command line.

use anyhow::{Context, Result};

use crate::model::ClientConfig;
use crate::store::LocalStore;

pub const ENV_API_URL: &str = "SOCIALCTL_API_URL";
pub const ENV_TIMEOUT_MS: &str = "SOCIALCTL_TIMEOUT_MS";

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Reads `SOCIALCTL_API_URL` / `SOCIALCTL_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(ENV_API_URL).ok().filter(|s| !s.is_empty());
        let timeout_ms = match std::env::var(ENV_TIMEOUT_MS).ok().filter(|s| !s.is_empty()) {
            Some(v) => Some(
                v.parse()
                    .with_context(|| format!("parse {ENV_TIMEOUT_MS}={v}"))?,
            ),
            None => None,
        };
        Ok(Self {
            base_url,
            timeout_ms,
        })
    }

    /// Layers `other` on top of `self`; set fields in `other` win.
    pub fn or(self, other: ConfigOverrides) -> Self {
        Self {
            base_url: other.base_url.or(self.base_url),
            timeout_ms: other.timeout_ms.or(self.timeout_ms),
        }
    }
}

impl ClientConfig {
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(url) = &overrides.base_url {
            self.base_url = url.clone();
        }
        if let Some(ms) = overrides.timeout_ms {
            self.timeout_ms = ms;
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            anyhow::bail!("base_url must not be empty");
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            anyhow::bail!("base_url must be an http(s) URL: {}", self.base_url);
        }
        if self.timeout_ms == 0 {
            anyhow::bail!("timeout_ms must be greater than zero");
        }
        if self.upload.max_file_size == 0 {
            anyhow::bail!("upload.max_file_size must be greater than zero");
        }
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

/// Resolves the effective config for a state directory.
pub fn load(store: &LocalStore, overrides: &ConfigOverrides) -> Result<ClientConfig> {
    let base = store.read_config()?.unwrap_or_default();
    let cfg = base.with_overrides(overrides);
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
