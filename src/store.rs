use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};

use crate::model::{ClientConfig, PersistedTokens, non_empty};

const STORE_DIR: &str = ".socialctl";
const CONFIG_FILE: &str = "config.json";
const TOKENS_FILE: &str = "tokens.json";

/// Durable key-value storage for the session tokens.
///
/// Every call completes (and is durable) before it returns.
pub trait TokenStorage: Send + Sync {
    fn read_tokens(&self) -> Result<PersistedTokens>;

    fn write_access_token(&self, token: Option<&str>) -> Result<()>;

    fn write_refresh_token(&self, token: Option<&str>) -> Result<()>;

    fn clear_tokens(&self) -> Result<()>;

    fn access_token(&self) -> Result<Option<String>> {
        Ok(self.read_tokens()?.access().map(str::to_string))
    }
}

/// File-backed store rooted at a state directory (`~/.socialctl` by default).
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn default_dir() -> Result<PathBuf> {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .context("cannot locate home directory (pass --state-dir)")?;
        Ok(PathBuf::from(home).join(STORE_DIR))
    }

    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("create state dir {}", root.display()))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads `config.json`, or `None` if it has never been written.
    pub fn read_config(&self) -> Result<Option<ClientConfig>> {
        let path = self.root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).context("read config.json")?;
        let cfg: ClientConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported config version {}", cfg.version);
        }
        Ok(Some(cfg))
    }

    pub fn write_config(&self, cfg: &ClientConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join(CONFIG_FILE), &bytes).context("write config.json")?;
        Ok(())
    }

    fn write_tokens(&self, tokens: &PersistedTokens) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(tokens).context("serialize tokens")?;
        write_atomic(&self.root.join(TOKENS_FILE), &bytes).context("write tokens.json")?;
        Ok(())
    }

    fn update_tokens(&self, f: impl FnOnce(&mut PersistedTokens)) -> Result<()> {
        let mut tokens = self.read_tokens()?;
        f(&mut tokens);
        self.write_tokens(&tokens)
    }
}

impl TokenStorage for LocalStore {
    fn read_tokens(&self) -> Result<PersistedTokens> {
        let path = self.root.join(TOKENS_FILE);
        if !path.exists() {
            return Ok(PersistedTokens::empty());
        }
        let bytes = fs::read(&path).context("read tokens.json")?;
        let tokens: PersistedTokens =
            serde_json::from_slice(&bytes).context("parse tokens.json")?;
        if tokens.version != 1 {
            anyhow::bail!("unsupported token state version {}", tokens.version);
        }
        Ok(tokens)
    }

    fn write_access_token(&self, token: Option<&str>) -> Result<()> {
        self.update_tokens(|t| t.access_token = non_empty(token).map(str::to_string))
    }

    fn write_refresh_token(&self, token: Option<&str>) -> Result<()> {
        self.update_tokens(|t| t.refresh_token = non_empty(token).map(str::to_string))
    }

    fn clear_tokens(&self) -> Result<()> {
        self.write_tokens(&PersistedTokens::empty())
    }
}

/// In-process storage, for embedding and tests.
#[derive(Debug)]
pub struct MemoryStore {
    tokens: Mutex<PersistedTokens>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(PersistedTokens::empty()),
        }
    }

    pub fn with_access_token(token: &str) -> Self {
        let store = Self::new();
        store.lock().access_token = Some(token.to_string());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PersistedTokens> {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStorage for MemoryStore {
    fn read_tokens(&self) -> Result<PersistedTokens> {
        Ok(self.lock().clone())
    }

    fn write_access_token(&self, token: Option<&str>) -> Result<()> {
        self.lock().access_token = non_empty(token).map(str::to_string);
        Ok(())
    }

    fn write_refresh_token(&self, token: Option<&str>) -> Result<()> {
        self.lock().refresh_token = non_empty(token).map(str::to_string);
        Ok(())
    }

    fn clear_tokens(&self) -> Result<()> {
        *self.lock() = PersistedTokens::empty();
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
