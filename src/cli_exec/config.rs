use anyhow::{Context, Result};

use socialctl::config;

use super::*;
use crate::ConfigCommands;

pub(super) fn handle_config_command(
    store: &LocalStore,
    overrides: &ConfigOverrides,
    json: bool,
    command: ConfigCommands,
) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let cfg = config::load(store, overrides)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&cfg).context("serialize config json")?
                );
            } else {
                println!("state_dir: {}", store.root().display());
                println!("url: {}", cfg.base_url);
                println!("timeout_ms: {}", cfg.timeout_ms);
                println!("max_upload_bytes: {}", cfg.upload.max_file_size);
            }
        }
        ConfigCommands::Set { url, timeout_ms } => {
            let cfg = store.read_config()?.unwrap_or_default();
            let cfg = cfg.with_overrides(&ConfigOverrides {
                base_url: url,
                timeout_ms,
            });
            cfg.validate()?;
            store.write_config(&cfg)?;
            println!("Configuration saved");
        }
    }
    Ok(())
}
