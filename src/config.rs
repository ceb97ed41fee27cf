// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregate::RETURN_MULTIPLIER;
use crate::error::LedgerError;
use crate::models::Currency;
use crate::store::DEFAULT_CHANNEL;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Goldbook", "goldbook"));

const CONFIG_FILE: &str = "goldbook.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub default_currency: Currency,
    pub channel_placeholder: String,
    pub return_multiplier: Decimal,
    pub seed_demo_data: bool,
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: Currency::Twd,
            channel_placeholder: DEFAULT_CHANNEL.to_string(),
            return_multiplier: RETURN_MULTIPLIER,
            seed_demo_data: true,
            recent_limit: 3,
        }
    }
}

impl Config {
    pub fn validate(&self) -> std::result::Result<(), LedgerError> {
        if self.return_multiplier <= Decimal::ZERO {
            return Err(LedgerError::Config(format!(
                "return_multiplier must be positive, got {}",
                self.return_multiplier
            )));
        }
        if self.channel_placeholder.trim().is_empty() {
            return Err(LedgerError::Config("channel_placeholder must not be empty".into()));
        }
        Ok(())
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(s).context("Failed to parse config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read config at {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config at {}", path.display()))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join(CONFIG_FILE))
}

/// An explicit path must exist; the default location falls back to defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::from_path(path);
    }
    let path = config_path()?;
    if path.exists() {
        Config::from_path(&path)
    } else {
        Ok(Config::default())
    }
}
