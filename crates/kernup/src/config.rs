// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Kernup.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Configuration module for kernup

use crate::error::{KernupError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_archive_url() -> String {
    "https://kernel.ubuntu.com/~kernel-ppa/mainline".to_string()
}

fn default_5() -> usize {
    5
}

fn default_staging_dir() -> PathBuf {
    PathBuf::from("/var/tmp")
}

fn default_cleanup_tool() -> PathBuf {
    PathBuf::from("/usr/local/bin/kclean.sh")
}

/// Immutable run configuration, loaded once and passed by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the mainline kernel archive
    #[serde(default = "default_archive_url")]
    pub archive_url: String,

    /// Number of newest kernels to list by default
    #[serde(default = "default_5")]
    pub list_count: usize,

    /// Directory where downloaded .deb packages are staged
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    /// Privileged cleanup script for removing old kernels
    #[serde(default = "default_cleanup_tool")]
    pub cleanup_tool: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_url: default_archive_url(),
            list_count: 5,
            staging_dir: default_staging_dir(),
            cleanup_tool: default_cleanup_tool(),
        }
    }
}

/// Resolved path of the user's config file, if a config dir exists.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kernup").join("config.json"))
}

/// Load the config file, creating it with defaults on first run.
pub fn load_config() -> Result<Config> {
    match config_path() {
        Some(path) => load_from(&path),
        None => Ok(Config::default()),
    }
}

pub(crate) fn load_from(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| KernupError::Config(format!("failed to parse {}: {e}", path.display())))
    } else {
        // Create with defaults
        let config = Config::default();
        save_config(&config, path)?;
        Ok(config)
    }
}

pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("tmp");
    let content = serde_json::to_string_pretty(config)?;

    // Atomic write
    std::fs::write(&temp_path, content)?;
    std::fs::rename(&temp_path, path)?;

    Ok(())
}
