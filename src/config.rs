//! Configuration Management
//!
//! Handles persistent configuration storage for the cma CLI.

use anyhow::{Context, Result};
use cma::api::auth::ACCESS_TOKEN_ENV;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the default organization
pub const ORGANIZATION_ENV: &str = "CONTENTFUL_ORGANIZATION";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Management access token
    #[serde(default)]
    pub access_token: Option<String>,
    /// API host override
    #[serde(default)]
    pub host: Option<String>,
    /// Use plain HTTP
    #[serde(default)]
    pub insecure: bool,
    /// Organization new spaces are created in
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Last used space
    #[serde(default)]
    pub space_id: Option<String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cma").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a given file; missing or invalid files yield defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config file {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(())
    }

    /// Get effective access token (CLI > config > environment)
    pub fn effective_token(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| self.access_token.clone())
            .or_else(|| std::env::var(ACCESS_TOKEN_ENV).ok())
            .filter(|t| !t.trim().is_empty())
    }

    /// Get effective organization (CLI > config > environment)
    pub fn effective_organization(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| self.organization_id.clone())
            .or_else(|| std::env::var(ORGANIZATION_ENV).ok())
            .filter(|o| !o.trim().is_empty())
    }

    /// Get effective space (CLI > last used)
    pub fn effective_space(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| self.space_id.clone())
            .filter(|s| !s.trim().is_empty())
    }

    /// Remember the last used space and save
    pub fn set_space(&mut self, space_id: &str) -> Result<()> {
        self.space_id = Some(space_id.to_string());
        self.save()
    }
}
