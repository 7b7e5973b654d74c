//! Run configuration: battle and matchup defaults plus an optional catalog path.
//! Read from `--config <path>` or `WARBAND_CONFIG`; positional CLI arguments override it.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::combat::BattleConfig;
use crate::data::catalog::CatalogFormat;
use crate::error::{Result, WarbandError};
use crate::optimizer::MatchupConfig;

pub const CONFIG_ENV_VAR: &str = "WARBAND_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WarbandConfig {
    /// Catalog file; the built-in codex is used when absent.
    pub catalog: Option<String>,
    pub battle: BattleConfig,
    pub matchup: MatchupConfig,
}

impl WarbandConfig {
    pub fn parse_str(raw: &str, format: CatalogFormat) -> Result<Self> {
        match format {
            CatalogFormat::Json => serde_json::from_str(raw).map_err(|err| err.to_string()),
            CatalogFormat::Yaml => serde_yaml::from_str(raw).map_err(|err| err.to_string()),
        }
        .map_err(WarbandError::Config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = CatalogFormat::from_path(path).ok_or_else(|| {
            WarbandError::Config(format!(
                "unsupported config format '{}' (expected .json, .yaml or .yml)",
                path.display()
            ))
        })?;
        let raw = fs::read_to_string(path).map_err(|err| {
            WarbandError::Config(format!("unable to read '{}': {err}", path.display()))
        })?;
        Self::parse_str(&raw, format)
    }

    /// Explicit path first, then `WARBAND_CONFIG`, then defaults.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        let from_env = std::env::var(CONFIG_ENV_VAR).ok();
        match explicit.or(from_env.as_deref()) {
            Some(path) => {
                tracing::debug!("loading config from {path}");
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }
}
