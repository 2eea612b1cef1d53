use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use legis_core::{jurisdiction, ConfigError, LocationContext};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub location: LocationContext,
    pub storage: StorageConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_root: String,
}

/// Base-URL overrides keyed by jurisdiction name. Consulted before the
/// built-in table, so future jurisdictions can be added without a rebuild.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_urls: BTreeMap<String, String>,
}

/// Configuration after one-time validation: the jurisdiction is known to be
/// supported and the storage directory is fully resolved.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub location: LocationContext,
    pub base_url: String,
    pub storage_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: LocationContext::new("oregon", "lane_county", None),
            storage: StorageConfig {
                data_root: "legislative_data".to_string(),
            },
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse legis.toml")?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Load the config, writing defaults first when the file does not exist.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }
        let cfg = Self::default();
        cfg.save_to(path)?;
        Ok(cfg)
    }

    /// Validate once, before any network or filesystem work. An unsupported
    /// jurisdiction is the only typed failure here.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let base_url = match self.api.base_urls.get(&self.location.jurisdiction) {
            Some(url) => url.clone(),
            None => jurisdiction::base_url(&self.location.jurisdiction)?.to_string(),
        };
        let data_root = shellexpand::tilde(&self.storage.data_root).to_string();
        let storage_dir = self.location.storage_dir(Path::new(&data_root));
        Ok(ResolvedConfig {
            location: self.location.clone(),
            base_url,
            storage_dir,
        })
    }
}
