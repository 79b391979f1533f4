//! Layered tool configuration.
//!
//! Built-in defaults, then `Seiship.toml`, then `SEISHIP_*` environment variables
//! (`__` separates nested keys, e.g. `SEISHIP_GUIDANCE__ASSET_DIR`). Command line flags
//! are applied on top by the binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::{ExplorerTable, GuidanceConfig, NetworkProfile};

/// The default name for the seiship configuration file.
pub const CONFIG_FILENAME: &str = "Seiship.toml";

/// Prefix of the environment variables overriding the configuration.
pub const ENV_PREFIX: &str = "SEISHIP_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeishipConfig {
    /// Name of the compiled contract to deploy.
    pub contract: String,
    /// Hardhat artifacts directory.
    pub artifacts: PathBuf,
    /// Directory the deployment records are written to.
    pub records_dir: PathBuf,
    /// Confirmations to wait for after inclusion.
    pub confirmations: u64,
    /// Give up waiting for the receipt after this many seconds. Waits forever when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_timeout_secs: Option<u64>,

    /// Deployable networks, in explorer lookup order.
    pub networks: Vec<NetworkProfile>,
    pub guidance: GuidanceConfig,
}

impl Default for SeishipConfig {
    fn default() -> Self {
        Self {
            contract: "AuctionMarketplace".to_string(),
            artifacts: PathBuf::from("artifacts"),
            records_dir: PathBuf::from("."),
            confirmations: 1,
            confirmation_timeout_secs: None,
            networks: NetworkProfile::defaults(),
            guidance: GuidanceConfig::default(),
        }
    }
}

impl SeishipConfig {
    /// Merge the configuration layers.
    ///
    /// With `path` set, that file must exist. Without it, `Seiship.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) if !path.exists() => {
                anyhow::bail!("Configuration file not found: {}", path.display())
            }
            Some(path) if path.is_dir() => path.join(CONFIG_FILENAME),
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILENAME),
        };

        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(&file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load configuration (file {})", file.display()))?;

        tracing::debug!(
            path = %file.display(),
            networks = config.networks.len(),
            "Configuration loaded"
        );

        Ok(config)
    }

    /// The profile of the named network.
    pub fn profile(&self, name: &str) -> Result<&NetworkProfile> {
        self.networks
            .iter()
            .find(|profile| profile.name == name)
            .with_context(|| {
                format!(
                    "Unknown network {}, available networks: {}",
                    name,
                    self.networks
                        .iter()
                        .map(|profile| profile.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }

    /// Explorer table built from the configured networks.
    pub fn explorers(&self) -> ExplorerTable {
        ExplorerTable::from_profiles(&self.networks)
    }

    /// Save the configuration to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }
}

/// Write the default configuration to `dir/Seiship.toml`, refusing to overwrite.
pub fn init_config_file(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILENAME);
    if path.exists() {
        anyhow::bail!("{} already exists, not overwriting it", path.display());
    }
    SeishipConfig::default().save_to_file(&path)?;
    Ok(path)
}
