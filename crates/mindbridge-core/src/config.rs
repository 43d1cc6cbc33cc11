use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{MindbridgeError, Result};
use crate::types::Coordinate;

/// Top-level configuration for MindBridge.
///
/// Loaded from `~/.mindbridge/config.toml` by default. Every section falls
/// back to its defaults when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MindbridgeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl MindbridgeConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// fallback coordinate is out of range.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MindbridgeConfig = toml::from_str(&content)?;
        config.discovery.fallback_coordinate()?;
        if !(config.discovery.nearby_radius_km.is_finite()
            && config.discovery.nearby_radius_km >= 0.0)
        {
            return Err(MindbridgeError::Config(format!(
                "nearby_radius_km must be a non-negative number, got {}",
                config.discovery.nearby_radius_km
            )));
        }
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Resource discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Radius for the "nearby" filter, in kilometers.
    pub nearby_radius_km: f64,
    /// Latitude used when geolocation is unavailable or denied.
    pub fallback_latitude: f64,
    /// Longitude used when geolocation is unavailable or denied.
    pub fallback_longitude: f64,
    /// Optional JSON catalog replacing the built-in seed data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            nearby_radius_km: 2.0,
            fallback_latitude: Coordinate::DOWNTOWN_TORONTO.latitude,
            fallback_longitude: Coordinate::DOWNTOWN_TORONTO.longitude,
            catalog_path: None,
        }
    }
}

impl DiscoveryConfig {
    /// The configured fallback coordinate, validated.
    pub fn fallback_coordinate(&self) -> Result<Coordinate> {
        Coordinate::try_new(self.fallback_latitude, self.fallback_longitude)
    }
}

/// Chat assistant settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Simulated thinking time before the assistant reply appears.
    pub reply_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1500,
        }
    }
}

impl ChatConfig {
    pub fn reply_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.reply_delay_ms)
    }
}
