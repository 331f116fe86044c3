use std::path::Path;

use crate::runtime::Result;

/// Read a TOML configuration file into a deserializable type.
pub fn from_file<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let contents = std::fs::read_to_string(path)?;

    Ok(toml::from_str(&contents)?)
}

#[derive(Clone, Debug, PartialEq, Eq, serde_derive::Deserialize)]
pub struct FleetConfig {
    /// Tick interval in milliseconds.
    #[serde(default = "FleetConfig::default_interval")]
    pub interval: u64,
    /// Seed metrics uniformly within bounds instead of the demo values.
    #[serde(default)]
    pub randomize_start: bool,
}

impl FleetConfig {
    fn default_interval() -> u64 {
        2_000
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
            randomize_start: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde_derive::Deserialize)]
pub struct ClimateConfig {
    /// Tick interval in milliseconds.
    #[serde(default = "ClimateConfig::default_interval")]
    pub interval: u64,
    /// Seed metrics uniformly within bounds instead of the demo values.
    #[serde(default)]
    pub randomize_start: bool,
}

impl ClimateConfig {
    fn default_interval() -> u64 {
        5_000
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
            randomize_start: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde_derive::Deserialize)]
pub struct PondConfig {
    /// Tick interval in milliseconds.
    #[serde(default = "PondConfig::default_interval")]
    pub interval: u64,
    /// Seed metrics uniformly within bounds instead of the demo values.
    #[serde(default)]
    pub randomize_start: bool,
}

impl PondConfig {
    fn default_interval() -> u64 {
        5_000
    }
}

impl Default for PondConfig {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
            randomize_start: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde_derive::Deserialize)]
pub struct TrafficConfig {
    /// Tick interval in milliseconds.
    #[serde(default = "TrafficConfig::default_interval")]
    pub interval: u64,
}

impl TrafficConfig {
    fn default_interval() -> u64 {
        3_000
    }
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
        }
    }
}
