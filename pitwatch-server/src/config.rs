use pitwatch::config::{ClimateConfig, FleetConfig, PondConfig, TrafficConfig};
use pitwatch::core::SiteProfile;

#[derive(Clone, Debug, serde_derive::Deserialize)]
pub struct Config {
    /// Site identity.
    pub site: SiteProfile,
    /// Haul truck fleet simulation.
    #[serde(default)]
    pub fleet: FleetConfig,
    /// Office climate simulation.
    #[serde(default)]
    pub climate: ClimateConfig,
    /// Settling pond simulation.
    #[serde(default)]
    pub pond: PondConfig,
    /// Gate traffic simulation.
    #[serde(default)]
    pub traffic: TrafficConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteProfile {
                id: "PIT-01".to_owned(),
                name: "Tambang Batubara Muara Enim".to_owned(),
                region: Some("Sumatera Selatan".to_owned()),
            },
            fleet: FleetConfig::default(),
            climate: ClimateConfig::default(),
            pond: PondConfig::default(),
            traffic: TrafficConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_file() {
        let config: Config = toml::from_str(
            r#"
            [site]
            id = "PIT-02"
            name = "Tambang Dua"
            "#,
        )
        .unwrap();

        assert_eq!(config.site.id, "PIT-02");
        assert_eq!(config.fleet.interval, 2_000);
        assert!(!config.fleet.randomize_start);
        assert_eq!(config.traffic.interval, 3_000);
    }

    #[test]
    fn test_overridden_intervals() {
        let config: Config = toml::from_str(
            r#"
            [site]
            id = "PIT-02"
            name = "Tambang Dua"

            [fleet]
            interval = 500
            randomize_start = true

            [climate]
            interval = 10000
            "#,
        )
        .unwrap();

        assert_eq!(config.fleet.interval, 500);
        assert!(config.fleet.randomize_start);
        assert_eq!(config.climate.interval, 10_000);
        assert_eq!(config.pond.interval, 5_000);
    }
}
