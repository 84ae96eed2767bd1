use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::fleet::{default_fleet, UnitSeed};
use crate::views::ParentProfile;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("fleet is empty")]
    EmptyFleet,
    #[error("duplicate unit id: {0}")]
    DuplicateUnit(u32),
    #[error("parent unit {0} is not in the fleet")]
    UnknownParentUnit(u32),
    #[error("simulation interval must be greater than zero")]
    ZeroInterval,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default = "default_fleet")]
    pub fleet: Vec<UnitSeed>,
    #[serde(default)]
    pub parent: ParentProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(
        default = "default_interval",
        deserialize_with = "deserialize_duration"
    )]
    pub interval: Duration,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            seed: None,
        }
    }
}

fn default_interval() -> Duration {
    Duration::from_secs(4)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig::default(),
            simulation: SimulationConfig::default(),
            fleet: default_fleet(),
            parent: ParentProfile::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Loads `path` if given, the built-in demo fleet otherwise.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fleet.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        if self.simulation.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        let mut seen = HashSet::new();
        for seed in &self.fleet {
            if !seen.insert(seed.id) {
                return Err(ConfigError::DuplicateUnit(seed.id));
            }
        }
        if !seen.contains(&self.parent.unit_id) {
            return Err(ConfigError::UnknownParentUnit(self.parent.unit_id));
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(yaml: &str) -> Result<Self, Self::Err> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::UnitStatus;

    #[test]
    fn test_empty_file_uses_demo_fleet() {
        let config = "{}".parse::<Config>().unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.simulation.interval, Duration::from_secs(4));
        assert!(config.simulation.seed.is_none());
        assert_eq!(config.fleet.len(), 3);
        assert_eq!(config.parent.unit_id, 1);
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
web:
  bind: "127.0.0.1:3000"
simulation:
  interval: 3s
  seed: 42
fleet:
  - id: 10
    driver: Ann Lee
    phone: 555-0199
    position: "40.70, -74.01"
    status: arriving_soon
    route: Afternoon Route D
parent:
  unit_id: 10
  driver:
    contact: "+1 (555) 000-1111"
    license_id: D-1
    experience_years: 3
"#;
        let config = yaml.parse::<Config>().unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:3000");
        assert_eq!(config.simulation.interval, Duration::from_secs(3));
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.fleet[0].status, UnitStatus::ArrivingSoon);
        assert!(config.parent.kids.is_empty());
    }

    #[test]
    fn test_rejects_inconsistent_config() {
        let err = "fleet: []".parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyFleet));

        let err = "simulation:\n  interval: 0s".parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroInterval));

        let err = "simulation:\n  interval: soon".parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));

        let duplicate = r#"
fleet:
  - { id: 1, driver: A, phone: "1", position: "0, 0", route: R }
  - { id: 1, driver: B, phone: "2", position: "0, 0", route: R }
"#;
        let err = duplicate.parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateUnit(1)));

        let orphan = r#"
fleet:
  - { id: 5, driver: A, phone: "1", position: "0, 0", route: R }
"#;
        let err = orphan.parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownParentUnit(1)));
    }
}
