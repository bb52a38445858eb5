//! Configuration loading and typed config structures for the Cytos
//! simulation.
//!
//! The canonical configuration lives in `cytos-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads the file. Every field has a
//! default, so a missing file or a partial file is never an error at the
//! call sites that opt into defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `cytos-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, tick interval).
    #[serde(default)]
    pub world: WorldConfig,

    /// Starting resource pools.
    #[serde(default)]
    pub resources: ResourcesConfig,

    /// Organelles to provision at world creation, keyed by name.
    #[serde(default = "default_organelles")]
    pub organelles: BTreeMap<String, OrganelleSpec>,

    /// Simulation boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            resources: ResourcesConfig::default(),
            organelles: default_organelles(),
            simulation: SimulationBoundsConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable world name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Starting resource pools.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourcesConfig {
    /// Energy the world starts with.
    #[serde(default = "default_starting_energy")]
    pub starting_energy: f64,

    /// Nutrients the world starts with.
    #[serde(default = "default_starting_nutrients")]
    pub starting_nutrients: f64,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            starting_energy: default_starting_energy(),
            starting_nutrients: default_starting_nutrients(),
        }
    }
}

/// Fixed parameters of one organelle to provision at world creation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OrganelleSpec {
    /// Maximum output of the organelle.
    pub capacity: f64,

    /// Fixed output multiplier.
    #[serde(default = "default_efficiency")]
    pub efficiency: f64,
}

/// Simulation boundary parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Stop after this many ticks. 0 means unbounded.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
        }
    }
}

fn default_world_name() -> String {
    String::from("petri-1")
}

const fn default_tick_interval_ms() -> u64 {
    1000
}

const fn default_starting_energy() -> f64 {
    10.0
}

const fn default_starting_nutrients() -> f64 {
    10.0
}

const fn default_efficiency() -> f64 {
    1.0
}

const fn default_max_ticks() -> u64 {
    0
}

/// The default organelle roster for a fresh world.
fn default_organelles() -> BTreeMap<String, OrganelleSpec> {
    let mut organelles = BTreeMap::new();
    organelles.insert("mitochondrion".to_owned(), OrganelleSpec {
        capacity: 10.0,
        efficiency: 1.0,
    });
    organelles.insert("chloroplast".to_owned(), OrganelleSpec {
        capacity: 8.0,
        efficiency: 0.9,
    });
    organelles.insert("ribosome".to_owned(), OrganelleSpec {
        capacity: 5.0,
        efficiency: 1.2,
    });
    organelles
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = SimulationConfig::parse("{}").unwrap();
        assert_eq!(config.world.name, "petri-1");
        assert_eq!(config.world.tick_interval_ms, 1000);
        assert_eq!(config.resources.starting_energy, 10.0);
        assert_eq!(config.simulation.max_ticks, 0);
        assert_eq!(config.organelles.len(), 3);
    }

    #[test]
    fn default_matches_empty_yaml() {
        // The missing-file fallback path hands out `Default::default()`,
        // which must provision the same roster an empty file would.
        let config = SimulationConfig::default();
        assert_eq!(config.organelles.len(), 3);
        assert!(config.organelles.contains_key("mitochondrion"));
        assert_eq!(config, SimulationConfig::parse("{}").unwrap());
    }

    #[test]
    fn partial_yaml_overrides_selectively() {
        let yaml = r"
world:
  name: test-dish
simulation:
  max_ticks: 50
";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.world.name, "test-dish");
        assert_eq!(config.world.tick_interval_ms, 1000);
        assert_eq!(config.simulation.max_ticks, 50);
    }

    #[test]
    fn organelle_map_parses_with_default_efficiency() {
        let yaml = r"
organelles:
  vacuole:
    capacity: 3.5
";
        let config = SimulationConfig::parse(yaml).unwrap();
        let spec = config.organelles.get("vacuole").unwrap();
        assert_eq!(spec.capacity, 3.5);
        assert_eq!(spec.efficiency, 1.0);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = SimulationConfig::parse("world: [not a map");
        assert!(result.is_err());
    }
}
