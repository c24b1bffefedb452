// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::{error::Error, io};

use {
    log::debug,
    serde::{Deserialize, Serialize},
};

/// Number of racks a new group is spread over.
pub const DEFAULT_GROUP_RACKS: u32 = 2;

/// Number of copies kept of each volume in a new group.
pub const DEFAULT_GROUP_COPYS: u32 = 2;

/// Config is the model of the console's configuration file. Every field has a default, so an
/// empty file (or no file at all, at the default location) is a valid configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the cluster-management API.
    pub backend: String,
    pub timeout_secs: u64,
    pub group: GroupPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend: crate::default_backend(),
            timeout_secs: 10,
            group: GroupPolicy::default(),
        }
    }
}

/// The replication policy sent with every group creation request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GroupPolicy {
    pub racks: u32,
    pub copys: u32,
}

impl Default for GroupPolicy {
    fn default() -> Self {
        GroupPolicy {
            racks: DEFAULT_GROUP_RACKS,
            copys: DEFAULT_GROUP_COPYS,
        }
    }
}

impl Config {
    pub fn parse(config: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(config)
    }

    /// Load the configuration from `path`, or from the default location if none was given.
    ///
    /// A missing file is an error only when the path was given explicitly.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let (path, explicit) = match path {
            Some(path) => (path.to_string(), true),
            None => (crate::default_config_path(), false),
        };

        let config = match std::fs::read_to_string(&path) {
            Ok(config) => config,
            Err(e) if !explicit && e.kind() == io::ErrorKind::NotFound => {
                debug!("no config file at \"{path}\", using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(format!("could not open config file \"{path}\": {e}").into()),
        };

        Ok(Self::parse(&config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.group, GroupPolicy { racks: 2, copys: 2 });
    }

    #[test]
    fn partial_overrides() {
        let config = Config::parse(
            r#"
            backend = "http://ops.example:9000"

            [group]
            copys = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.backend, "http://ops.example:9000");
        assert_eq!(config.group.racks, DEFAULT_GROUP_RACKS);
        assert_eq!(config.group.copys, 3);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(Config::load(Some("/nonexistent/bfsops.conf")).is_err());
    }
}
