// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Named QoS profiles.
//!
//! Entities are created against profiles resolved by name at creation time.
//! A `ProfileLibrary` carries the built-in WAN scenario profiles and can be
//! replaced wholesale by a TOML profile document:
//!
//! ```toml
//! [profiles.default]
//! reliability = "reliable"
//!
//! [profiles."wan/scenario_2"]
//! reliability = "reliable"
//! durability = "transient_local"
//! history_depth = 64
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// QoS profile errors.
#[derive(Debug, Error)]
pub enum QosError {
    #[error("unknown QoS profile: {0}")]
    UnknownProfile(String),

    #[error("cannot read profile file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid profile file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("profile `{profile}` invalid: {reason}")]
    Invalid { profile: String, reason: String },
}

/// Delivery reliability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    BestEffort,
    #[default]
    Reliable,
}

/// Sample durability for late joiners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Durability {
    #[default]
    Volatile,
    TransientLocal,
}

fn default_history_depth() -> u32 {
    1
}

/// A named bundle of QoS settings, resolved at entity-creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QosProfile {
    #[serde(default)]
    pub reliability: Reliability,

    #[serde(default)]
    pub durability: Durability,

    /// KEEP_LAST history depth, must be >= 1.
    #[serde(default = "default_history_depth")]
    pub history_depth: u32,
}

impl Default for QosProfile {
    fn default() -> Self {
        Self {
            reliability: Reliability::default(),
            durability: Durability::default(),
            history_depth: default_history_depth(),
        }
    }
}

impl QosProfile {
    pub fn best_effort() -> Self {
        Self {
            reliability: Reliability::BestEffort,
            ..Self::default()
        }
    }

    pub fn reliable() -> Self {
        Self {
            reliability: Reliability::Reliable,
            ..Self::default()
        }
    }
}

/// Profile name for a numbered WAN publisher scenario.
pub fn scenario_profile(scenario: u32) -> String {
    format!("wan/scenario_{scenario}")
}

#[derive(Debug, Deserialize)]
struct ProfileDocument {
    #[serde(default)]
    profiles: BTreeMap<String, QosProfile>,
}

/// Named QoS profile registry.
#[derive(Debug, Clone)]
pub struct ProfileLibrary {
    profiles: BTreeMap<String, QosProfile>,
}

impl ProfileLibrary {
    /// Built-in profiles: `default` plus the WAN scenarios 0-3.
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("default".to_string(), QosProfile::default());
        // Scenario 0: plain best-effort UDP-style delivery.
        profiles.insert(scenario_profile(0), QosProfile::best_effort());
        // Scenario 1: reliable delivery.
        profiles.insert(scenario_profile(1), QosProfile::reliable());
        // Scenario 2: reliable with state for late joiners.
        profiles.insert(
            scenario_profile(2),
            QosProfile {
                reliability: Reliability::Reliable,
                durability: Durability::TransientLocal,
                history_depth: 64,
            },
        );
        // Scenario 3: reliable with deep history.
        profiles.insert(
            scenario_profile(3),
            QosProfile {
                reliability: Reliability::Reliable,
                durability: Durability::Volatile,
                history_depth: 256,
            },
        );
        Self { profiles }
    }

    /// Load a profile library from a TOML document.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, QosError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| QosError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a profile library from TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self, QosError> {
        let doc: ProfileDocument = toml::from_str(content)?;
        let library = Self {
            profiles: doc.profiles,
        };
        library.validate()?;
        Ok(library)
    }

    fn validate(&self) -> Result<(), QosError> {
        for (name, profile) in &self.profiles {
            if profile.history_depth == 0 {
                return Err(QosError::Invalid {
                    profile: name.clone(),
                    reason: "history_depth must be >= 1".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Resolve a profile by name.
    pub fn resolve(&self, name: &str) -> Result<&QosProfile, QosError> {
        self.profiles
            .get(name)
            .ok_or_else(|| QosError::UnknownProfile(name.to_string()))
    }

    /// Add or replace a profile.
    pub fn insert(&mut self, name: impl Into<String>, profile: QosProfile) {
        self.profiles.insert(name.into(), profile);
    }

    /// Registered profile names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles() {
        let library = ProfileLibrary::builtin();
        assert!(library.resolve("default").is_ok());

        let scenario_0 = library.resolve("wan/scenario_0").expect("scenario 0");
        assert_eq!(scenario_0.reliability, Reliability::BestEffort);

        let scenario_2 = library.resolve("wan/scenario_2").expect("scenario 2");
        assert_eq!(scenario_2.durability, Durability::TransientLocal);
        assert_eq!(scenario_2.history_depth, 64);
    }

    #[test]
    fn test_unknown_profile() {
        let library = ProfileLibrary::builtin();
        let err = library.resolve("wan/scenario_99").expect_err("must fail");
        assert!(matches!(err, QosError::UnknownProfile(name) if name == "wan/scenario_99"));
    }

    #[test]
    fn test_scenario_profile_name() {
        assert_eq!(scenario_profile(2), "wan/scenario_2");
    }

    #[test]
    fn test_from_toml_str() {
        let library = ProfileLibrary::from_toml_str(
            r#"
[profiles.default]
reliability = "best_effort"

[profiles."wan/scenario_1"]
reliability = "reliable"
durability = "transient_local"
history_depth = 8
"#,
        )
        .expect("parse");

        let default = library.resolve("default").expect("default");
        assert_eq!(default.reliability, Reliability::BestEffort);
        assert_eq!(default.history_depth, 1); // serde default

        let scenario = library.resolve("wan/scenario_1").expect("scenario");
        assert_eq!(scenario.durability, Durability::TransientLocal);
        assert_eq!(scenario.history_depth, 8);
    }

    #[test]
    fn test_insert_and_names() {
        let mut library = ProfileLibrary::builtin();
        library.insert("wan/scenario_9", QosProfile::best_effort());

        assert!(library.resolve("wan/scenario_9").is_ok());
        assert!(library.names().any(|name| name == "wan/scenario_9"));
    }

    #[test]
    fn test_zero_history_depth_rejected() {
        let err = ProfileLibrary::from_toml_str(
            "[profiles.bad]\nhistory_depth = 0\n",
        )
        .expect_err("must fail");
        assert!(matches!(err, QosError::Invalid { profile, .. } if profile == "bad"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            ProfileLibrary::from_toml_str("profiles = 3"),
            Err(QosError::Parse(_))
        ));
    }

    #[test]
    fn test_unreadable_file() {
        assert!(matches!(
            ProfileLibrary::from_file("/nonexistent/profiles.toml"),
            Err(QosError::Unreadable { .. })
        ));
    }
}
