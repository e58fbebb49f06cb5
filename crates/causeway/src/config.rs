// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Message configuration file (ini format).
//!
//! Section `[message]`, keys `number` (initial sample counter, default 0)
//! and `message` (template string, default "Hello World"). Unknown sections
//! and keys are ignored.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config line {line}: expected `key = value`")]
    Malformed { line: usize },

    #[error("config line {line}: invalid integer for `{key}`: {value}")]
    InvalidInteger {
        line: usize,
        key: String,
        value: String,
    },
}

/// Initial parameters for the publisher write loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageConfig {
    /// Starting sample index.
    pub initial_count: u32,
    /// Message template; the sample index is appended per write.
    pub template: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            initial_count: 0,
            template: "Hello World".to_string(),
        }
    }
}

impl MessageConfig {
    /// Load from an ini file. An unreadable file is a fatal error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse ini content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let mut section = String::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') {
                if !line.ends_with(']') {
                    return Err(ConfigError::Malformed { line: idx + 1 });
                }
                section = line[1..line.len() - 1].trim().to_ascii_lowercase();
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .ok_or(ConfigError::Malformed { line: idx + 1 })?;
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            if section != "message" {
                continue;
            }

            match key.as_str() {
                "number" => {
                    config.initial_count =
                        value.parse().map_err(|_| ConfigError::InvalidInteger {
                            line: idx + 1,
                            key,
                            value: value.to_string(),
                        })?;
                }
                "message" => config.template = value.to_string(),
                _ => {}
            }
        }

        Ok(config)
    }
}
