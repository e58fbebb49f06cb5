// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed views over the `file.*` property keys.

use causeway::routing::{AdapterError, PropertySet};
use std::path::PathBuf;
use std::time::Duration;

pub(crate) const PROP_PATH: &str = "file.path";
pub(crate) const PROP_READ_PERIOD: &str = "file.read_period_ms";
pub(crate) const PROP_LINES_PER_READ: &str = "file.lines_per_read";
pub(crate) const PROP_FLUSH_ON_WRITE: &str = "file.flush_on_write";
pub(crate) const PROP_INPUT_PREFIX: &str = "file.input.";

const DEFAULT_READ_PERIOD_MS: u64 = 1000;
const DEFAULT_LINES_PER_READ: usize = 8;

fn required_path(
    properties: &PropertySet,
    fallback: Option<&str>,
) -> Result<PathBuf, AdapterError> {
    properties
        .get(PROP_PATH)
        .map(String::as_str)
        .or(fallback)
        .map(PathBuf::from)
        .ok_or_else(|| AdapterError::MissingProperty(PROP_PATH.to_string()))
}

fn parse<T: std::str::FromStr>(
    properties: &PropertySet,
    key: &str,
    default: T,
) -> Result<T, AdapterError> {
    match properties.get(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| AdapterError::InvalidProperty {
            key: key.to_string(),
            value: value.clone(),
        }),
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ReaderOptions {
    pub path: PathBuf,
    pub read_period: Duration,
    pub lines_per_read: usize,
}

impl ReaderOptions {
    /// `fallback_path` comes from the connection's `file.input.<name>`
    /// announcement when the route carries no `file.path` of its own.
    pub fn from_properties(
        properties: &PropertySet,
        fallback_path: Option<&str>,
    ) -> Result<Self, AdapterError> {
        Ok(Self {
            path: required_path(properties, fallback_path)?,
            read_period: Duration::from_millis(parse(
                properties,
                PROP_READ_PERIOD,
                DEFAULT_READ_PERIOD_MS,
            )?),
            lines_per_read: parse(properties, PROP_LINES_PER_READ, DEFAULT_LINES_PER_READ)?,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct WriterOptions {
    pub path: PathBuf,
    pub flush_on_write: bool,
}

impl WriterOptions {
    pub fn from_properties(properties: &PropertySet) -> Result<Self, AdapterError> {
        Ok(Self {
            path: required_path(properties, None)?,
            flush_on_write: parse(properties, PROP_FLUSH_ON_WRITE, true)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> PropertySet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_reader_defaults() {
        let opts = ReaderOptions::from_properties(&props(&[("file.path", "/tmp/in.txt")]), None)
            .expect("parse");
        assert_eq!(opts.path, PathBuf::from("/tmp/in.txt"));
        assert_eq!(opts.read_period, Duration::from_millis(1000));
        assert_eq!(opts.lines_per_read, 8);
    }

    #[test]
    fn test_reader_overrides() {
        let opts = ReaderOptions::from_properties(
            &props(&[
                ("file.path", "/tmp/in.txt"),
                ("file.read_period_ms", "25"),
                ("file.lines_per_read", "2"),
            ]),
            None,
        )
        .expect("parse");
        assert_eq!(opts.read_period, Duration::from_millis(25));
        assert_eq!(opts.lines_per_read, 2);
    }

    #[test]
    fn test_reader_fallback_path() {
        let opts =
            ReaderOptions::from_properties(&props(&[]), Some("/tmp/announced.txt")).expect("parse");
        assert_eq!(opts.path, PathBuf::from("/tmp/announced.txt"));
    }

    #[test]
    fn test_missing_path() {
        let err = ReaderOptions::from_properties(&props(&[]), None).expect_err("must fail");
        assert!(matches!(err, AdapterError::MissingProperty(key) if key == "file.path"));
    }

    #[test]
    fn test_invalid_period() {
        let err = ReaderOptions::from_properties(
            &props(&[("file.path", "/tmp/in.txt"), ("file.read_period_ms", "fast")]),
            None,
        )
        .expect_err("must fail");
        assert!(matches!(
            err,
            AdapterError::InvalidProperty { key, .. } if key == "file.read_period_ms"
        ));
    }

    #[test]
    fn test_writer_flush_flag() {
        let opts = WriterOptions::from_properties(&props(&[
            ("file.path", "/tmp/out.txt"),
            ("file.flush_on_write", "false"),
        ]))
        .expect("parse");
        assert!(!opts.flush_on_write);
    }
}
