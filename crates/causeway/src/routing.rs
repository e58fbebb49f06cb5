// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Routing-service plugin boundary.
//!
//! A routing-service host bridges data between heterogeneous domains and
//! streams through pluggable connection adapters. The host owns sessions and
//! routes; an adapter contributes a [`Connection`] factory that instantiates
//! stream readers/writers on demand and returns them to the same factory for
//! deletion.
//!
//! The traits here are the host-facing contract; `causeway-file-adapter`
//! implements them for file-backed streams.

use crate::sample::PayloadError;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Adapter-side errors surfaced to the host.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("missing required property: {0}")]
    MissingProperty(String),

    #[error("invalid value for property {key}: {value}")]
    InvalidProperty { key: String, value: String },

    #[error("malformed sample: {0}")]
    Sample(#[from] PayloadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key/value configuration attached to a connection or a route.
pub type PropertySet = BTreeMap<String, String>;

/// Description of a stream visible to the routing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    pub stream_name: String,
    pub type_name: String,
    /// Set when the stream has been disposed; the host reacts by tearing
    /// down routes that depend on it.
    pub disposed: bool,
}

impl StreamInfo {
    pub fn new(stream_name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            stream_name: stream_name.into(),
            type_name: type_name.into(),
            disposed: false,
        }
    }
}

/// Opaque host session token. Passed through factory calls; adapters may
/// bind it or ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    name: String,
}

impl Session {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Moves data from an external system into the routing service.
///
/// `take` uses a shared receiver so listener callbacks can drain the reader
/// they were notified about.
pub trait StreamReader: Send + Sync + std::fmt::Debug {
    fn info(&self) -> &StreamInfo;

    /// Drain the samples buffered since the last call.
    fn take(&self) -> Result<Vec<Vec<u8>>, AdapterError>;
}

/// Moves data from the routing service into an external system.
pub trait StreamWriter: Send {
    fn info(&self) -> &StreamInfo;

    /// Write a batch of samples; returns the number accepted.
    fn write(&mut self, samples: &[Vec<u8>]) -> Result<usize, AdapterError>;
}

/// Host callback for data arrival on a stream reader.
pub trait StreamReaderListener: Send + Sync {
    fn on_data_available(&self, reader: &dyn StreamReader);
}

/// Yields `StreamInfo` samples describing streams an adapter offers.
pub trait DiscoveryStreamReader: Send + Sync {
    /// Drain the stream descriptions queued since the last call.
    fn take(&self) -> Vec<StreamInfo>;
}

/// Host callback for data arrival on a discovery stream.
pub trait DiscoveryListener: Send + Sync {
    fn on_data_available(&self, reader: &dyn DiscoveryStreamReader);
}

/// Adapter factory for per-route stream endpoints.
///
/// Instances returned by the `create_*` methods are owned by the caller and
/// must be returned to the same connection that created them for deletion.
pub trait Connection {
    fn create_stream_reader(
        &mut self,
        session: &Session,
        info: &StreamInfo,
        properties: &PropertySet,
        listener: Arc<dyn StreamReaderListener>,
    ) -> Result<Box<dyn StreamReader>, AdapterError>;

    fn delete_stream_reader(&mut self, reader: Box<dyn StreamReader>);

    fn create_stream_writer(
        &mut self,
        session: &Session,
        info: &StreamInfo,
        properties: &PropertySet,
    ) -> Result<Box<dyn StreamWriter>, AdapterError>;

    fn delete_stream_writer(&mut self, writer: Box<dyn StreamWriter>);
}
