// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! File connection factory.

use crate::discovery::FileInputDiscoveryStreamReader;
use crate::properties::{ReaderOptions, WriterOptions, PROP_INPUT_PREFIX};
use crate::reader::FileStreamReader;
use crate::writer::FileStreamWriter;
use crate::LINE_TYPE_NAME;
use causeway::routing::{
    AdapterError, Connection, DiscoveryListener, PropertySet, Session, StreamInfo, StreamReader,
    StreamReaderListener, StreamWriter,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

struct InputDiscovery {
    reader: FileInputDiscoveryStreamReader,
    listener: Arc<dyn DiscoveryListener>,
}

impl InputDiscovery {
    fn dispose_and_notify(&self) {
        self.reader.dispose_all();
        self.listener.on_data_available(&self.reader);
    }
}

/// Connection adapter bridging line-oriented files and routing-service
/// streams.
///
/// Input streams are announced through `file.input.<name>` connection
/// properties (value: the backing file path) and surfaced on the input
/// discovery stream. Stream endpoints are created on demand by the host and
/// returned here for deletion.
pub struct FileConnection {
    discovery: Arc<InputDiscovery>,
    // announced stream name -> input file path
    input_paths: BTreeMap<String, String>,
}

impl FileConnection {
    pub fn new(discovery_listener: Arc<dyn DiscoveryListener>, properties: &PropertySet) -> Self {
        let input_paths: BTreeMap<String, String> = properties
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(PROP_INPUT_PREFIX)
                    .map(|name| (name.to_string(), value.clone()))
            })
            .collect();

        let announced = input_paths
            .keys()
            .map(|name| StreamInfo::new(name.clone(), LINE_TYPE_NAME))
            .collect();

        info!("file connection with {} input stream(s)", input_paths.len());

        Self {
            discovery: Arc::new(InputDiscovery {
                reader: FileInputDiscoveryStreamReader::new(announced),
                listener: discovery_listener,
            }),
            input_paths,
        }
    }

    /// The discovery stream carrying this connection's input announcements.
    pub fn input_discovery_reader(&self) -> &FileInputDiscoveryStreamReader {
        &self.discovery.reader
    }

    /// Dispose the input discovery streams and synchronously invoke the
    /// registered discovery listener on that same stream, once per call.
    ///
    /// Stream readers call this when they reach end of file; the disposal
    /// starts the host's cleanup of dependent routes. Cleanup only
    /// propagates to the output stream writers when the host creates output
    /// routes on route match.
    pub fn dispose_discovery_streams(&self) {
        self.discovery.dispose_and_notify();
    }
}

impl Connection for FileConnection {
    fn create_stream_reader(
        &mut self,
        _session: &Session,
        info: &StreamInfo,
        properties: &PropertySet,
        listener: Arc<dyn StreamReaderListener>,
    ) -> Result<Box<dyn StreamReader>, AdapterError> {
        let fallback = self.input_paths.get(&info.stream_name).map(String::as_str);
        let opts = ReaderOptions::from_properties(properties, fallback)?;

        info!(
            "creating stream reader for '{}' over {}",
            info.stream_name,
            opts.path.display()
        );

        let discovery = self.discovery.clone();
        let reader = FileStreamReader::spawn(
            info.clone(),
            opts,
            listener,
            Arc::new(move || discovery.dispose_and_notify()),
        )?;
        Ok(Box::new(reader))
    }

    fn delete_stream_reader(&mut self, reader: Box<dyn StreamReader>) {
        debug!("deleting stream reader for '{}'", reader.info().stream_name);
        drop(reader);
    }

    fn create_stream_writer(
        &mut self,
        _session: &Session,
        info: &StreamInfo,
        properties: &PropertySet,
    ) -> Result<Box<dyn StreamWriter>, AdapterError> {
        let opts = WriterOptions::from_properties(properties)?;
        let writer = FileStreamWriter::create(info.clone(), opts)?;
        Ok(Box::new(writer))
    }

    fn delete_stream_writer(&mut self, writer: Box<dyn StreamWriter>) {
        debug!("deleting stream writer for '{}'", writer.info().stream_name);
        drop(writer);
    }
}
