// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! File-backed stream writer.
//!
//! Decodes CDR-string samples and appends them to the output file, one line
//! per sample. Malformed samples are logged and skipped; the batch
//! continues.

use crate::properties::WriterOptions;
use causeway::routing::{AdapterError, StreamInfo, StreamWriter};
use causeway::sample::decode_string;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use tracing::{debug, warn};

/// Stream writer over a line-oriented output file.
pub struct FileStreamWriter {
    info: StreamInfo,
    out: BufWriter<File>,
    flush_on_write: bool,
    samples_written: u64,
}

impl FileStreamWriter {
    pub(crate) fn create(info: StreamInfo, opts: WriterOptions) -> Result<Self, AdapterError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&opts.path)?;
        debug!(
            "stream writer for '{}' appending to {}",
            info.stream_name,
            opts.path.display()
        );
        Ok(Self {
            info,
            out: BufWriter::new(file),
            flush_on_write: opts.flush_on_write,
            samples_written: 0,
        })
    }

    /// Samples accepted over the writer's lifetime.
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }
}

impl StreamWriter for FileStreamWriter {
    fn info(&self) -> &StreamInfo {
        &self.info
    }

    fn write(&mut self, samples: &[Vec<u8>]) -> Result<usize, AdapterError> {
        let mut accepted = 0;
        for payload in samples {
            match decode_string(payload) {
                Ok(line) => {
                    writeln!(self.out, "{line}")?;
                    accepted += 1;
                }
                Err(err) => {
                    warn!(
                        "skipping malformed sample on '{}': {err}",
                        self.info.stream_name
                    );
                }
            }
        }

        if self.flush_on_write {
            self.out.flush()?;
        }
        self.samples_written += accepted as u64;
        Ok(accepted)
    }
}

impl Drop for FileStreamWriter {
    fn drop(&mut self) {
        if let Err(err) = self.out.flush() {
            warn!(
                "flush on delete failed for '{}': {err}",
                self.info.stream_name
            );
        }
    }
}
