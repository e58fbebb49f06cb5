// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! File-backed stream reader.
//!
//! A background thread polls the input file on the configured read period,
//! encodes each line as a CDR-string sample, and invokes the host listener.
//! At end of file the reader fires its EOF hook (the connection uses it to
//! dispose the input discovery streams) and the thread exits.

use crate::properties::ReaderOptions;
use causeway::routing::{AdapterError, StreamInfo, StreamReader, StreamReaderListener};
use causeway::sample::encode_string;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Invoked once when the reader reaches end of file.
pub(crate) type EofHook = Arc<dyn Fn() + Send + Sync>;

// Stop-flag poll granularity while sleeping out a read period.
const SLEEP_SLICE: Duration = Duration::from_millis(10);

#[derive(Debug)]
struct ReaderShared {
    info: StreamInfo,
    samples: Mutex<VecDeque<Vec<u8>>>,
    stop: AtomicBool,
}

impl StreamReader for ReaderShared {
    fn info(&self) -> &StreamInfo {
        &self.info
    }

    fn take(&self) -> Result<Vec<Vec<u8>>, AdapterError> {
        Ok(self.samples.lock().drain(..).collect())
    }
}

/// Stream reader over a line-oriented input file.
#[derive(Debug)]
pub struct FileStreamReader {
    shared: Arc<ReaderShared>,
    handle: Option<JoinHandle<()>>,
}

impl FileStreamReader {
    pub(crate) fn spawn(
        info: StreamInfo,
        opts: ReaderOptions,
        listener: Arc<dyn StreamReaderListener>,
        on_eof: EofHook,
    ) -> Result<Self, AdapterError> {
        let file = File::open(&opts.path)?;

        let shared = Arc::new(ReaderShared {
            info,
            samples: Mutex::new(VecDeque::new()),
            stop: AtomicBool::new(false),
        });

        let thread_shared = shared.clone();
        let handle = thread::Builder::new()
            .name(format!("file-reader-{}", shared.info.stream_name))
            .spawn(move || {
                poll_loop(thread_shared, BufReader::new(file), opts, listener, on_eof)
            })?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }
}

impl StreamReader for FileStreamReader {
    fn info(&self) -> &StreamInfo {
        self.shared.info()
    }

    fn take(&self) -> Result<Vec<Vec<u8>>, AdapterError> {
        self.shared.take()
    }
}

impl Drop for FileStreamReader {
    fn drop(&mut self) {
        self.shared.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn poll_loop(
    shared: Arc<ReaderShared>,
    mut file: BufReader<File>,
    opts: ReaderOptions,
    listener: Arc<dyn StreamReaderListener>,
    on_eof: EofHook,
) {
    loop {
        if shared.stop.load(Ordering::SeqCst) {
            return;
        }

        let mut batch = Vec::new();
        let mut eof = false;

        for _ in 0..opts.lines_per_read {
            let mut line = String::new();
            match file.read_line(&mut line) {
                Ok(0) => {
                    eof = true;
                    break;
                }
                Ok(_) => {
                    let line = line.trim_end_matches(['\r', '\n']);
                    batch.push(encode_string(line));
                }
                Err(err) => {
                    warn!(
                        "read error on {}: {err}; treating as end of stream",
                        opts.path.display()
                    );
                    eof = true;
                    break;
                }
            }
        }

        if !batch.is_empty() {
            shared.samples.lock().extend(batch);
            listener.on_data_available(shared.as_ref());
        }

        if eof {
            debug!("reached end of {}", opts.path.display());
            on_eof();
            return;
        }

        // Sleep out the read period in slices so deletion is not blocked for
        // a full period.
        let mut slept = Duration::ZERO;
        while slept < opts.read_period && !shared.stop.load(Ordering::SeqCst) {
            let step = SLEEP_SLICE.min(opts.read_period - slept);
            thread::sleep(step);
            slept += step;
        }
    }
}
