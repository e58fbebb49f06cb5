// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Input discovery stream.
//!
//! Announces the connection's input streams to the host, and republishes
//! them disposed when the connection winds them down.

use causeway::routing::{DiscoveryStreamReader, StreamInfo};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Queues `StreamInfo` samples for the host to take.
pub struct FileInputDiscoveryStreamReader {
    state: Mutex<DiscoveryState>,
}

struct DiscoveryState {
    queue: VecDeque<StreamInfo>,
    announced: Vec<StreamInfo>,
}

impl FileInputDiscoveryStreamReader {
    /// Queue the initial announcements for `streams`.
    pub(crate) fn new(streams: Vec<StreamInfo>) -> Self {
        Self {
            state: Mutex::new(DiscoveryState {
                queue: streams.iter().cloned().collect(),
                announced: streams,
            }),
        }
    }

    /// Republish every announced stream with its disposed flag set.
    pub(crate) fn dispose_all(&self) {
        let mut state = self.state.lock();
        let disposed: Vec<StreamInfo> = state
            .announced
            .iter()
            .map(|info| StreamInfo {
                disposed: true,
                ..info.clone()
            })
            .collect();
        state.queue.extend(disposed);
    }
}

impl DiscoveryStreamReader for FileInputDiscoveryStreamReader {
    fn take(&self) -> Vec<StreamInfo> {
        self.state.lock().queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LINE_TYPE_NAME;

    #[test]
    fn test_initial_announcements() {
        let reader = FileInputDiscoveryStreamReader::new(vec![
            StreamInfo::new("square", LINE_TYPE_NAME),
            StreamInfo::new("circle", LINE_TYPE_NAME),
        ]);

        let infos = reader.take();
        assert_eq!(infos.len(), 2);
        assert!(infos.iter().all(|info| !info.disposed));

        // queue is drained
        assert!(reader.take().is_empty());
    }

    #[test]
    fn test_dispose_republishes_disposed() {
        let reader =
            FileInputDiscoveryStreamReader::new(vec![StreamInfo::new("square", LINE_TYPE_NAME)]);
        let _ = reader.take();

        reader.dispose_all();
        let infos = reader.take();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].stream_name, "square");
        assert!(infos[0].disposed);
    }

    #[test]
    fn test_dispose_queues_per_invocation() {
        let reader =
            FileInputDiscoveryStreamReader::new(vec![StreamInfo::new("square", LINE_TYPE_NAME)]);
        let _ = reader.take();

        reader.dispose_all();
        reader.dispose_all();
        assert_eq!(reader.take().len(), 2);
    }
}
