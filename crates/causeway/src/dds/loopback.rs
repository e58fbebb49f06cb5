// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-process loopback backend.
//!
//! Writes land in a per-topic in-memory log that tests and demo binaries can
//! drain. No wire protocol, no discovery: this backend exists so the
//! lifecycle toolkit runs without the real middleware.

use super::{DataWriter, Participant, ParticipantFactory, Publisher, Topic, MAX_DOMAIN_ID};
use crate::error::{DdsError, Result};
use crate::qos::QosProfile;
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct FactoryState {
    // (domain_id, topic) -> published payloads, in write order
    published: Mutex<HashMap<(u32, String), Vec<Vec<u8>>>>,
    live_participants: AtomicUsize,
    finalized: AtomicBool,
}

/// In-process [`ParticipantFactory`].
#[derive(Default)]
pub struct LoopbackFactory {
    state: Arc<FactoryState>,
}

impl LoopbackFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of samples published on `topic` in `domain_id`.
    pub fn sample_count(&self, domain_id: u32, topic: &str) -> usize {
        self.state
            .published
            .lock()
            .get(&(domain_id, topic.to_string()))
            .map_or(0, Vec::len)
    }

    /// Drain the published payloads for `topic` in `domain_id`.
    pub fn take_published(&self, domain_id: u32, topic: &str) -> Vec<Vec<u8>> {
        self.state
            .published
            .lock()
            .remove(&(domain_id, topic.to_string()))
            .unwrap_or_default()
    }

    /// Participants created but not yet deleted.
    pub fn live_participants(&self) -> usize {
        self.state.live_participants.load(Ordering::SeqCst)
    }
}

impl ParticipantFactory for LoopbackFactory {
    fn create_participant(&self, domain_id: u32, qos: &QosProfile) -> Result<Box<dyn Participant>> {
        if self.state.finalized.load(Ordering::SeqCst) {
            return Err(DdsError::Finalized);
        }
        if domain_id > MAX_DOMAIN_ID {
            return Err(DdsError::InvalidDomainId(domain_id));
        }

        self.state.live_participants.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(LoopbackParticipant {
            shared: Arc::new(ParticipantShared {
                domain_id,
                _qos: qos.clone(),
                factory: self.state.clone(),
                state: Mutex::new(ParticipantState {
                    contained_alive: true,
                    closed: false,
                    types: BTreeSet::new(),
                    topics: BTreeSet::new(),
                }),
            }),
        }))
    }

    fn finalize(&self) -> Result<()> {
        let live = self.state.live_participants.load(Ordering::SeqCst);
        if live != 0 {
            return Err(DdsError::Leaked(live));
        }
        self.state.finalized.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug)]
struct ParticipantState {
    contained_alive: bool,
    closed: bool,
    types: BTreeSet<String>,
    topics: BTreeSet<String>,
}

#[derive(Debug)]
struct ParticipantShared {
    domain_id: u32,
    _qos: QosProfile,
    factory: Arc<FactoryState>,
    state: Mutex<ParticipantState>,
}

impl ParticipantShared {
    fn ensure_alive(&self) -> Result<()> {
        let state = self.state.lock();
        if state.closed || !state.contained_alive {
            return Err(DdsError::AlreadyDeleted);
        }
        Ok(())
    }
}

#[derive(Debug)]
struct LoopbackParticipant {
    shared: Arc<ParticipantShared>,
}

impl Participant for LoopbackParticipant {
    fn domain_id(&self) -> u32 {
        self.shared.domain_id
    }

    fn create_publisher(&self) -> Result<Box<dyn Publisher>> {
        self.shared.ensure_alive()?;
        Ok(Box::new(LoopbackPublisher {
            shared: self.shared.clone(),
        }))
    }

    fn register_type(&self, type_name: &str) -> Result<()> {
        self.shared.ensure_alive()?;
        let mut state = self.shared.state.lock();
        state.types.insert(type_name.to_string());
        Ok(())
    }

    fn create_topic(&self, name: &str, type_name: &str) -> Result<Box<dyn Topic>> {
        self.shared.ensure_alive()?;
        let mut state = self.shared.state.lock();
        if !state.types.contains(type_name) {
            return Err(DdsError::CreationFailed(format!(
                "type `{type_name}` not registered"
            )));
        }
        state.topics.insert(name.to_string());
        Ok(Box::new(LoopbackTopic {
            name: name.to_string(),
            type_name: type_name.to_string(),
        }))
    }

    fn delete_contained_entities(&self) -> Result<()> {
        let mut state = self.shared.state.lock();
        if state.closed {
            return Err(DdsError::AlreadyDeleted);
        }
        state.contained_alive = false;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        let mut state = self.shared.state.lock();
        if state.closed {
            return Err(DdsError::AlreadyDeleted);
        }
        if state.contained_alive {
            return Err(DdsError::TeardownFailed(
                "contained entities still alive".to_string(),
            ));
        }
        state.closed = true;
        self.shared
            .factory
            .live_participants
            .fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug)]
struct LoopbackTopic {
    name: String,
    type_name: String,
}

impl Topic for LoopbackTopic {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }
}

struct LoopbackPublisher {
    shared: Arc<ParticipantShared>,
}

impl Publisher for LoopbackPublisher {
    fn create_writer(&self, topic: &dyn Topic, _qos: &QosProfile) -> Result<Box<dyn DataWriter>> {
        self.shared.ensure_alive()?;
        {
            let state = self.shared.state.lock();
            if !state.topics.contains(topic.name()) {
                return Err(DdsError::CreationFailed(format!(
                    "topic `{}` does not belong to this participant",
                    topic.name()
                )));
            }
        }
        Ok(Box::new(LoopbackWriter {
            shared: self.shared.clone(),
            topic_name: topic.name().to_string(),
        }))
    }
}

struct LoopbackWriter {
    shared: Arc<ParticipantShared>,
    topic_name: String,
}

impl DataWriter for LoopbackWriter {
    fn topic_name(&self) -> &str {
        &self.topic_name
    }

    fn write(&self, payload: &[u8]) -> Result<()> {
        self.shared.ensure_alive()?;
        self.shared
            .factory
            .published
            .lock()
            .entry((self.shared.domain_id, self.topic_name.clone()))
            .or_default()
            .push(payload.to_vec());
        Ok(())
    }
}
