// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Publisher lifecycle controller.
//!
//! Sequences entity creation (participant, publisher, type, topic, writer),
//! runs the blocking write loop, and funnels every exit path through one
//! teardown sink so entities are released in reverse-creation order no
//! matter where a failure happens.
//!
//! ```text
//! Uninitialized -> Participant -> Publisher -> TypeRegistered -> Topic
//!     -> Writer -> Running -> Draining -> Terminated
//! ```
//!
//! Any creation-step failure jumps straight to Draining. Running loops until
//! the sample count is reached or the shutdown token fires; the token is
//! polled once per iteration, so cancellation latency is bounded by the
//! write period.

use crate::config::{ConfigError, MessageConfig};
use crate::context::DomainContext;
use crate::dds::Participant;
use crate::error::DdsError;
use crate::qos::{scenario_profile, QosError};
use crate::sample::HelloWorld;
use crate::shutdown::ShutdownToken;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

/// Topic written by the publisher application.
pub const DEFAULT_TOPIC: &str = "HelloWorldTopic";

/// Interval between writes.
pub const DEFAULT_WRITE_PERIOD: Duration = Duration::from_secs(1);

/// Creation-chain errors. Each variant names the step that failed; the first
/// failure aborts the remaining steps and the run proceeds to teardown.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("create_publisher failed: {0}")]
    CreatePublisher(#[source] DdsError),

    #[error("register_type failed: {0}")]
    RegisterType(#[source] DdsError),

    #[error("create_topic failed: {0}")]
    CreateTopic(#[source] DdsError),

    #[error("create_writer failed: {0}")]
    CreateWriter(#[source] DdsError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("QoS profile error: {0}")]
    Qos(#[from] QosError),
}

/// Final status of a publisher run. Failure overrides success, never the
/// reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failure,
}

impl RunStatus {
    /// Process exit code: 0 on success, 1 on failure.
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Success => 0,
            RunStatus::Failure => 1,
        }
    }
}

/// Publisher run parameters.
#[derive(Debug, Clone)]
pub struct PublisherOptions {
    /// DDS domain to join.
    pub domain_id: u32,
    /// Stop after this many samples (counting from the configured offset).
    pub sample_count: u32,
    /// WAN scenario; selects the QoS profile for participant and writer.
    pub scenario: u32,
    /// Message config file (ini).
    pub config_path: PathBuf,
    /// Topic name.
    pub topic: String,
    /// Interval between writes.
    pub write_period: Duration,
}

impl PublisherOptions {
    pub fn new(domain_id: u32, sample_count: u32) -> Self {
        Self {
            domain_id,
            sample_count,
            scenario: 0,
            config_path: PathBuf::from("publisher.ini"),
            topic: DEFAULT_TOPIC.to_string(),
            write_period: DEFAULT_WRITE_PERIOD,
        }
    }

    pub fn scenario(mut self, scenario: u32) -> Self {
        self.scenario = scenario;
        self
    }

    pub fn config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = path.as_ref().to_path_buf();
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn write_period(mut self, period: Duration) -> Self {
        self.write_period = period;
        self
    }
}

/// Run the publisher application: create entities, write samples, tear down.
///
/// Teardown runs exactly once on every exit path, including every
/// creation-step failure. The caller finalizes the context afterwards.
pub fn run_publisher(
    ctx: &DomainContext,
    opts: &PublisherOptions,
    shutdown: &ShutdownToken,
) -> RunStatus {
    info!("executing scenario {}", opts.scenario);

    let profile = scenario_profile(opts.scenario);
    let participant = match ctx.create_participant_with_profile(opts.domain_id, &profile) {
        Ok(participant) => participant,
        Err(err) => {
            error!("create_participant failed: {err}");
            return teardown(ctx, None, "create_participant error", RunStatus::Failure);
        }
    };

    match publish_samples(ctx, participant.as_ref(), &profile, opts, shutdown) {
        Ok(written) => {
            info!("wrote {written} sample(s)");
            teardown(ctx, Some(participant), "shutting down", RunStatus::Success)
        }
        Err(err) => {
            error!("{err}");
            teardown(
                ctx,
                Some(participant),
                "shutting down after error",
                RunStatus::Failure,
            )
        }
    }
}

/// The guarded creation chain and the write loop. Every step is created from
/// `participant`, so teardown only ever needs the participant handle.
fn publish_samples(
    ctx: &DomainContext,
    participant: &dyn Participant,
    profile: &str,
    opts: &PublisherOptions,
    shutdown: &ShutdownToken,
) -> Result<u32, AppError> {
    let publisher = participant
        .create_publisher()
        .map_err(AppError::CreatePublisher)?;

    participant
        .register_type(HelloWorld::TYPE_NAME)
        .map_err(AppError::RegisterType)?;

    let topic = participant
        .create_topic(&opts.topic, HelloWorld::TYPE_NAME)
        .map_err(AppError::CreateTopic)?;

    let qos = ctx.profiles().resolve(profile)?;
    let writer = publisher
        .create_writer(topic.as_ref(), qos)
        .map_err(AppError::CreateWriter)?;

    let config = MessageConfig::load(&opts.config_path)?;

    // One sample, reused across the loop.
    let mut sample = HelloWorld::default();
    let mut written = 0u32;
    let mut samples_written = config.initial_count;

    while !shutdown.is_requested() && samples_written < opts.sample_count {
        sample.msg = format!("{} {}", config.template, samples_written);
        info!("Writing {}, count {}", config.template, samples_written);

        // Write failures are non-fatal per sample; the loop continues.
        if let Err(err) = writer.write(&sample.to_payload()) {
            warn!("write error at count {samples_written}: {err}");
        }

        written += 1;
        samples_written += 1;
        thread::sleep(opts.write_period);
    }

    Ok(written)
}

/// Common teardown sink.
///
/// Deletes contained entities, then the participant. Either failure
/// downgrades the status, but the remaining steps still run.
fn teardown(
    ctx: &DomainContext,
    participant: Option<Box<dyn Participant>>,
    message: &str,
    mut status: RunStatus,
) -> RunStatus {
    info!("{message}");

    if let Some(participant) = participant {
        if let Err(err) = participant.delete_contained_entities() {
            error!("delete_contained_entities failed: {err}");
            status = RunStatus::Failure;
        }
        if let Err(err) = ctx.delete_participant(participant) {
            error!("delete_participant failed: {err}");
            status = RunStatus::Failure;
        }
    }

    status
}
