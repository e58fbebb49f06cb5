// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! End-to-end publisher runs over the loopback backend.

use causeway::{
    run_publisher, DomainContext, HelloWorld, LoopbackFactory, ProfileLibrary, PublisherOptions,
    RunStatus, ShutdownToken,
};
use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp config");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

fn decoded_messages(factory: &LoopbackFactory, domain_id: u32, topic: &str) -> Vec<String> {
    factory
        .take_published(domain_id, topic)
        .iter()
        .map(|payload| HelloWorld::from_payload(payload).expect("decode").msg)
        .collect()
}

#[test]
fn publishes_from_config_offset_and_finalizes_cleanly() {
    let config = write_config("[message]\nnumber = 2\nmessage = Greetings\n");
    let factory = Arc::new(LoopbackFactory::new());
    let ctx = DomainContext::new(factory.clone(), ProfileLibrary::builtin());

    let opts = PublisherOptions::new(0, 5)
        .scenario(1)
        .config_path(config.path())
        .write_period(Duration::ZERO);

    let status = run_publisher(&ctx, &opts, &ShutdownToken::new());
    assert_eq!(status, RunStatus::Success);

    assert_eq!(
        decoded_messages(&factory, 0, "HelloWorldTopic"),
        vec!["Greetings 2", "Greetings 3", "Greetings 4"]
    );

    assert_eq!(factory.live_participants(), 0);
    ctx.finalize().expect("finalize");
}

#[test]
fn defaults_apply_when_config_has_no_keys() {
    let config = write_config("");
    let factory = Arc::new(LoopbackFactory::new());
    let ctx = DomainContext::new(factory.clone(), ProfileLibrary::builtin());

    let opts = PublisherOptions::new(0, 2)
        .config_path(config.path())
        .write_period(Duration::ZERO);

    let status = run_publisher(&ctx, &opts, &ShutdownToken::new());
    assert_eq!(status, RunStatus::Success);

    assert_eq!(
        decoded_messages(&factory, 0, "HelloWorldTopic"),
        vec!["Hello World 0", "Hello World 1"]
    );
    ctx.finalize().expect("finalize");
}

#[test]
fn shutdown_request_ends_run_without_leaks() {
    let config = write_config("");
    let factory = Arc::new(LoopbackFactory::new());
    let ctx = DomainContext::new(factory.clone(), ProfileLibrary::builtin());

    let opts = PublisherOptions::new(0, u32::MAX)
        .config_path(config.path())
        .write_period(Duration::ZERO);

    let shutdown = ShutdownToken::new();
    shutdown.request();

    let status = run_publisher(&ctx, &opts, &shutdown);
    assert_eq!(status, RunStatus::Success);
    assert_eq!(factory.sample_count(0, "HelloWorldTopic"), 0);
    ctx.finalize().expect("finalize");
}

#[test]
fn unreadable_config_fails_but_still_tears_down() {
    let factory = Arc::new(LoopbackFactory::new());
    let ctx = DomainContext::new(factory.clone(), ProfileLibrary::builtin());

    let opts = PublisherOptions::new(0, 3)
        .config_path("/nonexistent/publisher.ini")
        .write_period(Duration::ZERO);

    let status = run_publisher(&ctx, &opts, &ShutdownToken::new());
    assert_eq!(status, RunStatus::Failure);

    // teardown released the participant despite the failure
    assert_eq!(factory.live_participants(), 0);
    ctx.finalize().expect("finalize");
}

#[test]
fn invalid_domain_id_is_a_creation_failure() {
    let config = write_config("");
    let factory = Arc::new(LoopbackFactory::new());
    let ctx = DomainContext::new(factory, ProfileLibrary::builtin());

    let opts = PublisherOptions::new(1000, 3)
        .config_path(config.path())
        .write_period(Duration::ZERO);

    let status = run_publisher(&ctx, &opts, &ShutdownToken::new());
    assert_eq!(status, RunStatus::Failure);
    ctx.finalize().expect("finalize");
}
