// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! causeway-publisher - WAN scenario publisher application
//!
//! Creates a participant, publisher, topic, and writer from a scenario QoS
//! profile, writes samples on a fixed cadence, and tears everything down in
//! reverse order. Exit code 0 on success, 1 on any creation, config,
//! teardown, or finalize failure.
//!
//! # Usage
//!
//! ```bash
//! # Scenario 1, 20 samples, defaults from publisher.ini
//! causeway-publisher --scenario 1 --sample-count 20
//!
//! # Custom message config and QoS profile file
//! causeway-publisher --config demo.ini --profiles profiles.toml
//! ```

use causeway::{
    run_publisher, DomainContext, LoopbackFactory, ProfileLibrary, PublisherOptions, RunStatus,
    ShutdownToken, DEFAULT_TOPIC,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// WAN scenario publisher
#[derive(Parser, Debug)]
#[command(name = "causeway-publisher")]
#[command(about = "Publish samples over a WAN scenario QoS profile")]
#[command(version)]
struct Args {
    /// DDS domain ID
    #[arg(short, long, default_value = "0")]
    domain: u32,

    /// Number of samples to write
    #[arg(short = 'n', long, default_value = "50")]
    sample_count: u32,

    /// WAN scenario (selects the QoS profile)
    #[arg(short, long, default_value = "0")]
    scenario: u32,

    /// Message config file (ini)
    #[arg(short, long, default_value = "publisher.ini")]
    config: PathBuf,

    /// QoS profile file (TOML); built-in profiles when omitted
    #[arg(long)]
    profiles: Option<PathBuf>,

    /// Topic name
    #[arg(short, long, default_value = DEFAULT_TOPIC)]
    topic: String,

    /// Interval between writes in milliseconds
    #[arg(long, default_value = "1000")]
    write_period_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let code = match run(&args) {
        Ok(status) => status.exit_code(),
        Err(err) => {
            error!("{err}");
            1
        }
    };
    std::process::exit(code);
}

fn run(args: &Args) -> Result<RunStatus, Box<dyn std::error::Error>> {
    let shutdown = ShutdownToken::new();
    let handler_token = shutdown.clone();
    ctrlc::set_handler(move || handler_token.request())?;

    let profiles = match &args.profiles {
        Some(path) => ProfileLibrary::from_file(path)?,
        None => ProfileLibrary::builtin(),
    };

    let factory = Arc::new(LoopbackFactory::new());
    let ctx = DomainContext::new(factory.clone(), profiles);

    let opts = PublisherOptions::new(args.domain, args.sample_count)
        .scenario(args.scenario)
        .config_path(&args.config)
        .topic(args.topic.clone())
        .write_period(Duration::from_millis(args.write_period_ms));

    let mut status = run_publisher(&ctx, &opts, &shutdown);

    // Finalize failures downgrade the exit status even after a clean run.
    if let Err(err) = ctx.finalize() {
        error!("finalize failed: {err}");
        status = RunStatus::Failure;
    }

    info!(
        "loopback delivered {} sample(s) on '{}'",
        factory.sample_count(args.domain, &args.topic),
        args.topic
    );

    Ok(status)
}
