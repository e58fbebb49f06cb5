// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Causeway - DDS application lifecycle toolkit
//!
//! Building blocks for applications that sit at the edge of a DDS system:
//! a publisher lifecycle controller with strict reverse-order teardown, a
//! named QoS profile library, and the routing-service plugin boundary used
//! by connection adapters such as `causeway-file-adapter`.
//!
//! The middleware itself (wire protocol, discovery, QoS enforcement,
//! transport) is an external dependency behind the [`dds`] facade traits.
//! An in-process [`LoopbackFactory`] backs demos and tests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use causeway::{
//!     run_publisher, DomainContext, LoopbackFactory, ProfileLibrary, PublisherOptions,
//!     ShutdownToken,
//! };
//! use std::sync::Arc;
//!
//! let ctx = DomainContext::new(Arc::new(LoopbackFactory::new()), ProfileLibrary::builtin());
//! let opts = PublisherOptions::new(0, 10).scenario(1);
//! let shutdown = ShutdownToken::new();
//!
//! let status = run_publisher(&ctx, &opts, &shutdown);
//! let status = match ctx.finalize() {
//!     Ok(()) => status,
//!     Err(_) => causeway::RunStatus::Failure,
//! };
//! std::process::exit(status.exit_code());
//! ```
//!
//! ## Modules
//!
//! - [`app`] - publisher lifecycle controller (start here)
//! - [`dds`] - middleware facade traits and the loopback backend
//! - [`qos`] - named QoS profiles
//! - [`config`] - ini message configuration
//! - [`routing`] - routing-service plugin boundary
//! - [`shutdown`] - cooperative cancellation token

/// Publisher lifecycle controller.
pub mod app;
/// Message configuration file (ini).
pub mod config;
/// Explicit factory context.
pub mod context;
/// Middleware facade traits and loopback backend.
pub mod dds;
/// Middleware-boundary error type.
pub mod error;
/// Named QoS profiles.
pub mod qos;
/// Routing-service plugin boundary.
pub mod routing;
/// Sample type and payload encoding.
pub mod sample;
/// Cooperative shutdown token.
pub mod shutdown;

pub use app::{run_publisher, AppError, PublisherOptions, RunStatus, DEFAULT_TOPIC};
pub use config::{ConfigError, MessageConfig};
pub use context::DomainContext;
pub use dds::loopback::LoopbackFactory;
pub use dds::{DataWriter, Participant, ParticipantFactory, Publisher, Topic};
pub use error::{DdsError, Result};
pub use qos::{Durability, ProfileLibrary, QosError, QosProfile, Reliability};
pub use sample::HelloWorld;
pub use shutdown::ShutdownToken;
