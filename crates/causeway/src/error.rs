// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Middleware-boundary error type.

use crate::qos::QosError;
use thiserror::Error;

/// Errors surfaced across the middleware facade.
#[derive(Debug, Error)]
pub enum DdsError {
    /// Domain ID out of range (0-232).
    #[error("invalid domain_id: {0} (must be 0-232)")]
    InvalidDomainId(u32),

    /// An entity factory call failed.
    #[error("entity creation failed: {0}")]
    CreationFailed(String),

    /// Type registration failed.
    #[error("type registration failed: {0}")]
    RegistrationFailed(String),

    /// Operation on an entity whose owner was already torn down.
    #[error("entity already deleted")]
    AlreadyDeleted,

    /// A sample could not be written.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Cascade-delete or participant deletion failed.
    #[error("teardown failed: {0}")]
    TeardownFailed(String),

    /// Factory finalized while participants were still alive.
    #[error("{0} participant(s) still alive at finalize")]
    Leaked(usize),

    /// Factory used after finalization.
    #[error("participant factory already finalized")]
    Finalized,

    /// QoS profile resolution failed.
    #[error(transparent)]
    Profile(#[from] QosError),

    /// I/O error with underlying cause.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for middleware facade operations.
pub type Result<T> = std::result::Result<T, DdsError>;
