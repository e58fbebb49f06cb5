// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Cooperative shutdown token.
//!
//! Cloned into a signal handler and polled by blocking loops at their
//! suspension points. Cancellation latency is bounded by the longest interval
//! between polls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
    flag: Arc<AtomicBool>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. Safe to call from a signal handler thread.
    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether shutdown has been requested.
    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_visible_through_clone() {
        let token = ShutdownToken::new();
        let clone = token.clone();
        assert!(!token.is_requested());

        clone.request();
        assert!(token.is_requested());
    }

    #[test]
    fn test_request_idempotent() {
        let token = ShutdownToken::new();
        token.request();
        token.request();
        assert!(token.is_requested());
    }
}
