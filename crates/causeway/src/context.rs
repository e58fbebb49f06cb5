// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Explicit factory context.
//!
//! Bundles the participant factory and the QoS profile library into one
//! object that is passed to whatever needs it and finalized exactly once at
//! process exit.

use crate::dds::{Participant, ParticipantFactory};
use crate::error::Result;
use crate::qos::ProfileLibrary;
use std::sync::Arc;

/// Factory handle plus named QoS profiles.
pub struct DomainContext {
    factory: Arc<dyn ParticipantFactory>,
    profiles: ProfileLibrary,
}

impl DomainContext {
    pub fn new(factory: Arc<dyn ParticipantFactory>, profiles: ProfileLibrary) -> Self {
        Self { factory, profiles }
    }

    /// Create a participant using a QoS profile resolved by name.
    pub fn create_participant_with_profile(
        &self,
        domain_id: u32,
        profile: &str,
    ) -> Result<Box<dyn Participant>> {
        let qos = self.profiles.resolve(profile)?;
        self.factory.create_participant(domain_id, qos)
    }

    /// Delete a participant previously created through this context.
    /// Contained entities must have been deleted first.
    pub fn delete_participant(&self, participant: Box<dyn Participant>) -> Result<()> {
        participant.close()
    }

    pub fn profiles(&self) -> &ProfileLibrary {
        &self.profiles
    }

    /// Release process-wide middleware resources. Consumes the context so a
    /// finalized factory cannot be reused through it.
    pub fn finalize(self) -> Result<()> {
        self.factory.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dds::loopback::LoopbackFactory;
    use crate::error::DdsError;
    use crate::qos::QosError;

    fn context() -> DomainContext {
        DomainContext::new(Arc::new(LoopbackFactory::new()), ProfileLibrary::builtin())
    }

    #[test]
    fn test_create_with_known_profile() {
        let ctx = context();
        let participant = ctx
            .create_participant_with_profile(0, "wan/scenario_1")
            .expect("participant");
        participant.delete_contained_entities().expect("cascade");
        ctx.delete_participant(participant).expect("delete");
        ctx.finalize().expect("finalize");
    }

    #[test]
    fn test_unknown_profile_is_creation_failure() {
        let ctx = context();
        let err = ctx
            .create_participant_with_profile(0, "wan/scenario_42")
            .expect_err("must fail");
        assert!(matches!(
            err,
            DdsError::Profile(QosError::UnknownProfile(_))
        ));
    }

    #[test]
    fn test_finalize_reports_leak() {
        let ctx = context();
        let _participant = ctx
            .create_participant_with_profile(0, "default")
            .expect("participant");
        assert!(matches!(ctx.finalize(), Err(DdsError::Leaked(1))));
    }
}
