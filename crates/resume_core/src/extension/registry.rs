//! Load-state registry for optional integrations.
//!
//! # Invariants
//! - Each capability moves `NotLoaded -> Loading -> Loaded | Failed`.
//! - A failed capability is never retried within the same registry.
//! - The registry is owned and injected by the host; there is no global
//!   instance.

use crate::extension::capability::IntegrationCapability;
use log::{error, info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Load lifecycle of one integration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed(String),
}

/// What the caller should do after `begin_load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadDecision {
    /// Caller must start loading and report the outcome.
    Start,
    /// A load is already in flight.
    Pending,
    /// Already available; attach directly.
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    PreviouslyFailed {
        capability: IntegrationCapability,
        reason: String,
    },
    NotLoading(IntegrationCapability),
}

impl Display for CapabilityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreviouslyFailed { capability, reason } => write!(
                f,
                "integration `{}` previously failed to load: {reason}",
                capability.as_str()
            ),
            Self::NotLoading(capability) => write!(
                f,
                "integration `{}` has no load in progress",
                capability.as_str()
            ),
        }
    }
}

impl Error for CapabilityError {}

/// Per-host registry of integration load states.
#[derive(Debug, Default)]
pub struct IntegrationRegistry {
    states: BTreeMap<IntegrationCapability, LoadState>,
}

impl IntegrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, capability: IntegrationCapability) -> LoadState {
        self.states.get(&capability).cloned().unwrap_or_default()
    }

    pub fn is_loaded(&self, capability: IntegrationCapability) -> bool {
        self.state(capability) == LoadState::Loaded
    }

    /// Returns the last load error, if any.
    pub fn load_error(&self, capability: IntegrationCapability) -> Option<&str> {
        match self.states.get(&capability) {
            Some(LoadState::Failed(reason)) => Some(reason.as_str()),
            _ => None,
        }
    }

    /// Requests use of an integration.
    ///
    /// # Errors
    /// - `PreviouslyFailed` once the integration has failed to load.
    pub fn begin_load(
        &mut self,
        capability: IntegrationCapability,
    ) -> Result<LoadDecision, CapabilityError> {
        let state = self.states.entry(capability).or_default();
        match state {
            LoadState::NotLoaded => {
                *state = LoadState::Loading;
                info!(
                    "event=integration_load module=extension status=start capability={}",
                    capability.as_str()
                );
                Ok(LoadDecision::Start)
            }
            LoadState::Loading => Ok(LoadDecision::Pending),
            LoadState::Loaded => Ok(LoadDecision::Ready),
            LoadState::Failed(reason) => {
                warn!(
                    "event=integration_load module=extension status=skipped capability={} reason=previously_failed",
                    capability.as_str()
                );
                Err(CapabilityError::PreviouslyFailed {
                    capability,
                    reason: reason.clone(),
                })
            }
        }
    }

    pub fn mark_loaded(&mut self, capability: IntegrationCapability) -> Result<(), CapabilityError> {
        self.finish(capability, LoadState::Loaded)?;
        info!(
            "event=integration_load module=extension status=ok capability={}",
            capability.as_str()
        );
        Ok(())
    }

    pub fn mark_failed(
        &mut self,
        capability: IntegrationCapability,
        reason: impl Into<String>,
    ) -> Result<(), CapabilityError> {
        let reason = reason.into();
        self.finish(capability, LoadState::Failed(reason.clone()))?;
        error!(
            "event=integration_load module=extension status=error capability={} error={}",
            capability.as_str(),
            reason
        );
        Ok(())
    }

    fn finish(
        &mut self,
        capability: IntegrationCapability,
        outcome: LoadState,
    ) -> Result<(), CapabilityError> {
        match self.states.get_mut(&capability) {
            Some(state) if *state == LoadState::Loading => {
                *state = outcome;
                Ok(())
            }
            _ => Err(CapabilityError::NotLoading(capability)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CapabilityError, IntegrationRegistry, LoadDecision, LoadState};
    use crate::extension::capability::IntegrationCapability;

    #[test]
    fn first_request_starts_load_and_later_requests_wait() {
        let mut registry = IntegrationRegistry::new();
        let cap = IntegrationCapability::GrammarCheck;

        assert_eq!(registry.state(cap), LoadState::NotLoaded);
        assert_eq!(registry.begin_load(cap).expect("start"), LoadDecision::Start);
        assert_eq!(registry.begin_load(cap).expect("pending"), LoadDecision::Pending);

        registry.mark_loaded(cap).expect("mark loaded");
        assert!(registry.is_loaded(cap));
        assert_eq!(registry.begin_load(cap).expect("ready"), LoadDecision::Ready);
    }

    #[test]
    fn failed_integration_is_not_retried() {
        let mut registry = IntegrationRegistry::new();
        let cap = IntegrationCapability::GrammarCheck;

        registry.begin_load(cap).expect("start");
        registry
            .mark_failed(cap, "script blocked")
            .expect("mark failed");

        assert_eq!(registry.load_error(cap), Some("script blocked"));
        let err = registry.begin_load(cap).expect_err("must not retry");
        assert!(matches!(err, CapabilityError::PreviouslyFailed { .. }));
    }

    #[test]
    fn completing_without_a_load_is_rejected() {
        let mut registry = IntegrationRegistry::new();
        let err = registry
            .mark_loaded(IntegrationCapability::PdfExport)
            .expect_err("no load in flight");
        assert_eq!(err, CapabilityError::NotLoading(IntegrationCapability::PdfExport));
        assert_eq!(
            registry.state(IntegrationCapability::PdfExport),
            LoadState::NotLoaded
        );
    }

    #[test]
    fn capabilities_are_tracked_independently() {
        let mut registry = IntegrationRegistry::new();
        registry
            .begin_load(IntegrationCapability::GrammarCheck)
            .expect("start grammar");
        assert_eq!(
            registry.state(IntegrationCapability::PdfExport),
            LoadState::NotLoaded
        );
    }
}
