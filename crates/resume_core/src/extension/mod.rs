//! Optional third-party integrations.
//!
//! Integrations (grammar checking, PDF export) are loaded by the host. This
//! module only tracks which ones are available, replacing process-wide
//! "already loaded" flags with an injected registry.

pub mod capability;
pub mod registry;
