//! Read-only consumers of document snapshots.
//!
//! Visual templates and PDF export live outside this crate; this module holds
//! the parts of the renderer contract that depend only on document data.

pub mod date_range;
pub mod outline;
