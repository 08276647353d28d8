//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the persisted-slot contract used by the resume store.
//! - Isolate SQLite query details from store orchestration.
//!
//! # Invariants
//! - One storage key maps to at most one document body.
//! - Every successful write bumps that key's revision counter.

pub mod document_repo;
