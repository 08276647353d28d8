//! Resume domain model.
//!
//! # Responsibility
//! - Define the persisted resume document and its entity types.
//! - Define typed partial updates used by store mutations.
//!
//! # Invariants
//! - Entity ids are unique within their containing list only.
//! - Section tokens form a closed set matched exhaustively.

pub mod patch;
pub mod resume;
pub mod section;
pub mod template;
