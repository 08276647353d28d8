//! Core use-case services.
//!
//! # Responsibility
//! - Own the resume document and expose one operation per logical edit.
//! - Keep UI and CLI layers decoupled from storage details.

pub mod persistence;
pub mod resume_store;
pub mod section_order;
