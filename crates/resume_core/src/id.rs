//! Short identifiers for list entities.
//!
//! # Responsibility
//! - Produce compact alphanumeric ids for new experience/education/skill/
//!   project entries.
//!
//! # Invariants
//! - Ids are non-empty lowercase alphanumeric strings of `ID_LEN` characters.
//! - Uniqueness is only guaranteed within the list passed to
//!   `generate_unique_id`; ids are not globally unique.

use uuid::Uuid;

/// Length of generated entity ids.
pub const ID_LEN: usize = 8;

/// Returns a short random entity id.
///
/// Cheap and side-effect free; callers may invoke it any number of times per
/// mutation.
pub fn generate_id() -> String {
    let mut value = Uuid::new_v4().simple().to_string();
    value.truncate(ID_LEN);
    value
}

/// Returns a short random id that `is_taken` does not report as in use.
pub fn generate_unique_id(is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let candidate = generate_id();
        if !is_taken(candidate.as_str()) {
            return candidate;
        }
    }
}
