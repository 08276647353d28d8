//! Section tokens and ordering primitives.
//!
//! # Invariants
//! - The token set is closed: exactly the six `SectionKind` variants.
//! - A valid section order is a permutation of `SectionKind::ALL`.

use serde::{Deserialize, Serialize};

/// One displayable resume section.
///
/// Serialized with the camelCase token used in stored documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    PersonalInfo,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
}

impl SectionKind {
    /// Canonical default order.
    pub const ALL: [SectionKind; 6] = [
        SectionKind::PersonalInfo,
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
    ];

    /// Stable token used in persisted documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PersonalInfo => "personalInfo",
            Self::Summary => "summary",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Projects => "projects",
        }
    }

    /// User-facing section title.
    pub fn title(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Information",
            Self::Summary => "Professional Summary",
            Self::Experience => "Work Experience",
            Self::Education => "Education",
            Self::Skills => "Skills",
            Self::Projects => "Projects",
        }
    }

    /// Parses one persisted token. Tokens are case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value.trim())
    }
}

/// Direction for an adjacent section swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }
}

/// Returns the default section order.
pub fn default_section_order() -> Vec<SectionKind> {
    SectionKind::ALL.to_vec()
}

/// Returns whether `order` contains every section exactly once.
pub fn is_complete_order(order: &[SectionKind]) -> bool {
    order.len() == SectionKind::ALL.len()
        && SectionKind::ALL.iter().all(|kind| order.contains(kind))
}
