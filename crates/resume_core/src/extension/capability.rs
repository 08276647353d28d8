//! Optional third-party integrations the host application may load.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Integration loaded on demand by the host (script, plugin, native lib).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntegrationCapability {
    GrammarCheck,
    PdfExport,
}

impl IntegrationCapability {
    pub const ALL: [IntegrationCapability; 2] = [Self::GrammarCheck, Self::PdfExport];

    /// Stable string id used in host configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GrammarCheck => CAPABILITY_GRAMMAR_CHECK,
            Self::PdfExport => CAPABILITY_PDF_EXPORT,
        }
    }

    /// User-facing short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::GrammarCheck => "Inline grammar checking for summary and description fields.",
            Self::PdfExport => "Rasterize the rendered resume into a paginated PDF file.",
        }
    }
}

pub const CAPABILITY_GRAMMAR_CHECK: &str = "grammar_check";
pub const CAPABILITY_PDF_EXPORT: &str = "pdf_export";

/// Parses one capability id. Ids are lowercase and case-sensitive.
pub fn parse_capability(value: &str) -> Result<IntegrationCapability, CapabilityParseError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(CapabilityParseError::Empty);
    }

    IntegrationCapability::ALL
        .into_iter()
        .find(|capability| capability.as_str() == normalized)
        .ok_or_else(|| CapabilityParseError::Unsupported(normalized.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityParseError {
    Empty,
    Unsupported(String),
}

impl Display for CapabilityParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "integration capability must not be empty"),
            Self::Unsupported(value) => write!(f, "integration capability is unsupported: {value}"),
        }
    }
}

impl Error for CapabilityParseError {}

#[cfg(test)]
mod tests {
    use super::{parse_capability, CapabilityParseError, IntegrationCapability};

    #[test]
    fn parses_supported_capabilities() {
        assert_eq!(
            parse_capability("grammar_check").expect("grammar parse"),
            IntegrationCapability::GrammarCheck
        );
        assert_eq!(
            parse_capability(" pdf_export ").expect("pdf parse"),
            IntegrationCapability::PdfExport
        );
    }

    #[test]
    fn rejects_empty_and_unknown_values() {
        assert_eq!(
            parse_capability("  ").expect_err("empty must fail"),
            CapabilityParseError::Empty
        );
        assert_eq!(
            parse_capability("Grammar_Check").expect_err("case-sensitive"),
            CapabilityParseError::Unsupported("Grammar_Check".to_string())
        );
    }

    #[test]
    fn descriptions_name_the_feature() {
        assert!(IntegrationCapability::GrammarCheck
            .description()
            .contains("grammar"));
        assert!(IntegrationCapability::PdfExport.description().contains("PDF"));
    }
}
