//! Known layout templates.
//!
//! The stored `template` field stays a free string; this enum is the set a
//! renderer knows how to lay out.

/// Template name used when a stored document has none.
pub const DEFAULT_TEMPLATE: &str = "modern";

/// Layout style understood by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Modern,
    Classic,
    Minimal,
    Creative,
    Tech,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 5] = [
        TemplateKind::Modern,
        TemplateKind::Classic,
        TemplateKind::Minimal,
        TemplateKind::Creative,
        TemplateKind::Tech,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Classic => "classic",
            Self::Minimal => "minimal",
            Self::Creative => "creative",
            Self::Tech => "tech",
        }
    }

    /// User-facing short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Modern => "Clean and contemporary design with a balanced layout.",
            Self::Classic => "Traditional and professional look that works for any industry.",
            Self::Minimal => "Elegant and simple design that focuses on content.",
            Self::Creative => "Distinctive visual style with a modern color palette.",
            Self::Tech => "Programming-inspired theme perfect for technical roles.",
        }
    }

    /// Parses a stored template name.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
    }

    /// Resolves a stored name, falling back to `Modern` for unknown values.
    pub fn resolve(value: &str) -> Self {
        Self::parse(value).unwrap_or(Self::Modern)
    }
}

pub(crate) fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

#[cfg(test)]
mod tests {
    use super::{TemplateKind, DEFAULT_TEMPLATE};

    #[test]
    fn parses_known_templates() {
        for kind in TemplateKind::ALL {
            assert_eq!(TemplateKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TemplateKind::parse("fancy"), None);
    }

    #[test]
    fn unknown_template_resolves_to_modern() {
        assert_eq!(TemplateKind::resolve("fancy"), TemplateKind::Modern);
        assert_eq!(TemplateKind::resolve(DEFAULT_TEMPLATE), TemplateKind::Modern);
        assert_eq!(TemplateKind::resolve("tech"), TemplateKind::Tech);
    }
}
