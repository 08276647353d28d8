//! Plain-text outline renderer.
//!
//! Walks `section_order` and renders each section through an exhaustive match
//! on `SectionKind`. Empty sections are skipped. Heading style follows the
//! document's template, with unknown template names rendered as `modern`.

use crate::model::resume::{
    Education, Experience, PersonalInfo, Project, ResumeDocument, SkillGroup, MAX_SKILL_LEVEL,
};
use crate::model::section::SectionKind;
use crate::model::template::TemplateKind;
use crate::render::date_range::format_date_range;

/// Renders the document as a plain-text outline.
pub fn render_outline(document: &ResumeDocument) -> String {
    let template = TemplateKind::resolve(&document.template);
    let blocks: Vec<String> = document
        .section_order
        .iter()
        .filter_map(|kind| render_section(document, *kind, template))
        .collect();
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

/// Renders one section, or `None` when it has no content.
pub fn render_section(
    document: &ResumeDocument,
    kind: SectionKind,
    template: TemplateKind,
) -> Option<String> {
    let body = match kind {
        SectionKind::PersonalInfo => render_personal_info(&document.personal_info),
        SectionKind::Summary => document.summary.text.trim().to_string(),
        SectionKind::Experience => join_entries(document.experience.iter().map(render_experience)),
        SectionKind::Education => join_entries(document.education.iter().map(render_education)),
        SectionKind::Skills => join_lines(document.skill_groups.iter().filter_map(render_skill_group)),
        SectionKind::Projects => join_entries(document.projects.iter().map(render_project)),
    };
    if body.is_empty() {
        return None;
    }
    Some(format!("{}\n{}", heading(kind.title(), template), body))
}

fn heading(title: &str, template: TemplateKind) -> String {
    match template {
        TemplateKind::Modern => format!("## {title}"),
        TemplateKind::Classic => {
            let upper = title.to_uppercase();
            let rule = "=".repeat(upper.chars().count());
            format!("{upper}\n{rule}")
        }
        TemplateKind::Minimal => title.to_string(),
        TemplateKind::Creative => format!("* {title} *"),
        TemplateKind::Tech => format!("// {}", title.to_lowercase()),
    }
}

fn render_personal_info(info: &PersonalInfo) -> String {
    let mut lines = Vec::new();
    let headline = non_empty(&[info.name.as_str(), info.title.as_str()]).join(", ");
    if !headline.is_empty() {
        lines.push(headline);
    }

    let contact = non_empty(&[
        info.email.as_str(),
        info.phone.as_str(),
        info.location.as_str(),
        info.website.as_deref().unwrap_or_default(),
        info.linkedin.as_deref().unwrap_or_default(),
        info.github.as_deref().unwrap_or_default(),
    ])
    .join(" | ");
    if !contact.is_empty() {
        lines.push(contact);
    }
    lines.join("\n")
}

fn render_experience(entry: &Experience) -> String {
    let mut lines = vec![non_empty(&[entry.position.as_str(), entry.company.as_str()]).join(" at ")];
    let meta = non_empty(&[
        format_date_range(&entry.start_date, &entry.end_date, entry.current).as_str(),
        entry.location.as_deref().unwrap_or_default(),
    ])
    .join(" | ");
    if !meta.is_empty() {
        lines.push(meta);
    }
    push_text(&mut lines, &entry.description);
    push_highlights(&mut lines, &entry.highlights);
    lines.join("\n")
}

fn render_education(entry: &Education) -> String {
    let degree = non_empty(&[entry.degree.as_str(), entry.field.as_str()]).join(" in ");
    let mut lines = vec![non_empty(&[degree.as_str(), entry.institution.as_str()]).join(", ")];
    let range = format_date_range(&entry.start_date, &entry.end_date, entry.current);
    push_text(&mut lines, &range);
    push_text(&mut lines, entry.description.as_deref().unwrap_or_default());
    lines.join("\n")
}

fn render_skill_group(group: &SkillGroup) -> Option<String> {
    let skills: Vec<String> = group
        .skills
        .iter()
        .filter(|skill| !skill.name.trim().is_empty())
        .map(|skill| match skill.rating() {
            Some(level) => format!("{} ({level}/{MAX_SKILL_LEVEL})", skill.name.trim()),
            None => skill.name.trim().to_string(),
        })
        .collect();
    if skills.is_empty() {
        return None;
    }
    let name = group.name.trim();
    if name.is_empty() {
        Some(skills.join(", "))
    } else {
        Some(format!("{name}: {}", skills.join(", ")))
    }
}

fn render_project(entry: &Project) -> String {
    let mut lines = vec![entry.name.trim().to_string()];
    let range = format_date_range(
        entry.start_date.as_deref().unwrap_or_default(),
        entry.end_date.as_deref().unwrap_or_default(),
        false,
    );
    let meta = non_empty(&[range.as_str(), entry.url.as_deref().unwrap_or_default()]).join(" | ");
    push_text(&mut lines, &meta);
    push_text(&mut lines, &entry.description);
    push_highlights(&mut lines, &entry.highlights);
    lines.join("\n")
}

fn push_text(lines: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        lines.push(text.to_string());
    }
}

fn push_highlights(lines: &mut Vec<String>, highlights: &[String]) {
    for highlight in highlights.iter().map(|h| h.trim()).filter(|h| !h.is_empty()) {
        lines.push(format!("- {highlight}"));
    }
}

fn non_empty<'a>(values: &[&'a str]) -> Vec<&'a str> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .collect()
}

fn join_entries(entries: impl Iterator<Item = String>) -> String {
    entries
        .filter(|entry| !entry.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn join_lines(lines: impl Iterator<Item = String>) -> String {
    lines.collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::{render_outline, render_section};
    use crate::model::resume::ResumeDocument;
    use crate::model::section::SectionKind;
    use crate::model::template::TemplateKind;

    #[test]
    fn sections_follow_document_order() {
        let mut doc = ResumeDocument::sample();
        doc.section_order.reverse();
        let outline = render_outline(&doc);

        let projects = outline.find("## Projects").expect("projects heading");
        let summary = outline.find("## Professional Summary").expect("summary heading");
        assert!(projects < summary);
    }

    #[test]
    fn empty_sections_are_skipped() {
        let doc = ResumeDocument::blank();
        for kind in SectionKind::ALL {
            assert!(render_section(&doc, kind, TemplateKind::Modern).is_none());
        }
    }

    #[test]
    fn current_experience_renders_present() {
        let mut doc = ResumeDocument::sample();
        doc.experience[0].end_date = "2023-02".to_string();
        let block = render_section(&doc, SectionKind::Experience, TemplateKind::Minimal)
            .expect("experience block");
        assert!(block.contains("January 2020 - Present"));
        assert!(!block.contains("February 2023"));
    }

    #[test]
    fn template_selects_heading_style() {
        let mut doc = ResumeDocument::sample();
        doc.template = "classic".to_string();
        assert!(render_outline(&doc).contains("WORK EXPERIENCE\n==============="));

        doc.template = "tech".to_string();
        assert!(render_outline(&doc).contains("// skills"));

        doc.template = "unknown".to_string();
        assert!(render_outline(&doc).contains("## Skills"));
    }

    #[test]
    fn skills_show_ratings_and_skip_unrated_levels() {
        let mut doc = ResumeDocument::sample();
        doc.skill_groups[0].skills[2].level = Some(0);
        let block = render_section(&doc, SectionKind::Skills, TemplateKind::Modern)
            .expect("skills block");
        assert!(block.contains("Technical Skills: JavaScript (4/5), React (4/5), Node.js\n"));
    }
}
