//! Resume document model.
//!
//! # Responsibility
//! - Define the single root aggregate persisted per storage key.
//! - Provide the seed documents used on first run and on reset.
//! - Report structural problems through advisory validation.
//!
//! # Invariants
//! - Entity ids are non-empty and unique within their containing list.
//! - `section_order` is a permutation of `SectionKind::ALL`.
//! - `current = true` means the end date is disregarded by formatting, but it
//!   stays in the stored document.
//! - Empty highlight and skill placeholders are valid and never pruned here.

use crate::model::section::{default_section_order, is_complete_order, SectionKind};
use crate::model::template::{default_template, DEFAULT_TEMPLATE};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static YEAR_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid year-month regex"));

/// Highest skill rating.
pub const MAX_SKILL_LEVEL: u8 = 5;
/// Rating given to newly added skills.
pub const DEFAULT_SKILL_LEVEL: u8 = 3;

/// Contact and headline fields. Any field may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Free-text professional summary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub text: String,
}

/// One work experience entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// `YYYY-MM` or empty.
    #[serde(default)]
    pub start_date: String,
    /// `YYYY-MM` or empty. Ignored by formatting while `current` is set.
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl Experience {
    /// Entry created by the "add experience" action: ongoing, one empty
    /// highlight placeholder.
    pub fn new_default(id: String) -> Self {
        Self {
            id,
            company: "New Company".to_string(),
            position: "New Position".to_string(),
            location: Some("City, State".to_string()),
            start_date: String::new(),
            end_date: String::new(),
            current: true,
            description: String::new(),
            highlights: vec![String::new()],
        }
    }
}

/// One education entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Education {
    pub fn new_default(id: String) -> Self {
        Self {
            id,
            institution: "New Institution".to_string(),
            degree: "Degree".to_string(),
            field: "Field of Study".to_string(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            description: Some(String::new()),
        }
    }
}

/// One rated skill inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// 1..=5; `None` or `Some(0)` means unrated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl Skill {
    pub fn new_default(id: String) -> Self {
        Self {
            id,
            name: "New Skill".to_string(),
            level: Some(DEFAULT_SKILL_LEVEL),
        }
    }

    /// Returns the effective rating, treating 0 and out-of-range values as
    /// unrated.
    pub fn rating(&self) -> Option<u8> {
        self.level
            .filter(|level| (1..=MAX_SKILL_LEVEL).contains(level))
    }
}

/// Named group owning an ordered skill list.
///
/// Skill ids are unique within the group only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl SkillGroup {
    pub fn new_default(id: String) -> Self {
        Self {
            id,
            name: String::new(),
            skills: Vec::new(),
        }
    }
}

/// One project entry. Dates are optional, unlike experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Project {
    pub fn new_default(id: String) -> Self {
        Self {
            id,
            name: "New Project".to_string(),
            description: "Project description".to_string(),
            url: Some(String::new()),
            highlights: vec![String::new()],
            start_date: Some(String::new()),
            end_date: Some(String::new()),
        }
    }
}

/// Root aggregate persisted as one JSON blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skill_groups: Vec<SkillGroup>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default = "default_section_order")]
    pub section_order: Vec<SectionKind>,
    /// Old saves may lack this field; it then defaults to `modern`.
    #[serde(default = "default_template")]
    pub template: String,
}

impl Default for ResumeDocument {
    fn default() -> Self {
        Self::sample()
    }
}

impl ResumeDocument {
    /// Empty document: blank fields, no entries, default order.
    pub fn blank() -> Self {
        Self {
            personal_info: PersonalInfo {
                website: Some(String::new()),
                linkedin: Some(String::new()),
                github: Some(String::new()),
                ..PersonalInfo::default()
            },
            summary: Summary::default(),
            experience: Vec::new(),
            education: Vec::new(),
            skill_groups: Vec::new(),
            projects: Vec::new(),
            section_order: default_section_order(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Populated placeholder document shown on first run.
    pub fn sample() -> Self {
        Self {
            personal_info: PersonalInfo {
                name: "Your Name".to_string(),
                title: "Professional Title".to_string(),
                email: "email@example.com".to_string(),
                phone: "(123) 456-7890".to_string(),
                location: "City, State".to_string(),
                website: Some(String::new()),
                linkedin: Some(String::new()),
                github: Some(String::new()),
            },
            summary: Summary {
                text: "Experienced professional with a passion for innovation and problem-solving. \
                       Skilled in collaborating with cross-functional teams to deliver high-quality solutions."
                    .to_string(),
            },
            experience: vec![Experience {
                id: "1".to_string(),
                company: "Company Name".to_string(),
                position: "Job Title".to_string(),
                location: Some("City, State".to_string()),
                start_date: "2020-01".to_string(),
                end_date: String::new(),
                current: true,
                description: "Working on exciting projects and initiatives.".to_string(),
                highlights: strings(&[
                    "Accomplished X resulting in Y improvement",
                    "Led initiative to improve Z by 30%",
                    "Collaborated with cross-functional teams to deliver project ahead of schedule",
                ]),
            }],
            education: vec![Education {
                id: "1".to_string(),
                institution: "University Name".to_string(),
                degree: "Bachelor of Science".to_string(),
                field: "Computer Science".to_string(),
                start_date: "2016-09".to_string(),
                end_date: "2020-05".to_string(),
                current: false,
                description: Some("Graduated with honors.".to_string()),
            }],
            skill_groups: vec![
                SkillGroup {
                    id: "1".to_string(),
                    name: "Technical Skills".to_string(),
                    skills: vec![
                        sample_skill("1", "JavaScript", 4),
                        sample_skill("2", "React", 4),
                        sample_skill("3", "Node.js", 3),
                    ],
                },
                SkillGroup {
                    id: "2".to_string(),
                    name: "Soft Skills".to_string(),
                    skills: vec![
                        sample_skill("1", "Communication", 5),
                        sample_skill("2", "Team Leadership", 4),
                        sample_skill("3", "Problem Solving", 5),
                    ],
                },
            ],
            projects: vec![Project {
                id: "1".to_string(),
                name: "Project Name".to_string(),
                description: "A brief description of the project and your role.".to_string(),
                url: Some("https://project-url.com".to_string()),
                highlights: strings(&[
                    "Implemented feature X using technology Y",
                    "Improved performance by Z%",
                    "Collaborated with team to deliver ahead of schedule",
                ]),
                start_date: Some("2022-01".to_string()),
                end_date: Some("2022-06".to_string()),
            }],
            section_order: default_section_order(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Collects every structural problem in this document.
    ///
    /// Advisory only: store mutations never call this.
    pub fn validate(&self) -> Result<(), Vec<DocumentValidationError>> {
        let mut errors = Vec::new();

        if !is_complete_order(&self.section_order) {
            errors.push(DocumentValidationError::InvalidSectionOrder(
                self.section_order.clone(),
            ));
        }

        check_ids("experience", self.experience.iter().map(|e| e.id.as_str()), &mut errors);
        check_ids("education", self.education.iter().map(|e| e.id.as_str()), &mut errors);
        check_ids("skillGroups", self.skill_groups.iter().map(|g| g.id.as_str()), &mut errors);
        check_ids("projects", self.projects.iter().map(|p| p.id.as_str()), &mut errors);

        for group in &self.skill_groups {
            let list = format!("skillGroups[{}].skills", group.id);
            check_ids(&list, group.skills.iter().map(|s| s.id.as_str()), &mut errors);
            for skill in &group.skills {
                if let Some(level) = skill.level {
                    if level > MAX_SKILL_LEVEL {
                        errors.push(DocumentValidationError::SkillLevelOutOfRange {
                            skill_id: skill.id.clone(),
                            level,
                        });
                    }
                }
            }
        }

        for entry in &self.experience {
            check_date("experience", &entry.id, &entry.start_date, &mut errors);
            check_date("experience", &entry.id, &entry.end_date, &mut errors);
        }
        for entry in &self.education {
            check_date("education", &entry.id, &entry.start_date, &mut errors);
            check_date("education", &entry.id, &entry.end_date, &mut errors);
        }
        for entry in &self.projects {
            for date in [&entry.start_date, &entry.end_date].into_iter().flatten() {
                check_date("projects", &entry.id, date, &mut errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Returns whether `value` is empty or a `YYYY-MM` month.
pub fn is_year_month_or_empty(value: &str) -> bool {
    value.is_empty() || YEAR_MONTH_RE.is_match(value)
}

/// Structural problem found by `ResumeDocument::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    InvalidSectionOrder(Vec<SectionKind>),
    EmptyId { list: String },
    DuplicateId { list: String, id: String },
    SkillLevelOutOfRange { skill_id: String, level: u8 },
    InvalidDate { list: String, id: String, value: String },
}

impl Display for DocumentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSectionOrder(order) => {
                let tokens: Vec<&str> = order.iter().map(|kind| kind.as_str()).collect();
                write!(
                    f,
                    "section order must list each section exactly once, got [{}]",
                    tokens.join(", ")
                )
            }
            Self::EmptyId { list } => write!(f, "{list} contains an entry with an empty id"),
            Self::DuplicateId { list, id } => write!(f, "{list} contains duplicate id `{id}`"),
            Self::SkillLevelOutOfRange { skill_id, level } => write!(
                f,
                "skill `{skill_id}` has level {level}; expected 0..={MAX_SKILL_LEVEL}"
            ),
            Self::InvalidDate { list, id, value } => {
                write!(f, "{list} entry `{id}` has date `{value}`; expected YYYY-MM")
            }
        }
    }
}

impl Error for DocumentValidationError {}

fn check_ids<'a>(
    list: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<DocumentValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            errors.push(DocumentValidationError::EmptyId {
                list: list.to_string(),
            });
        } else if !seen.insert(id) {
            errors.push(DocumentValidationError::DuplicateId {
                list: list.to_string(),
                id: id.to_string(),
            });
        }
    }
}

fn check_date(list: &str, id: &str, value: &str, errors: &mut Vec<DocumentValidationError>) {
    if !is_year_month_or_empty(value) {
        errors.push(DocumentValidationError::InvalidDate {
            list: list.to_string(),
            id: id.to_string(),
            value: value.to_string(),
        });
    }
}

fn sample_skill(id: &str, name: &str, level: u8) -> Skill {
    Skill {
        id: id.to_string(),
        name: name.to_string(),
        level: Some(level),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
