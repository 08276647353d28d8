//! Typed partial updates.
//!
//! Each patch lists the editable fields of one entity as `Option`s. Applying a
//! patch overwrites exactly the fields that are `Some`; ids are never
//! patchable. Patches deserialize from camelCase JSON partials so UI layers can
//! forward form payloads unchanged.

use crate::model::resume::{Education, Experience, PersonalInfo, Project, Skill};
use serde::Deserialize;

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn set_optional<T>(target: &mut Option<T>, value: Option<T>) {
    if let Some(value) = value {
        *target = Some(value);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoPatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

impl PersonalInfoPatch {
    pub fn apply(self, target: &mut PersonalInfo) {
        set(&mut target.name, self.name);
        set(&mut target.title, self.title);
        set(&mut target.email, self.email);
        set(&mut target.phone, self.phone);
        set(&mut target.location, self.location);
        set_optional(&mut target.website, self.website);
        set_optional(&mut target.linkedin, self.linkedin);
        set_optional(&mut target.github, self.github);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperiencePatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Setting `current` never clears the stored end date.
    pub current: Option<bool>,
    pub description: Option<String>,
    pub highlights: Option<Vec<String>>,
}

impl ExperiencePatch {
    pub fn apply(self, target: &mut Experience) {
        set(&mut target.company, self.company);
        set(&mut target.position, self.position);
        set_optional(&mut target.location, self.location);
        set(&mut target.start_date, self.start_date);
        set(&mut target.end_date, self.end_date);
        set(&mut target.current, self.current);
        set(&mut target.description, self.description);
        set(&mut target.highlights, self.highlights);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationPatch {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl EducationPatch {
    pub fn apply(self, target: &mut Education) {
        set(&mut target.institution, self.institution);
        set(&mut target.degree, self.degree);
        set(&mut target.field, self.field);
        set(&mut target.start_date, self.start_date);
        set(&mut target.end_date, self.end_date);
        set(&mut target.current, self.current);
        set_optional(&mut target.description, self.description);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillPatch {
    pub name: Option<String>,
    /// `Some(0)` stores an explicit "unrated" value.
    pub level: Option<u8>,
}

impl SkillPatch {
    pub fn apply(self, target: &mut Skill) {
        set(&mut target.name, self.name);
        set_optional(&mut target.level, self.level);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ProjectPatch {
    pub fn apply(self, target: &mut Project) {
        set(&mut target.name, self.name);
        set(&mut target.description, self.description);
        set_optional(&mut target.url, self.url);
        set(&mut target.highlights, self.highlights);
        set_optional(&mut target.start_date, self.start_date);
        set_optional(&mut target.end_date, self.end_date);
    }
}

#[cfg(test)]
mod tests {
    use super::{ExperiencePatch, PersonalInfoPatch, SkillPatch};
    use crate::model::resume::{Experience, PersonalInfo, Skill};

    #[test]
    fn only_supplied_fields_change() {
        let mut info = PersonalInfo {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..PersonalInfo::default()
        };
        PersonalInfoPatch {
            title: Some("Engineer".to_string()),
            github: Some("ada".to_string()),
            ..PersonalInfoPatch::default()
        }
        .apply(&mut info);

        assert_eq!(info.name, "Ada");
        assert_eq!(info.email, "ada@example.com");
        assert_eq!(info.title, "Engineer");
        assert_eq!(info.github.as_deref(), Some("ada"));
        assert_eq!(info.website, None);
    }

    #[test]
    fn setting_current_keeps_end_date() {
        let mut entry = Experience::new_default("x".to_string());
        entry.current = false;
        entry.end_date = "2021-03".to_string();

        ExperiencePatch {
            current: Some(true),
            ..ExperiencePatch::default()
        }
        .apply(&mut entry);

        assert!(entry.current);
        assert_eq!(entry.end_date, "2021-03");
    }

    #[test]
    fn patches_deserialize_from_camel_case_partials() {
        let patch: ExperiencePatch =
            serde_json::from_str(r#"{"startDate": "2019-04", "current": false}"#)
                .expect("partial should parse");
        assert_eq!(patch.start_date.as_deref(), Some("2019-04"));
        assert_eq!(patch.current, Some(false));
        assert_eq!(patch.company, None);

        let mut skill = Skill::new_default("s".to_string());
        let patch: SkillPatch = serde_json::from_str(r#"{"level": 5}"#).expect("skill partial");
        patch.apply(&mut skill);
        assert_eq!(skill.level, Some(5));
        assert_eq!(skill.name, "New Skill");
    }
}
