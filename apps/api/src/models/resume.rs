use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Structured fields pulled out of a resume's text layer.
///
/// Every field is best-effort: absent contact parts are `None`, absent
/// sections are empty, and `name`/`summary` fall back to fixed sentinel
/// strings chosen by the extractor. Consumers must tolerate all of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub contact: ContactInfo,
    /// Skill category -> matched skill names, in catalog order within a category.
    /// Categories with no matches are omitted entirely.
    pub skills: BTreeMap<String, Vec<String>>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
    pub summary: String,
}

impl ResumeRecord {
    /// All matched skill names flattened across categories, in stored order.
    pub fn all_skills(&self) -> Vec<&str> {
        self.skills
            .values()
            .flat_map(|names| names.iter().map(String::as_str))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// One work-history item. Only `role` is guaranteed; `company` and `period`
/// are recovered when the line happens to follow a recognizable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

impl fmt::Display for ExperienceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} ({})",
            self.role,
            self.company.as_deref().unwrap_or("N/A"),
            self.period.as_deref().unwrap_or("N/A"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(role: &str, company: Option<&str>, period: Option<&str>) -> ExperienceEntry {
        ExperienceEntry {
            role: role.to_string(),
            company: company.map(str::to_string),
            period: period.map(str::to_string),
        }
    }

    #[test]
    fn test_experience_display_full() {
        let e = entry("Senior Engineer", Some("Acme Corp"), Some("2019 - 2023"));
        assert_eq!(e.to_string(), "Senior Engineer at Acme Corp (2019 - 2023)");
    }

    #[test]
    fn test_experience_display_missing_parts_use_na() {
        let e = entry("Consultant", None, None);
        assert_eq!(e.to_string(), "Consultant at N/A (N/A)");
    }

    #[test]
    fn test_all_skills_flattens_categories_in_order() {
        let mut skills = BTreeMap::new();
        skills.insert(
            "Programming Frameworks".to_string(),
            vec!["Django".to_string()],
        );
        skills.insert(
            "Technical Skills".to_string(),
            vec!["Python".to_string(), "AWS".to_string()],
        );
        let record = ResumeRecord {
            name: "Jane Doe".to_string(),
            contact: ContactInfo::default(),
            skills,
            experience: vec![],
            education: vec![],
            certifications: vec![],
            summary: String::new(),
        };
        // BTreeMap iterates categories alphabetically.
        assert_eq!(record.all_skills(), vec!["Django", "Python", "AWS"]);
    }

    #[test]
    fn test_contact_serialization_skips_missing_parts() {
        let contact = ContactInfo {
            email: Some("jane@example.com".to_string()),
            phone: None,
            location: None,
        };
        let value = serde_json::to_value(&contact).unwrap();
        assert_eq!(value, serde_json::json!({ "email": "jane@example.com" }));
    }
}
