//! Regex-driven field extraction over normalized resume text.
//!
//! Every extractor is independent, reads only the normalized text, and
//! degrades to an empty or sentinel value instead of failing. Matching is
//! best-effort by design: name and location patterns in particular can fire
//! on unrelated capitalized or "City, ST"-shaped phrases.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::{ContactInfo, ExperienceEntry, ResumeRecord};

pub const NAME_NOT_FOUND: &str = "Not Found";
pub const NO_SUMMARY: &str = "No summary found.";

/// Skill catalog: category to keywords, matched case-insensitively as
/// substrings of the whole text.
const SKILL_CATALOG: &[(&str, &[&str])] = &[
    (
        "Technical Skills",
        &[
            "Python",
            "JavaScript",
            "Java",
            "C++",
            "Machine Learning",
            "AI",
            "Data Science",
            "Docker",
            "AWS",
            "Cloud Computing",
        ],
    ),
    (
        "Programming Frameworks",
        &["TensorFlow", "NLTK", "Django", "Flask"],
    ),
];

// ── patterns ────────────────────────────────────────────────────────────

static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(([A-Z][a-z]+\s?){1,3})").unwrap(),
        Regex::new(r"([A-Z][a-z]+ [A-Z][a-z]+)").unwrap(),
    ]
});

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static PHONE_US: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?1?\s*\(?(\d{3})\)?[-.\s]?(\d{3})[-.\s]?(\d{4})").unwrap());

static PHONE_INTL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+\d{1,3}\s?\(\d{3}\)\s?\d{3}[-.]?\d{4}").unwrap());

static LOCATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?:Located in|Based in|from)\s*([A-Za-z\s]+,\s*[A-Z]{2})").unwrap(),
        Regex::new(r"([A-Za-z\s]+,\s*[A-Z]{2})").unwrap(),
    ]
});

// Section captures stop at the next known section header or end of text.
// The boundary is consumed, not looked ahead at, which is fine because
// each extractor re-scans the full text independently.
static EXPERIENCE_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)(?:Experience|Work History|Professional Experience)\s*:\s*(.*?)(?:Education|Skills|Certifications|$)",
    )
    .unwrap()
});

static EDUCATION_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(?:Education|Academic Background)\s*:\s*(.*?)(?:Experience|Skills|Certifications|$)")
        .unwrap()
});

static CERTIFICATION_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(?:Certifications|Licenses)\s*:\s*(.*?)(?:Experience|Education|Skills|$)")
        .unwrap()
});

static SUMMARY_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(?:Summary|Profile)\s*:\s*(.*?)(?:Experience|Education|Skills|Certifications|$)")
        .unwrap()
});

static PERIOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:19|20)\d{2}\s*(?:-|to)\s*(?:(?:19|20)\d{2}|[Pp]resent)\b").unwrap()
});

static COMPANY_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+(?i:at)\s+").unwrap());

static EMPTY_PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s*\)").unwrap());

// ── extractors ──────────────────────────────────────────────────────────

/// Runs every field extractor against the normalized text.
pub fn extract_record(text: &str) -> ResumeRecord {
    ResumeRecord {
        name: extract_name(text),
        contact: extract_contact(text),
        skills: extract_skills(text),
        experience: extract_experience(text),
        education: extract_education(text),
        certifications: extract_certifications(text),
        summary: extract_summary(text),
    }
}

/// First match of the first name-shaped pattern, or "Not Found".
pub fn extract_name(text: &str) -> String {
    for pattern in NAME_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            if let Some(name) = captures.get(1) {
                return name.as_str().trim().to_string();
            }
        }
    }
    NAME_NOT_FOUND.to_string()
}

pub fn extract_email(text: &str) -> String {
    EMAIL
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// US-formatted numbers first (digit groups joined), then international.
pub fn extract_phone(text: &str) -> String {
    if let Some(captures) = PHONE_US.captures(text) {
        let groups: Vec<&str> = (1..=3)
            .filter_map(|i| captures.get(i).map(|m| m.as_str()))
            .collect();
        return groups.concat();
    }
    PHONE_INTL
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn extract_location(text: &str) -> String {
    for pattern in LOCATION_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            if let Some(location) = captures.get(1) {
                return location.as_str().trim().to_string();
            }
        }
    }
    String::new()
}

fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        email: non_empty(extract_email(text)),
        phone: non_empty(extract_phone(text)),
        location: non_empty(extract_location(text)),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Catalog keywords present anywhere in the text, case-insensitively.
/// Categories with no hits are omitted.
pub fn extract_skills(text: &str) -> BTreeMap<String, Vec<String>> {
    let haystack = text.to_lowercase();
    let mut skills = BTreeMap::new();
    for (category, keywords) in SKILL_CATALOG {
        let matched: Vec<String> = keywords
            .iter()
            .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
            .map(|keyword| keyword.to_string())
            .collect();
        if !matched.is_empty() {
            skills.insert((*category).to_string(), matched);
        }
    }
    skills
}

pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    section_lines(&EXPERIENCE_SECTION, text)
        .iter()
        .map(|line| parse_experience_line(line))
        .collect()
}

pub fn extract_education(text: &str) -> Vec<String> {
    section_lines(&EDUCATION_SECTION, text)
}

pub fn extract_certifications(text: &str) -> Vec<String> {
    section_lines(&CERTIFICATION_SECTION, text)
}

pub fn extract_summary(text: &str) -> String {
    SUMMARY_SECTION
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|summary| !summary.is_empty())
        .unwrap_or_else(|| NO_SUMMARY.to_string())
}

/// Captured section body split into trimmed, non-empty lines. Normalized
/// text is single-line, so this is usually a one-element list.
fn section_lines(section: &Regex, text: &str) -> Vec<String> {
    section
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|body| {
            body.as_str()
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Best-effort split of one experience line into role, company and period.
/// The year range (if any) is lifted out first, then the line is split on
/// the first " at ". Anything unrecognized stays in `role`.
fn parse_experience_line(line: &str) -> ExperienceEntry {
    let period = PERIOD.find(line).map(|m| m.as_str().to_string());

    let mut remainder = line.to_string();
    if let Some(p) = &period {
        remainder = remainder.replace(p.as_str(), "");
    }
    let remainder = EMPTY_PARENS.replace_all(&remainder, "");
    let remainder = remainder.split_whitespace().collect::<Vec<_>>().join(" ");
    let remainder = remainder.trim_matches(|c: char| c.is_whitespace() || ",-;:".contains(c));

    let mut parts = COMPANY_SPLIT.splitn(remainder, 2);
    let role_part = parts.next().unwrap_or_default().trim();
    let company = parts
        .next()
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty());
    let role = if role_part.is_empty() {
        line.trim().to_string()
    } else {
        role_part.to_string()
    };

    ExperienceEntry {
        role,
        company,
        period,
    }
}

// ── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_takes_first_capitalized_phrase() {
        assert_eq!(extract_name("Jane Doe is an engineer"), "Jane Doe");
        // Greedy: up to three capitalized words are taken.
        assert_eq!(extract_name("Jane Doe Software Engineer"), "Jane Doe Software");
    }

    #[test]
    fn test_name_sentinel_when_nothing_matches() {
        assert_eq!(extract_name("all lowercase text 12345"), NAME_NOT_FOUND);
        assert_eq!(extract_name(""), NAME_NOT_FOUND);
    }

    #[test]
    fn test_email_first_match() {
        let text = "Contact: jane.doe+work@example.co.uk or admin@test.org";
        assert_eq!(extract_email(text), "jane.doe+work@example.co.uk");
    }

    #[test]
    fn test_email_empty_when_absent() {
        assert_eq!(extract_email("no email here, just an @ sign"), "");
        assert_eq!(extract_email(""), "");
    }

    #[test]
    fn test_phone_us_groups_are_joined() {
        assert_eq!(extract_phone("call (555) 123-4567 today"), "5551234567");
        assert_eq!(extract_phone("call 555.123.4567 today"), "5551234567");
    }

    #[test]
    fn test_phone_us_pattern_wins_for_international_shapes() {
        // The US pattern matches the parenthesized digit groups before the
        // international pattern is ever consulted.
        assert_eq!(extract_phone("call +44 (020) 794-6095"), "0207946095");
    }

    #[test]
    fn test_phone_empty_when_absent() {
        assert_eq!(extract_phone("no digits that look like a number"), "");
    }

    #[test]
    fn test_location_prefers_prefixed_form() {
        assert_eq!(extract_location("Based in Austin, TX since 2019"), "Austin, TX");
    }

    #[test]
    fn test_location_bare_city_state_fallback() {
        assert_eq!(extract_location("Portland, OR resident"), "Portland, OR");
    }

    #[test]
    fn test_location_empty_when_absent() {
        assert_eq!(extract_location("works remotely"), "");
    }

    #[test]
    fn test_skills_match_case_insensitively() {
        let skills = extract_skills("Skills: python, AWS");
        let technical = skills.get("Technical Skills").unwrap();
        assert!(technical.contains(&"Python".to_string()));
        assert!(technical.contains(&"AWS".to_string()));
    }

    #[test]
    fn test_skills_omit_empty_categories() {
        let skills = extract_skills("Skills: Docker only");
        assert!(skills.contains_key("Technical Skills"));
        assert!(!skills.contains_key("Programming Frameworks"));
    }

    #[test]
    fn test_skills_empty_for_unrelated_text() {
        assert!(extract_skills("gardening, cooking, chess").is_empty());
    }

    #[test]
    fn test_experience_section_stops_at_next_header() {
        let text = "Experience: Senior Engineer at Acme Corp 2019 - 2023 Education: BS";
        let experience = extract_experience(text);
        assert_eq!(experience.len(), 1);
        assert_eq!(experience[0].role, "Senior Engineer");
        assert_eq!(experience[0].company.as_deref(), Some("Acme Corp"));
        assert_eq!(experience[0].period.as_deref(), Some("2019 - 2023"));
    }

    #[test]
    fn test_experience_line_without_structure_keeps_role() {
        let text = "Work History: freelance consulting work";
        let experience = extract_experience(text);
        assert_eq!(experience.len(), 1);
        assert_eq!(experience[0].role, "freelance consulting work");
        assert_eq!(experience[0].company, None);
        assert_eq!(experience[0].period, None);
    }

    #[test]
    fn test_experience_period_to_present() {
        let text = "Experience: Data Engineer at Initech 2021 to Present";
        let experience = extract_experience(text);
        assert_eq!(experience[0].period.as_deref(), Some("2021 to Present"));
        assert_eq!(experience[0].company.as_deref(), Some("Initech"));
    }

    #[test]
    fn test_experience_parenthesized_period_leaves_no_debris() {
        let text = "Experience: Engineer at Acme (2019 - 2023)";
        let experience = extract_experience(text);
        assert_eq!(experience[0].role, "Engineer");
        assert_eq!(experience[0].company.as_deref(), Some("Acme"));
        assert_eq!(experience[0].period.as_deref(), Some("2019 - 2023"));
    }

    #[test]
    fn test_experience_empty_when_no_section_header() {
        assert!(extract_experience("no section headers at all").is_empty());
    }

    #[test]
    fn test_education_captures_until_end_of_text() {
        let text = "Education: Bachelor of Science in Computer Science";
        assert_eq!(
            extract_education(text),
            vec!["Bachelor of Science in Computer Science".to_string()]
        );
    }

    #[test]
    fn test_education_alternate_header() {
        let text = "Academic Background: MS Statistics Skills: R";
        assert_eq!(extract_education(text), vec!["MS Statistics".to_string()]);
    }

    #[test]
    fn test_certifications_found_and_absent() {
        let text = "Certifications: CKA Education: BS";
        assert_eq!(extract_certifications(text), vec!["CKA".to_string()]);
        assert!(extract_certifications("nothing relevant").is_empty());
    }

    #[test]
    fn test_summary_sentinel_when_absent() {
        assert_eq!(extract_summary("no such section"), NO_SUMMARY);
    }

    #[test]
    fn test_summary_captures_profile_header() {
        let text = "Profile: systems generalist Education: BS";
        assert_eq!(extract_summary(text), "systems generalist");
    }

    #[test]
    fn test_empty_text_degrades_every_field() {
        let record = extract_record("");
        assert_eq!(record.name, NAME_NOT_FOUND);
        assert_eq!(record.contact, ContactInfo::default());
        assert!(record.skills.is_empty());
        assert!(record.experience.is_empty());
        assert!(record.education.is_empty());
        assert!(record.certifications.is_empty());
        assert_eq!(record.summary, NO_SUMMARY);
    }
}
