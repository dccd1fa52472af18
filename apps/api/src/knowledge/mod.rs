// Knowledge base: one text entry per populated field group plus a tf-idf
// index over those entries, built once per loaded resume and immutable
// afterwards.

mod tfidf;

use crate::models::resume::ResumeRecord;
use tfidf::TfIdfIndex;

/// Entries always appear in the same order: skills, experience, education,
/// certifications. Groups with no extracted content get no entry.
#[derive(Debug)]
pub struct KnowledgeBase {
    entries: Vec<String>,
    index: TfIdfIndex,
}

impl KnowledgeBase {
    pub fn build(record: &ResumeRecord) -> Self {
        let mut entries = Vec::new();

        let skills = record.all_skills();
        if !skills.is_empty() {
            entries.push(format!("Skills: {}", skills.join(", ")));
        }
        if !record.experience.is_empty() {
            let lines: Vec<String> = record.experience.iter().map(|e| e.to_string()).collect();
            entries.push(format!("Experience: {}", lines.join("; ")));
        }
        if !record.education.is_empty() {
            entries.push(format!("Education: {}", record.education.join("; ")));
        }
        if !record.certifications.is_empty() {
            entries.push(format!("Certifications: {}", record.certifications.join("; ")));
        }

        let index = TfIdfIndex::build(&entries);
        Self { entries, index }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry most similar to the query, verbatim. `None` only for an
    /// empty knowledge base; zero-overlap queries still return the first
    /// entry so a non-empty base always produces an answer.
    pub fn best_match(&self, query: &str) -> Option<&str> {
        self.index
            .best_index(query)
            .map(|i| self.entries[i].as_str())
    }
}
