//! Query responder: keyword direct matches over extracted fields, tf-idf
//! similarity fallback, and an optional remote generation path that, when
//! configured, bypasses the local chain entirely.

use std::time::Duration;

use tracing::debug;

use crate::chat::prompts::{RESUME_QA_PROMPT_TEMPLATE, RESUME_QA_SYSTEM, SUMMARY_PROMPT};
use crate::extraction::LoadedResume;
use crate::llm_client::{GeminiClient, LlmError};
use crate::models::resume::ResumeRecord;

const NO_SKILLS: &str = "No skills are listed on this resume.";
const NO_EXPERIENCE: &str = "No work experience is listed on this resume.";
const NO_EDUCATION: &str = "No education is listed on this resume.";
const NO_CERTIFICATIONS: &str = "No certifications are listed on this resume.";
const NO_KNOWLEDGE: &str =
    "I can help you with questions about my skills, experience, or certifications.";

/// Everything the responder needs to decide between local answering and
/// remote generation. `credential: None` disables the remote path.
#[derive(Debug, Clone)]
pub struct ResponderConfig {
    pub credential: Option<String>,
    pub model_name: String,
    pub temperature: f32,
    pub timeout: Duration,
}

/// Stateless answer engine shared across sessions. Each call is computed
/// from scratch against the resume it is handed; nothing is cached.
pub struct Responder {
    llm: Option<GeminiClient>,
}

impl Responder {
    pub fn new(config: ResponderConfig) -> Self {
        let llm = config.credential.map(|key| {
            GeminiClient::new(key, config.model_name, config.temperature, config.timeout)
        });
        Self { llm }
    }

    pub fn remote_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Answers one query. With a configured credential the question and the
    /// full resume text go to the model in a single attempt; any failure is
    /// the caller's to display. Without one, answers come from the
    /// extracted fields and the knowledge base.
    pub async fn answer(&self, resume: &LoadedResume, message: &str) -> Result<String, LlmError> {
        if let Some(client) = &self.llm {
            debug!(source = %resume.source, "forwarding query to {}", client.model());
            let prompt = RESUME_QA_PROMPT_TEMPLATE
                .replace("{resume_text}", &resume.text)
                .replace("{question}", message);
            return client.generate(RESUME_QA_SYSTEM, &prompt).await;
        }
        Ok(local_answer(resume, message))
    }

    /// One-shot professional summary. Remote deployments phrase it through
    /// the model; local ones return the extracted summary field.
    pub async fn summarize(&self, resume: &LoadedResume) -> Result<String, LlmError> {
        if self.llm.is_some() {
            return self.answer(resume, SUMMARY_PROMPT).await;
        }
        Ok(resume.record.summary.clone())
    }
}

/// The local decision chain, evaluated in order against the case-folded
/// query: skills, experience, education, certifications, then similarity.
pub(crate) fn local_answer(resume: &LoadedResume, query: &str) -> String {
    let query_folded = query.to_lowercase();
    let record = &resume.record;

    if query_folded.contains("skills") {
        skills_answer(record)
    } else if query_folded.contains("experience") {
        experience_answer(record)
    } else if query_folded.contains("education") {
        education_answer(record)
    } else if query_folded.contains("certification") {
        certifications_answer(record)
    } else {
        resume
            .knowledge
            .best_match(query)
            .map(str::to_string)
            .unwrap_or_else(|| NO_KNOWLEDGE.to_string())
    }
}

/// All matched skill names across categories, joined.
fn skills_answer(record: &ResumeRecord) -> String {
    let skills = record.all_skills();
    if skills.is_empty() {
        return NO_SKILLS.to_string();
    }
    skills.join(", ")
}

/// One line per experience entry.
fn experience_answer(record: &ResumeRecord) -> String {
    if record.experience.is_empty() {
        return NO_EXPERIENCE.to_string();
    }
    record
        .experience
        .iter()
        .map(|entry| entry.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn education_answer(record: &ResumeRecord) -> String {
    if record.education.is_empty() {
        return NO_EDUCATION.to_string();
    }
    record.education.join("; ")
}

fn certifications_answer(record: &ResumeRecord) -> String {
    if record.certifications.is_empty() {
        return NO_CERTIFICATIONS.to_string();
    }
    record.certifications.join("; ")
}
