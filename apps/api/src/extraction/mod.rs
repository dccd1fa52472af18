// Resume ingestion pipeline: PDF bytes -> text -> normalized text ->
// structured record -> knowledge base. Degrades instead of failing: a
// resume whose text layer cannot be decoded still produces a (empty)
// record, and the decode failure travels alongside as a warning.

pub mod fields;
pub mod handlers;
pub mod loader;
pub mod normalize;

use std::io;
use std::path::Path;

use tracing::info;

pub use loader::ExtractionError;

use crate::knowledge::KnowledgeBase;
use crate::models::resume::ResumeRecord;

/// An undecoded resume: raw bytes plus where they came from.
/// Consumed once by `load_resume`.
#[derive(Debug)]
pub struct RawDocument {
    pub source: String,
    pub data: Vec<u8>,
}

impl RawDocument {
    pub fn from_upload(source: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            data,
        }
    }

    pub fn from_path(path: &Path) -> io::Result<Self> {
        Ok(Self {
            source: path.display().to_string(),
            data: std::fs::read(path)?,
        })
    }
}

/// A fully ingested resume: normalized text, extracted fields and the
/// similarity index built over them. Immutable once constructed.
#[derive(Debug)]
pub struct LoadedResume {
    pub source: String,
    pub text: String,
    pub record: ResumeRecord,
    pub knowledge: KnowledgeBase,
}

/// Runs the whole pipeline. Decoder failure is returned as a warning next
/// to the (degraded) resume rather than aborting the load.
pub fn load_resume(document: RawDocument) -> (LoadedResume, Option<ExtractionError>) {
    let RawDocument { source, data } = document;

    let (raw_text, warning) = match loader::extract_pdf_text(&data, &source) {
        Ok(text) => (text, None),
        Err(e) => (String::new(), Some(e)),
    };

    let text = normalize::normalize(&raw_text);
    let record = fields::extract_record(&text);
    let knowledge = KnowledgeBase::build(&record);

    info!(
        source,
        chars = text.len(),
        entries = knowledge.len(),
        degraded = warning.is_some(),
        "resume ingested"
    );

    (
        LoadedResume {
            source,
            text,
            record,
            knowledge,
        },
        warning,
    )
}
