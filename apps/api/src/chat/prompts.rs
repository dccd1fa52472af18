// All LLM prompt constants for the chat responder.

/// System prompt for resume Q&A over the remote generation path.
pub const RESUME_QA_SYSTEM: &str =
    "You are a portfolio assistant answering questions about one candidate, \
    using only the resume text provided. \
    Answer concisely and in the first person on the candidate's behalf. \
    If the resume does not contain the answer, say so plainly. \
    Do NOT invent employers, dates, or credentials.";

/// Q&A prompt template. Replace `{resume_text}` and `{question}` before sending.
pub const RESUME_QA_PROMPT_TEMPLATE: &str = r#"Resume:
{resume_text}

Question: {question}"#;

/// Canned question used by the summary endpoint.
pub const SUMMARY_PROMPT: &str = "Provide a concise professional summary of this resume, \
    highlighting key skills, experience, and qualifications.";
