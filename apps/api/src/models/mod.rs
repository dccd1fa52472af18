// Core data model: the structured resume record and chat transcript types.
// Pure data; extraction logic lives in `extraction`, answering in `chat`.

pub mod chat;
pub mod resume;
