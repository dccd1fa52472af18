// Chat over a loaded resume: prompt templates, the responder decision
// chain, and the HTTP handlers that bind sessions to it.

pub mod handlers;
pub mod prompts;
pub mod responder;
