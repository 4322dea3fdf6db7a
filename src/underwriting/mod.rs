pub mod orchestrator;
pub mod prompt;

pub use orchestrator::{chat, parse_request, underwrite};
