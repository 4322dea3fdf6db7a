// src/domain/underwriting.rs

use crate::domain::SubjectProperty;
use serde::Serialize;
use serde_json::Value;

/// Subject plus comps, in upload order. Comps are kept exactly as the client
/// sent them; only a prefix ever reaches the model, see
/// `underwriting::prompt::MAX_PROMPT_COMPS`.
#[derive(Debug, Clone)]
pub struct UnderwritingRequest {
    pub subject: SubjectProperty,
    pub sales_data: Vec<Value>,
}

/// What the ARV endpoint hands back. Serializes to exactly the wire shape:
/// `{ "report": ... }` or `{ "error": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UnderwritingResult {
    Success { report: String },
    Failure { error: String },
}

impl UnderwritingResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UnderwritingResult::Success { .. })
    }
}
