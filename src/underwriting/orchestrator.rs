// src/underwriting/orchestrator.rs

use crate::domain::{SaleRecord, SubjectProperty, UnderwritingRequest, UnderwritingResult};
use crate::errors::ServerError;
use crate::sonar::Completion;
use crate::underwriting::prompt::{build_prompt, prompt_comps};
use serde_json::Value;
use tracing::{error, info, warn};

pub const REQUIRED_FIELDS: &str = "subject and sales_data required in body";
pub const ARV_UPSTREAM_ERROR: &str = "Error calling Perplexity Sonar for ARV underwrite";
pub const CHAT_UPSTREAM_ERROR: &str = "Error calling Perplexity Sonar";
pub const DEFAULT_CHAT_MESSAGE: &str = "Say hello from Sonar.";

/// Validates an ARV request body before anything leaves the process.
///
/// `subject` and `sales_data` must both be present. Comps are passed on
/// untouched; a `sales_data` that isn't an array counts as no comps.
pub fn parse_request(body: &Value) -> Result<UnderwritingRequest, ServerError> {
    let subject = body.get("subject").filter(|v| !v.is_null());
    let sales = body.get("sales_data").filter(|v| !v.is_null());

    let (Some(subject), Some(sales)) = (subject, sales) else {
        return Err(ServerError::BadRequest(REQUIRED_FIELDS.to_string()));
    };

    let subject: SubjectProperty = serde_json::from_value(subject.clone())
        .map_err(|e| ServerError::BadRequest(format!("subject is invalid: {e}")))?;

    if subject.address.trim().is_empty() {
        return Err(ServerError::BadRequest("subject.address is required".into()));
    }

    let sales_data = match sales.as_array() {
        Some(items) => items.clone(),
        None => {
            warn!("sales_data is not an array; underwriting without comps");
            Vec::new()
        }
    };

    Ok(UnderwritingRequest {
        subject,
        sales_data,
    })
}

/// Comps for plotting. Fields with the wrong type read as absent; only
/// entries that aren't objects at all are skipped.
pub fn parse_sales_data(value: &Value) -> Vec<SaleRecord> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index = i, "Skipping malformed sales_data entry: {e}");
                None
            }
        })
        .collect()
}

/// Builds the memo prompt and makes exactly one completion call.
/// Upstream detail is logged here and never returned.
pub fn underwrite<C>(client: &C, request: &UnderwritingRequest) -> UnderwritingResult
where
    C: Completion + ?Sized,
{
    let prompt = match build_prompt(&request.subject, &request.sales_data) {
        Ok(p) => p,
        Err(e) => {
            error!("Could not build ARV prompt: {e}");
            return UnderwritingResult::Failure {
                error: ARV_UPSTREAM_ERROR.to_string(),
            };
        }
    };

    info!(
        subject = %request.subject.address,
        comps = prompt_comps(&request.sales_data).len(),
        "Requesting ARV underwriting memo"
    );

    match client.complete(&prompt) {
        Ok(report) => UnderwritingResult::Success { report },
        Err(e) => {
            error!("ARV underwriting call failed: {e}");
            UnderwritingResult::Failure {
                error: ARV_UPSTREAM_ERROR.to_string(),
            }
        }
    }
}

/// Free-form passthrough: one user message in, one reply out.
pub fn chat<C>(client: &C, message: Option<&str>) -> Result<String, ServerError>
where
    C: Completion + ?Sized,
{
    let message = message
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_CHAT_MESSAGE);

    client.complete(message).map_err(|e| {
        error!("Sonar chat call failed: {e}");
        ServerError::Upstream(CHAT_UPSTREAM_ERROR.to_string())
    })
}
