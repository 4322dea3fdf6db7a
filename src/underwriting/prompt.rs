// src/underwriting/prompt.rs

use crate::domain::SubjectProperty;
use serde_json::Value;

/// Comps beyond this many are left out of the prompt to bound its size.
pub const MAX_PROMPT_COMPS: usize = 200;

const INSTRUCTIONS: &str = "You are an expert residential real estate underwriter. \
Given the subject property and comparable sales below, produce a concise underwriting memo containing:\n\
- Estimated ARV (single dollar value) and a short rationale\n\
- Key adjustments/comparable notes (3-6 bullets)\n\
- A short list of the top 5 comps used and why\n\
- Confidence level (low/medium/high) and any assumptions or data gaps.\n\
\n\
Respond in plain text.";

/// The first `MAX_PROMPT_COMPS` comps, in upload order.
pub fn prompt_comps(comps: &[Value]) -> &[Value] {
    &comps[..comps.len().min(MAX_PROMPT_COMPS)]
}

pub fn build_prompt(
    subject: &SubjectProperty,
    comps: &[Value],
) -> Result<String, serde_json::Error> {
    let comps = prompt_comps(comps);
    let subject_json = serde_json::to_string_pretty(subject)?;
    let comps_json = serde_json::to_string_pretty(comps)?;

    Ok(format!(
        "{INSTRUCTIONS}\n\nSubject:\n{subject_json}\n\nComps (first {}):\n{comps_json}",
        comps.len()
    ))
}
