/// Failures talking to the chat-completions API. These carry upstream detail
/// for the server log; route handlers replace them with a generic message.
#[derive(Debug, thiserror::Error)]
pub enum SonarError {
    #[error("PERPLEXITY_API_KEY is not set")]
    MissingApiKey,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Completion API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Could not decode completion response: {0}")]
    Decode(String),
}
