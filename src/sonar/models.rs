use serde::{Deserialize, Serialize};
use serde_json::Value;

// request
//  ├── model
//  └── messages[]
//       ├── role
//       └── content
//
// response
//  └── choices[]
//       └── message
//            └── content

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<Value>,
}

impl ChatCompletion {
    /// Text of the first choice. Anything structurally missing reads as "".
    pub fn first_content(&self) -> String {
        self.choices
            .as_deref()
            .and_then(|c| c.first())
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_ref())
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}
