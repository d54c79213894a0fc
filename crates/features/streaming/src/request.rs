use crate::error::{StreamError, StreamErrorExt};
use serde::{Deserialize, Serialize};

/// Completion budget sent with every request.
pub const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self { role: role.into(), content: content.into() }
    }
}

#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    messages: &'a [ChatMessage],
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// JSON request body for the chat endpoint.
///
/// # Errors
/// [`StreamError::Json`] if serialization fails.
pub fn request_body(messages: &[ChatMessage], stream: bool) -> Result<Vec<u8>, StreamError> {
    let body = InvokeRequest { messages, max_tokens: MAX_TOKENS, stream };
    Ok(serde_json::to_vec(&body)?)
}

/// Text of a non-streaming response: `choices[0].message.content`.
///
/// # Errors
/// * [`StreamError::Json`] for an unparsable body.
/// * [`StreamError::EmptyResponse`] when there is no first choice or it has no content.
pub fn parse_invoke_response(body: &[u8]) -> Result<String, StreamError> {
    let response: InvokeResponse =
        serde_json::from_slice(body).context("Failed to parse endpoint response")?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(StreamError::EmptyResponse { context: None })
}
