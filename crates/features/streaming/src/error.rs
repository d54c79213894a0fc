use std::borrow::Cow;

#[genu_derive::genu_error]
pub enum StreamError {
    #[error("Stream read failed{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Malformed endpoint payload{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Endpoint response has no content{}", format_context(.context))]
    EmptyResponse { context: Option<Cow<'static, str>> },
}
