//! # Streaming
//!
//! Client side of the hosted chat endpoint protocol.
//!
//! Streaming responses arrive as newline-delimited frames such as
//! `data:{"choices":[{"delta":{"content":"Hi"}}]}`. [`StreamDecoder`] turns arbitrary byte
//! chunks into text deltas; a malformed frame is logged and skipped, never fatal.
//!
//! ```rust
//! use genu_streaming::StreamDecoder;
//!
//! let mut decoder = StreamDecoder::new();
//! assert!(decoder.feed(b"data:{\"choices\":[{\"delta\":{\"con").is_empty());
//! assert_eq!(decoder.feed(b"tent\":\"Hi\"}}]}\n"), ["Hi"]);
//! ```

mod decoder;
mod error;
mod request;

pub use crate::decoder::{StreamDecoder, decode_stream, parse_line};
pub use crate::error::{StreamError, StreamErrorExt};
pub use crate::request::{ChatMessage, MAX_TOKENS, parse_invoke_response, request_body};
