//! Kernel utilities shared across features.
//! Keep this crate lightweight; it turns raw configuration into a [`StackConfig`] and
//! parses the resource identifiers units exchange.
//!
//! ## Config loading
//! ```rust,ignore
//! use genu_kernel::config::load_config;
//! use genu_kernel::params::{StackInput, resolve};
//!
//! let input: StackInput = load_config(Some("genu.json"))?;
//! let config = resolve(input)?;
//! ```
//!
//! ## ARNs
//! ```rust
//! # use genu_kernel::arn::agent_core_runtime_id;
//! let id = agent_core_runtime_id("arn:aws:bedrock-agentcore:us-east-1:123:runtime/abc/def");
//! assert_eq!(id.as_deref(), Some("abc/def"));
//! ```

pub mod arn;
pub mod config;
pub mod params;

pub use genu_domain as domain;
pub use genu_domain::config::StackConfig;
