#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the workspace crates.
//!
//! * [`genu_error`] turns a struct-variant enum into a `thiserror` error with context support.
//! * [`main`] bootstraps an `async fn main` on a `genu_runtime` profile.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! genu-derive = { path = "../infra/derive" }
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, parse_macro_input};

/// Attribute macro to bootstrap a `genu_runtime` Tokio runtime.
///
/// Transforms an `async fn main` returning `Result` into a plain `fn main` that builds the
/// runtime for the requested profile and blocks on the body.
///
/// # Arguments
///
/// * `cli` - Current-thread runtime for short-lived command line invocations. Also used
///   when no profile is given.
///
/// # Examples
///
/// ```rust,ignore
/// #[genu_runtime::main(cli)]
/// async fn main() -> anyhow::Result<()> {
/// # Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro for domain-specific error enums.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and for
///   `Result<T, SourceError>` of every variant holding a `source` field.
/// * `From<SourceError>` for variants with a `source` field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant is present.
/// * `kind()` returning the variant name, handy as a structured logging field.
/// * `context_message()` returning the attached context, if any.
///
/// # Requirements
///
/// 1. Applied to an **enum** with named-field variants only.
/// 2. A context field must be typed `Option<Cow<'static, str>>`.
/// 3. Variants with a source must also carry a context field.
///
/// # Example
///
/// ```rust,ignore
/// use genu_derive::genu_error;
/// use std::borrow::Cow;
///
/// #[genu_error]
/// pub enum ParamError {
///     #[error("Invalid parameter{}: {message}", format_context(.context))]
///     Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Malformed JSON{}: {source}", format_context(.context))]
///     Json { source: serde_json::Error, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &str) -> Result<serde_json::Value, ParamError> {
///     serde_json::from_str(raw).context("Parsing context override")
/// }
/// ```
#[proc_macro_attribute]
pub fn genu_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
