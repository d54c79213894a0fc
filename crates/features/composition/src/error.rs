use genu_kernel::params::ParamError;
use std::borrow::Cow;

/// Error types raised while composing deployment units.
#[genu_derive::genu_error]
pub enum CompositionError {
    /// Mutually exclusive parameters were set together.
    #[error("Configuration conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The private network cannot host what was requested.
    #[error("Insufficient network topology{}: {message}", format_context(.context))]
    Topology { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Parameter error{}: {source}", format_context(.context))]
    Param { source: ParamError, context: Option<Cow<'static, str>> },

    /// Internal fallback for registry misuse and other logic errors.
    #[error("Internal composition error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
