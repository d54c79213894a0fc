use std::borrow::Cow;

const NOT_FOUND_CODE: &str = "ResourceNotFoundException";
const NOT_FOUND_PHRASES: [&str; 2] = ["not found", "does not exist"];

pub use control_plane::{ControlPlaneError, ControlPlaneErrorExt};

mod control_plane {
    use std::borrow::Cow;

    use super::{NOT_FOUND_CODE, NOT_FOUND_PHRASES};

    /// Failure reported by a vendor control plane.
    #[genu_derive::genu_error]
    pub enum ControlPlaneError {
        #[error("Resource '{resource}' not found{}", format_context(.context))]
        NotFound { resource: Cow<'static, str>, context: Option<Cow<'static, str>> },

        #[error("{code}{}: {message}", format_context(.context))]
        Api {
            code: Cow<'static, str>,
            message: Cow<'static, str>,
            context: Option<Cow<'static, str>>,
        },
    }

    impl ControlPlaneError {
        /// Whether the error means the resource is already gone.
        #[must_use]
        pub fn is_not_found(&self) -> bool {
            match self {
                Self::NotFound { .. } => true,
                Self::Api { code, message, .. } => {
                    code == NOT_FOUND_CODE || NOT_FOUND_PHRASES.iter().any(|p| message.contains(*p))
                },
            }
        }
    }
}

#[genu_derive::genu_error]
pub enum ProvisioningError {
    /// The event is missing something the handler needs.
    #[error("Invalid custom resource request{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Control plane call failed{}: {source}", format_context(.context))]
    ControlPlane { source: ControlPlaneError, context: Option<Cow<'static, str>> },

    #[error("Malformed custom resource event{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },
}

impl ProvisioningError {
    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }
}
