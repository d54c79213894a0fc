//! Facade crate for the deployment composer.
//! Re-exports domain/kernel primitives and the feature crates, and chains parameter
//! resolution with composition.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `genu` with the desired feature flags (`streaming`/`provisioning`).
//! - Call [`synth`] with raw parameters, or [`compose`] with an already resolved
//!   [`StackConfig`].

pub use genu_composition as composition;
pub use genu_composition::{Composition, CompositionError, SynthReport, compose};
pub use genu_domain as domain;
pub use genu_domain::config::StackConfig;
pub use genu_kernel as kernel;
pub use genu_kernel::params::StackInput;

/// Build-time enabled features.
pub mod features {
    #[cfg(feature = "provisioning")]
    pub use genu_provisioning as provisioning;
    #[cfg(feature = "streaming")]
    pub use genu_streaming as streaming;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "composition",
        #[cfg(feature = "streaming")]
        "streaming",
        #[cfg(feature = "provisioning")]
        "provisioning",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Resolves raw parameters and composes every deployment unit they call for.
///
/// # Errors
/// * [`CompositionError::Param`] when the parameters do not resolve.
/// * Any [`compose`] error.
pub fn synth(input: StackInput) -> Result<Composition, CompositionError> {
    let config = genu_kernel::params::resolve(input)?;
    compose(&config)
}
