//! # Composition
//!
//! Decides which deployment units a configuration needs and builds them in
//! producer-before-consumer order.
//!
//! ## Pipeline
//!
//! 1.  **Selection ([`selector`]):** a pure decision record over the configuration. Invalid
//!     combinations fail here, before any unit exists.
//! 2.  **Fan-out:** one inference-profile unit per model region.
//! 3.  **Merge ([`merge`]):** profile ARNs are folded into a new configuration snapshot.
//! 4.  **Wiring ([`compose`]):** the remaining units are built from the enriched snapshot and
//!     recorded in a [`registry::UnitRegistry`]; absent optional handles mean "disabled".
//!
//! ```rust
//! use genu_composition::compose;
//! use genu_domain::config::StackConfigInner;
//!
//! let config = StackConfigInner {
//!     account: "123456789012".to_owned(),
//!     region: "us-east-1".to_owned(),
//!     model_region: "us-east-1".to_owned(),
//!     guardrail_enabled: true,
//!     ..StackConfigInner::default()
//! }
//! .into();
//!
//! let composition = compose(&config)?;
//! assert!(composition.handles.guardrail.is_some());
//! assert!(composition.handles.dashboard.is_none());
//! # Ok::<(), genu_composition::CompositionError>(())
//! ```

pub mod compose;
mod error;
pub mod merge;
pub mod registry;
pub mod report;
pub mod selector;
pub mod stacks;

pub use crate::compose::{Composition, HandleMap, compose};
pub use crate::error::{CompositionError, CompositionErrorExt};
pub use crate::report::{SynthReport, UnitReport};
pub use crate::selector::{UnitPlan, select};
