//! # Provisioning
//!
//! Handlers for the two custom resources a deployment relies on:
//!
//! * [`runtime`]: create, update and delete the hosted agent runtime.
//! * [`tags`]: reconcile the stack tag on the vector search collection, which cannot carry
//!   stack-wide tags directly.
//!
//! Vendor APIs sit behind the async [`runtime::RuntimeControlPlane`] and
//! [`tags::TagControlPlane`] traits; the handlers never retry on their own.

mod error;
pub mod event;
pub mod runtime;
pub mod tags;

pub use crate::error::{ControlPlaneError, ControlPlaneErrorExt, ProvisioningError, ProvisioningErrorExt};
pub use crate::event::{CustomResourceEvent, RequestType};
