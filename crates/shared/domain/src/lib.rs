//! # Domain Models
//!
//! Pure deployment types with minimal dependencies (`serde`, `bitflags`): the canonical
//! stack configuration, model references, unit identities and the [`registry::DeploymentUnit`]
//! contract. Keep it lean: no I/O, no composition logic, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod model;
pub mod registry;
pub mod units;
