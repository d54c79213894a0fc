//! Deployment unit contract.
//! This provides the type-erased shape every synthesized unit exposes to the registry.

use crate::config::Env;
use crate::units::UnitKind;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};

/// Stable identifier of a deployment unit, e.g. `GuardrailStackdev`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    /// Singleton id: `{stem}{env}`.
    #[must_use]
    pub fn singleton(kind: UnitKind, env: &str) -> Self {
        Self(format!("{}{env}", kind.stem()))
    }

    /// Per-region id: `{stem}{env}{region}`.
    #[must_use]
    pub fn regional(kind: UnitKind, env: &str, region: &str) -> Self {
        Self(format!("{}{env}{region}", kind.stem()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Named outputs a unit publishes to its consumers.
pub type Outputs = BTreeMap<&'static str, String>;

/// A synthesized deployment unit that can be shared across threads.
pub trait DeploymentUnit: Any + Debug + Send + Sync {
    fn id(&self) -> &UnitId;

    fn kind(&self) -> UnitKind;

    /// Account and region the unit deploys into.
    fn env(&self) -> &Env;

    /// Handles other units may consume. Absent handles are simply not listed.
    fn outputs(&self) -> Outputs;
}
