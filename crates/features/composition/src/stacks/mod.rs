//! Deployment unit implementations.
//!
//! Units synthesize their outputs deterministically from their id, environment and the
//! configuration snapshot they were built with, so the same input always yields the same
//! identifiers.

pub mod agent;
pub mod agent_core;
pub mod application;
pub mod dashboard;
pub mod edge;
pub mod guardrail;
pub mod knowledge_base;
pub mod network;
pub mod profile;
pub mod video;

pub use agent::{AgentDescriptor, AgentStack};
pub use agent_core::{AgentCoreStack, RuntimeSettings};
pub use application::{ApplicationInputs, ApplicationStack, RuntimeHandle};
pub use dashboard::DashboardStack;
pub use edge::EdgeRestrictionStack;
pub use guardrail::GuardrailStack;
pub use knowledge_base::KnowledgeBaseStack;
pub use network::{ClosedNetworkStack, NetworkHandle};
pub use profile::InferenceProfileStack;
pub use video::VideoBucketStack;

use genu_domain::config::{Env, StackConfig};
use genu_domain::constants::TAG_KEY;
use genu_domain::registry::UnitId;
use genu_domain::units::UnitKind;
use serde::Serialize;
use std::collections::BTreeMap;

const MAX_BUCKET_NAME: usize = 63;
const BUCKET_PREFIX_LEN: usize = 40;

/// Identity, placement and tags shared by every unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitMeta {
    pub id: UnitId,
    pub kind: UnitKind,
    pub env: Env,
    pub tags: BTreeMap<String, String>,
    /// Resource types inside the unit that the stack-wide tags must skip.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_exclusions: Vec<&'static str>,
}

impl UnitMeta {
    /// Singleton unit placed in `region`.
    pub(crate) fn singleton(kind: UnitKind, config: &StackConfig, region: &str) -> Self {
        Self::with_id(UnitId::singleton(kind, &config.env), kind, config, region)
    }

    /// Fan-out unit bound to its own region.
    pub(crate) fn regional(kind: UnitKind, config: &StackConfig, region: &str) -> Self {
        Self::with_id(UnitId::regional(kind, &config.env, region), kind, config, region)
    }

    fn with_id(id: UnitId, kind: UnitKind, config: &StackConfig, region: &str) -> Self {
        let tags = config
            .tag_value
            .as_ref()
            .map(|value| BTreeMap::from([(TAG_KEY.to_owned(), value.clone())]))
            .unwrap_or_default();
        Self { id, kind, env: config.env_in(region), tags, tag_exclusions: Vec::new() }
    }

    /// Stable hexadecimal token derived from the unit id, account, region and `purpose`.
    pub(crate) fn token(&self, purpose: &str, len: usize) -> String {
        token(&[self.id.as_str(), &self.env.account, &self.env.region, purpose], len)
    }

    /// Lower-case bucket name: `{unit}-{purpose}-{token}`, at most 63 characters.
    pub(crate) fn bucket_name(&self, purpose: &str) -> String {
        let prefix: String = self
            .id
            .as_str()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .take(BUCKET_PREFIX_LEN)
            .collect();
        let mut name = format!("{prefix}-{}-{}", purpose.to_ascii_lowercase(), self.token(purpose, 8));
        name.truncate(MAX_BUCKET_NAME);
        name
    }
}

/// Deterministic hex token of `len` characters for the given seed parts.
pub(crate) fn token(parts: &[&str], len: usize) -> String {
    let mut out = String::with_capacity(len);
    let mut round = 0u64;
    while out.len() < len {
        let seed = format!("{}#{round}", parts.join("\u{1f}"));
        out.push_str(&format!("{:016x}", fxhash::hash64(&seed)));
        round += 1;
    }
    out.truncate(len);
    out
}

/// Implements [`genu_domain::registry::DeploymentUnit`] for a unit holding `meta: UnitMeta`
/// and an inherent `collect_outputs` method.
macro_rules! deployment_unit {
    ($ty:ty) => {
        impl ::genu_domain::registry::DeploymentUnit for $ty {
            fn id(&self) -> &::genu_domain::registry::UnitId {
                &self.meta.id
            }

            fn kind(&self) -> ::genu_domain::units::UnitKind {
                self.meta.kind
            }

            fn env(&self) -> &::genu_domain::config::Env {
                &self.meta.env
            }

            fn outputs(&self) -> ::genu_domain::registry::Outputs {
                self.collect_outputs()
            }
        }
    };
}
pub(crate) use deployment_unit;

#[cfg(test)]
mod tests {
    use super::*;
    use genu_domain::config::StackConfigInner;

    fn config(tag: Option<&str>) -> StackConfig {
        StackConfigInner {
            env: "dev".to_owned(),
            account: "123456789012".to_owned(),
            region: "us-east-1".to_owned(),
            tag_value: tag.map(str::to_owned),
            ..StackConfigInner::default()
        }
        .into()
    }

    #[test]
    fn tokens_are_stable_and_sized() {
        assert_eq!(token(&["a", "b"], 24), token(&["a", "b"], 24));
        assert_ne!(token(&["a", "b"], 12), token(&["ab"], 12));
        assert_eq!(token(&["x"], 40).len(), 40);
        assert!(token(&["x"], 40).chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tags_follow_tag_value() {
        let tagged = UnitMeta::singleton(UnitKind::Guardrail, &config(Some("team-a")), "us-east-1");
        assert_eq!(tagged.tags.get(TAG_KEY).map(String::as_str), Some("team-a"));

        let untagged = UnitMeta::singleton(UnitKind::Guardrail, &config(None), "us-east-1");
        assert!(untagged.tags.is_empty());
    }

    #[test]
    fn bucket_names_are_valid() {
        let meta = UnitMeta::regional(UnitKind::VideoBucket, &config(None), "ap-northeast-1");
        let name = meta.bucket_name("VideoTmp");
        assert!(name.len() <= MAX_BUCKET_NAME);
        assert!(name.starts_with("videotmpbucketstackdevapnortheast1-videotmp-"));
        assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }
}
