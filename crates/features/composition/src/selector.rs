//! Unit selection: which optional units a configuration needs.
//!
//! Pure decisions over a [`StackConfig`]; nothing is instantiated here.

use crate::error::CompositionError;
use crate::stacks::network;
use genu_domain::config::StackConfig;
use genu_domain::model::ModelCategory;
use genu_domain::units::UnitSet;
use serde::Serialize;

const CROSS_ACCOUNT_CONFLICT: &str = "When `crossAccountBedrockRoleArn` is specified, the `agentEnabled` and `searchApiKey` parameters are not supported. Please create agents in the other account and specify them in the `agents` parameter.";

/// The selector's decision record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPlan {
    /// Optional singleton units to create.
    pub units: UnitSet,
    /// One inference-profile unit per distinct region across all four model lists.
    pub profile_regions: Vec<String>,
    /// One video bucket unit per distinct region of the video model list.
    pub video_regions: Vec<String>,
}

impl UnitPlan {
    #[must_use]
    pub const fn includes(&self, unit: UnitSet) -> bool {
        self.units.contains(unit)
    }
}

/// Rejects parameter combinations that imply different ownership of agents.
///
/// # Errors
/// [`CompositionError::Conflict`] when a cross-account role is combined with
/// `agentEnabled` or a `searchApiKey`.
pub fn check_conflicts(config: &StackConfig) -> Result<(), CompositionError> {
    if config.cross_account_bedrock_role_arn.is_some()
        && (config.agent_enabled || config.search_api_key.is_some())
    {
        return Err(CompositionError::Conflict { message: CROSS_ACCOUNT_CONFLICT.into(), context: None });
    }
    Ok(())
}

/// Decides which units `config` needs.
///
/// Validation happens here so that a bad configuration fails before any unit exists.
///
/// # Errors
/// * [`CompositionError::Conflict`], see [`check_conflicts`].
/// * [`CompositionError::Topology`] when closed-network mode cannot place its resolver.
pub fn select(config: &StackConfig) -> Result<UnitPlan, CompositionError> {
    check_conflicts(config)?;
    if config.closed_network_mode {
        network::check_topology(config)?;
    }

    let mut units = UnitSet::empty();
    units.set(UnitSet::CLOSED_NETWORK, config.closed_network_mode);
    units.set(
        UnitSet::EDGE_RESTRICTION,
        config.has_edge_restrictions() && !config.closed_network_mode,
    );
    units.set(
        UnitSet::KNOWLEDGE_BASE,
        config.rag_knowledge_base_enabled && config.rag_knowledge_base_id.is_none(),
    );
    units.set(UnitSet::AGENT, config.agent_enabled);
    units.set(UnitSet::GUARDRAIL, config.guardrail_enabled);
    units.set(UnitSet::AGENT_CORE, config.create_generic_agent_core_runtime);
    units.set(UnitSet::DASHBOARD, config.dashboard);

    Ok(UnitPlan {
        units,
        profile_regions: config.regions_of(&ModelCategory::ALL),
        video_regions: config.regions_of(&[ModelCategory::Video]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use genu_domain::config::StackConfigInner;
    use genu_domain::model::ModelReference;

    fn base() -> StackConfigInner {
        StackConfigInner {
            account: "123".to_owned(),
            region: "us-east-1".to_owned(),
            model_region: "us-east-1".to_owned(),
            closed_network_create_resolver_endpoint: true,
            ..StackConfigInner::default()
        }
    }

    fn plan(inner: StackConfigInner) -> UnitPlan {
        select(&inner.into()).unwrap()
    }

    #[test]
    fn defaults_select_nothing_optional() {
        let plan = plan(base());
        assert!(plan.units.is_empty());
        assert!(plan.profile_regions.is_empty());
    }

    #[test]
    fn edge_restriction_needs_open_network() {
        let open = StackConfigInner { allowed_ip_v4_address_ranges: Some(vec!["10.0.0.0/8".to_owned()]), ..base() };
        assert!(plan(open.clone()).includes(UnitSet::EDGE_RESTRICTION));

        let closed = StackConfigInner { closed_network_mode: true, ..open };
        let plan = plan(closed);
        assert!(plan.includes(UnitSet::CLOSED_NETWORK));
        assert!(!plan.includes(UnitSet::EDGE_RESTRICTION));
    }

    #[test]
    fn existing_knowledge_base_is_not_recreated() {
        let enabled = StackConfigInner { rag_knowledge_base_enabled: true, ..base() };
        assert!(plan(enabled.clone()).includes(UnitSet::KNOWLEDGE_BASE));

        let existing = StackConfigInner { rag_knowledge_base_id: Some("KB123".to_owned()), ..enabled };
        assert!(!plan(existing).includes(UnitSet::KNOWLEDGE_BASE));
    }

    #[test]
    fn search_key_with_cross_account_role_conflicts() {
        let inner = StackConfigInner {
            cross_account_bedrock_role_arn: Some("arn:aws:iam::123:role/x".to_owned()),
            search_api_key: Some("key".to_owned()),
            ..base()
        };
        let err = select(&inner.into()).unwrap_err();
        assert!(matches!(err, CompositionError::Conflict { .. }));
        assert!(err.to_string().contains("`crossAccountBedrockRoleArn`"));
    }

    #[test]
    fn cross_account_role_alone_is_fine() {
        let inner = StackConfigInner {
            cross_account_bedrock_role_arn: Some("arn:aws:iam::123:role/x".to_owned()),
            guardrail_enabled: true,
            ..base()
        };
        assert_eq!(plan(inner).units, UnitSet::GUARDRAIL);
    }

    #[test]
    fn fan_out_regions_are_distinct() {
        let inner = StackConfigInner {
            model_ids: vec![
                ModelReference::new("a", "us-east-1"),
                ModelReference::new("b", "us-west-2"),
                ModelReference::new("a", "us-east-1"),
            ],
            video_generation_model_ids: vec![
                ModelReference::new("amazon.nova-reel-v1:0", "us-east-1"),
                ModelReference::new("luma.ray-v2:0", "us-west-2"),
            ],
            speech_to_speech_model_ids: vec![ModelReference::new("amazon.nova-sonic-v1:0", "eu-north-1")],
            ..base()
        };
        let plan = plan(inner);
        assert_eq!(plan.profile_regions, ["us-east-1", "us-west-2", "eu-north-1"]);
        assert_eq!(plan.video_regions, ["us-east-1", "us-west-2"]);
    }
}
