//! Root composition: select, fan out, merge, then build the remaining units in
//! producer-before-consumer order.

use crate::error::CompositionError;
use crate::merge::{ProfilesByRegion, merge_config};
use crate::registry::UnitRegistry;
use crate::selector::{UnitPlan, select};
use crate::stacks::{
    AgentCoreStack, AgentStack, ApplicationInputs, ApplicationStack, ClosedNetworkStack,
    DashboardStack, EdgeRestrictionStack, GuardrailStack, InferenceProfileStack,
    KnowledgeBaseStack, RuntimeHandle, VideoBucketStack,
};
use genu_domain::config::StackConfig;
use genu_domain::registry::UnitId;
use genu_domain::units::{UnitKind, UnitSet};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Handles of every unit a composition run may create; absent means not selected.
#[derive(Debug, Clone)]
pub struct HandleMap {
    pub inference_profiles: ProfilesByRegion,
    pub closed_network: Option<Arc<ClosedNetworkStack>>,
    pub edge_restriction: Option<Arc<EdgeRestrictionStack>>,
    pub knowledge_base: Option<Arc<KnowledgeBaseStack>>,
    pub agent: Option<Arc<AgentStack>>,
    pub guardrail: Option<Arc<GuardrailStack>>,
    pub agent_core: Option<Arc<AgentCoreStack>>,
    pub video_buckets: BTreeMap<String, Arc<VideoBucketStack>>,
    pub application: Arc<ApplicationStack>,
    pub dashboard: Option<Arc<DashboardStack>>,
}

impl HandleMap {
    /// Bucket name by region for asynchronous video generation.
    #[must_use]
    pub fn video_bucket_region_map(&self) -> BTreeMap<String, String> {
        self.video_buckets
            .iter()
            .map(|(region, stack)| (region.clone(), stack.bucket_name.clone()))
            .collect()
    }
}

/// Result of a composition run.
#[derive(Debug)]
pub struct Composition {
    /// Snapshot with inference profile ARNs folded into the model lists.
    pub config: StackConfig,
    pub plan: UnitPlan,
    pub registry: UnitRegistry,
    pub handles: HandleMap,
}

fn optional<T, F>(
    registry: &mut UnitRegistry,
    selected: bool,
    id: UnitId,
    build: F,
) -> Result<Option<Arc<T>>, CompositionError>
where
    T: genu_domain::registry::DeploymentUnit,
    F: FnOnce() -> Result<T, CompositionError>,
{
    if !selected {
        return Ok(None);
    }
    registry.get_or_create(&id, build).map(Some)
}

/// Composes every deployment unit `config` calls for.
///
/// # Errors
/// * [`CompositionError::Conflict`] / [`CompositionError::Topology`] from selection; no unit
///   is created in that case.
/// * [`CompositionError::Internal`] on registry misuse.
pub fn compose(config: &StackConfig) -> Result<Composition, CompositionError> {
    let plan = select(config)?;
    let mut registry = UnitRegistry::new();
    let env = config.env.as_str();

    let mut inference_profiles = ProfilesByRegion::new();
    for region in &plan.profile_regions {
        let id = UnitId::regional(UnitKind::InferenceProfile, env, region);
        let stack = registry.get_or_create(&id, || Ok(InferenceProfileStack::new(config, region)))?;
        inference_profiles.insert(region.clone(), stack);
    }

    let enriched = merge_config(config, &inference_profiles);

    let closed_network = optional(
        &mut registry,
        plan.includes(UnitSet::CLOSED_NETWORK),
        UnitId::singleton(UnitKind::ClosedNetwork, env),
        || ClosedNetworkStack::new(config),
    )?;

    let edge_restriction = optional(
        &mut registry,
        plan.includes(UnitSet::EDGE_RESTRICTION),
        UnitId::singleton(UnitKind::EdgeRestriction, env),
        || Ok(EdgeRestrictionStack::new(&enriched)),
    )?;

    let knowledge_base = optional(
        &mut registry,
        plan.includes(UnitSet::KNOWLEDGE_BASE),
        UnitId::singleton(UnitKind::KnowledgeBase, env),
        || Ok(KnowledgeBaseStack::new(&enriched)),
    )?;

    let network = closed_network.as_ref().map(|stack| stack.network.clone());
    let agent = optional(
        &mut registry,
        plan.includes(UnitSet::AGENT),
        UnitId::singleton(UnitKind::Agent, env),
        || Ok(AgentStack::new(&enriched, network.clone())),
    )?;

    let guardrail = optional(
        &mut registry,
        plan.includes(UnitSet::GUARDRAIL),
        UnitId::singleton(UnitKind::Guardrail, env),
        || Ok(GuardrailStack::new(&enriched)),
    )?;

    let agent_core = optional(
        &mut registry,
        plan.includes(UnitSet::AGENT_CORE),
        UnitId::singleton(UnitKind::AgentCore, env),
        || Ok(AgentCoreStack::new(config)),
    )?;

    let mut video_buckets = BTreeMap::new();
    for region in &plan.video_regions {
        let id = UnitId::regional(UnitKind::VideoBucket, env, region);
        let stack = registry.get_or_create(&id, || Ok(VideoBucketStack::new(&enriched, region)))?;
        video_buckets.insert(region.clone(), stack);
    }

    let inputs = ApplicationInputs {
        knowledge_base_id: knowledge_base
            .as_ref()
            .map(|kb| kb.knowledge_base_id.clone())
            .or_else(|| enriched.rag_knowledge_base_id.clone().filter(|_| enriched.rag_knowledge_base_enabled)),
        knowledge_base_data_source_bucket_name: knowledge_base
            .as_ref()
            .map(|kb| kb.data_source_bucket_name.clone()),
        agents: agent.as_ref().map(|stack| stack.agents.clone()),
        agent_core_runtime: agent_core.as_ref().map(|stack| RuntimeHandle {
            name: stack.runtime.name.clone(),
            arn: stack.runtime_arn.clone(),
            file_bucket_name: stack.file_bucket_name.clone(),
            file_bucket_region: stack.file_bucket_region().to_owned(),
        }),
        video_bucket_region_map: video_buckets
            .iter()
            .map(|(region, stack)| (region.clone(), stack.bucket_name.clone()))
            .collect(),
        guardrail_identifier: guardrail.as_ref().map(|g| g.guardrail_identifier.clone()),
        guardrail_version: guardrail.as_ref().map(|g| g.version().to_owned()),
        web_acl_id: edge_restriction.as_ref().map(|e| e.web_acl_arn.clone()),
        certificate_arn: edge_restriction.as_ref().and_then(|e| e.certificate_arn.clone()),
        network,
        api_gateway_vpc_endpoint_id: closed_network
            .as_ref()
            .map(|n| n.api_gateway_vpc_endpoint_id.clone()),
        web_bucket_name: closed_network.as_ref().map(|n| n.web_bucket_name.clone()),
        cognito_user_pool_proxy_endpoint: closed_network
            .as_ref()
            .map(|n| n.cognito_user_pool_proxy_endpoint.clone()),
        cognito_identity_pool_proxy_endpoint: closed_network
            .as_ref()
            .map(|n| n.cognito_identity_pool_proxy_endpoint.clone()),
    };

    let application = registry.get_or_create(
        &UnitId::singleton(UnitKind::Application, env),
        || Ok(ApplicationStack::new(&enriched, inputs)),
    )?;

    let dashboard = optional(
        &mut registry,
        plan.includes(UnitSet::DASHBOARD),
        UnitId::singleton(UnitKind::Dashboard, env),
        || Ok(DashboardStack::new(&enriched, &application)),
    )?;

    info!(
        units = registry.len(),
        selected = ?plan.units.names().collect::<Vec<_>>(),
        profiles = inference_profiles.len(),
        video_buckets = video_buckets.len(),
        "Composed deployment units"
    );

    Ok(Composition {
        config: enriched,
        plan,
        registry,
        handles: HandleMap {
            inference_profiles,
            closed_network,
            edge_restriction,
            knowledge_base,
            agent,
            guardrail,
            agent_core,
            video_buckets,
            application,
            dashboard,
        },
    })
}
