//! Parameter resolution: raw, user-facing input to a canonical [`StackConfig`].

use crate::arn::{Arn, ArnError};
use genu_domain::config::{StackConfig, StackConfigInner};
use genu_domain::model::ModelReference;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

const IAM_SERVICE: &str = "iam";

#[genu_derive::genu_error]
pub enum ParamError {
    #[error("Missing required parameter `{field}`{}", format_context(.context))]
    Missing { field: &'static str, context: Option<Cow<'static, str>> },
    #[error("Invalid parameter `{field}`{}: {message}", format_context(.context))]
    Invalid {
        field: &'static str,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },
    #[error("Invalid identifier{}: {source}", format_context(.context))]
    Arn { source: ArnError, context: Option<Cow<'static, str>> },
}

/// A model list entry: a bare model id, or an id with an explicit region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelEntry {
    Id(String),
    Reference {
        #[serde(rename = "modelId")]
        model_id: String,
        #[serde(default)]
        region: Option<String>,
    },
}

impl ModelEntry {
    fn into_reference(self, default_region: &str) -> ModelReference {
        match self {
            Self::Id(model_id) => ModelReference::new(model_id, default_region),
            Self::Reference { model_id, region } => {
                let region = non_empty(region).unwrap_or_else(|| default_region.to_owned());
                ModelReference::new(model_id, region)
            },
        }
    }
}

/// Flat deployment parameters as written by the operator.
///
/// Every key is optional here; [`resolve`] applies defaults and validation.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StackInput {
    pub env: Option<String>,
    pub account: Option<String>,
    pub region: Option<String>,
    pub model_region: Option<String>,

    pub model_ids: Option<Vec<ModelEntry>>,
    pub image_generation_model_ids: Option<Vec<ModelEntry>>,
    pub video_generation_model_ids: Option<Vec<ModelEntry>>,
    pub speech_to_speech_model_ids: Option<Vec<ModelEntry>>,

    pub agent_enabled: Option<bool>,
    pub search_agent_enabled: Option<bool>,
    pub search_engine: Option<String>,
    pub search_api_key: Option<String>,

    pub guardrail_enabled: Option<bool>,

    pub rag_knowledge_base_enabled: Option<bool>,
    pub rag_knowledge_base_id: Option<String>,

    pub closed_network_mode: Option<bool>,
    pub closed_network_subnet_ids: Option<Vec<String>>,
    pub closed_network_create_resolver_endpoint: Option<bool>,

    pub create_generic_agent_core_runtime: Option<bool>,
    pub agent_core_region: Option<String>,

    pub dashboard: Option<bool>,

    pub cross_account_bedrock_role_arn: Option<String>,

    pub allowed_ip_v4_address_ranges: Option<Vec<String>>,
    pub allowed_ip_v6_address_ranges: Option<Vec<String>>,
    pub allowed_country_codes: Option<Vec<String>>,
    pub host_name: Option<String>,
    pub domain_name: Option<String>,
    pub hosted_zone_id: Option<String>,

    pub tag_value: Option<String>,
    pub anonymous_usage_tracking: Option<bool>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn non_empty_list(value: Option<Vec<String>>) -> Option<Vec<String>> {
    value.filter(|list| !list.is_empty())
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ParamError> {
    non_empty(value).ok_or(ParamError::Missing { field, context: None })
}

fn models(entries: Option<Vec<ModelEntry>>, default_region: &str) -> Vec<ModelReference> {
    entries
        .unwrap_or_default()
        .into_iter()
        .map(|entry| entry.into_reference(default_region))
        .collect()
}

/// Validates and normalizes raw parameters.
///
/// * `account` and `region` are required.
/// * `modelRegion` and `agentCoreRegion` default to `region`.
/// * Model entries without a region get `modelRegion`.
/// * Blank optional strings and empty lists become absent.
///
/// # Errors
/// * [`ParamError::Missing`] for a missing `account`/`region`, or a `hostName` without
///   `domainName`/`hostedZoneId`.
/// * [`ParamError::Invalid`] / [`ParamError::Arn`] when `crossAccountBedrockRoleArn` is not
///   an IAM role identifier.
pub fn resolve(input: StackInput) -> Result<StackConfig, ParamError> {
    let account = required(input.account, "account")?;
    let region = required(input.region, "region")?;
    let model_region = non_empty(input.model_region).unwrap_or_else(|| region.clone());
    let agent_core_region = non_empty(input.agent_core_region).unwrap_or_else(|| region.clone());

    let host_name = non_empty(input.host_name);
    let domain_name = non_empty(input.domain_name);
    let hosted_zone_id = non_empty(input.hosted_zone_id);
    if host_name.is_some() {
        if domain_name.is_none() {
            return Err(ParamError::Missing { field: "domainName", context: None })
                .context("required when `hostName` is set");
        }
        if hosted_zone_id.is_none() {
            return Err(ParamError::Missing { field: "hostedZoneId", context: None })
                .context("required when `hostName` is set");
        }
    }

    let cross_account_bedrock_role_arn = non_empty(input.cross_account_bedrock_role_arn);
    if let Some(role) = &cross_account_bedrock_role_arn {
        let arn = Arn::parse(role).context("crossAccountBedrockRoleArn")?;
        if !arn.is_service(IAM_SERVICE) {
            return Err(ParamError::Invalid {
                field: "crossAccountBedrockRoleArn",
                message: format!("expected an IAM role, got service '{}'", arn.service).into(),
                context: None,
            });
        }
    }

    let inner = StackConfigInner {
        env: input.env.unwrap_or_default(),
        model_ids: models(input.model_ids, &model_region),
        image_generation_model_ids: models(input.image_generation_model_ids, &model_region),
        video_generation_model_ids: models(input.video_generation_model_ids, &model_region),
        speech_to_speech_model_ids: models(input.speech_to_speech_model_ids, &model_region),
        agent_enabled: input.agent_enabled.unwrap_or(false),
        search_agent_enabled: input.search_agent_enabled.unwrap_or(false),
        search_engine: non_empty(input.search_engine),
        search_api_key: non_empty(input.search_api_key),
        guardrail_enabled: input.guardrail_enabled.unwrap_or(false),
        rag_knowledge_base_enabled: input.rag_knowledge_base_enabled.unwrap_or(false),
        rag_knowledge_base_id: non_empty(input.rag_knowledge_base_id),
        closed_network_mode: input.closed_network_mode.unwrap_or(false),
        closed_network_subnet_ids: non_empty_list(input.closed_network_subnet_ids),
        closed_network_create_resolver_endpoint: input
            .closed_network_create_resolver_endpoint
            .unwrap_or(true),
        create_generic_agent_core_runtime: input.create_generic_agent_core_runtime.unwrap_or(false),
        agent_core_region,
        dashboard: input.dashboard.unwrap_or(false),
        cross_account_bedrock_role_arn,
        allowed_ip_v4_address_ranges: non_empty_list(input.allowed_ip_v4_address_ranges),
        allowed_ip_v6_address_ranges: non_empty_list(input.allowed_ip_v6_address_ranges),
        allowed_country_codes: non_empty_list(input.allowed_country_codes),
        host_name,
        domain_name,
        hosted_zone_id,
        tag_value: non_empty(input.tag_value),
        anonymous_usage_tracking: input.anonymous_usage_tracking.unwrap_or(true),
        account,
        region,
        model_region,
    };

    debug!(
        env = %inner.env,
        region = %inner.region,
        model_region = %inner.model_region,
        models = inner.model_ids.len(),
        "Resolved stack parameters"
    );

    Ok(inner.into())
}
