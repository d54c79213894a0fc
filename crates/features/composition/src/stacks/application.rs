use super::agent::AgentDescriptor;
use super::network::NetworkHandle;
use super::{UnitMeta, deployment_unit};
use genu_domain::config::StackConfig;
use genu_domain::registry::Outputs;
use genu_domain::units::UnitKind;
use serde::Serialize;
use std::collections::BTreeMap;

const USAGE_TRACKING_DESCRIPTION: &str = "Generative AI Use Cases (uksb-1tupboc48)";

/// Hosted runtime handle consumed by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeHandle {
    pub name: String,
    pub arn: String,
    pub file_bucket_name: String,
    pub file_bucket_region: String,
}

/// Optional upstream handles; an absent handle means the feature is disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInputs {
    pub knowledge_base_id: Option<String>,
    pub knowledge_base_data_source_bucket_name: Option<String>,
    pub agents: Option<Vec<AgentDescriptor>>,
    pub agent_core_runtime: Option<RuntimeHandle>,
    pub video_bucket_region_map: BTreeMap<String, String>,
    pub guardrail_identifier: Option<String>,
    pub guardrail_version: Option<String>,
    pub web_acl_id: Option<String>,
    pub certificate_arn: Option<String>,
    pub network: Option<NetworkHandle>,
    pub api_gateway_vpc_endpoint_id: Option<String>,
    pub web_bucket_name: Option<String>,
    pub cognito_user_pool_proxy_endpoint: Option<String>,
    pub cognito_identity_pool_proxy_endpoint: Option<String>,
}

impl ApplicationInputs {
    /// Names of the attached optional inputs, for summaries.
    #[must_use]
    pub fn attached(&self) -> Vec<&'static str> {
        [
            ("knowledgeBase", self.knowledge_base_id.is_some()),
            ("agents", self.agents.is_some()),
            ("agentCoreRuntime", self.agent_core_runtime.is_some()),
            ("videoBuckets", !self.video_bucket_region_map.is_empty()),
            ("guardrail", self.guardrail_identifier.is_some()),
            ("webAcl", self.web_acl_id.is_some()),
            ("certificate", self.certificate_arn.is_some()),
            ("vpc", self.network.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

/// The main application unit (identity, API, web front end).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStack {
    pub meta: UnitMeta,
    pub inputs: ApplicationInputs,
    pub description: Option<String>,
    pub user_pool_id: String,
    pub user_pool_client_id: String,
    pub identity_pool_id: String,
    pub web_url: String,
}

impl ApplicationStack {
    pub fn new(config: &StackConfig, inputs: ApplicationInputs) -> Self {
        let meta = UnitMeta::singleton(UnitKind::Application, config, &config.region);
        let region = &config.region;

        let pool = meta.token("identity-pool", 32);
        let identity_pool_id = format!(
            "{region}:{}-{}-{}-{}-{}",
            &pool[..8],
            &pool[8..12],
            &pool[12..16],
            &pool[16..20],
            &pool[20..32]
        );

        let web_url = match (&config.host_name, &config.domain_name) {
            (Some(host), Some(domain)) => format!("https://{host}.{domain}"),
            _ if inputs.network.is_some() => {
                let bucket = inputs.web_bucket_name.as_deref().unwrap_or_default();
                format!("https://{bucket}.s3.{region}.amazonaws.com/index.html")
            },
            _ => format!("https://{}.cloudfront.net", meta.token("distribution", 14)),
        };

        Self {
            description: config.anonymous_usage_tracking.then(|| USAGE_TRACKING_DESCRIPTION.to_owned()),
            user_pool_id: format!("{region}_{}", meta.token("user-pool", 9)),
            user_pool_client_id: meta.token("user-pool-client", 26),
            identity_pool_id,
            web_url,
            inputs,
            meta,
        }
    }

    fn collect_outputs(&self) -> Outputs {
        let mut outputs = Outputs::from([
            ("userPoolId", self.user_pool_id.clone()),
            ("userPoolClientId", self.user_pool_client_id.clone()),
            ("identityPoolId", self.identity_pool_id.clone()),
            ("webUrl", self.web_url.clone()),
        ]);
        let attached = self.inputs.attached();
        if !attached.is_empty() {
            outputs.insert("attached", attached.join(","));
        }
        outputs
    }
}

deployment_unit!(ApplicationStack);
