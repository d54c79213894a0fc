use crate::model::{ModelCategory, ModelReference};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// Account and region a deployment unit is pinned to.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Env {
    pub account: String,
    pub region: String,
}

impl Env {
    pub fn new(account: impl Into<String>, region: impl Into<String>) -> Self {
        Self { account: account.into(), region: region.into() }
    }
}

/// Canonical, fully resolved deployment configuration.
///
/// Every optional string is either absent or non-empty; every model carries a region.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StackConfigInner {
    /// Environment suffix appended to every unit id (may be empty).
    pub env: String,
    pub account: String,
    /// Region of the application itself.
    pub region: String,
    /// Default region for model invocation.
    pub model_region: String,

    pub model_ids: Vec<ModelReference>,
    pub image_generation_model_ids: Vec<ModelReference>,
    pub video_generation_model_ids: Vec<ModelReference>,
    pub speech_to_speech_model_ids: Vec<ModelReference>,

    pub agent_enabled: bool,
    pub search_agent_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_api_key: Option<String>,

    pub guardrail_enabled: bool,

    pub rag_knowledge_base_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_knowledge_base_id: Option<String>,

    pub closed_network_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_network_subnet_ids: Option<Vec<String>>,
    pub closed_network_create_resolver_endpoint: bool,

    pub create_generic_agent_core_runtime: bool,
    pub agent_core_region: String,

    pub dashboard: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_account_bedrock_role_arn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_ip_v4_address_ranges: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_ip_v6_address_ranges: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_country_codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosted_zone_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_value: Option<String>,
    pub anonymous_usage_tracking: bool,
}

/// Immutable, cheaply cloneable configuration snapshot.
///
/// There is no mutable access: derived configurations are produced with the `with_*`
/// builders, which copy the inner value and leave every existing snapshot untouched.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackConfig {
    #[serde(flatten, default)]
    inner: Arc<StackConfigInner>,
}

impl Deref for StackConfig {
    type Target = StackConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<StackConfigInner> for StackConfig {
    fn from(inner: StackConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl StackConfig {
    /// Returns a new snapshot with one model list replaced.
    #[must_use]
    pub fn with_models(&self, category: ModelCategory, models: Vec<ModelReference>) -> Self {
        let mut next = self.clone();
        let inner = Arc::make_mut(&mut next.inner);
        match category {
            ModelCategory::General => inner.model_ids = models,
            ModelCategory::Image => inner.image_generation_model_ids = models,
            ModelCategory::Video => inner.video_generation_model_ids = models,
            ModelCategory::SpeechToSpeech => inner.speech_to_speech_model_ids = models,
        }
        next
    }

    #[must_use]
    pub fn models(&self, category: ModelCategory) -> &[ModelReference] {
        match category {
            ModelCategory::General => &self.model_ids,
            ModelCategory::Image => &self.image_generation_model_ids,
            ModelCategory::Video => &self.video_generation_model_ids,
            ModelCategory::SpeechToSpeech => &self.speech_to_speech_model_ids,
        }
    }

    /// Every model across the four lists, in list order.
    pub fn all_models(&self) -> impl Iterator<Item = &ModelReference> {
        ModelCategory::ALL.into_iter().flat_map(|category| self.models(category))
    }

    /// Distinct regions referenced by the given lists, in first-appearance order.
    #[must_use]
    pub fn regions_of(&self, categories: &[ModelCategory]) -> Vec<String> {
        let mut regions: Vec<String> = Vec::new();
        for model in categories.iter().flat_map(|category| self.models(*category)) {
            if !regions.contains(&model.region) {
                regions.push(model.region.clone());
            }
        }
        regions
    }

    /// Whether the edge request-filtering layer has anything to enforce.
    #[must_use]
    pub fn has_edge_restrictions(&self) -> bool {
        self.allowed_ip_v4_address_ranges.is_some()
            || self.allowed_ip_v6_address_ranges.is_some()
            || self.allowed_country_codes.is_some()
            || self.host_name.is_some()
    }

    pub fn env_in(&self, region: impl Into<String>) -> Env {
        Env::new(self.account.clone(), region)
    }

    /// Shares the same snapshot (no copy happened since the clone).
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
