use super::{UnitMeta, deployment_unit};
use genu_domain::config::StackConfig;
use genu_domain::constants::OPENSEARCH_COLLECTION_TYPE;
use genu_domain::registry::Outputs;
use genu_domain::units::UnitKind;
use serde::Serialize;

/// Managed retrieval knowledge base with its vector collection and source bucket.
///
/// The collection is excluded from stack-wide tags; when a tag value is set the unit
/// instead carries `collection_tag`, reconciled by the apply-tags resource.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseStack {
    pub meta: UnitMeta,
    pub knowledge_base_id: String,
    pub data_source_bucket_name: String,
    pub collection_id: String,
    pub collection_tag: Option<(String, String)>,
}

impl KnowledgeBaseStack {
    pub fn new(config: &StackConfig) -> Self {
        let mut meta = UnitMeta::singleton(UnitKind::KnowledgeBase, config, &config.model_region);
        meta.tag_exclusions.push(OPENSEARCH_COLLECTION_TYPE);
        let collection_tag = meta.tags.iter().next().map(|(k, v)| (k.clone(), v.clone()));

        Self {
            knowledge_base_id: meta.token("knowledge-base", 10).to_ascii_uppercase(),
            data_source_bucket_name: meta.bucket_name("datasource"),
            collection_id: meta.token("collection", 20),
            collection_tag,
            meta,
        }
    }

    fn collect_outputs(&self) -> Outputs {
        Outputs::from([
            ("knowledgeBaseId", self.knowledge_base_id.clone()),
            ("dataSourceBucketName", self.data_source_bucket_name.clone()),
            ("collectionId", self.collection_id.clone()),
        ])
    }
}

deployment_unit!(KnowledgeBaseStack);
