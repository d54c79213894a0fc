use super::{UnitMeta, deployment_unit};
use genu_domain::config::StackConfig;
use genu_domain::registry::Outputs;
use genu_domain::units::UnitKind;
use serde::Serialize;

/// Temporary bucket for asynchronous video generation; lives next to the model runtime.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoBucketStack {
    pub meta: UnitMeta,
    pub bucket_name: String,
}

impl VideoBucketStack {
    pub fn new(config: &StackConfig, region: &str) -> Self {
        let meta = UnitMeta::regional(UnitKind::VideoBucket, config, region);
        Self { bucket_name: meta.bucket_name("videotmp"), meta }
    }

    fn collect_outputs(&self) -> Outputs {
        Outputs::from([("bucketName", self.bucket_name.clone())])
    }
}

deployment_unit!(VideoBucketStack);
