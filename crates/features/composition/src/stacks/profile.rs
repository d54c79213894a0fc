use super::{UnitMeta, deployment_unit};
use genu_domain::config::StackConfig;
use genu_domain::registry::Outputs;
use genu_domain::units::UnitKind;
use genu_kernel::arn::Arn;
use serde::Serialize;
use std::collections::BTreeMap;

const SERVICE: &str = "bedrock";
const RESOURCE: &str = "application-inference-profile";

/// Application inference profiles for every eligible model of one region.
///
/// A model is eligible when it is served from this unit's region and its id is not a
/// cross-region inference identifier.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceProfileStack {
    pub meta: UnitMeta,
    /// Profile ARN by model id.
    pub arns: BTreeMap<String, String>,
}

impl InferenceProfileStack {
    pub fn new(config: &StackConfig, region: &str) -> Self {
        let meta = UnitMeta::regional(UnitKind::InferenceProfile, config, region);
        let arns = config
            .all_models()
            .filter(|model| model.region == region && !model.is_cross_region())
            .map(|model| {
                let name = format!("{}{}", model.profile_name_stem(), config.env);
                let arn = Arn::new(SERVICE, region, &config.account, format!("{RESOURCE}/{name}"));
                (model.model_id.clone(), arn.format())
            })
            .collect();
        Self { meta, arns }
    }

    #[must_use]
    pub fn arn_for(&self, model_id: &str) -> Option<&str> {
        self.arns.get(model_id).map(String::as_str)
    }

    fn collect_outputs(&self) -> Outputs {
        Outputs::from([("profileCount", self.arns.len().to_string())])
    }
}

deployment_unit!(InferenceProfileStack);

#[cfg(test)]
mod tests {
    use super::*;
    use genu_domain::config::StackConfigInner;
    use genu_domain::model::ModelReference;

    #[test]
    fn only_local_non_cross_region_models_get_profiles() {
        let config: StackConfig = StackConfigInner {
            env: "dev".to_owned(),
            account: "123".to_owned(),
            region: "us-east-1".to_owned(),
            model_ids: vec![
                ModelReference::new("anthropic.claude-3", "us-east-1"),
                ModelReference::new("us.anthropic.claude-3", "us-east-1"),
                ModelReference::new("amazon.titan", "us-west-2"),
            ],
            image_generation_model_ids: vec![ModelReference::new("amazon.nova-canvas-v1:0", "us-east-1")],
            ..StackConfigInner::default()
        }
        .into();

        let stack = InferenceProfileStack::new(&config, "us-east-1");
        assert_eq!(stack.arns.len(), 2);
        assert_eq!(
            stack.arn_for("amazon.nova-canvas-v1:0"),
            Some("arn:aws:bedrock:us-east-1:123:application-inference-profile/amazon-nova-canvas-v1-0dev")
        );
        assert!(stack.arn_for("us.anthropic.claude-3").is_none());
        assert!(stack.arn_for("amazon.titan").is_none());
        assert_eq!(stack.meta.id.as_str(), "ApplicationInferenceProfileStackdevus-east-1");
    }
}
