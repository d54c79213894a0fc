//! Parameter merge: folds inference profile ARNs back into the model lists.

use crate::stacks::InferenceProfileStack;
use genu_domain::config::StackConfig;
use genu_domain::model::{ModelCategory, ModelReference};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Profile units by region.
pub type ProfilesByRegion = BTreeMap<String, Arc<InferenceProfileStack>>;

/// Returns a copy of `models` where every entry whose region has a profile unit holding an
/// ARN for its model id carries that ARN. Other entries are copied unchanged.
///
/// The result depends only on each entry's `(model_id, region)`, never on its position.
#[must_use]
pub fn merge(models: &[ModelReference], profiles: &ProfilesByRegion) -> Vec<ModelReference> {
    models
        .iter()
        .map(|model| {
            profiles
                .get(&model.region)
                .and_then(|stack| stack.arn_for(&model.model_id))
                .map_or_else(|| model.clone(), |arn| model.with_profile(arn))
        })
        .collect()
}

/// Applies [`merge`] to all four model lists, producing a new snapshot.
#[must_use]
pub fn merge_config(config: &StackConfig, profiles: &ProfilesByRegion) -> StackConfig {
    ModelCategory::ALL.into_iter().fold(config.clone(), |acc, category| {
        let merged = merge(config.models(category), profiles);
        acc.with_models(category, merged)
    })
}
