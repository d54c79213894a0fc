use crate::constants::CROSS_REGION_PREFIXES;
use serde::{Deserialize, Serialize};

/// A model served from a specific region.
///
/// Identity is the `(model_id, region)` pair. Lists may hold duplicates; every entry is
/// processed on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelReference {
    pub model_id: String,
    pub region: String,
    /// Application inference profile wrapping this model, filled in by the merge step.
    #[serde(default, alias = "inferenceProfileArn", skip_serializing_if = "Option::is_none")]
    pub derived_profile_arn: Option<String>,
}

impl ModelReference {
    pub fn new(model_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self { model_id: model_id.into(), region: region.into(), derived_profile_arn: None }
    }

    /// Returns a copy carrying the given profile ARN.
    #[must_use]
    pub fn with_profile(&self, arn: impl Into<String>) -> Self {
        Self { derived_profile_arn: Some(arn.into()), ..self.clone() }
    }

    /// Whether the id is a cross-region inference identifier (`us.`, `apac.`, `eu.`, `global`).
    #[must_use]
    pub fn is_cross_region(&self) -> bool {
        CROSS_REGION_PREFIXES.iter().any(|prefix| self.model_id.starts_with(prefix))
    }

    /// Profile name stem: the model id with `.` and `:` replaced by `-`.
    #[must_use]
    pub fn profile_name_stem(&self) -> String {
        self.model_id.replace(['.', ':'], "-")
    }
}

/// The four model lists carried by the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelCategory {
    General,
    Image,
    Video,
    SpeechToSpeech,
}

impl ModelCategory {
    pub const ALL: [Self; 4] = [Self::General, Self::Image, Self::Video, Self::SpeechToSpeech];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_region_prefixes() {
        assert!(ModelReference::new("us.anthropic.claude-3", "us-east-1").is_cross_region());
        assert!(ModelReference::new("apac.amazon.nova-pro-v1:0", "ap-northeast-1").is_cross_region());
        assert!(ModelReference::new("eu.amazon.nova-lite-v1:0", "eu-west-1").is_cross_region());
        assert!(ModelReference::new("global.anthropic.claude-sonnet-4", "us-east-1").is_cross_region());
        assert!(!ModelReference::new("anthropic.claude-3", "us-east-1").is_cross_region());
    }

    #[test]
    fn profile_stem_replaces_separators() {
        let model = ModelReference::new("amazon.nova-reel-v1:0", "us-east-1");
        assert_eq!(model.profile_name_stem(), "amazon-nova-reel-v1-0");
    }

    #[test]
    fn legacy_profile_key_is_accepted() {
        let model: ModelReference = serde_json::from_str(
            r#"{"modelId":"amazon.nova-pro-v1:0","region":"us-east-1","inferenceProfileArn":"arn:x"}"#,
        )
        .unwrap();
        assert_eq!(model.derived_profile_arn.as_deref(), Some("arn:x"));

        let json = serde_json::to_string(&ModelReference::new("m", "r")).unwrap();
        assert_eq!(json, r#"{"modelId":"m","region":"r"}"#);
    }
}
