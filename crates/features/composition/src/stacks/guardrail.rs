use super::{UnitMeta, deployment_unit};
use genu_domain::config::StackConfig;
use genu_domain::constants::GUARDRAIL_VERSION;
use genu_domain::registry::Outputs;
use genu_domain::units::UnitKind;
use genu_kernel::arn::Arn;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailStack {
    pub meta: UnitMeta,
    pub guardrail_identifier: String,
}

impl GuardrailStack {
    pub fn new(config: &StackConfig) -> Self {
        let meta = UnitMeta::singleton(UnitKind::Guardrail, config, &config.model_region);
        let guardrail_identifier = Arn::new(
            "bedrock",
            &config.model_region,
            &config.account,
            format!("guardrail/{}", meta.token("guardrail", 12)),
        )
        .format();
        Self { meta, guardrail_identifier }
    }

    /// Guardrails are consumed at their working draft.
    #[must_use]
    pub const fn version(&self) -> &'static str {
        GUARDRAIL_VERSION
    }

    fn collect_outputs(&self) -> Outputs {
        Outputs::from([
            ("guardrailIdentifier", self.guardrail_identifier.clone()),
            ("guardrailVersion", GUARDRAIL_VERSION.to_owned()),
        ])
    }
}

deployment_unit!(GuardrailStack);
