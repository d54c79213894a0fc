//! Serializable summary of a composition run.

use crate::compose::Composition;
use crate::selector::UnitPlan;
use genu_domain::config::{Env, StackConfig};
use genu_domain::registry::{Outputs, UnitId};
use genu_domain::units::UnitKind;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitReport {
    pub id: UnitId,
    pub kind: UnitKind,
    pub env: Env,
    pub outputs: Outputs,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthReport {
    pub plan: UnitPlan,
    /// Units in creation order.
    pub units: Vec<UnitReport>,
    /// Configuration with inference profile ARNs merged in.
    pub config: StackConfig,
}

impl Composition {
    #[must_use]
    pub fn report(&self) -> SynthReport {
        let units = self
            .registry
            .units()
            .map(|unit| UnitReport {
                id: unit.id().clone(),
                kind: unit.kind(),
                env: unit.env().clone(),
                outputs: unit.outputs(),
            })
            .collect();

        SynthReport { plan: self.plan.clone(), units, config: self.config.clone() }
    }
}

#[cfg(test)]
mod tests {
    use crate::compose;
    use genu_domain::config::StackConfigInner;
    use genu_domain::model::ModelReference;

    #[test]
    fn report_lists_units_in_creation_order() {
        let config = StackConfigInner {
            account: "123".to_owned(),
            region: "us-east-1".to_owned(),
            model_region: "us-east-1".to_owned(),
            model_ids: vec![ModelReference::new("anthropic.claude-3", "us-east-1")],
            guardrail_enabled: true,
            ..StackConfigInner::default()
        }
        .into();

        let report = compose(&config).unwrap().report();
        let ids: Vec<&str> = report.units.iter().map(|unit| unit.id.as_str()).collect();
        assert_eq!(ids, ["ApplicationInferenceProfileStackus-east-1", "GuardrailStack", "GenerativeAiUseCasesStack"]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["units"][1]["kind"], "guardrail");
        assert_eq!(json["units"][1]["outputs"]["guardrailVersion"], "DRAFT");
        assert!(json["config"]["modelIds"][0]["derivedProfileArn"].is_string());
    }
}
