use super::network::NetworkHandle;
use super::{UnitMeta, deployment_unit};
use genu_domain::config::StackConfig;
use genu_domain::registry::Outputs;
use genu_domain::units::UnitKind;
use serde::Serialize;

/// An agent exposed to the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDescriptor {
    pub display_name: String,
    pub agent_id: String,
    pub alias_id: String,
}

/// Built-in agents (web search, code interpreter).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStack {
    pub meta: UnitMeta,
    pub agents: Vec<AgentDescriptor>,
    /// Present when the agents run inside the closed network.
    pub network: Option<NetworkHandle>,
}

impl AgentStack {
    pub fn new(config: &StackConfig, network: Option<NetworkHandle>) -> Self {
        let meta = UnitMeta::singleton(UnitKind::Agent, config, &config.model_region);

        let mut names = Vec::with_capacity(2);
        if config.search_agent_enabled && config.search_api_key.is_some() {
            names.push("SearchEngine");
        }
        names.push("CodeInterpreter");

        let agents = names
            .into_iter()
            .map(|name| AgentDescriptor {
                display_name: name.to_owned(),
                agent_id: meta.token(&format!("{name}-agent"), 10).to_ascii_uppercase(),
                alias_id: meta.token(&format!("{name}-alias"), 10).to_ascii_uppercase(),
            })
            .collect();

        Self { meta, agents, network }
    }

    fn collect_outputs(&self) -> Outputs {
        let names: Vec<&str> = self.agents.iter().map(|a| a.display_name.as_str()).collect();
        let mut outputs = Outputs::from([("agents", names.join(","))]);
        if let Some(network) = &self.network {
            outputs.insert("vpcId", network.vpc_id.clone());
        }
        outputs
    }
}

deployment_unit!(AgentStack);

#[cfg(test)]
mod tests {
    use super::*;
    use genu_domain::config::StackConfigInner;

    fn config(search: bool, key: Option<&str>) -> StackConfig {
        StackConfigInner {
            account: "123".to_owned(),
            region: "us-east-1".to_owned(),
            model_region: "us-west-2".to_owned(),
            agent_enabled: true,
            search_agent_enabled: search,
            search_api_key: key.map(str::to_owned),
            ..StackConfigInner::default()
        }
        .into()
    }

    #[test]
    fn search_agent_needs_flag_and_key() {
        let names = |stack: &AgentStack| {
            stack.agents.iter().map(|a| a.display_name.clone()).collect::<Vec<_>>()
        };

        assert_eq!(names(&AgentStack::new(&config(true, Some("k")), None)), ["SearchEngine", "CodeInterpreter"]);
        assert_eq!(names(&AgentStack::new(&config(true, None), None)), ["CodeInterpreter"]);
        assert_eq!(names(&AgentStack::new(&config(false, Some("k")), None)), ["CodeInterpreter"]);
    }

    #[test]
    fn agents_live_in_model_region() {
        let stack = AgentStack::new(&config(false, None), None);
        assert_eq!(stack.meta.env.region, "us-west-2");
        assert!(!stack.collect_outputs().contains_key("vpcId"));
    }
}
