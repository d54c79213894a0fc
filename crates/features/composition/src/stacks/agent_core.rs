use super::{UnitMeta, deployment_unit};
use genu_domain::config::StackConfig;
use genu_domain::registry::Outputs;
use genu_domain::units::UnitKind;
use genu_kernel::arn::Arn;
use serde::Serialize;
use std::collections::BTreeMap;

const RUNTIME_NAME: &str = "GenericAgentCoreRuntime";
const NETWORK_MODE: &str = "PUBLIC";
const SERVER_PROTOCOL: &str = "HTTP";
const FILE_BUCKET_VAR: &str = "FILE_BUCKET";

/// Hosted agent runtime settings, as handed to the runtime provisioning resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeSettings {
    pub name: String,
    pub network_mode: String,
    pub server_protocol: String,
    pub environment_variables: BTreeMap<String, String>,
}

/// Generic hosted agent runtime and its file bucket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCoreStack {
    pub meta: UnitMeta,
    pub runtime: RuntimeSettings,
    pub runtime_arn: String,
    pub file_bucket_name: String,
}

/// Runtime names only allow ASCII letters, digits and `_`.
#[must_use]
pub fn sanitize_runtime_name(raw: &str) -> String {
    raw.chars().map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }).collect()
}

impl AgentCoreStack {
    /// Built from the configuration as resolved, before model enrichment.
    pub fn new(config: &StackConfig) -> Self {
        let meta = UnitMeta::singleton(UnitKind::AgentCore, config, &config.agent_core_region);
        let name = sanitize_runtime_name(&format!("{RUNTIME_NAME}{}", config.env));
        let file_bucket_name = meta.bucket_name("files");
        let runtime_arn = Arn::new(
            "bedrock-agentcore",
            &config.agent_core_region,
            &config.account,
            format!("runtime/{name}-{}", meta.token("runtime", 10)),
        )
        .format();

        Self {
            runtime: RuntimeSettings {
                name,
                network_mode: NETWORK_MODE.to_owned(),
                server_protocol: SERVER_PROTOCOL.to_owned(),
                environment_variables: BTreeMap::from([(
                    FILE_BUCKET_VAR.to_owned(),
                    file_bucket_name.clone(),
                )]),
            },
            runtime_arn,
            file_bucket_name,
            meta,
        }
    }

    #[must_use]
    pub fn file_bucket_region(&self) -> &str {
        &self.meta.env.region
    }

    fn collect_outputs(&self) -> Outputs {
        Outputs::from([
            ("runtimeName", self.runtime.name.clone()),
            ("runtimeArn", self.runtime_arn.clone()),
            ("fileBucketName", self.file_bucket_name.clone()),
            ("fileBucketRegion", self.file_bucket_region().to_owned()),
        ])
    }
}

deployment_unit!(AgentCoreStack);

#[cfg(test)]
mod tests {
    use super::*;
    use genu_domain::config::StackConfigInner;
    use genu_kernel::arn::agent_core_runtime_id;

    #[test]
    fn runtime_name_is_sanitized() {
        assert_eq!(sanitize_runtime_name("GenericAgentCoreRuntime-dev.1"), "GenericAgentCoreRuntime_dev_1");
    }

    #[test]
    fn runtime_lives_in_agent_core_region() {
        let config: StackConfig = StackConfigInner {
            env: "-stg".to_owned(),
            account: "123".to_owned(),
            region: "ap-northeast-1".to_owned(),
            agent_core_region: "us-west-2".to_owned(),
            ..StackConfigInner::default()
        }
        .into();

        let stack = AgentCoreStack::new(&config);
        assert_eq!(stack.meta.env.region, "us-west-2");
        assert_eq!(stack.runtime.name, "GenericAgentCoreRuntime_stg");
        assert_eq!(stack.runtime.environment_variables["FILE_BUCKET"], stack.file_bucket_name);
        let id = agent_core_runtime_id(&stack.runtime_arn).unwrap();
        assert!(id.starts_with("GenericAgentCoreRuntime_stg-"));
    }
}
