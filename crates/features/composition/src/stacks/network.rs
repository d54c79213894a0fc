use super::{UnitMeta, deployment_unit};
use crate::error::CompositionError;
use genu_domain::config::StackConfig;
use genu_domain::constants::{DEFAULT_ISOLATED_SUBNETS, MIN_RESOLVER_SUBNETS};
use genu_domain::registry::Outputs;
use genu_domain::units::UnitKind;
use serde::Serialize;

/// Private network attachment handed to units that run inside the closed network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkHandle {
    pub vpc_id: String,
    pub subnet_ids: Vec<String>,
}

/// Private network for closed-network deployments.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedNetworkStack {
    pub meta: UnitMeta,
    pub network: NetworkHandle,
    pub api_gateway_vpc_endpoint_id: String,
    pub web_bucket_name: String,
    pub cognito_user_pool_proxy_endpoint: String,
    pub cognito_identity_pool_proxy_endpoint: String,
    pub resolver_endpoint_id: Option<String>,
}

/// Isolated subnets the network will use: the supplied ones, or a fresh pair.
fn isolated_subnets(config: &StackConfig, meta: &UnitMeta) -> Vec<String> {
    config.closed_network_subnet_ids.clone().unwrap_or_else(|| {
        (0..DEFAULT_ISOLATED_SUBNETS)
            .map(|az| format!("subnet-{}", meta.token(&format!("isolated-{az}"), 17)))
            .collect()
    })
}

/// Fails when a resolver endpoint is requested over fewer than two subnets.
///
/// # Errors
/// [`CompositionError::Topology`] for a single supplied subnet with the resolver enabled.
pub fn check_topology(config: &StackConfig) -> Result<(), CompositionError> {
    let supplied = config.closed_network_subnet_ids.as_ref().map_or(DEFAULT_ISOLATED_SUBNETS, Vec::len);
    if config.closed_network_create_resolver_endpoint && supplied < MIN_RESOLVER_SUBNETS {
        return Err(CompositionError::Topology {
            message: "Need at least 2 isolated subnets in different AZs.".into(),
            context: Some(format!("{supplied} subnet(s) supplied for the resolver endpoint").into()),
        });
    }
    Ok(())
}

impl ClosedNetworkStack {
    /// # Errors
    /// See [`check_topology`].
    pub fn new(config: &StackConfig) -> Result<Self, CompositionError> {
        check_topology(config)?;

        let meta = UnitMeta::singleton(UnitKind::ClosedNetwork, config, &config.region);
        let region = meta.env.region.clone();
        let subnet_ids = isolated_subnets(config, &meta);
        let proxy = |purpose: &str| {
            format!("https://{}.execute-api.{region}.amazonaws.com/prod/", meta.token(purpose, 10))
        };

        Ok(Self {
            network: NetworkHandle { vpc_id: format!("vpc-{}", meta.token("vpc", 17)), subnet_ids },
            api_gateway_vpc_endpoint_id: format!("vpce-{}", meta.token("apigw", 17)),
            web_bucket_name: meta.bucket_name("web"),
            cognito_user_pool_proxy_endpoint: proxy("user-pool-proxy"),
            cognito_identity_pool_proxy_endpoint: proxy("identity-pool-proxy"),
            resolver_endpoint_id: config
                .closed_network_create_resolver_endpoint
                .then(|| format!("rslvr-in-{}", meta.token("resolver", 17))),
            meta,
        })
    }

    fn collect_outputs(&self) -> Outputs {
        let mut outputs = Outputs::from([
            ("vpcId", self.network.vpc_id.clone()),
            ("subnetIds", self.network.subnet_ids.join(",")),
            ("apiGatewayVpcEndpointId", self.api_gateway_vpc_endpoint_id.clone()),
            ("webBucketName", self.web_bucket_name.clone()),
            ("cognitoUserPoolProxyEndpoint", self.cognito_user_pool_proxy_endpoint.clone()),
            ("cognitoIdentityPoolProxyEndpoint", self.cognito_identity_pool_proxy_endpoint.clone()),
        ]);
        if let Some(resolver) = &self.resolver_endpoint_id {
            outputs.insert("resolverEndpointId", resolver.clone());
        }
        outputs
    }
}

deployment_unit!(ClosedNetworkStack);

#[cfg(test)]
mod tests {
    use super::*;
    use genu_domain::config::StackConfigInner;

    fn config(subnets: Option<Vec<&str>>, resolver: bool) -> StackConfig {
        StackConfigInner {
            account: "123".to_owned(),
            region: "ap-northeast-1".to_owned(),
            closed_network_mode: true,
            closed_network_subnet_ids: subnets.map(|s| s.into_iter().map(str::to_owned).collect()),
            closed_network_create_resolver_endpoint: resolver,
            ..StackConfigInner::default()
        }
        .into()
    }

    #[test]
    fn default_network_has_two_subnets_and_a_resolver() {
        let stack = ClosedNetworkStack::new(&config(None, true)).unwrap();
        assert_eq!(stack.network.subnet_ids.len(), 2);
        assert_ne!(stack.network.subnet_ids[0], stack.network.subnet_ids[1]);
        assert!(stack.resolver_endpoint_id.is_some());
        assert!(stack.cognito_user_pool_proxy_endpoint.contains(".execute-api.ap-northeast-1."));
    }

    #[test]
    fn single_subnet_with_resolver_fails_fast() {
        let err = ClosedNetworkStack::new(&config(Some(vec!["subnet-a"]), true)).unwrap_err();
        assert!(matches!(err, CompositionError::Topology { .. }));
        assert!(err.to_string().contains("Need at least 2 isolated subnets in different AZs."));
    }

    #[test]
    fn single_subnet_without_resolver_is_fine() {
        let stack = ClosedNetworkStack::new(&config(Some(vec!["subnet-a"]), false)).unwrap();
        assert_eq!(stack.network.subnet_ids, ["subnet-a"]);
        assert!(stack.resolver_endpoint_id.is_none());
        assert!(!stack.collect_outputs().contains_key("resolverEndpointId"));
    }
}
