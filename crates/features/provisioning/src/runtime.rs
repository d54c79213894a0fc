//! Hosted agent runtime custom resource.

use crate::error::{ControlPlaneError, ProvisioningError, ProvisioningErrorExt};
use crate::event::{CustomResourceEvent, RequestType};
use genu_domain::config::Env;
use genu_kernel::arn::Arn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use tracing::{error, info, warn};

const DEFAULT_NETWORK_MODE: &str = "DEFAULT";
const PUBLIC_NETWORK_MODE: &str = "PUBLIC";
const SKIPPED_IDS: [&str; 2] = ["deleted", "failed"];
const RUNTIME_SERVICE: &str = "bedrock-agentcore";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_variables: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuntimeProperties {
    pub agent_core_runtime_name: String,
    pub role_arn: String,
    #[serde(default)]
    pub network_mode: String,
    #[serde(default)]
    pub server_protocol: String,
    #[serde(default)]
    pub custom_config: CustomConfig,
}

/// Validated request handed to the control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeRequest {
    pub name: String,
    pub role_arn: String,
    pub container_uri: String,
    pub network_mode: String,
    pub server_protocol: String,
    pub environment_variables: Option<BTreeMap<String, String>>,
}

impl TryFrom<&RuntimeProperties> for RuntimeRequest {
    type Error = ProvisioningError;

    fn try_from(props: &RuntimeProperties) -> Result<Self, Self::Error> {
        let container_uri = props
            .custom_config
            .container_image_uri
            .clone()
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| ProvisioningError::validation("containerImageUri is required"))?;
        if props.server_protocol.is_empty() {
            return Err(ProvisioningError::validation("serverProtocol is required"));
        }

        let network_mode = if props.network_mode == DEFAULT_NETWORK_MODE {
            PUBLIC_NETWORK_MODE.to_owned()
        } else {
            props.network_mode.clone()
        };

        Ok(Self {
            name: props.agent_core_runtime_name.clone(),
            role_arn: props.role_arn.clone(),
            container_uri,
            network_mode,
            server_protocol: props.server_protocol.clone(),
            environment_variables: props.custom_config.environment_variables.clone(),
        })
    }
}

/// Identifiers returned by a create call; either may come back empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedRuntime {
    pub id: Option<String>,
    pub arn: Option<String>,
}

/// Control plane of the hosted runtime service.
pub trait RuntimeControlPlane: Send + Sync {
    fn create_runtime(
        &self,
        request: &RuntimeRequest,
    ) -> impl Future<Output = Result<CreatedRuntime, ControlPlaneError>> + Send;

    /// Returns the runtime ARN when the service reports one.
    fn update_runtime(
        &self,
        id: &str,
        request: &RuntimeRequest,
    ) -> impl Future<Output = Result<Option<String>, ControlPlaneError>> + Send;

    fn delete_runtime(&self, id: &str) -> impl Future<Output = Result<(), ControlPlaneError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuntimeData {
    pub agent_core_runtime_id: String,
    pub agent_core_runtime_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuntimeResponse {
    pub physical_resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RuntimeData>,
}

impl RuntimeResponse {
    fn with_data(id: String, arn: String) -> Self {
        Self {
            physical_resource_id: id.clone(),
            data: Some(RuntimeData { agent_core_runtime_id: id, agent_core_runtime_arn: arn }),
        }
    }
}

/// Stateless event handler bound to one control plane and environment.
#[derive(Debug)]
pub struct RuntimeHandler<C> {
    client: C,
    env: Env,
}

impl<C: RuntimeControlPlane> RuntimeHandler<C> {
    pub const fn new(client: C, env: Env) -> Self {
        Self { client, env }
    }

    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Handles one lifecycle event.
    ///
    /// # Errors
    /// * [`ProvisioningError::Validation`] for missing properties or identifiers.
    /// * [`ProvisioningError::ControlPlane`] for failed service calls, except a delete of a
    ///   runtime that no longer exists.
    pub async fn handle(
        &self,
        event: &CustomResourceEvent<RuntimeProperties>,
    ) -> Result<RuntimeResponse, ProvisioningError> {
        let result = match event.request_type {
            RequestType::Create => self.create(&event.resource_properties).await,
            RequestType::Update => {
                self.update(event.physical_resource_id.as_deref(), &event.resource_properties).await
            },
            RequestType::Delete => self.delete(event.physical_resource_id.as_deref()).await,
        };

        if let Err(err) = &result {
            error!(
                request = ?event.request_type,
                physical_id = ?event.physical_resource_id,
                logical_id = %event.logical_resource_id,
                error = %err,
                "Runtime request failed"
            );
        }
        result
    }

    /// Handles a raw JSON event.
    ///
    /// # Errors
    /// [`ProvisioningError::Json`] for an unparsable event, then as [`Self::handle`].
    pub async fn handle_json(&self, event: &str) -> Result<RuntimeResponse, ProvisioningError> {
        let event: CustomResourceEvent<RuntimeProperties> =
            serde_json::from_str(event).context("Failed to parse runtime event")?;
        self.handle(&event).await
    }

    async fn create(&self, props: &RuntimeProperties) -> Result<RuntimeResponse, ProvisioningError> {
        let request = RuntimeRequest::try_from(props).context("create")?;
        info!(name = %request.name, network_mode = %request.network_mode, "Creating runtime");

        let created = self.client.create_runtime(&request).await.context("create")?;
        match (created.id.filter(|id| !id.is_empty()), created.arn.filter(|arn| !arn.is_empty())) {
            (Some(id), Some(arn)) => {
                info!(id = %id, "Runtime created");
                Ok(RuntimeResponse::with_data(id, arn))
            },
            _ => Err(ProvisioningError::validation("Runtime create returned no id or ARN")),
        }
    }

    async fn update(
        &self,
        physical_id: Option<&str>,
        props: &RuntimeProperties,
    ) -> Result<RuntimeResponse, ProvisioningError> {
        let id = physical_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProvisioningError::validation("PhysicalResourceId is required for Update"))?;
        let request = RuntimeRequest::try_from(props).context("update")?;
        info!(id, "Updating runtime");

        let arn = self
            .client
            .update_runtime(id, &request)
            .await
            .context("update")?
            .filter(|arn| !arn.is_empty())
            .unwrap_or_else(|| self.fallback_arn(id));

        Ok(RuntimeResponse::with_data(id.to_owned(), arn))
    }

    async fn delete(&self, physical_id: Option<&str>) -> Result<RuntimeResponse, ProvisioningError> {
        let Some(id) = physical_id.filter(|id| !id.is_empty() && !SKIPPED_IDS.contains(id)) else {
            info!(physical_id, "No runtime to delete");
            let physical_resource_id = physical_id.filter(|id| !id.is_empty()).unwrap_or("deleted");
            return Ok(RuntimeResponse { physical_resource_id: physical_resource_id.to_owned(), data: None });
        };

        match self.client.delete_runtime(id).await {
            Ok(()) => info!(id, "Runtime deleted"),
            Err(err) if err.is_not_found() => warn!(id, error = %err, "Runtime already gone"),
            Err(source) => {
                return Err(ProvisioningError::ControlPlane { source, context: Some("delete".into()) });
            },
        }
        Ok(RuntimeResponse { physical_resource_id: id.to_owned(), data: None })
    }

    fn fallback_arn(&self, id: &str) -> String {
        Arn::new(RUNTIME_SERVICE, &self.env.region, &self.env.account, format!("runtime/{id}")).format()
    }
}

/// Lifecycle of one runtime resource as seen by the handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RuntimeState {
    #[default]
    Pending,
    Created,
    Updated,
    Deleted,
    Failed,
}

/// A runtime resource tracking the state reached by the last handled event.
#[derive(Debug)]
pub struct RuntimeResource<C> {
    handler: RuntimeHandler<C>,
    state: RuntimeState,
    physical_id: Option<String>,
}

impl<C: RuntimeControlPlane> RuntimeResource<C> {
    pub const fn new(handler: RuntimeHandler<C>) -> Self {
        Self { handler, state: RuntimeState::Pending, physical_id: None }
    }

    pub const fn state(&self) -> RuntimeState {
        self.state
    }

    pub fn physical_id(&self) -> Option<&str> {
        self.physical_id.as_deref()
    }

    pub const fn handler(&self) -> &RuntimeHandler<C> {
        &self.handler
    }

    /// Applies `event`; any error moves the resource to [`RuntimeState::Failed`] and is
    /// returned unchanged.
    ///
    /// # Errors
    /// See [`RuntimeHandler::handle`].
    pub async fn apply(
        &mut self,
        event: &CustomResourceEvent<RuntimeProperties>,
    ) -> Result<RuntimeResponse, ProvisioningError> {
        match self.handler.handle(event).await {
            Ok(response) => {
                self.state = match event.request_type {
                    RequestType::Create => RuntimeState::Created,
                    RequestType::Update => RuntimeState::Updated,
                    RequestType::Delete => RuntimeState::Deleted,
                };
                self.physical_id = Some(response.physical_resource_id.clone());
                Ok(response)
            },
            Err(err) => {
                self.state = RuntimeState::Failed;
                Err(err)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(network_mode: &str) -> RuntimeProperties {
        RuntimeProperties {
            agent_core_runtime_name: "GenericAgentCoreRuntime".to_owned(),
            role_arn: "arn:aws:iam::123:role/runtime".to_owned(),
            network_mode: network_mode.to_owned(),
            server_protocol: "HTTP".to_owned(),
            custom_config: CustomConfig {
                container_image_uri: Some("123.dkr.ecr.us-east-1.amazonaws.com/agent:latest".to_owned()),
                environment_variables: None,
            },
        }
    }

    #[test]
    fn default_network_mode_becomes_public() {
        let request = RuntimeRequest::try_from(&props("DEFAULT")).unwrap();
        assert_eq!(request.network_mode, "PUBLIC");
        let request = RuntimeRequest::try_from(&props("VPC")).unwrap();
        assert_eq!(request.network_mode, "VPC");
    }

    #[test]
    fn image_and_protocol_are_required() {
        let mut missing_image = props("PUBLIC");
        missing_image.custom_config.container_image_uri = None;
        assert!(matches!(
            RuntimeRequest::try_from(&missing_image),
            Err(ProvisioningError::Validation { .. })
        ));

        let mut missing_protocol = props("PUBLIC");
        missing_protocol.server_protocol.clear();
        let err = RuntimeRequest::try_from(&missing_protocol).unwrap_err();
        assert!(err.to_string().contains("serverProtocol"));
    }

    #[test]
    fn event_uses_pascal_case_keys() {
        let raw = r#"{
            "RequestType": "Update",
            "PhysicalResourceId": "rt-1",
            "LogicalResourceId": "Runtime",
            "ResourceProperties": {
                "AgentCoreRuntimeName": "rt",
                "RoleArn": "arn:aws:iam::1:role/r",
                "NetworkMode": "DEFAULT",
                "ServerProtocol": "HTTP",
                "CustomConfig": { "containerImageUri": "img", "environmentVariables": { "A": "1" } }
            }
        }"#;
        let event: CustomResourceEvent<RuntimeProperties> = serde_json::from_str(raw).unwrap();
        assert_eq!(event.request_type, RequestType::Update);
        assert_eq!(event.physical_resource_id.as_deref(), Some("rt-1"));
        assert_eq!(
            event.resource_properties.custom_config.environment_variables,
            Some(BTreeMap::from([("A".to_owned(), "1".to_owned())]))
        );

        let response = RuntimeResponse::with_data("rt-1".to_owned(), "arn".to_owned());
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["PhysicalResourceId"], "rt-1");
        assert_eq!(json["Data"]["AgentCoreRuntimeArn"], "arn");
    }
}
