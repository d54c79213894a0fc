//! Tag reconciliation for the vector search collection.
//!
//! The handler never fails: problems are reported through [`TagStatus::Failed`].

use crate::error::ControlPlaneError;
use crate::event::{CustomResourceEvent, RequestType};
use genu_kernel::arn::Arn;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{error, info};

/// Physical id reported for every tag reconciliation response.
pub const PHYSICAL_ID: &str = "ApplyTagsResource";
const COLLECTION_SERVICE: &str = "aoss";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagProperties {
    pub collection_id: String,
    pub region: String,
    pub account_id: String,
    pub tag: Tag,
}

impl TagProperties {
    /// `arn:aws:aoss:{region}:{accountId}:collection/{collectionId}`
    #[must_use]
    pub fn collection_arn(&self) -> String {
        Arn::new(
            COLLECTION_SERVICE,
            &self.region,
            &self.account_id,
            format!("collection/{}", self.collection_id),
        )
        .format()
    }
}

/// Tagging API of the collection service.
pub trait TagControlPlane: Send + Sync {
    fn tag_resource(
        &self,
        arn: &str,
        tags: &[Tag],
    ) -> impl Future<Output = Result<(), ControlPlaneError>> + Send;

    fn list_tags(&self, arn: &str) -> impl Future<Output = Result<Vec<Tag>, ControlPlaneError>> + Send;

    fn untag_resource(
        &self,
        arn: &str,
        keys: &[String],
    ) -> impl Future<Output = Result<(), ControlPlaneError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagResponse {
    pub status: TagStatus,
    pub physical_resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl TagResponse {
    fn new(status: TagStatus, reason: Option<String>) -> Self {
        Self { status, physical_resource_id: PHYSICAL_ID.to_owned(), reason }
    }
}

/// What reconciliation did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Tagged,
    Untagged,
    Unchanged,
}

async fn reconcile<C: TagControlPlane>(
    client: &C,
    props: &TagProperties,
) -> Result<Outcome, ControlPlaneError> {
    let arn = props.collection_arn();

    if props.tag.value.as_deref().is_some_and(|value| !value.is_empty()) {
        client.tag_resource(&arn, std::slice::from_ref(&props.tag)).await?;
        return Ok(Outcome::Tagged);
    }

    let existing = client.list_tags(&arn).await?;
    if existing.iter().any(|tag| tag.key == props.tag.key) {
        client.untag_resource(&arn, std::slice::from_ref(&props.tag.key)).await?;
        return Ok(Outcome::Untagged);
    }
    Ok(Outcome::Unchanged)
}

/// Reconciles the collection tag for one lifecycle event.
///
/// Delete is a no-op. A non-empty tag value is applied; an empty or absent value removes
/// the key when the collection carries it.
pub async fn apply_tags<C: TagControlPlane>(
    client: &C,
    event: &CustomResourceEvent<TagProperties>,
) -> TagResponse {
    if event.request_type == RequestType::Delete {
        return TagResponse::new(TagStatus::Success, None);
    }

    let props = &event.resource_properties;
    match reconcile(client, props).await {
        Ok(outcome) => {
            info!(collection = %props.collection_id, key = %props.tag.key, ?outcome, "Collection tags reconciled");
            TagResponse::new(TagStatus::Success, None)
        },
        Err(err) => {
            error!(collection = %props.collection_id, key = %props.tag.key, error = %err, "Collection tag reconciliation failed");
            TagResponse::new(TagStatus::Failed, Some(err.to_string()))
        },
    }
}

/// Parses a raw JSON event and reconciles it; an unparsable event is reported as failed.
pub async fn apply_tags_json<C: TagControlPlane>(client: &C, event: &str) -> TagResponse {
    match serde_json::from_str::<CustomResourceEvent<TagProperties>>(event) {
        Ok(event) => apply_tags(client, &event).await,
        Err(err) => {
            error!(error = %err, "Malformed tag event");
            TagResponse::new(TagStatus::Failed, Some(err.to_string()))
        },
    }
}
