//! Resource identifiers of the form `arn:partition:service:region:account:resource`.
//!
//! The resource component keeps every embedded `:` and `/`, so `parse` and `format`
//! round-trip for any well-formed identifier.

use genu_domain::constants::DEFAULT_PARTITION;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

const ARN_PREFIX: &str = "arn";
const MIN_SEGMENTS: usize = 6;
const AGENT_CORE_SERVICE: &str = "bedrock-agentcore";
const RUNTIME_RESOURCE: &str = "runtime";

#[genu_derive::genu_error]
pub enum ArnError {
    #[error("Malformed ARN '{value}'{}: {message}", format_context(.context))]
    Malformed {
        value: String,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },
}

/// A parsed resource identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account: String,
    pub resource: String,
}

impl Arn {
    /// Builds an identifier in the default partition.
    pub fn new(
        service: impl Into<String>,
        region: impl Into<String>,
        account: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            partition: DEFAULT_PARTITION.to_owned(),
            service: service.into(),
            region: region.into(),
            account: account.into(),
            resource: resource.into(),
        }
    }

    /// Splits `value` on `:`; the sixth and later segments form the resource.
    ///
    /// # Errors
    /// [`ArnError::Malformed`] when there are fewer than six segments or the first one is
    /// not `arn`.
    pub fn parse(value: &str) -> Result<Self, ArnError> {
        let parts: Vec<&str> = value.split(':').collect();
        if parts.len() < MIN_SEGMENTS {
            return Err(ArnError::Malformed {
                value: value.to_owned(),
                message: format!("expected at least {MIN_SEGMENTS} segments, got {}", parts.len())
                    .into(),
                context: None,
            });
        }
        if parts[0] != ARN_PREFIX {
            return Err(ArnError::Malformed {
                value: value.to_owned(),
                message: "must start with 'arn'".into(),
                context: None,
            });
        }

        Ok(Self {
            partition: parts[1].to_owned(),
            service: parts[2].to_owned(),
            region: parts[3].to_owned(),
            account: parts[4].to_owned(),
            resource: parts[MIN_SEGMENTS - 1..].join(":"),
        })
    }

    #[must_use]
    pub fn format(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn is_service(&self, service: &str) -> bool {
        self.service == service
    }

    /// Runtime id of a hosted agent runtime (`runtime/<id>`, the id may contain `/`).
    #[must_use]
    pub fn runtime_id(&self) -> Option<&str> {
        if !self.is_service(AGENT_CORE_SERVICE) {
            return None;
        }
        let (kind, id) = self.resource.split_once('/')?;
        (kind == RUNTIME_RESOURCE).then_some(id)
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{ARN_PREFIX}:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account, self.resource
        )
    }
}

impl FromStr for Arn {
    type Err = ArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Region of `arn`, `None` when unparsable or global.
#[must_use]
pub fn get_region(arn: &str) -> Option<String> {
    Arn::parse(arn).ok().map(|a| a.region).filter(|region| !region.is_empty())
}

#[must_use]
pub fn get_service(arn: &str) -> Option<String> {
    Arn::parse(arn).ok().map(|a| a.service).filter(|service| !service.is_empty())
}

#[must_use]
pub fn is_arn_for_service(arn: &str, service: &str) -> bool {
    Arn::parse(arn).is_ok_and(|a| a.is_service(service))
}

#[must_use]
pub fn is_bedrock_agent_core_arn(arn: &str) -> bool {
    is_arn_for_service(arn, AGENT_CORE_SERVICE)
}

/// Runtime id from a hosted agent runtime ARN.
#[must_use]
pub fn agent_core_runtime_id(arn: &str) -> Option<String> {
    Arn::parse(arn).ok()?.runtime_id().map(str::to_owned)
}
