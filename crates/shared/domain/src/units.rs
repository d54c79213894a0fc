use bitflags::bitflags;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Singleton units the selector decided to create.
    ///
    /// Region fan-out units (inference profiles, video buckets) and the application unit are
    /// not flags: profiles and buckets are lists, the application is always present.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct UnitSet: u32 {
        const CLOSED_NETWORK = 1 << 0;
        const EDGE_RESTRICTION = 1 << 1;
        const KNOWLEDGE_BASE = 1 << 2;
        const AGENT = 1 << 3;
        const GUARDRAIL = 1 << 4;
        const AGENT_CORE = 1 << 5;
        const DASHBOARD = 1 << 6;

        const ALL = Self::CLOSED_NETWORK.bits()
            | Self::EDGE_RESTRICTION.bits()
            | Self::KNOWLEDGE_BASE.bits()
            | Self::AGENT.bits()
            | Self::GUARDRAIL.bits()
            | Self::AGENT_CORE.bits()
            | Self::DASHBOARD.bits();
    }
}

const NAMES: [(&str, UnitSet); 7] = [
    ("closed-network", UnitSet::CLOSED_NETWORK),
    ("edge-restriction", UnitSet::EDGE_RESTRICTION),
    ("knowledge-base", UnitSet::KNOWLEDGE_BASE),
    ("agent", UnitSet::AGENT),
    ("guardrail", UnitSet::GUARDRAIL),
    ("agent-core", UnitSet::AGENT_CORE),
    ("dashboard", UnitSet::DASHBOARD),
];

impl UnitSet {
    /// Kebab-case names of the contained flags, in creation order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        NAMES.into_iter().filter(move |(_, flag)| self.contains(*flag)).map(|(name, _)| name)
    }
}

impl From<&str> for UnitSet {
    fn from(s: &str) -> Self {
        match s {
            "all" | "*" => Self::ALL,
            _ => NAMES
                .into_iter()
                .find_map(|(name, flag)| (name == s).then_some(flag))
                .unwrap_or_else(Self::empty),
        }
    }
}

impl Serialize for UnitSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.bits().count_ones() as usize))?;
        for name in self.names() {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for UnitSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(names.iter().fold(Self::empty(), |set, name| set | Self::from(name.as_str())))
    }
}

/// Every kind of deployment unit the composer can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitKind {
    InferenceProfile,
    ClosedNetwork,
    EdgeRestriction,
    KnowledgeBase,
    Agent,
    Guardrail,
    AgentCore,
    VideoBucket,
    Application,
    Dashboard,
}

impl UnitKind {
    /// Unit id stem; the environment suffix (and region for fan-out units) follows it.
    #[must_use]
    pub const fn stem(self) -> &'static str {
        match self {
            Self::InferenceProfile => "ApplicationInferenceProfileStack",
            Self::ClosedNetwork => "ClosedNetworkStack",
            Self::EdgeRestriction => "CloudFrontWafStack",
            Self::KnowledgeBase => "RagKnowledgeBaseStack",
            Self::Agent => "WebSearchAgentStack",
            Self::Guardrail => "GuardrailStack",
            Self::AgentCore => "AgentCoreStack",
            Self::VideoBucket => "VideoTmpBucketStack",
            Self::Application => "GenerativeAiUseCasesStack",
            Self::Dashboard => "GenerativeAiUseCasesDashboardStack",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for (name, flag) in NAMES {
            assert_eq!(UnitSet::from(name), flag);
        }
        assert_eq!(UnitSet::from("*"), UnitSet::ALL);
        assert!(UnitSet::from("unknown").is_empty());
    }

    #[test]
    fn serializes_as_ordered_names() {
        let set = UnitSet::DASHBOARD | UnitSet::GUARDRAIL;
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["guardrail","dashboard"]"#);

        let back: UnitSet = serde_json::from_str(r#"["dashboard","guardrail"]"#).unwrap();
        assert_eq!(back, set);
    }
}
