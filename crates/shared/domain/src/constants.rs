//! Fixed values shared by the resolver, the composer and the provisioning handlers.

/// Tag key applied to every unit when a tag value is configured.
pub const TAG_KEY: &str = "GenU";

/// The edge-filtering service only accepts web ACLs created from this region.
pub const EDGE_REGION: &str = "us-east-1";

/// Model id prefixes that already denote cross-region inference routing.
pub const CROSS_REGION_PREFIXES: [&str; 4] = ["us.", "apac.", "eu.", "global"];

/// Guardrails are always consumed at their working draft.
pub const GUARDRAIL_VERSION: &str = "DRAFT";

/// Resource type excluded from stack-wide tagging; tagged by the reconciliation resource.
pub const OPENSEARCH_COLLECTION_TYPE: &str = "AWS::OpenSearchServerless::Collection";

pub const DEFAULT_PARTITION: &str = "aws";

/// Isolated subnets synthesized for a fresh private network (one per availability zone).
pub const DEFAULT_ISOLATED_SUBNETS: usize = 2;

/// A resolver endpoint must span at least this many subnets.
pub const MIN_RESOLVER_SUBNETS: usize = 2;
