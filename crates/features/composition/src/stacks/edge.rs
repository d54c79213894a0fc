use super::{UnitMeta, deployment_unit};
use genu_domain::config::StackConfig;
use genu_domain::constants::EDGE_REGION;
use genu_domain::registry::Outputs;
use genu_domain::units::UnitKind;
use genu_kernel::arn::Arn;
use serde::Serialize;

/// Edge request filtering (web ACL) and the custom-domain certificate.
///
/// Always placed in the edge region, whatever the application region is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRestrictionStack {
    pub meta: UnitMeta,
    pub web_acl_arn: String,
    pub certificate_arn: Option<String>,
    pub allowed_ip_v4_address_ranges: Vec<String>,
    pub allowed_ip_v6_address_ranges: Vec<String>,
    pub allowed_country_codes: Vec<String>,
}

impl EdgeRestrictionStack {
    pub fn new(config: &StackConfig) -> Self {
        let meta = UnitMeta::singleton(UnitKind::EdgeRestriction, config, EDGE_REGION);
        let acl_name = format!("WebAcl{}", config.env);
        let web_acl_arn = Arn::new(
            "wafv2",
            EDGE_REGION,
            &config.account,
            format!("global/webacl/{acl_name}/{}", meta.token("webacl", 32)),
        )
        .format();
        let certificate_arn = config.host_name.as_ref().map(|_| {
            Arn::new("acm", EDGE_REGION, &config.account, format!("certificate/{}", meta.token("cert", 32)))
                .format()
        });

        Self {
            web_acl_arn,
            certificate_arn,
            allowed_ip_v4_address_ranges: config.allowed_ip_v4_address_ranges.clone().unwrap_or_default(),
            allowed_ip_v6_address_ranges: config.allowed_ip_v6_address_ranges.clone().unwrap_or_default(),
            allowed_country_codes: config.allowed_country_codes.clone().unwrap_or_default(),
            meta,
        }
    }

    fn collect_outputs(&self) -> Outputs {
        let mut outputs = Outputs::from([("webAclArn", self.web_acl_arn.clone())]);
        if let Some(cert) = &self.certificate_arn {
            outputs.insert("certificateArn", cert.clone());
        }
        outputs
    }
}

deployment_unit!(EdgeRestrictionStack);
