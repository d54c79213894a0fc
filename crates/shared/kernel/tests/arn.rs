use genu_kernel::arn::{Arn, agent_core_runtime_id, get_region, is_arn_for_service};
use proptest::prelude::*;

#[test]
fn runtime_id_keeps_embedded_slashes() {
    assert_eq!(
        agent_core_runtime_id("arn:aws:bedrock-agentcore:us-east-1:123:runtime/abc/def").as_deref(),
        Some("abc/def")
    );
}

#[test]
fn formatted_identifiers_parse_back() {
    let arn = Arn::new("bedrock", "us-west-2", "123456789012", "application-inference-profile/p");
    assert_eq!(
        arn.format(),
        "arn:aws:bedrock:us-west-2:123456789012:application-inference-profile/p"
    );
    assert_eq!(arn.format().parse::<Arn>().unwrap(), arn);
    assert!(is_arn_for_service(&arn.format(), "bedrock"));
    assert_eq!(get_region(&arn.format()).as_deref(), Some("us-west-2"));
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9-]{0,12}"
}

proptest! {
    #[test]
    fn parse_inverts_format(
        partition in "[a-z-]{1,10}",
        service in segment(),
        region in segment(),
        account in "[0-9]{0,12}",
        resource in "[A-Za-z0-9/:._*-]{0,40}",
    ) {
        let arn = Arn { partition, service, region, account, resource };
        let parsed = Arn::parse(&arn.format()).unwrap();
        prop_assert_eq!(parsed, arn);
    }
}
