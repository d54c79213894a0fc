use genu_composition::merge::{ProfilesByRegion, merge, merge_config};
use genu_composition::stacks::InferenceProfileStack;
use genu_composition::{compose, select};
use genu_domain::config::{StackConfig, StackConfigInner};
use genu_domain::model::ModelReference;
use genu_domain::units::UnitSet;
use proptest::prelude::*;
use std::sync::Arc;

const REGIONS: [&str; 3] = ["us-east-1", "us-west-2", "ap-northeast-1"];
const MODELS: [&str; 4] = ["anthropic.claude-3", "us.anthropic.claude-3", "amazon.nova-pro-v1:0", "global.cohere"];

fn model() -> impl Strategy<Value = ModelReference> {
    (prop::sample::select(MODELS.to_vec()), prop::sample::select(REGIONS.to_vec()))
        .prop_map(|(id, region)| ModelReference::new(id, region))
}

fn allow_list() -> impl Strategy<Value = Option<Vec<String>>> {
    prop::option::of(prop::collection::vec("[A-Z]{2}", 1..3))
}

prop_compose! {
    fn any_config()(
        closed in any::<bool>(),
        flags in prop::collection::vec(any::<bool>(), 6),
        v4 in allow_list(),
        v6 in allow_list(),
        countries in allow_list(),
        host in prop::option::of("[a-z]{3,8}"),
        models in prop::collection::vec(model(), 0..6),
        videos in prop::collection::vec(model(), 0..3),
    ) -> StackConfig {
        StackConfigInner {
            account: "123456789012".to_owned(),
            region: "us-east-1".to_owned(),
            model_region: "us-west-2".to_owned(),
            agent_core_region: "us-east-1".to_owned(),
            closed_network_mode: closed,
            closed_network_create_resolver_endpoint: true,
            agent_enabled: flags[0],
            guardrail_enabled: flags[1],
            rag_knowledge_base_enabled: flags[2],
            create_generic_agent_core_runtime: flags[3],
            dashboard: flags[4],
            search_agent_enabled: flags[5],
            allowed_ip_v4_address_ranges: v4,
            allowed_ip_v6_address_ranges: v6,
            allowed_country_codes: countries,
            domain_name: host.as_ref().map(|_| "example.com".to_owned()),
            hosted_zone_id: host.as_ref().map(|_| "Z1".to_owned()),
            host_name: host,
            model_ids: models,
            video_generation_model_ids: videos,
            ..StackConfigInner::default()
        }
        .into()
    }
}

fn profiles_for(config: &StackConfig) -> ProfilesByRegion {
    config
        .regions_of(&genu_domain::model::ModelCategory::ALL)
        .into_iter()
        .map(|region| {
            let stack = Arc::new(InferenceProfileStack::new(config, &region));
            (region, stack)
        })
        .collect()
}

proptest! {
    #[test]
    fn closed_network_excludes_edge_restriction(config in any_config()) {
        let plan = select(&config).unwrap();
        if config.closed_network_mode {
            prop_assert!(!plan.includes(UnitSet::EDGE_RESTRICTION));
        }
        let composition = compose(&config).unwrap();
        prop_assert!(!(composition.handles.closed_network.is_some() && composition.handles.edge_restriction.is_some()));
    }

    #[test]
    fn duplicates_get_the_same_profile(reference in model(), copies in 2usize..5) {
        let models = vec![reference; copies];
        let config: StackConfig = StackConfigInner {
            account: "123".to_owned(),
            model_ids: models.clone(),
            ..StackConfigInner::default()
        }
        .into();

        let merged = merge(&models, &profiles_for(&config));
        prop_assert_eq!(merged.len(), copies);
        prop_assert!(merged.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn merge_is_idempotent(config in any_config()) {
        let profiles = profiles_for(&config);
        let once = merge_config(&config, &profiles);
        let twice = merge_config(&once, &profiles);
        prop_assert_eq!(&once, &merge_config(&config, &profiles));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_only_touches_regions_with_profiles(config in any_config()) {
        let mut profiles = profiles_for(&config);
        profiles.remove("us-east-1");
        let merged = merge(&config.model_ids, &profiles);
        for (before, after) in config.model_ids.iter().zip(&merged) {
            if before.region == "us-east-1" {
                prop_assert_eq!(before, after);
            }
            prop_assert_eq!(&before.model_id, &after.model_id);
            prop_assert_eq!(&before.region, &after.region);
        }
    }

    #[test]
    fn edge_restriction_is_always_in_edge_region(config in any_config()) {
        if let Some(edge) = compose(&config).unwrap().handles.edge_restriction {
            prop_assert_eq!(edge.meta.env.region.as_str(), "us-east-1");
        }
    }
}
