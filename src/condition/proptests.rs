//! Property-based tests for visibility

use super::*;
use crate::prompt::{ActionId, NodeKind};
use crate::store::{DegreeUnit, Profile, TransactionLogEntry};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

fn arb_profile() -> impl Strategy<Value = Option<Profile>> {
    proptest::option::of(
        (
            "[A-Za-z ]{0,12}",
            "[A-Za-z ]{0,12}",
            prop_oneof![Just(DegreeUnit::Celsius), Just(DegreeUnit::Fahrenheit)],
            -90.0f64..90.0,
            -180.0f64..180.0,
        )
            .prop_map(|(full_name, city, default_degree, latitude, longitude)| Profile {
                full_name,
                city,
                country: String::new(),
                timezone: "UTC".to_string(),
                default_degree,
                latitude,
                longitude,
            }),
    )
}

fn arb_state() -> impl Strategy<Value = SessionState> {
    (
        arb_profile(),
        proptest::collection::vec((0i64..2_000_000_000, "[a-z ]{0,20}"), 0..10),
    )
        .prop_map(|(active_profile, entries)| SessionState {
            active_profile,
            transaction_log: entries
                .into_iter()
                .map(|(secs, weather_summary)| TransactionLogEntry {
                    timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
                    weather_summary,
                })
                .collect(),
        })
}

proptest! {
    #[test]
    fn prop_unconditional_nodes_always_visible(state in arb_state(), label in "[a-z]{1,10}") {
        let node = MenuNode {
            label,
            selector: None,
            condition: None,
            kind: NodeKind::Action(ActionId::WeatherHome),
        };
        prop_assert!(is_visible(&node, &state));
    }

    #[test]
    fn prop_filter_is_order_preserving_subsequence(
        state in arb_state(),
        flags in proptest::collection::vec(any::<bool>(), 0..8),
    ) {
        let nodes: Vec<MenuNode> = flags
            .iter()
            .enumerate()
            .map(|(i, conditional)| MenuNode {
                label: format!("node {i}"),
                selector: None,
                condition: conditional
                    .then(|| Condition::compile("log.length > 3").unwrap()),
                kind: NodeKind::Action(ActionId::ViewLog),
            })
            .collect();

        let visible = filter_visible(&nodes, &state);
        prop_assert!(visible.windows(2).all(|w| w[0].0 < w[1].0));
        for (index, node) in &visible {
            prop_assert_eq!(&nodes[*index].label, &node.label);
        }
        let unconditional = flags.iter().filter(|c| !**c).count();
        prop_assert!(visible.len() >= unconditional);
    }

    #[test]
    fn prop_negation_flips_result(state in arb_state(), n in 0u32..12) {
        let plain = Condition::compile(&format!("log.length > {n}")).unwrap();
        let negated = Condition::compile(&format!("!(log.length > {n})")).unwrap();
        prop_assert_ne!(plain.evaluate(&state), negated.evaluate(&state));
    }
}
