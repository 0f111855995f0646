//! Property-based tests for listings

use super::render::EXIT_LABEL;
use super::*;
use proptest::prelude::*;

fn arb_nodes() -> impl Strategy<Value = Vec<MenuNode>> {
    proptest::collection::vec(
        ("[A-Za-z ]{1,20}", proptest::option::of("[a-h]")),
        0..15,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(label, selector)| MenuNode {
                label,
                selector,
                condition: None,
                kind: NodeKind::Action(ActionId::ViewLog),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_render_adds_exactly_one_exit_row(nodes in arb_nodes()) {
        let listing = render(&nodes);
        prop_assert_eq!(listing.rows().len(), nodes.len() + 1);

        let last = listing.rows().last().unwrap();
        prop_assert_eq!(last.selector.as_str(), EXIT_SELECTOR);
        prop_assert_eq!(last.label.as_str(), EXIT_LABEL);
        prop_assert_eq!(listing.to_string().lines().count(), nodes.len() + 1);
    }

    #[test]
    fn prop_exit_selector_always_resolves_to_exit(nodes in arb_nodes()) {
        prop_assert_eq!(render(&nodes).resolve(EXIT_SELECTOR), Selection::Exit);
    }

    #[test]
    fn prop_positional_rows_resolve_to_themselves(nodes in arb_nodes()) {
        let listing = render(&nodes);
        for (position, node) in nodes.iter().enumerate() {
            if node.selector.is_none() && position.to_string() != EXIT_SELECTOR {
                let first_match = listing
                    .rows()
                    .iter()
                    .position(|row| row.selector == position.to_string())
                    .unwrap();
                prop_assert_eq!(listing.resolve(&position.to_string()), Selection::Row(first_match));
            }
        }
    }
}
