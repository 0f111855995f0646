//! Property-based tests for the session state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use crate::prompt::{ActionId, MenuNode, NodeKind, PromptTree};
use crate::session::testing::sample_profile;
use crate::store::Action;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn leaf(action: ActionId) -> MenuNode {
    MenuNode {
        label: action.name().to_string(),
        selector: None,
        condition: None,
        kind: NodeKind::Action(action),
    }
}

fn menu(children: Vec<MenuNode>) -> MenuNode {
    MenuNode {
        label: "menu".to_string(),
        selector: None,
        condition: None,
        kind: NodeKind::Menu(children),
    }
}

fn test_context() -> SessionContext {
    SessionContext::new(
        vec![sample_profile(), sample_profile()],
        PromptTree::new(vec![
            leaf(ActionId::WeatherHome),
            menu(vec![
                leaf(ActionId::SetCelsius),
                menu(vec![leaf(ActionId::ViewLog), leaf(ActionId::Exit)]),
            ]),
            leaf(ActionId::WeatherOther),
        ]),
    )
}

const TREE_DEPTH: usize = 3;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (0usize..3).prop_map(Event::ProfileChosen),
        (0usize..4).prop_map(Event::NodeChosen),
        Just(Event::ExitChosen),
        any::<bool>().prop_map(|end_session| Event::ActionFinished { end_session }),
        Just(Event::InputClosed),
    ]
}

fn is_valid_phase(phase: &SessionPhase, context: &SessionContext) -> bool {
    match phase {
        SessionPhase::Browsing { path } => {
            path.len() < TREE_DEPTH && context.tree.nodes_at(path).is_some()
        }
        _ => true,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Invariant 1: every reachable phase is valid
    #[test]
    fn prop_transitions_preserve_validity(events in proptest::collection::vec(arb_event(), 0..30)) {
        let context = test_context();
        let mut phase = SessionPhase::ChoosingProfile;

        for event in events {
            if let Ok(result) = transition(&phase, &context, event) {
                phase = result.new_phase;
                prop_assert!(is_valid_phase(&phase, &context), "Invalid phase: {:?}", phase);
            }
        }
    }

    // Invariant 2: Terminated is absorbing
    #[test]
    fn prop_terminated_is_absorbing(event in arb_event()) {
        let result = transition(&SessionPhase::Terminated, &test_context(), event);
        prop_assert!(matches!(result, Err(TransitionError::SessionTerminated)));
    }

    // Invariant 3: SelectProfile is only dispatched when leaving ChoosingProfile
    #[test]
    fn prop_select_profile_only_from_choosing(events in proptest::collection::vec(arb_event(), 0..30)) {
        let context = test_context();
        let mut phase = SessionPhase::ChoosingProfile;

        for event in events {
            let before = phase.clone();
            if let Ok(result) = transition(&phase, &context, event) {
                let selects = result
                    .effects
                    .iter()
                    .any(|e| matches!(e, Effect::Dispatch(Action::SelectProfile(_))));
                if selects {
                    prop_assert_eq!(&before, &SessionPhase::ChoosingProfile);
                    prop_assert_eq!(&result.new_phase, &SessionPhase::root());
                }
                phase = result.new_phase;
            }
        }
    }

    // Invariant 4: input closing always ends a live session
    #[test]
    fn prop_input_closed_terminates(events in proptest::collection::vec(arb_event(), 0..20)) {
        let context = test_context();
        let mut phase = SessionPhase::ChoosingProfile;
        for event in events {
            if let Ok(result) = transition(&phase, &context, event) {
                phase = result.new_phase;
            }
        }
        if !phase.is_terminal() {
            let result = transition(&phase, &context, Event::InputClosed).unwrap();
            prop_assert_eq!(result.new_phase, SessionPhase::Terminated);
            prop_assert!(result.effects.is_empty());
        }
    }

    // Invariant 5: Exit from any menu depth ends the session
    #[test]
    fn prop_exit_while_browsing_terminates(events in proptest::collection::vec(arb_event(), 0..30)) {
        let context = test_context();
        let mut phase = SessionPhase::ChoosingProfile;
        for event in events {
            if let Ok(result) = transition(&phase, &context, event) {
                phase = result.new_phase;
            }
        }
        if matches!(phase, SessionPhase::Browsing { .. }) {
            let result = transition(&phase, &context, Event::ExitChosen).unwrap();
            prop_assert_eq!(result.new_phase, SessionPhase::Terminated);
            prop_assert!(result.effects.is_empty());
        }
    }
}
