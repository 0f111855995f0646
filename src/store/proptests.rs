//! Property-based tests for the store
//!
//! The transaction log only ever grows, and only `AppendLogEntry` grows it.

use super::*;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

fn arb_unit() -> impl Strategy<Value = DegreeUnit> {
    prop_oneof![Just(DegreeUnit::Celsius), Just(DegreeUnit::Fahrenheit)]
}

fn arb_profile() -> impl Strategy<Value = Profile> {
    ("[A-Z][a-z]{2,8}", "[A-Z][a-z]{2,8}", arb_unit(), -89.0f64..89.0, -179.0f64..179.0).prop_map(
        |(full_name, city, default_degree, latitude, longitude)| Profile {
            full_name,
            city,
            country: "Somewhere".to_string(),
            timezone: "UTC".to_string(),
            default_degree,
            latitude,
            longitude,
        },
    )
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        arb_profile().prop_map(Action::SelectProfile),
        arb_unit().prop_map(Action::SetDegreeUnit),
        ("[A-Z][a-z]{2,8}", -89.0f64..89.0, -179.0f64..179.0).prop_map(
            |(city, latitude, longitude)| Action::UpdateCity(CityUpdate {
                city,
                country: "Elsewhere".to_string(),
                latitude,
                longitude,
                timezone: "UTC".to_string(),
            })
        ),
        (0i64..2_000_000_000, "[a-z ]{1,20}").prop_map(|(secs, weather_summary)| {
            Action::AppendLogEntry(TransactionLogEntry {
                timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
                weather_summary,
            })
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_log_is_monotonic(actions in proptest::collection::vec(arb_action(), 0..30)) {
        let mut store = Store::new();
        let mut previous_len = 0;

        for action in actions {
            let appends = matches!(action, Action::AppendLogEntry(_));
            store.dispatch(action);
            let len = store.get_state().transaction_log.len();

            prop_assert!(len >= previous_len);
            if appends {
                prop_assert_eq!(len, previous_len + 1);
            } else {
                prop_assert_eq!(len, previous_len);
            }
            previous_len = len;
        }
    }

    #[test]
    fn prop_log_prefix_is_preserved(actions in proptest::collection::vec(arb_action(), 1..30)) {
        let mut store = Store::new();
        for action in actions {
            let before = store.get_state();
            store.dispatch(action);
            let after = store.get_state();
            prop_assert_eq!(
                &after.transaction_log[..before.transaction_log.len()],
                &before.transaction_log[..]
            );
        }
    }

    #[test]
    fn prop_unit_change_round_trips(profile in arb_profile(), unit in arb_unit()) {
        let mut store = Store::new();
        store.dispatch(Action::SelectProfile(profile));
        store.dispatch(Action::SetDegreeUnit(unit));
        prop_assert_eq!(store.get_state().active_profile.as_ref().unwrap().default_degree, unit);
    }
}
