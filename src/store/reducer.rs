//! Pure reducer over session state
//!
//! `reduce` is total: every action is defined for every state. Actions that
//! cannot apply hand back the same `Arc` so readers can tell nothing changed.

use super::action::Action;
use super::state::SessionState;
use std::sync::Arc;

pub fn reduce(state: &Arc<SessionState>, action: Action) -> Arc<SessionState> {
    match action {
        Action::SelectProfile(profile) => Arc::new(SessionState {
            active_profile: Some(profile),
            transaction_log: state.transaction_log.clone(),
        }),

        Action::SetDegreeUnit(unit) => {
            let Some(current) = &state.active_profile else {
                return Arc::clone(state);
            };
            let mut profile = current.clone();
            profile.default_degree = unit;
            Arc::new(SessionState {
                active_profile: Some(profile),
                transaction_log: state.transaction_log.clone(),
            })
        }

        Action::UpdateCity(update) => {
            let Some(current) = &state.active_profile else {
                return Arc::clone(state);
            };
            let mut profile = current.clone();
            profile.city = update.city;
            profile.country = update.country;
            profile.latitude = update.latitude;
            profile.longitude = update.longitude;
            profile.timezone = update.timezone;
            Arc::new(SessionState {
                active_profile: Some(profile),
                transaction_log: state.transaction_log.clone(),
            })
        }

        Action::AppendLogEntry(entry) => {
            let mut transaction_log = state.transaction_log.clone();
            transaction_log.push(entry);
            Arc::new(SessionState {
                active_profile: state.active_profile.clone(),
                transaction_log,
            })
        }
    }
}
