//! Session state store
//!
//! Single owner of the session state. Readers get an immutable snapshot,
//! writers go through `dispatch`, which runs the pure reducer.

mod action;
mod reducer;
mod state;

#[cfg(test)]
mod proptests;

pub use action::Action;
pub use reducer::reduce;
pub use state::{CityUpdate, DegreeUnit, Profile, SessionState, TransactionLogEntry};

use std::sync::Arc;

/// Holds the current session state
#[derive(Debug, Default)]
pub struct Store {
    state: Arc<SessionState>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot. Cheap to clone, never changes underneath the caller.
    pub fn get_state(&self) -> Arc<SessionState> {
        Arc::clone(&self.state)
    }

    /// Active profile, if one has been selected
    pub fn active_profile(&self) -> Option<Profile> {
        self.state.active_profile.clone()
    }

    pub fn dispatch(&mut self, action: Action) {
        let kind = action.kind();
        let next = reduce(&self.state, action);
        let changed = !Arc::ptr_eq(&self.state, &next);
        tracing::debug!(action = kind, changed, "Store dispatch");
        self.state = next;
    }
}
