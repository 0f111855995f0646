//! Effects produced by session transitions

use crate::store::Action;

/// Work for the engine to carry out after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send an action to the store
    Dispatch(Action),

    /// Tell the user which profile is now active
    AnnounceProfile { full_name: String },
}
