//! Session phases and immutable session context

use crate::prompt::{ActionId, PromptTree};
use crate::store::Profile;

/// Where the session currently is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Waiting for the user to pick a profile
    #[default]
    ChoosingProfile,

    /// Showing a menu. `path` holds the indices of the interior nodes
    /// descended through from the root; empty means the root menu.
    Browsing { path: Vec<usize> },

    /// A leaf was chosen; its action runs next
    AwaitingAction { action: ActionId },

    /// Session over
    Terminated,
}

impl SessionPhase {
    pub fn root() -> Self {
        SessionPhase::Browsing { path: Vec::new() }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Terminated)
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::ChoosingProfile => "choosing_profile",
            SessionPhase::Browsing { .. } => "browsing",
            SessionPhase::AwaitingAction { .. } => "awaiting_action",
            SessionPhase::Terminated => "terminated",
        }
    }
}

/// Configuration the session runs against (never changes during a session)
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub profiles: Vec<Profile>,
    pub tree: PromptTree,
}

impl SessionContext {
    pub fn new(profiles: Vec<Profile>, tree: PromptTree) -> Self {
        Self { profiles, tree }
    }
}
