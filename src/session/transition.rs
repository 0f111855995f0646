//! Pure session transition function
//!
//! Given the same phase, context and event this always produces the same
//! result. All I/O happens in the engine.

use super::{Effect, Event, SessionContext, SessionPhase};
use crate::prompt::NodeKind;
use crate::store::Action;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_phase: SessionPhase,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(phase: SessionPhase) -> Self {
        Self {
            new_phase: phase,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Session already terminated")]
    SessionTerminated,
    #[error("No profile at index {0}")]
    UnknownProfile(usize),
    #[error("No prompt node at index {index} under path {path:?}")]
    UnknownNode { path: Vec<usize>, index: usize },
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

pub fn transition(
    phase: &SessionPhase,
    context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (phase, event) {
        (SessionPhase::Terminated, _) => Err(TransitionError::SessionTerminated),

        // End of input ends the session from anywhere
        (_, Event::InputClosed) => Ok(TransitionResult::new(SessionPhase::Terminated)),

        // ============================================================
        // Profile selection
        // ============================================================

        // Exit before any profile is active: SelectProfile is never dispatched
        (SessionPhase::ChoosingProfile, Event::ExitChosen) => {
            Ok(TransitionResult::new(SessionPhase::Terminated))
        }

        (SessionPhase::ChoosingProfile, Event::ProfileChosen(index)) => {
            let profile = context
                .profiles
                .get(index)
                .ok_or(TransitionError::UnknownProfile(index))?;
            Ok(TransitionResult::new(SessionPhase::root())
                .with_effect(Effect::Dispatch(Action::SelectProfile(profile.clone())))
                .with_effect(Effect::AnnounceProfile {
                    full_name: profile.full_name.clone(),
                }))
        }

        // ============================================================
        // Menu navigation
        // ============================================================

        (SessionPhase::Browsing { path }, Event::NodeChosen(index)) => {
            let node = context
                .tree
                .nodes_at(path)
                .and_then(|nodes| nodes.get(index))
                .ok_or_else(|| TransitionError::UnknownNode {
                    path: path.clone(),
                    index,
                })?;
            match &node.kind {
                NodeKind::Menu(_) => {
                    let mut deeper = path.clone();
                    deeper.push(index);
                    Ok(TransitionResult::new(SessionPhase::Browsing { path: deeper }))
                }
                NodeKind::Action(action) => Ok(TransitionResult::new(
                    SessionPhase::AwaitingAction {
                        action: action.clone(),
                    },
                )),
            }
        }

        // Exit closes the session from any menu depth
        (SessionPhase::Browsing { .. }, Event::ExitChosen) => {
            Ok(TransitionResult::new(SessionPhase::Terminated))
        }

        // ============================================================
        // Action completion
        // ============================================================

        (SessionPhase::AwaitingAction { .. }, Event::ActionFinished { end_session }) => {
            if end_session {
                Ok(TransitionResult::new(SessionPhase::Terminated))
            } else {
                Ok(TransitionResult::new(SessionPhase::root()))
            }
        }

        (phase, event) => Err(TransitionError::InvalidTransition(format!(
            "{event:?} while {}",
            phase.name()
        ))),
    }
}
