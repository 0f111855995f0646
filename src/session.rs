//! Interactive session
//!
//! A small state machine with pure transitions (`transition`) driven by an
//! engine that performs the I/O: reading choices, running actions, and
//! applying effects to the store.

mod choose;
mod dispatcher;
mod effect;
mod engine;
mod event;
mod profile;
mod state;
mod transition;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub mod testing;

pub use effect::Effect;
pub use engine::SessionEngine;
pub use event::Event;
pub use state::{SessionContext, SessionPhase};
pub use transition::{transition, TransitionError};

use thiserror::Error;

/// Failures that end a session abnormally
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}
