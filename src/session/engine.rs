//! Session engine: drives the state machine with real I/O

use super::choose::{choose, Choice};
use super::dispatcher::ActionDispatcher;
use super::profile::select_profile;
use super::{transition, Effect, Event, SessionContext, SessionError, SessionPhase, TransitionError};
use crate::condition::filter_visible;
use crate::console::{Console, Style};
use crate::prompt::render;
use crate::store::Store;
use crate::weather::{GeocodingClient, WeatherClient};

/// Generic session engine over any console and weather services
pub struct SessionEngine<C, W, G> {
    context: SessionContext,
    phase: SessionPhase,
    store: Store,
    console: C,
    dispatcher: ActionDispatcher<W, G>,
}

impl<C, W, G> SessionEngine<C, W, G>
where
    C: Console,
    W: WeatherClient,
    G: GeocodingClient,
{
    pub fn new(context: SessionContext, console: C, weather: W, geocoding: G) -> Self {
        Self {
            context,
            phase: SessionPhase::ChoosingProfile,
            store: Store::new(),
            console,
            dispatcher: ActionDispatcher::new(weather, geocoding),
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    #[cfg(test)]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[cfg(test)]
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Run until the session terminates
    pub async fn run(&mut self, welcome: &str) -> Result<(), SessionError> {
        tracing::info!(profiles = self.context.profiles.len(), "Session started");
        self.console.emit(Style::Info, welcome);

        // Process events in a loop - sub-menus are a path stack, not recursion
        while !self.phase.is_terminal() {
            let event = self.next_event().await?;
            self.process_event(event)?;
        }

        tracing::info!(
            log_entries = self.store.get_state().transaction_log.len(),
            "Session terminated"
        );
        Ok(())
    }

    async fn next_event(&mut self) -> Result<Event, SessionError> {
        let event = match self.phase.clone() {
            SessionPhase::ChoosingProfile => {
                select_profile(&mut self.console, &self.context.profiles).await?
            }
            SessionPhase::Browsing { path } => self.browse(&path).await?,
            SessionPhase::AwaitingAction { action } => {
                // Fresh snapshot per invocation, never a copy held from earlier
                let profile = self.store.active_profile().ok_or_else(|| {
                    TransitionError::InvalidTransition(
                        "action requested before a profile was selected".to_string(),
                    )
                })?;
                let end_session = self
                    .dispatcher
                    .dispatch(&action, &profile, &mut self.store, &mut self.console)
                    .await?;
                Event::ActionFinished { end_session }
            }
            SessionPhase::Terminated => return Err(TransitionError::SessionTerminated.into()),
        };
        Ok(event)
    }

    async fn browse(&mut self, path: &[usize]) -> Result<Event, SessionError> {
        let nodes = self.context.tree.nodes_at(path).ok_or_else(|| {
            TransitionError::InvalidTransition(format!("no menu at path {path:?}"))
        })?;
        let snapshot = self.store.get_state();
        let visible = filter_visible(nodes, &snapshot);
        let listing = render(visible.iter().map(|(_, node)| *node));

        let event = match choose(&mut self.console, &listing, "Enter your response: ").await? {
            Choice::Row(position) => Event::NodeChosen(visible[position].0),
            Choice::Exit => Event::ExitChosen,
            Choice::Closed => Event::InputClosed,
        };
        Ok(event)
    }

    fn process_event(&mut self, event: Event) -> Result<(), SessionError> {
        let result = transition(&self.phase, &self.context, event.clone())?;
        tracing::debug!(
            from = self.phase.name(),
            to = result.new_phase.name(),
            event = ?event,
            "Session transition"
        );
        self.phase = result.new_phase;

        for effect in result.effects {
            self.execute_effect(effect);
        }
        Ok(())
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Dispatch(action) => self.store.dispatch(action),
            Effect::AnnounceProfile { full_name } => {
                tracing::info!(profile = %full_name, "Profile selected");
                self.console
                    .emit(Style::Info, &format!("Selected User: {full_name}"));
            }
        }
    }
}
