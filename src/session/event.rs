//! Events that drive the session state machine

/// Something the user did, or an action reporting back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Index into the profile list
    ProfileChosen(usize),
    /// Index into the current menu's full (unfiltered) node list
    NodeChosen(usize),
    /// The Exit entry of the current listing
    ExitChosen,
    ActionFinished { end_session: bool },
    /// Input stream ended
    InputClosed,
}
