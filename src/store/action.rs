//! Messages accepted by the store

use super::state::{CityUpdate, DegreeUnit, Profile, TransactionLogEntry};

/// A request to produce a new session state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectProfile(Profile),
    SetDegreeUnit(DegreeUnit),
    UpdateCity(CityUpdate),
    AppendLogEntry(TransactionLogEntry),
}

impl Action {
    /// Stable name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SelectProfile(_) => "select_profile",
            Action::SetDegreeUnit(_) => "set_degree_unit",
            Action::UpdateCity(_) => "update_city",
            Action::AppendLogEntry(_) => "append_log_entry",
        }
    }
}
