//! Validated prompt tree types

use crate::condition::Condition;

/// Everything a leaf can ask the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionId {
    WeatherHome,
    WeatherOther,
    SetCelsius,
    SetFahrenheit,
    ChangeCity,
    ViewLog,
    Exit,
    /// Fallback for identifiers this build does not know; does nothing
    Inert(String),
}

impl ActionId {
    pub fn from_name(name: &str) -> Self {
        match name {
            "weather-home" => ActionId::WeatherHome,
            "weather-other" => ActionId::WeatherOther,
            "settings-temp-C" => ActionId::SetCelsius,
            "settings-temp-F" => ActionId::SetFahrenheit,
            "settings-city" => ActionId::ChangeCity,
            "weather-log" => ActionId::ViewLog,
            "exit" => ActionId::Exit,
            other => ActionId::Inert(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ActionId::WeatherHome => "weather-home",
            ActionId::WeatherOther => "weather-other",
            ActionId::SetCelsius => "settings-temp-C",
            ActionId::SetFahrenheit => "settings-temp-F",
            ActionId::ChangeCity => "settings-city",
            ActionId::ViewLog => "weather-log",
            ActionId::Exit => "exit",
            ActionId::Inert(name) => name,
        }
    }
}

/// Interior node or leaf, never both
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Menu(Vec<MenuNode>),
    Action(ActionId),
}

/// One entry of the prompt tree
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    pub label: String,
    /// Fixed selector shown instead of the positional index
    pub selector: Option<String>,
    pub condition: Option<Condition>,
    pub kind: NodeKind,
}

/// The immutable prompt tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PromptTree {
    roots: Vec<MenuNode>,
}

impl PromptTree {
    pub fn new(roots: Vec<MenuNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[MenuNode] {
        &self.roots
    }

    /// Node list reached by following `path` (indices of interior nodes)
    pub fn nodes_at(&self, path: &[usize]) -> Option<&[MenuNode]> {
        let mut nodes = self.roots.as_slice();
        for &index in path {
            match &nodes.get(index)?.kind {
                NodeKind::Menu(children) => nodes = children,
                NodeKind::Action(_) => return None,
            }
        }
        Some(nodes)
    }
}
