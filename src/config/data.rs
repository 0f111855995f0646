//! Data files: prompt tree, labels and profiles

use super::ConfigError;
use crate::condition::Condition;
use crate::prompt::{ActionId, MenuNode, NodeKind, PromptTree, EXIT_SELECTOR};
use crate::store::Profile;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

pub const PROMPTS_FILE: &str = "prompts.json";
pub const LABELS_FILE: &str = "labels.json";
pub const PROFILES_FILE: &str = "users.json";

/// Positional rows are numbered `0..MAX_POSITIONAL`; the next number is the
/// Exit selector.
const MAX_POSITIONAL: usize = 9;

/// User-facing text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Labels {
    pub welcome_page: String,
}

/// Everything a session needs, validated
#[derive(Debug, Clone)]
pub struct SessionData {
    pub tree: PromptTree,
    pub labels: Labels,
    pub profiles: Vec<Profile>,
}

impl SessionData {
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let records: Vec<PromptRecord> = read_json(&dir.join(PROMPTS_FILE))?;
        let tree = build_tree(records)?;
        let labels: Labels = read_json(&dir.join(LABELS_FILE))?;
        let profiles: Vec<Profile> = read_json(&dir.join(PROFILES_FILE))?;
        if profiles.is_empty() {
            return Err(ConfigError::NoProfiles);
        }
        if profiles.len() > MAX_POSITIONAL {
            return Err(ConfigError::TooManyProfiles {
                count: profiles.len(),
                max: MAX_POSITIONAL,
            });
        }

        tracing::info!(
            dir = %dir.display(),
            root_prompts = tree.roots().len(),
            profiles = profiles.len(),
            "Session data loaded"
        );
        Ok(Self {
            tree,
            labels,
            profiles,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// Prompt records as stored on disk
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptRecord {
    label: String,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    sub_prompts: Option<Vec<PromptRecord>>,
    #[serde(default)]
    condition: Option<String>,
    #[serde(default)]
    option: Option<SelectorValue>,
}

/// Fixed selectors may be written as `"h"` or `3`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SelectorValue {
    Text(String),
    Number(u64),
}

impl SelectorValue {
    fn into_string(self) -> String {
        match self {
            SelectorValue::Text(text) => text.trim().to_string(),
            SelectorValue::Number(n) => n.to_string(),
        }
    }
}

fn build_tree(records: Vec<PromptRecord>) -> Result<PromptTree, ConfigError> {
    if records.is_empty() {
        return Err(ConfigError::EmptyTree);
    }
    Ok(PromptTree::new(build_nodes(records, "prompts")?))
}

fn build_nodes(records: Vec<PromptRecord>, parent: &str) -> Result<Vec<MenuNode>, ConfigError> {
    let siblings = records.len();
    let mut selectors = HashSet::new();
    let mut nodes = Vec::with_capacity(siblings);

    for (index, record) in records.into_iter().enumerate() {
        let path = format!("{parent}[{index}]");
        let node = build_node(record, &path)?;
        match &node.selector {
            Some(selector) => {
                if !selectors.insert(selector.clone()) {
                    return Err(ConfigError::InvalidNode {
                        path,
                        reason: format!("duplicate selector '{selector}'"),
                    });
                }
                if claims_position(selector, siblings) {
                    return Err(ConfigError::InvalidNode {
                        path,
                        reason: format!("selector '{selector}' collides with a positional index"),
                    });
                }
            }
            // Hidden siblings shift positions down, so any index from here on
            // may end up numbered as Exit
            None if index >= MAX_POSITIONAL => {
                return Err(ConfigError::InvalidNode {
                    path,
                    reason: format!(
                        "more than {MAX_POSITIONAL} entries without a fixed selector; \
                         '{EXIT_SELECTOR}' is reserved for Exit"
                    ),
                });
            }
            None => {}
        }
        nodes.push(node);
    }

    Ok(nodes)
}

/// A fixed selector written like a sibling's positional number
fn claims_position(selector: &str, siblings: usize) -> bool {
    selector
        .parse::<usize>()
        .is_ok_and(|n| n < siblings && n.to_string() == selector)
}

fn build_node(record: PromptRecord, path: &str) -> Result<MenuNode, ConfigError> {
    let action = record
        .action
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty());
    let children = record.sub_prompts.filter(|c| !c.is_empty());

    let kind = match (action, children) {
        (Some(_), Some(_)) => {
            return Err(ConfigError::InvalidNode {
                path: path.to_string(),
                reason: "has both an action and sub-prompts".to_string(),
            })
        }
        (None, None) => {
            return Err(ConfigError::InvalidNode {
                path: path.to_string(),
                reason: "needs either an action or sub-prompts".to_string(),
            })
        }
        (Some(name), None) => {
            let action = ActionId::from_name(&name);
            if let ActionId::Inert(name) = &action {
                tracing::warn!(path, action = %name, "Unknown action will do nothing");
            }
            NodeKind::Action(action)
        }
        (None, Some(children)) => {
            NodeKind::Menu(build_nodes(children, &format!("{path}.subPrompts"))?)
        }
    };

    let condition = record
        .condition
        .filter(|c| !c.trim().is_empty())
        .map(|source| {
            Condition::compile(&source).map_err(|e| ConfigError::Condition {
                path: path.to_string(),
                condition: source.clone(),
                source: e,
            })
        })
        .transpose()?;
    if let Some(condition) = &condition {
        tracing::debug!(path, condition = condition.source(), "Compiled condition");
    }

    let selector = record
        .option
        .map(SelectorValue::into_string)
        .filter(|s| !s.is_empty());
    if selector.as_deref() == Some(EXIT_SELECTOR) {
        return Err(ConfigError::InvalidNode {
            path: path.to_string(),
            reason: format!("selector '{EXIT_SELECTOR}' is reserved for Exit"),
        });
    }

    Ok(MenuNode {
        label: record.label,
        selector,
        condition,
        kind,
    })
}
