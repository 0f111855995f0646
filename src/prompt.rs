//! Prompt tree and its rendering

mod node;
mod render;

#[cfg(test)]
mod proptests;

pub use node::{ActionId, MenuNode, NodeKind, PromptTree};
pub use render::{render, Listing, Selection, EXIT_SELECTOR};
