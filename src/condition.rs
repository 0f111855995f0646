//! Visibility conditions for prompt nodes
//!
//! A closed boolean expression language over two read-only bindings:
//! `profile` (alias `user`) and `log` (alias `logs`). Conditions are compiled
//! and type-checked once when the prompt tree is loaded; evaluating them
//! afterwards cannot fail and cannot touch anything but the snapshot.

mod eval;
mod lexer;
mod parser;

#[cfg(test)]
mod proptests;

use crate::prompt::MenuNode;
use crate::store::SessionState;
use eval::Scope;
use parser::Expr;
use thiserror::Error;

/// Errors raised while compiling a condition
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConditionError {
    #[error("unexpected character '{ch}' at offset {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("unterminated string starting at offset {pos}")]
    UnterminatedString { pos: usize },
    #[error("invalid number '{text}' at offset {pos}")]
    InvalidNumber { text: String, pos: usize },
    #[error("unexpected '{found}' at offset {pos}")]
    UnexpectedToken { found: String, pos: usize },
    #[error("unexpected end of condition")]
    UnexpectedEnd,
    #[error("unknown binding '{0}' (expected profile or log)")]
    UnknownBinding(String),
    #[error("unknown field '{field}' on {binding}")]
    UnknownField { binding: String, field: String },
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
}

/// A compiled visibility condition
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    source: String,
    expr: Expr,
}

impl Condition {
    pub fn compile(source: &str) -> Result<Self, ConditionError> {
        let tokens = lexer::tokenize(source)?;
        let expr = parser::parse(&tokens)?;
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluate against a snapshot. Reading a profile field while no
    /// profile is active counts as false.
    pub fn evaluate(&self, snapshot: &SessionState) -> bool {
        eval::evaluate(&self.expr, &Scope::from_state(snapshot)).unwrap_or(false)
    }
}

pub fn is_visible(node: &MenuNode, snapshot: &SessionState) -> bool {
    node.condition
        .as_ref()
        .map_or(true, |condition| condition.evaluate(snapshot))
}

/// Visible nodes in their original order, paired with their index in `nodes`
pub fn filter_visible<'a>(
    nodes: &'a [MenuNode],
    snapshot: &SessionState,
) -> Vec<(usize, &'a MenuNode)> {
    nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| is_visible(node, snapshot))
        .collect()
}
