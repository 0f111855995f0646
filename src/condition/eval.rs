//! Evaluation of type-checked conditions

use super::parser::{CompareOp, Expr, ProfileField};
use crate::store::{Profile, SessionState};
use std::cmp::Ordering;

/// The two read-only bindings a condition can see
pub struct Scope<'a> {
    pub profile: Option<&'a Profile>,
    pub log_summaries: Vec<&'a str>,
}

impl<'a> Scope<'a> {
    pub fn from_state(state: &'a SessionState) -> Self {
        Self {
            profile: state.active_profile.as_ref(),
            log_summaries: state
                .transaction_log
                .iter()
                .map(|entry| entry.weather_summary.as_str())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Value<'a> {
    Number(f64),
    Str(&'a str),
    Bool(bool),
}

/// `None` when the expression reads a profile field and no profile is active
pub fn evaluate(expr: &Expr, scope: &Scope<'_>) -> Option<bool> {
    match value_of(expr, scope)? {
        Value::Bool(b) => Some(b),
        // Conditions are checked to be boolean when compiled
        Value::Number(_) | Value::Str(_) => None,
    }
}

fn value_of<'a>(expr: &'a Expr, scope: &Scope<'a>) -> Option<Value<'a>> {
    let value = match expr {
        Expr::Number(n) => Value::Number(*n),
        Expr::Str(s) => Value::Str(s),
        Expr::Bool(b) => Value::Bool(*b),
        #[allow(clippy::cast_precision_loss)]
        Expr::LogLength => Value::Number(scope.log_summaries.len() as f64),
        Expr::Profile(field) => profile_field(scope.profile?, *field),
        Expr::LogContains(needle) => {
            let Value::Str(needle) = value_of(needle, scope)? else {
                return None;
            };
            Value::Bool(scope.log_summaries.iter().any(|s| s.contains(needle)))
        }
        Expr::Not(inner) => Value::Bool(!evaluate(inner, scope)?),
        Expr::And(left, right) => {
            Value::Bool(evaluate(left, scope)? && evaluate(right, scope)?)
        }
        Expr::Or(left, right) => Value::Bool(evaluate(left, scope)? || evaluate(right, scope)?),
        Expr::Compare(op, left, right) => {
            let ordering = compare(value_of(left, scope)?, value_of(right, scope)?)?;
            Value::Bool(match op {
                CompareOp::Eq => ordering == Ordering::Equal,
                CompareOp::Ne => ordering != Ordering::Equal,
                CompareOp::Lt => ordering == Ordering::Less,
                CompareOp::Le => ordering != Ordering::Greater,
                CompareOp::Gt => ordering == Ordering::Greater,
                CompareOp::Ge => ordering != Ordering::Less,
            })
        }
    };
    Some(value)
}

fn profile_field(profile: &Profile, field: ProfileField) -> Value<'_> {
    match field {
        ProfileField::FullName => Value::Str(&profile.full_name),
        ProfileField::City => Value::Str(&profile.city),
        ProfileField::Country => Value::Str(&profile.country),
        ProfileField::Timezone => Value::Str(&profile.timezone),
        ProfileField::DefaultDegree => Value::Str(profile.default_degree.as_str()),
        ProfileField::Latitude => Value::Number(profile.latitude),
        ProfileField::Longitude => Value::Number(profile.longitude),
    }
}

fn compare(left: Value<'_>, right: Value<'_>) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if (a - b).abs() < f64::EPSILON {
                Some(Ordering::Equal)
            } else {
                a.partial_cmp(&b)
            }
        }
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(&b)),
        _ => None,
    }
}
