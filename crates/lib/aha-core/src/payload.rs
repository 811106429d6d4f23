//! Sparse payload construction.
//!
//! Outgoing REST bodies only carry the fields a caller supplied. The service
//! treats an explicit empty value differently from an absent one (clearing an
//! estimate versus leaving it untouched), so every optional field goes through
//! a single presence rule declared in a [`FieldRule`] table.

use serde_json::{Map, Value};

/// When a supplied value counts as present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Any non-null value, including `0`, `false` and `{}`.
    Defined,
    /// Non-null, and not an empty string.
    NonEmpty,
}

impl Presence {
    #[must_use]
    pub fn admits(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => false,
            (Self::NonEmpty, Value::String(text)) => !text.is_empty(),
            _ => true,
        }
    }
}

/// Copies `source` to `target` when the value satisfies `presence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub source: &'static str,
    pub target: &'static str,
    pub presence: Presence,
}

impl FieldRule {
    #[must_use]
    pub const fn new(source: &'static str, target: &'static str, presence: Presence) -> Self {
        Self {
            source,
            target,
            presence,
        }
    }

    #[must_use]
    pub const fn text(name: &'static str) -> Self {
        Self::new(name, name, Presence::NonEmpty)
    }

    #[must_use]
    pub const fn defined(name: &'static str) -> Self {
        Self::new(name, name, Presence::Defined)
    }
}

/// Builds a sparse object from `input` using `rules`, on top of `base`.
#[must_use]
pub fn build_sparse(
    base: Map<String, Value>,
    input: &Map<String, Value>,
    rules: &[FieldRule],
) -> Map<String, Value> {
    rules.iter().fold(base, |mut payload, rule| {
        if let Some(value) = input.get(rule.source).filter(|value| rule.presence.admits(value)) {
            payload.insert(rule.target.to_string(), value.clone());
        }
        payload
    })
}
