//! Evaluation context
//!
//! A flat variable environment. `child()` takes a snapshot: parent and child
//! evolve independently afterwards.

use std::collections::BTreeMap;

use super::value::Value;

/// Canonical variable names bound by the binder and the executor
pub mod variables {
    pub const SELF: &str = "self";
    pub const NEW_VALUE: &str = "newValue";
    pub const ITEM: &str = "item";
    pub const FROM_INDEX: &str = "fromIndex";
    pub const TO_INDEX: &str = "toIndex";
    pub const CONTAINMENT_REFERENCE: &str = "containmentReference";
    pub const TYPE_NAME: &str = "typeName";
    pub const CLICKED_ELEMENT: &str = "clickedElement";
    pub const CANDIDATE: &str = "candidate";
    /// Default variable bound by a `create` operation
    pub const NEW_INSTANCE: &str = "newInstance";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationContext {
    variables: BTreeMap<String, Value>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose `self` is bound to `value`
    pub fn with_self(value: impl Into<Value>) -> Self {
        Self::new().with(variables::SELF, value)
    }

    /// Snapshot of the current bindings
    pub fn child(&self) -> Self {
        self.clone()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.put(name, value);
        self
    }

    pub fn put(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn self_value(&self) -> Option<&Value> {
        self.get(variables::SELF)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), value))
    }
}
