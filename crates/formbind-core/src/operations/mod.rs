//! Declarative operation bodies
//!
//! An operation body is an ordered list of [`Operation`] nodes. Scoping
//! nodes (`changeContext`, `let`, `if`, `for`, `create`) own child
//! operations that run in a child context.

pub mod executor;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::EvaluationContext;

pub use executor::OperationExecutor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "op",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Operation {
    /// Rebind `self` to the value of `expression` for the children
    ChangeContext {
        expression: String,
        #[serde(default)]
        children: Vec<Operation>,
    },
    /// Bind `variable` for the children only
    Let {
        variable: String,
        value_expression: String,
        #[serde(default)]
        children: Vec<Operation>,
    },
    If {
        condition: String,
        #[serde(default)]
        children: Vec<Operation>,
    },
    /// Run the children once per element, with `iterator` bound to it
    For {
        iterator: String,
        expression: String,
        #[serde(default)]
        children: Vec<Operation>,
    },
    /// Create a `type_name` instance under `self` through `reference_name`;
    /// binds it in the current scope as `variable_name` (default `newInstance`)
    Create {
        type_name: String,
        reference_name: String,
        #[serde(default)]
        variable_name: Option<String>,
        #[serde(default)]
        children: Vec<Operation>,
    },
    Set {
        feature: String,
        value_expression: String,
    },
    Unset {
        feature: String,
        #[serde(default)]
        element_expression: Option<String>,
    },
    Add {
        feature: String,
        value_expression: String,
        #[serde(default)]
        index_expression: Option<String>,
    },
    Remove {
        feature: String,
        element_expression: String,
    },
    Reorder {
        feature: String,
        element_expression: String,
        to_index_expression: String,
    },
    Clear {
        feature: String,
    },
    Delete {
        element_expression: String,
    },
    /// Host-defined operation; argument values are expressions
    Custom {
        name: String,
        #[serde(default)]
        arguments: BTreeMap<String, String>,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ChangeContext { .. } => "changeContext",
            Operation::Let { .. } => "let",
            Operation::If { .. } => "if",
            Operation::For { .. } => "for",
            Operation::Create { .. } => "create",
            Operation::Set { .. } => "set",
            Operation::Unset { .. } => "unset",
            Operation::Add { .. } => "add",
            Operation::Remove { .. } => "remove",
            Operation::Reorder { .. } => "reorder",
            Operation::Clear { .. } => "clear",
            Operation::Delete { .. } => "delete",
            Operation::Custom { .. } => "custom",
        }
    }
}

/// Runs operation bodies on behalf of edit handlers
pub trait OperationRunner: Send + Sync {
    /// The resulting context on success; `None` if any operation failed
    fn execute(&self, body: &[Operation], ctx: &EvaluationContext) -> Option<EvaluationContext>;
}
