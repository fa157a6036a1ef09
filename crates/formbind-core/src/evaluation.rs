//! Expression evaluator boundary
//!
//! The engine does not implement an expression language. Hosts inject an
//! [`ExpressionEvaluator`]; every accessor on [`EvaluationResult`] degrades to
//! an absent value instead of failing.

use std::sync::Arc;

use crate::model::{DomainNode, EvaluationContext, Value};
use crate::services::ViewRoot;

/// Outcome of evaluating one expression
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationResult {
    value: Option<Value>,
}

impl EvaluationResult {
    pub fn new(value: Option<Value>) -> Self {
        Self { value }
    }

    pub fn of(value: impl Into<Value>) -> Self {
        Self::new(Some(value.into()))
    }

    /// Evaluation failed or produced nothing
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    /// A single domain node; the first node when the result is a list
    pub fn as_object(&self) -> Option<DomainNode> {
        match self.value.as_ref()? {
            Value::Node(node) => Some(node.clone()),
            Value::List(values) => values.iter().find_map(|v| v.as_node().cloned()),
            _ => None,
        }
    }

    /// Ordered domain nodes; non-node entries are skipped
    pub fn as_objects(&self) -> Vec<DomainNode> {
        self.as_values()
            .into_iter()
            .filter_map(|value| match value {
                Value::Node(node) => Some(node),
                _ => None,
            })
            .collect()
    }

    /// Ordered values: a list as-is, a single value wrapped, null or absent as empty
    pub fn as_values(&self) -> Vec<Value> {
        self.value
            .clone()
            .map(Value::into_sequence)
            .unwrap_or_default()
    }

    /// Booleans as-is; the strings `"true"`/`"false"` are accepted as well
    pub fn as_boolean(&self) -> Option<bool> {
        match self.value.as_ref()? {
            Value::Bool(flag) => Some(*flag),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        self.value.as_ref()?.to_scalar_string()
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.value.as_ref()? {
            Value::Int(number) => Some(*number),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Evaluates expression strings against an evaluation context
pub trait ExpressionEvaluator: Send + Sync {
    fn evaluate(&self, ctx: &EvaluationContext, expression: &str) -> EvaluationResult;
}

/// Builds evaluators scoped to the domain types visible from one view
pub trait EvaluatorFactory: Send + Sync {
    fn evaluator_for(&self, view: &ViewRoot) -> Arc<dyn ExpressionEvaluator>;
}

/// Returns the same evaluator for every view
pub struct SharedEvaluatorFactory {
    evaluator: Arc<dyn ExpressionEvaluator>,
}

impl SharedEvaluatorFactory {
    pub fn new(evaluator: Arc<dyn ExpressionEvaluator>) -> Self {
        Self { evaluator }
    }
}

impl EvaluatorFactory for SharedEvaluatorFactory {
    fn evaluator_for(&self, _view: &ViewRoot) -> Arc<dyn ExpressionEvaluator> {
        Arc::clone(&self.evaluator)
    }
}

pub(crate) fn is_blank(expression: Option<&str>) -> bool {
    expression.map_or(true, |e| e.trim().is_empty())
}

/// Call-site conveniences: blank or absent expressions are never evaluated
pub trait EvaluatorExt {
    /// Absent when the expression is blank
    fn evaluate_opt(&self, ctx: &EvaluationContext, expression: Option<&str>)
        -> EvaluationResult;

    /// Blank or failed evaluation yields `default`
    fn boolean_or(&self, ctx: &EvaluationContext, expression: Option<&str>, default: bool) -> bool;

    /// Blank or failed evaluation yields the empty string
    fn string_or_empty(&self, ctx: &EvaluationContext, expression: Option<&str>) -> String;

    /// Blank or failed evaluation yields an empty sequence
    fn objects(&self, ctx: &EvaluationContext, expression: Option<&str>) -> Vec<DomainNode>;

    /// Blank or failed evaluation yields an empty sequence
    fn values(&self, ctx: &EvaluationContext, expression: Option<&str>) -> Vec<Value>;
}

impl<E: ExpressionEvaluator + ?Sized> EvaluatorExt for E {
    fn evaluate_opt(
        &self,
        ctx: &EvaluationContext,
        expression: Option<&str>,
    ) -> EvaluationResult {
        match expression {
            Some(expression) if !expression.trim().is_empty() => self.evaluate(ctx, expression),
            _ => EvaluationResult::absent(),
        }
    }

    fn boolean_or(&self, ctx: &EvaluationContext, expression: Option<&str>, default: bool) -> bool {
        self.evaluate_opt(ctx, expression)
            .as_boolean()
            .unwrap_or(default)
    }

    fn string_or_empty(&self, ctx: &EvaluationContext, expression: Option<&str>) -> String {
        self.evaluate_opt(ctx, expression)
            .as_string()
            .unwrap_or_default()
    }

    fn objects(&self, ctx: &EvaluationContext, expression: Option<&str>) -> Vec<DomainNode> {
        self.evaluate_opt(ctx, expression).as_objects()
    }

    fn values(&self, ctx: &EvaluationContext, expression: Option<&str>) -> Vec<Value> {
        self.evaluate_opt(ctx, expression).as_values()
    }
}
