//! Operation body interpreter
//!
//! Walks an operation body in order, threading the evaluation context, and
//! halts on the first node that cannot complete.

use std::sync::Arc;
use std::time::Instant;

use super::{Operation, OperationRunner};
use crate::errors::{FormBindError, Result};
use crate::evaluation::ExpressionEvaluator;
use crate::log_op_error;
use crate::model::{variables, DomainNode, EvaluationContext, Value};
use crate::services::EditService;

pub struct OperationExecutor {
    evaluator: Arc<dyn ExpressionEvaluator>,
    edits: Arc<dyn EditService>,
}

impl OperationExecutor {
    pub fn new(evaluator: Arc<dyn ExpressionEvaluator>, edits: Arc<dyn EditService>) -> Self {
        Self { evaluator, edits }
    }

    /// Run `body` in a child of `ctx`, returning the first failure
    ///
    /// # Errors
    ///
    /// - `UnknownVariable` if an editing operation runs without a `self` node
    /// - `ExpressionYieldedNothing` if a required expression evaluates to nothing
    /// - `EditRejected` if the edit service refuses a mutation
    pub fn try_execute(
        &self,
        body: &[Operation],
        ctx: &EvaluationContext,
    ) -> Result<EvaluationContext> {
        let mut scope = ctx.child();
        self.run_all(body, &mut scope)?;
        Ok(scope)
    }

    fn run_all(&self, body: &[Operation], scope: &mut EvaluationContext) -> Result<()> {
        for operation in body {
            self.run(operation, scope)?;
        }
        Ok(())
    }

    fn run(&self, operation: &Operation, scope: &mut EvaluationContext) -> Result<()> {
        match operation {
            Operation::ChangeContext {
                expression,
                children,
            } => {
                let value = self.required(scope, expression, "value")?;
                let mut inner = scope.child().with(variables::SELF, value);
                self.run_all(children, &mut inner)
            }

            Operation::Let {
                variable,
                value_expression,
                children,
            } => {
                let value = self.value_or_null(scope, value_expression);
                let mut inner = scope.child().with(variable.as_str(), value);
                self.run_all(children, &mut inner)
            }

            Operation::If {
                condition,
                children,
            } => {
                let holds = self
                    .evaluator
                    .evaluate(scope, condition)
                    .as_boolean()
                    .unwrap_or(false);
                if holds {
                    let mut inner = scope.child();
                    self.run_all(children, &mut inner)?;
                }
                Ok(())
            }

            Operation::For {
                iterator,
                expression,
                children,
            } => {
                for element in self.evaluator.evaluate(scope, expression).as_values() {
                    let mut inner = scope.child().with(iterator.as_str(), element);
                    self.run_all(children, &mut inner)?;
                }
                Ok(())
            }

            Operation::Create {
                type_name,
                reference_name,
                variable_name,
                children,
            } => {
                let owner = self_node(scope)?;
                let created = self
                    .edits
                    .create_instance(&owner, type_name, reference_name)?;
                let variable = variable_name
                    .as_deref()
                    .unwrap_or(variables::NEW_INSTANCE);
                scope.put(variable, created.clone());

                let mut inner = scope.child().with(variables::SELF, created);
                self.run_all(children, &mut inner)
            }

            Operation::Set {
                feature,
                value_expression,
            } => {
                let owner = self_node(scope)?;
                let value = self.value_or_null(scope, value_expression);
                self.edits.set_value(&owner, feature, &value)?;
                Ok(())
            }

            Operation::Unset {
                feature,
                element_expression,
            } => {
                let owner = self_node(scope)?;
                match element_expression {
                    Some(expression) => {
                        let element = self.required(scope, expression, "element")?;
                        self.edits.unset_value(&owner, feature, Some(&element))?;
                    }
                    None => self.edits.unset_value(&owner, feature, None)?,
                }
                Ok(())
            }

            Operation::Add {
                feature,
                value_expression,
                index_expression,
            } => {
                let owner = self_node(scope)?;
                let index = match index_expression {
                    Some(expression) => Some(self.index(scope, expression)?),
                    None => None,
                };
                let values = self.evaluator.evaluate(scope, value_expression).as_values();
                for (offset, value) in values.iter().enumerate() {
                    let at = index.map(|i| i + offset);
                    self.edits.add_value(&owner, feature, value, at)?;
                }
                Ok(())
            }

            Operation::Remove {
                feature,
                element_expression,
            } => {
                let owner = self_node(scope)?;
                for element in self.evaluator.evaluate(scope, element_expression).as_values() {
                    self.edits.remove_value(&owner, feature, &element)?;
                }
                Ok(())
            }

            Operation::Reorder {
                feature,
                element_expression,
                to_index_expression,
            } => {
                let owner = self_node(scope)?;
                let element = self.required(scope, element_expression, "element")?;
                let to_index = self.index(scope, to_index_expression)?;
                self.edits.move_value(&owner, feature, &element, to_index)?;
                Ok(())
            }

            Operation::Clear { feature } => {
                let owner = self_node(scope)?;
                self.edits.clear_value(&owner, feature)?;
                Ok(())
            }

            Operation::Delete { element_expression } => {
                for node in self.evaluator.evaluate(scope, element_expression).as_objects() {
                    self.edits.delete(&node)?;
                }
                Ok(())
            }

            Operation::Custom { name, arguments } => {
                let self_value = scope.self_value().cloned().unwrap_or_default();
                let evaluated: Vec<(String, Value)> = arguments
                    .iter()
                    .map(|(key, expression)| (key.clone(), self.value_or_null(scope, expression)))
                    .collect();
                self.edits.invoke_custom(name, &self_value, &evaluated)?;
                Ok(())
            }
        }
    }

    fn required(
        &self,
        scope: &EvaluationContext,
        expression: &str,
        expected: &'static str,
    ) -> Result<Value> {
        self.evaluator
            .evaluate(scope, expression)
            .into_value()
            .filter(|value| !value.is_null())
            .ok_or_else(|| FormBindError::ExpressionYieldedNothing {
                expression: expression.to_string(),
                expected,
            })
    }

    fn value_or_null(&self, scope: &EvaluationContext, expression: &str) -> Value {
        self.evaluator
            .evaluate(scope, expression)
            .into_value()
            .unwrap_or_default()
    }

    fn index(&self, scope: &EvaluationContext, expression: &str) -> Result<usize> {
        self.evaluator
            .evaluate(scope, expression)
            .as_int()
            .and_then(|i| usize::try_from(i).ok())
            .ok_or_else(|| FormBindError::ExpressionYieldedNothing {
                expression: expression.to_string(),
                expected: "index",
            })
    }
}

fn self_node(scope: &EvaluationContext) -> Result<DomainNode> {
    scope
        .self_value()
        .and_then(Value::as_node)
        .cloned()
        .ok_or_else(|| FormBindError::UnknownVariable {
            name: variables::SELF.to_string(),
        })
}

impl OperationRunner for OperationExecutor {
    fn execute(&self, body: &[Operation], ctx: &EvaluationContext) -> Option<EvaluationContext> {
        let start = Instant::now();
        match self.try_execute(body, ctx) {
            Ok(scope) => Some(scope),
            Err(err) => {
                log_op_error!(
                    "execute_operations",
                    err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    operation_count = body.len()
                );
                None
            }
        }
    }
}
