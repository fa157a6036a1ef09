//! Edit handlers
//!
//! One handler per declared operation slot. Invocation is synchronous:
//! bind the affordance variables in a child context, run the slot's body,
//! and fold the outcome plus accumulated feedback into a [`Status`].

use std::sync::Arc;
use std::time::Instant;

use formbind_core_types::RequestId;

use crate::child_types::decode_key;
use crate::errors::{ExError, ExErrorKind};
use crate::model::{variables, DomainNode, EvaluationContext, OperationBody, Status, Value};
use crate::operations::OperationRunner;
use crate::services::FeedbackMessages;
use crate::{log_op_end, log_op_error, log_op_start};

/// User-facing editing gesture a handler answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affordance {
    CreateElement,
    Set,
    Unset,
    Add,
    Remove,
    Clear,
    Reorder,
    Click,
    Delete,
    ItemAction,
    Select,
}

impl Affordance {
    /// Logging operation name
    pub fn op_name(&self) -> &'static str {
        match self {
            Affordance::CreateElement => "handler.createElement",
            Affordance::Set => "handler.set",
            Affordance::Unset => "handler.unset",
            Affordance::Add => "handler.add",
            Affordance::Remove => "handler.remove",
            Affordance::Clear => "handler.clear",
            Affordance::Reorder => "handler.reorder",
            Affordance::Click => "handler.click",
            Affordance::Delete => "handler.delete",
            Affordance::ItemAction => "handler.itemAction",
            Affordance::Select => "handler.select",
        }
    }

    /// Fixed message carried by a failure status
    pub fn failure_message(&self) -> &'static str {
        match self {
            Affordance::CreateElement => "Something went wrong while creating the element.",
            Affordance::Set | Affordance::Unset => {
                "Something went wrong while setting the reference value."
            }
            Affordance::Add | Affordance::Remove => {
                "Something went wrong while updating the list of values."
            }
            Affordance::Clear => "Something went wrong while clearing the reference.",
            Affordance::Reorder => "Something went wrong while reordering the items.",
            Affordance::Click => "Something went wrong while handling the click.",
            Affordance::Delete => "Something went wrong while deleting the item.",
            Affordance::ItemAction => "Something went wrong while executing the item action.",
            Affordance::Select => "Something went wrong while selecting the option.",
        }
    }
}

#[derive(Clone)]
pub struct EditHandler {
    affordance: Affordance,
    widget_id: String,
    body: Option<Arc<OperationBody>>,
    runner: Arc<dyn OperationRunner>,
    feedback: Arc<dyn FeedbackMessages>,
}

impl std::fmt::Debug for EditHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditHandler")
            .field("affordance", &self.affordance)
            .field("widget_id", &self.widget_id)
            .field("operations", &self.body.as_ref().map(|body| body.len()))
            .finish()
    }
}

impl EditHandler {
    pub fn new(
        affordance: Affordance,
        widget_id: impl Into<String>,
        body: Option<&OperationBody>,
        runner: Arc<dyn OperationRunner>,
        feedback: Arc<dyn FeedbackMessages>,
    ) -> Self {
        Self {
            affordance,
            widget_id: widget_id.into(),
            body: body.map(|body| Arc::new(body.clone())),
            runner,
            feedback,
        }
    }

    pub fn affordance(&self) -> Affordance {
        self.affordance
    }

    /// Whether the slot is declared, even with an empty body
    pub fn is_declared(&self) -> bool {
        self.body.is_some()
    }

    /// Run the slot's body with `bindings` added to a child of `ctx`
    ///
    /// An absent or empty body succeeds without running anything.
    pub fn invoke<I>(&self, ctx: &EvaluationContext, bindings: I) -> Status
    where
        I: IntoIterator<Item = (&'static str, Value)>,
    {
        let op = self.affordance.op_name();
        let request_id = RequestId::new();
        let start = Instant::now();
        log_op_start!(
            op,
            request_id = %request_id,
            widget_id = self.widget_id.as_str()
        );

        let body = match self.body.as_deref() {
            Some(body) if !body.is_empty() => body,
            _ => {
                log_op_end!(
                    op,
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = %request_id,
                    widget_id = self.widget_id.as_str(),
                    semantic_change = false
                );
                return Status::neutral(self.feedback.take());
            }
        };

        let mut scope = ctx.child();
        for (name, value) in bindings {
            scope.put(name, value);
        }

        match self.runner.execute(body, &scope) {
            Some(_) => {
                log_op_end!(
                    op,
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = %request_id,
                    widget_id = self.widget_id.as_str(),
                    semantic_change = true
                );
                Status::changed(self.feedback.take())
            }
            None => self.fail(op, request_id, start, "operation body did not complete"),
        }
    }

    /// Create an element under `owner` at the place encoded by `key`
    ///
    /// Binds `containmentReference` and `typeName` from the key and rebinds
    /// `self` to the owner. An undecodable key fails without running the body.
    pub fn invoke_create(
        &self,
        ctx: &EvaluationContext,
        owner: Option<DomainNode>,
        key: &str,
    ) -> Status {
        let Some((relation, type_name)) = decode_key(key) else {
            let op = self.affordance.op_name();
            log_op_start!(op, widget_id = self.widget_id.as_str());
            return self.fail(
                op,
                RequestId::new(),
                Instant::now(),
                &format!("undecodable child creation key '{}'", key),
            );
        };

        let mut bindings = vec![
            (variables::CONTAINMENT_REFERENCE, Value::from(relation)),
            (variables::TYPE_NAME, Value::from(type_name)),
        ];
        if let Some(owner) = owner {
            bindings.push((variables::SELF, Value::Node(owner)));
        }
        self.invoke(ctx, bindings)
    }

    fn fail(&self, op: &'static str, request_id: RequestId, start: Instant, detail: &str) -> Status {
        let err = ExError::new(ExErrorKind::OperationFailed)
            .with_op(op)
            .with_element_id(self.widget_id.clone())
            .with_request_id(request_id.clone())
            .with_message(detail);
        log_op_error!(
            op,
            err,
            duration_ms = start.elapsed().as_millis() as u64,
            widget_id = self.widget_id.as_str(),
            request_id = %request_id
        );
        Status::failure(self.affordance.failure_message(), self.feedback.take())
    }
}
