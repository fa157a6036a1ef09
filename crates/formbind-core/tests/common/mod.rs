//! Hand-written collaborator fakes shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use formbind_core::binder::BinderServices;
use formbind_core::errors::{ExError, ExErrorKind};
use formbind_core::evaluation::{EvaluationResult, EvaluatorFactory, ExpressionEvaluator};
use formbind_core::model::{DomainNode, EvaluationContext, Message, MessageLevel, Value};
use formbind_core::operations::{Operation, OperationRunner};
use formbind_core::services::{
    Container, DescriptionContainment, EditService, FeedbackBuffer, FeedbackMessages,
    ObjectService, ViewRoot,
};
use formbind_core::{TypeDefinition, TypeRegistry};

/// Answers from a fixed expression table, else from the context variable
/// named like the expression, else nothing
#[derive(Default)]
pub struct ScriptedEvaluator {
    table: HashMap<String, Value>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl ScriptedEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, expression: &str, value: impl Into<Value>) -> Self {
        self.table.insert(expression.to_string(), value.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl ExpressionEvaluator for ScriptedEvaluator {
    fn evaluate(&self, ctx: &EvaluationContext, expression: &str) -> EvaluationResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(expression.to_string());
        let value = self
            .table
            .get(expression)
            .cloned()
            .or_else(|| ctx.get(expression).cloned());
        EvaluationResult::new(value)
    }
}

/// Counts executions and records the contexts it was handed
pub struct CountingRunner {
    calls: AtomicUsize,
    succeed: bool,
    contexts: Mutex<Vec<EvaluationContext>>,
    feedback: Option<Arc<FeedbackBuffer>>,
}

impl CountingRunner {
    pub fn succeeding() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            succeed: true,
            contexts: Mutex::new(Vec::new()),
            feedback: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            succeed: false,
            ..Self::succeeding()
        }
    }

    /// Push one warning into `feedback` on every execution
    pub fn reporting_to(mut self, feedback: Arc<FeedbackBuffer>) -> Self {
        self.feedback = Some(feedback);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_context(&self) -> Option<EvaluationContext> {
        self.contexts.lock().unwrap().last().cloned()
    }
}

impl OperationRunner for CountingRunner {
    fn execute(&self, _body: &[Operation], ctx: &EvaluationContext) -> Option<EvaluationContext> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.contexts.lock().unwrap().push(ctx.clone());
        if let Some(feedback) = &self.feedback {
            feedback.add(Message::new("body ran", MessageLevel::Warning));
        }
        self.succeed.then(|| ctx.clone())
    }
}

/// Records every primitive edit as one line; rejects edits on listed features
#[derive(Default)]
pub struct RecordingEditService {
    journal: Mutex<Vec<String>>,
    read_only: Vec<String>,
    created: AtomicUsize,
}

impl RecordingEditService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(features: &[&str]) -> Self {
        Self {
            read_only: features.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    fn record(&self, feature: &str, entry: String) -> Result<(), ExError> {
        if self.read_only.iter().any(|f| f == feature) {
            return Err(ExError::new(ExErrorKind::EditRejected)
                .with_op("edit")
                .with_message(format!("{} is read-only", feature)));
        }
        self.journal.lock().unwrap().push(entry);
        Ok(())
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::Node(node) => node.to_string(),
        Value::List(values) => format!(
            "[{}]",
            values.iter().map(render).collect::<Vec<_>>().join(",")
        ),
        other => other.to_scalar_string().unwrap_or_else(|| "null".to_string()),
    }
}

impl EditService for RecordingEditService {
    fn create_instance(
        &self,
        owner: &DomainNode,
        type_name: &str,
        reference_name: &str,
    ) -> Result<DomainNode, ExError> {
        self.record(
            reference_name,
            format!("create {}.{} {}", owner, reference_name, type_name),
        )?;
        let n = self.created.fetch_add(1, Ordering::SeqCst);
        Ok(DomainNode::new(format!("{}-{}", type_name.to_lowercase(), n)))
    }

    fn set_value(&self, owner: &DomainNode, feature: &str, value: &Value) -> Result<(), ExError> {
        self.record(feature, format!("set {}.{} {}", owner, feature, render(value)))
    }

    fn unset_value(
        &self,
        owner: &DomainNode,
        feature: &str,
        element: Option<&Value>,
    ) -> Result<(), ExError> {
        let element = element.map(render).unwrap_or_else(|| "*".to_string());
        self.record(feature, format!("unset {}.{} {}", owner, feature, element))
    }

    fn add_value(
        &self,
        owner: &DomainNode,
        feature: &str,
        value: &Value,
        index: Option<usize>,
    ) -> Result<(), ExError> {
        let at = index.map(|i| format!(" @{}", i)).unwrap_or_default();
        self.record(feature, format!("add {}.{} {}{}", owner, feature, render(value), at))
    }

    fn remove_value(&self, owner: &DomainNode, feature: &str, value: &Value) -> Result<(), ExError> {
        self.record(feature, format!("remove {}.{} {}", owner, feature, render(value)))
    }

    fn move_value(
        &self,
        owner: &DomainNode,
        feature: &str,
        element: &Value,
        to_index: usize,
    ) -> Result<(), ExError> {
        self.record(
            feature,
            format!("move {}.{} {} -> {}", owner, feature, render(element), to_index),
        )
    }

    fn clear_value(&self, owner: &DomainNode, feature: &str) -> Result<(), ExError> {
        self.record(feature, format!("clear {}.{}", owner, feature))
    }

    fn delete(&self, node: &DomainNode) -> Result<(), ExError> {
        self.record("", format!("delete {}", node))
    }

    fn invoke_custom(
        &self,
        name: &str,
        self_value: &Value,
        arguments: &[(String, Value)],
    ) -> Result<(), ExError> {
        let args: Vec<String> = arguments
            .iter()
            .map(|(k, v)| format!("{}={}", k, render(v)))
            .collect();
        self.record(
            name,
            format!("custom {} on {} ({})", name, render(self_value), args.join(", ")),
        )
    }
}

/// Node ids double as labels; kinds come from a fixed table
#[derive(Default)]
pub struct FakeObjects {
    kinds: HashMap<String, String>,
}

impl FakeObjects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, node: &str, kind: &str) -> Self {
        self.kinds.insert(node.to_string(), kind.to_string());
        self
    }
}

impl ObjectService for FakeObjects {
    fn id(&self, node: &DomainNode) -> String {
        format!("id-{}", node)
    }

    fn kind(&self, node: &DomainNode) -> String {
        self.kinds.get(node.as_str()).cloned().unwrap_or_default()
    }

    fn label(&self, node: &DomainNode) -> String {
        format!("Label {}", node)
    }

    /// Transient nodes are named `transient:<Ns>::<Type>`
    fn icon_paths(&self, node: &DomainNode) -> Vec<String> {
        let name = node.as_str().rsplit("::").next().unwrap_or_default();
        vec![format!("icons/{}.svg", name)]
    }
}

/// Every element hangs directly under one view, unless listed as orphan
pub struct SingleView {
    pub view: ViewRoot,
    pub orphans: Vec<String>,
}

impl SingleView {
    pub fn new(view_id: &str, namespaces: &[&str]) -> Self {
        Self {
            view: ViewRoot {
                id: view_id.to_string(),
                domain_namespaces: namespaces.iter().map(|n| n.to_string()).collect(),
            },
            orphans: Vec::new(),
        }
    }

    pub fn with_orphan(mut self, element_id: &str) -> Self {
        self.orphans.push(element_id.to_string());
        self
    }
}

impl DescriptionContainment for SingleView {
    fn parent_of(&self, element_id: &str) -> Option<Container> {
        if self.orphans.iter().any(|o| o == element_id) {
            None
        } else {
            Some(Container::View(self.view.clone()))
        }
    }
}

/// Hands out one evaluator and records the views it was asked for
pub struct RecordingFactory {
    evaluator: Arc<dyn ExpressionEvaluator>,
    views: Mutex<Vec<ViewRoot>>,
}

impl RecordingFactory {
    pub fn new(evaluator: Arc<dyn ExpressionEvaluator>) -> Self {
        Self {
            evaluator,
            views: Mutex::new(Vec::new()),
        }
    }

    pub fn views(&self) -> Vec<ViewRoot> {
        self.views.lock().unwrap().clone()
    }
}

impl EvaluatorFactory for RecordingFactory {
    fn evaluator_for(&self, view: &ViewRoot) -> Arc<dyn ExpressionEvaluator> {
        self.views.lock().unwrap().push(view.clone());
        Arc::clone(&self.evaluator)
    }
}

/// Library metamodel used across the tests
///
/// ```text
/// library::NamedElement (abstract)
/// ├── library::Book (abstract)
/// │   ├── library::Novel
/// │   ├── library::Comic
/// │   └── store::EBook
/// ├── library::Person
/// └── library::Library   books: Book*, members: Person*, periodicals: Readable*
///     └── library::Branch  archive: Book*
/// library::Readable (interface)
/// └── library::Magazine
/// ```
pub fn library_registry() -> TypeRegistry {
    TypeRegistry::with_types([
        TypeDefinition::new("library", "NamedElement").abstract_type(),
        TypeDefinition::new("library", "Book")
            .abstract_type()
            .supertype("library::NamedElement"),
        TypeDefinition::new("library", "Novel").supertype("library::Book"),
        TypeDefinition::new("library", "Comic").supertype("library::Book"),
        TypeDefinition::new("library", "Readable").interface(),
        TypeDefinition::new("library", "Magazine").supertype("library::Readable"),
        TypeDefinition::new("library", "Person").supertype("library::NamedElement"),
        TypeDefinition::new("library", "Library")
            .supertype("library::NamedElement")
            .containment("books", "library::Book", true)
            .containment("members", "library::Person", true)
            .containment("periodicals", "library::Readable", true)
            .reference("highlights", "library::Book", true),
        TypeDefinition::new("library", "Branch")
            .supertype("library::Library")
            .containment("archive", "library::Book", true),
        TypeDefinition::new("store", "EBook").supertype("library::Book"),
    ])
    .unwrap()
}

pub struct Harness {
    pub evaluator: Arc<ScriptedEvaluator>,
    pub runner: Arc<CountingRunner>,
    pub feedback: Arc<FeedbackBuffer>,
    pub factory: Arc<RecordingFactory>,
}

impl Harness {
    pub fn new(evaluator: ScriptedEvaluator, runner: CountingRunner) -> Self {
        let evaluator = Arc::new(evaluator);
        Self {
            factory: Arc::new(RecordingFactory::new(evaluator.clone())),
            evaluator,
            runner: Arc::new(runner),
            feedback: Arc::new(FeedbackBuffer::new()),
        }
    }

    /// Runner pushes one warning into the harness feedback per execution
    pub fn reporting(evaluator: ScriptedEvaluator, succeed: bool) -> Self {
        let evaluator = Arc::new(evaluator);
        let feedback = Arc::new(FeedbackBuffer::new());
        let runner = if succeed {
            CountingRunner::succeeding()
        } else {
            CountingRunner::failing()
        };
        Self {
            factory: Arc::new(RecordingFactory::new(evaluator.clone())),
            evaluator,
            runner: Arc::new(runner.reporting_to(feedback.clone())),
            feedback,
        }
    }

    pub fn services(&self, objects: FakeObjects) -> BinderServices {
        BinderServices {
            evaluator: self.evaluator.clone(),
            operations: self.runner.clone(),
            objects: Arc::new(objects),
            registry: Arc::new(library_registry()),
            feedback: self.feedback.clone(),
            evaluators: self.factory.clone(),
            containment: Arc::new(SingleView::new("library-view", &["library"])),
        }
    }
}
