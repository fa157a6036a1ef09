//! Collaborator interfaces
//!
//! The engine never owns the domain graph. Everything it knows about nodes
//! and types comes through these traits, injected as `Arc<dyn ..>`.

use std::sync::Mutex;

use crate::errors::ExError;
use crate::model::{DomainNode, DomainType, Message, Relation, Value};

/// Primitive mutations of the domain graph, invoked from operation bodies
#[allow(clippy::result_large_err)]
pub trait EditService: Send + Sync {
    /// Create an instance of `type_name` and attach it to `owner` through `reference_name`
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::EditRejected` if the host refuses the creation.
    fn create_instance(
        &self,
        owner: &DomainNode,
        type_name: &str,
        reference_name: &str,
    ) -> Result<DomainNode, ExError>;

    /// # Errors
    ///
    /// Returns `ExErrorKind::EditRejected` if the feature cannot take the value.
    fn set_value(&self, owner: &DomainNode, feature: &str, value: &Value) -> Result<(), ExError>;

    /// Remove `element` from `feature`, or reset the feature when `element` is `None`
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::EditRejected` if the feature cannot be unset.
    fn unset_value(
        &self,
        owner: &DomainNode,
        feature: &str,
        element: Option<&Value>,
    ) -> Result<(), ExError>;

    /// # Errors
    ///
    /// Returns `ExErrorKind::EditRejected` if the value cannot be added.
    fn add_value(
        &self,
        owner: &DomainNode,
        feature: &str,
        value: &Value,
        index: Option<usize>,
    ) -> Result<(), ExError>;

    /// # Errors
    ///
    /// Returns `ExErrorKind::EditRejected` if the value cannot be removed.
    fn remove_value(&self, owner: &DomainNode, feature: &str, value: &Value)
        -> Result<(), ExError>;

    /// # Errors
    ///
    /// Returns `ExErrorKind::EditRejected` if the element is not in the feature.
    fn move_value(
        &self,
        owner: &DomainNode,
        feature: &str,
        element: &Value,
        to_index: usize,
    ) -> Result<(), ExError>;

    /// # Errors
    ///
    /// Returns `ExErrorKind::EditRejected` if the feature cannot be cleared.
    fn clear_value(&self, owner: &DomainNode, feature: &str) -> Result<(), ExError>;

    /// # Errors
    ///
    /// Returns `ExErrorKind::EditRejected` if the node cannot be deleted.
    fn delete(&self, node: &DomainNode) -> Result<(), ExError>;

    /// Host-defined operation; arguments are already evaluated
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::NotFound` for an unknown operation name.
    fn invoke_custom(
        &self,
        name: &str,
        self_value: &Value,
        arguments: &[(String, Value)],
    ) -> Result<(), ExError>;
}

/// Identity and presentation metadata of domain nodes
pub trait ObjectService: Send + Sync {
    fn id(&self, node: &DomainNode) -> String;
    fn kind(&self, node: &DomainNode) -> String;
    fn label(&self, node: &DomainNode) -> String;
    fn icon_paths(&self, node: &DomainNode) -> Vec<String>;
}

/// Read-only view of the host metamodel
pub trait DomainTypeRegistry: Send + Sync {
    fn find(&self, namespace: &str, name: &str) -> Option<DomainType>;

    /// Subtypes of `ty`, including `ty` itself, in registration order;
    /// restricted to `namespace` when given
    fn subtypes(&self, ty: &DomainType, namespace: Option<&str>) -> Vec<DomainType>;

    /// Containment relations declared on `ty` or any of its supertypes
    fn containment_relations(&self, ty: &DomainType) -> Vec<Relation>;

    /// Whether a `candidate` instance may be stored where `target` is declared
    fn is_assignable(&self, target: &DomainType, candidate: &DomainType) -> bool;

    /// A detached instance used only for metadata lookups
    fn create_transient(&self, ty: &DomainType) -> Option<DomainNode>;
}

/// Diagnostics accumulated while a request runs
pub trait FeedbackMessages: Send + Sync {
    fn add(&self, message: Message);

    /// Drain everything accumulated so far
    fn take(&self) -> Vec<Message>;
}

/// Mutex-backed [`FeedbackMessages`]
#[derive(Debug, Default)]
pub struct FeedbackBuffer {
    messages: Mutex<Vec<Message>>,
}

impl FeedbackBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedbackMessages for FeedbackBuffer {
    fn add(&self, message: Message) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }

    fn take(&self) -> Vec<Message> {
        self.messages
            .lock()
            .map(|mut messages| std::mem::take(&mut *messages))
            .unwrap_or_default()
    }
}

/// A declarative root owning widget descriptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRoot {
    pub id: String,
    /// Domain namespaces whose types are visible to expressions of this view
    pub domain_namespaces: Vec<String>,
}

/// Parent of a description element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    View(ViewRoot),
    Element(String),
}

/// Container links between description elements
pub trait DescriptionContainment: Send + Sync {
    fn parent_of(&self, element_id: &str) -> Option<Container>;
}
