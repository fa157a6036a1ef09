//! formbind core - widget description to runtime binding engine
//!
//! This crate turns declarative widget descriptions into live, data-bound
//! widget runtimes, including:
//! - Evaluation contexts and the expression evaluator boundary
//! - An operation executor for declarative edit bodies
//! - First-match conditional style resolution
//! - Reference candidate search and polymorphic child type enumeration
//! - The widget binder and capability dispatch over description ids
//! - Description document loading, configuration, errors and logging
//!
//! The domain object graph itself stays with the host; the engine reaches it
//! only through the collaborator traits in [`services`].

pub mod binder;
pub mod candidate_resolver;
pub mod capability;
pub mod child_types;
pub mod config;
pub mod description;
pub mod errors;
pub mod evaluation;
pub mod logging_facility;
pub mod model;
pub mod operations;
pub mod registry;
pub mod services;
pub mod style_resolver;

pub use formbind_core_types::schema;

// Re-export commonly used types
pub use binder::{BinderServices, WidgetBinder, WidgetRuntime};
pub use candidate_resolver::ReferenceCandidateResolver;
pub use child_types::{ChildCreationDescription, ChildTypeResolver};
pub use config::{EngineConfig, SubtypeScope};
pub use description::{load_descriptions, parse_document, DescriptionIndex};
pub use errors::{ExError, ExErrorKind, FormBindError, Result};
pub use evaluation::{EvaluationResult, EvaluatorFactory, ExpressionEvaluator};
pub use model::{DomainNode, EvaluationContext, Status, Value, WidgetDescription, WidgetKind};
pub use operations::{Operation, OperationExecutor, OperationRunner};
pub use registry::{TypeDefinition, TypeRegistry};
