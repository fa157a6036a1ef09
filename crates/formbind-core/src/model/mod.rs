//! Data model shared by the binder, the executor and the resolvers

pub mod context;
pub mod description;
pub mod domain;
pub mod status;
pub mod style;
pub mod value;

pub use context::{variables, EvaluationContext};
pub use description::{
    ContainmentOperations, ContainmentReferenceDescription, ItemAction,
    LanguageExpressionDescription, OperationBody, PrimitiveListDescription,
    PrimitiveListOperations, PrimitiveRadioDescription, RadioOperations, ReferenceDescription,
    ReferenceOperations, WidgetDescription, WidgetKind, WidgetKindDescription,
};
pub use domain::{DomainType, Relation};
pub use status::{Message, MessageLevel, Status};
pub use style::{ConditionalStyle, WidgetStyle};
pub use value::{DomainNode, Value};
