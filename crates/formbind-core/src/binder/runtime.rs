//! Widget runtime descriptors
//!
//! The bound, renderable form of a widget description. Each kind exposes
//! exactly the edit affordances it supports; the host calls the methods
//! below with the evaluation context of the current render.

use super::handler::EditHandler;
use super::providers::{CommonProviders, ItemProviders, Provider, ReferenceProviders};
use crate::model::{variables, EvaluationContext, Status, Value, WidgetKind};

fn reorder_bindings(element: Value, from_index: usize, to_index: usize) -> [(&'static str, Value); 3] {
    [
        (variables::ITEM, element),
        (variables::FROM_INDEX, Value::from(from_index)),
        (variables::TO_INDEX, Value::from(to_index)),
    ]
}

/// Single-valued reference: set, unset and clear; never add or reorder
#[derive(Clone)]
pub struct MonoReferenceWidget {
    pub common: CommonProviders,
    pub reference: ReferenceProviders,
    pub set_handler: EditHandler,
    pub unset_handler: EditHandler,
    pub clear_handler: EditHandler,
    pub create_element_handler: EditHandler,
}

impl MonoReferenceWidget {
    pub fn set_value(&self, ctx: &EvaluationContext, new_value: Value) -> Status {
        self.set_handler
            .invoke(ctx, [(variables::NEW_VALUE, new_value)])
    }

    pub fn unset_value(&self, ctx: &EvaluationContext, element: Value) -> Status {
        self.unset_handler.invoke(ctx, [(variables::ITEM, element)])
    }

    pub fn clear_value(&self, ctx: &EvaluationContext) -> Status {
        self.clear_handler.invoke(ctx, [])
    }

    pub fn create_element(&self, ctx: &EvaluationContext, key: &str) -> Status {
        let owner = (self.reference.owner)(ctx);
        self.create_element_handler.invoke_create(ctx, owner, key)
    }
}

/// Multi-valued reference: add, remove, clear and reorder; never set or unset
#[derive(Clone)]
pub struct MultiReferenceWidget {
    pub common: CommonProviders,
    pub reference: ReferenceProviders,
    pub add_handler: EditHandler,
    pub remove_handler: EditHandler,
    pub clear_handler: EditHandler,
    pub reorder_handler: EditHandler,
    pub create_element_handler: EditHandler,
}

impl MultiReferenceWidget {
    /// All values are added by one run of the body, bound as a list to `newValue`
    pub fn add_values(&self, ctx: &EvaluationContext, values: Vec<Value>) -> Status {
        self.add_handler
            .invoke(ctx, [(variables::NEW_VALUE, Value::List(values))])
    }

    pub fn remove_value(&self, ctx: &EvaluationContext, element: Value) -> Status {
        self.remove_handler.invoke(ctx, [(variables::ITEM, element)])
    }

    pub fn clear_values(&self, ctx: &EvaluationContext) -> Status {
        self.clear_handler.invoke(ctx, [])
    }

    pub fn reorder(
        &self,
        ctx: &EvaluationContext,
        element: Value,
        from_index: usize,
        to_index: usize,
    ) -> Status {
        self.reorder_handler
            .invoke(ctx, reorder_bindings(element, from_index, to_index))
    }

    pub fn create_element(&self, ctx: &EvaluationContext, key: &str) -> Status {
        let owner = (self.reference.owner)(ctx);
        self.create_element_handler.invoke_create(ctx, owner, key)
    }
}

/// Containment reference; click and reorder exist only when declared
#[derive(Clone)]
pub struct ContainmentReferenceWidget {
    pub common: CommonProviders,
    pub reference: ReferenceProviders,
    /// Declared cardinality
    pub many: Provider<bool>,
    pub create_element_handler: EditHandler,
    pub click_handler: Option<EditHandler>,
    pub reorder_handler: Option<EditHandler>,
}

impl ContainmentReferenceWidget {
    pub fn is_many(&self, ctx: &EvaluationContext) -> bool {
        (self.many)(ctx)
    }

    pub fn create_element(&self, ctx: &EvaluationContext, key: &str) -> Status {
        let owner = (self.reference.owner)(ctx);
        self.create_element_handler.invoke_create(ctx, owner, key)
    }

    /// `None` when no click operation is declared
    pub fn click(&self, ctx: &EvaluationContext, clicked: Value) -> Option<Status> {
        self.click_handler.as_ref().map(|handler| {
            handler.invoke(
                ctx,
                [
                    (variables::CLICKED_ELEMENT, clicked.clone()),
                    (variables::ITEM, clicked),
                ],
            )
        })
    }

    /// `None` when no reorder operation is declared
    pub fn reorder(
        &self,
        ctx: &EvaluationContext,
        element: Value,
        from_index: usize,
        to_index: usize,
    ) -> Option<Status> {
        self.reorder_handler
            .as_ref()
            .map(|handler| handler.invoke(ctx, reorder_bindings(element, from_index, to_index)))
    }
}

/// Per-item action of a primitive list
#[derive(Clone)]
pub struct ItemActionHandler {
    pub handler: EditHandler,
    /// Evaluated with `item` bound
    pub icon_url: Provider<String>,
    /// Evaluated with `item` bound; blank means always available
    pub precondition: Provider<bool>,
}

/// List of primitive values; every affordance is independently optional
#[derive(Clone)]
pub struct PrimitiveListWidget {
    pub common: CommonProviders,
    pub items: Provider<Vec<Value>>,
    pub item: ItemProviders,
    pub options: Provider<Vec<Value>>,
    pub delete_handler: Option<EditHandler>,
    pub add_handler: Option<EditHandler>,
    pub reorder_handler: Option<EditHandler>,
    pub item_action: Option<ItemActionHandler>,
}

impl PrimitiveListWidget {
    /// True as soon as a delete slot is declared, even with an empty body
    pub fn is_deletable(&self) -> bool {
        self.delete_handler.is_some()
    }

    pub fn delete_item(&self, ctx: &EvaluationContext, item: Value) -> Option<Status> {
        self.delete_handler
            .as_ref()
            .map(|handler| handler.invoke(ctx, [(variables::ITEM, item)]))
    }

    pub fn add_value(&self, ctx: &EvaluationContext, new_value: Value) -> Option<Status> {
        self.add_handler
            .as_ref()
            .map(|handler| handler.invoke(ctx, [(variables::NEW_VALUE, new_value)]))
    }

    pub fn reorder(
        &self,
        ctx: &EvaluationContext,
        element: Value,
        from_index: usize,
        to_index: usize,
    ) -> Option<Status> {
        self.reorder_handler
            .as_ref()
            .map(|handler| handler.invoke(ctx, reorder_bindings(element, from_index, to_index)))
    }

    pub fn run_item_action(&self, ctx: &EvaluationContext, item: Value) -> Option<Status> {
        self.item_action
            .as_ref()
            .map(|action| action.handler.invoke(ctx, [(variables::ITEM, item)]))
    }
}

/// Single choice among string candidates
#[derive(Clone)]
pub struct PrimitiveRadioWidget {
    pub common: CommonProviders,
    pub candidates: Provider<Vec<String>>,
    pub value: Provider<String>,
    pub select_handler: EditHandler,
}

impl PrimitiveRadioWidget {
    pub fn select(&self, ctx: &EvaluationContext, candidate: impl Into<String>) -> Status {
        self.select_handler
            .invoke(ctx, [(variables::NEW_VALUE, Value::String(candidate.into()))])
    }
}

/// Expression field; carries no edit handlers
#[derive(Clone)]
pub struct LanguageExpressionWidget {
    pub common: CommonProviders,
}

#[derive(Clone)]
pub enum WidgetRuntime {
    MonoReference(MonoReferenceWidget),
    MultiReference(MultiReferenceWidget),
    ContainmentReference(ContainmentReferenceWidget),
    PrimitiveList(PrimitiveListWidget),
    PrimitiveRadio(PrimitiveRadioWidget),
    LanguageExpression(LanguageExpressionWidget),
}

impl WidgetRuntime {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetRuntime::MonoReference(_) => WidgetKind::MonoReference,
            WidgetRuntime::MultiReference(_) => WidgetKind::MultiReference,
            WidgetRuntime::ContainmentReference(_) => WidgetKind::ContainmentReference,
            WidgetRuntime::PrimitiveList(_) => WidgetKind::PrimitiveList,
            WidgetRuntime::PrimitiveRadio(_) => WidgetKind::PrimitiveRadio,
            WidgetRuntime::LanguageExpression(_) => WidgetKind::LanguageExpression,
        }
    }

    pub fn common(&self) -> &CommonProviders {
        match self {
            WidgetRuntime::MonoReference(widget) => &widget.common,
            WidgetRuntime::MultiReference(widget) => &widget.common,
            WidgetRuntime::ContainmentReference(widget) => &widget.common,
            WidgetRuntime::PrimitiveList(widget) => &widget.common,
            WidgetRuntime::PrimitiveRadio(widget) => &widget.common,
            WidgetRuntime::LanguageExpression(widget) => &widget.common,
        }
    }
}
