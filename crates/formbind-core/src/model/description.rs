//! Declarative widget descriptions
//!
//! Descriptions are read-only configuration, loaded once per session. The
//! widget kind is a closed sum type: binding dispatches over it with an
//! exhaustive `match`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::style::{ConditionalStyle, WidgetStyle};
use crate::operations::Operation;

/// Ordered operations run by an edit handler; may be empty
pub type OperationBody = Vec<Operation>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDescription {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub label_expression: Option<String>,
    #[serde(default)]
    pub help_expression: Option<String>,
    #[serde(default)]
    pub is_enabled_expression: Option<String>,
    #[serde(default)]
    pub style: Option<WidgetStyle>,
    #[serde(default)]
    pub conditional_styles: Vec<ConditionalStyle>,
    #[serde(flatten)]
    pub kind: WidgetKindDescription,
}

/// Kind-specific part of a widget description, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WidgetKindDescription {
    MonoReference(ReferenceDescription),
    MultiReference(ReferenceDescription),
    ContainmentReference(ContainmentReferenceDescription),
    PrimitiveList(PrimitiveListDescription),
    PrimitiveRadio(PrimitiveRadioDescription),
    LanguageExpression(LanguageExpressionDescription),
}

impl WidgetKindDescription {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetKindDescription::MonoReference(_) => WidgetKind::MonoReference,
            WidgetKindDescription::MultiReference(_) => WidgetKind::MultiReference,
            WidgetKindDescription::ContainmentReference(_) => WidgetKind::ContainmentReference,
            WidgetKindDescription::PrimitiveList(_) => WidgetKind::PrimitiveList,
            WidgetKindDescription::PrimitiveRadio(_) => WidgetKind::PrimitiveRadio,
            WidgetKindDescription::LanguageExpression(_) => WidgetKind::LanguageExpression,
        }
    }

    /// Declared operation slots with the number of operations each holds,
    /// restricted to the slots the widget kind actually exposes
    pub fn declared_slots(&self) -> Vec<(&'static str, usize)> {
        fn push(slots: &mut Vec<(&'static str, usize)>, name: &'static str, body: &Option<OperationBody>) {
            if let Some(body) = body {
                slots.push((name, body.len()));
            }
        }

        let mut slots = Vec::new();
        match self {
            WidgetKindDescription::MonoReference(reference) => {
                let ops = &reference.operations;
                push(&mut slots, "createElement", &ops.create_element);
                push(&mut slots, "set", &ops.set);
                push(&mut slots, "unset", &ops.unset);
                push(&mut slots, "clear", &ops.clear);
            }
            WidgetKindDescription::MultiReference(reference) => {
                let ops = &reference.operations;
                push(&mut slots, "createElement", &ops.create_element);
                push(&mut slots, "add", &ops.add);
                push(&mut slots, "remove", &ops.remove);
                push(&mut slots, "clear", &ops.clear);
                push(&mut slots, "reorder", &ops.reorder);
            }
            WidgetKindDescription::ContainmentReference(containment) => {
                let ops = &containment.operations;
                push(&mut slots, "createElement", &ops.create_element);
                push(&mut slots, "click", &ops.click);
                push(&mut slots, "reorder", &ops.reorder);
            }
            WidgetKindDescription::PrimitiveList(list) => {
                let ops = &list.operations;
                push(&mut slots, "delete", &ops.delete);
                push(&mut slots, "add", &ops.add);
                push(&mut slots, "reorder", &ops.reorder);
                if let Some(action) = &ops.item_action {
                    slots.push(("itemAction", action.body.len()));
                }
            }
            WidgetKindDescription::PrimitiveRadio(radio) => {
                push(&mut slots, "set", &radio.operations.set);
            }
            WidgetKindDescription::LanguageExpression(_) => {}
        }
        slots
    }
}

/// Widget kind tag, as used in description ids and documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    MonoReference,
    MultiReference,
    ContainmentReference,
    PrimitiveList,
    PrimitiveRadio,
    LanguageExpression,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 6] = [
        WidgetKind::MonoReference,
        WidgetKind::MultiReference,
        WidgetKind::ContainmentReference,
        WidgetKind::PrimitiveList,
        WidgetKind::PrimitiveRadio,
        WidgetKind::LanguageExpression,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            WidgetKind::MonoReference => "mono-reference",
            WidgetKind::MultiReference => "multi-reference",
            WidgetKind::ContainmentReference => "containment-reference",
            WidgetKind::PrimitiveList => "primitive-list",
            WidgetKind::PrimitiveRadio => "primitive-radio",
            WidgetKind::LanguageExpression => "language-expression",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Shared by mono- and multi-reference widgets; the binder wires only the
/// slots each kind exposes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferenceDescription {
    pub value_expression: Option<String>,
    pub owner_expression: Option<String>,
    pub type_expression: Option<String>,
    pub candidates_search_scope_expression: Option<String>,
    pub operations: ReferenceOperations,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferenceOperations {
    pub create_element: Option<OperationBody>,
    pub set: Option<OperationBody>,
    pub unset: Option<OperationBody>,
    pub add: Option<OperationBody>,
    pub remove: Option<OperationBody>,
    pub clear: Option<OperationBody>,
    pub reorder: Option<OperationBody>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainmentReferenceDescription {
    pub value_expression: Option<String>,
    pub owner_expression: Option<String>,
    pub type_expression: Option<String>,
    /// Declared cardinality; never inferred from the live relation
    pub many: bool,
    pub operations: ContainmentOperations,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainmentOperations {
    pub create_element: Option<OperationBody>,
    pub click: Option<OperationBody>,
    pub reorder: Option<OperationBody>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrimitiveListDescription {
    pub value_expression: Option<String>,
    pub dropdown_options_expression: Option<String>,
    pub operations: PrimitiveListOperations,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrimitiveListOperations {
    pub delete: Option<OperationBody>,
    pub add: Option<OperationBody>,
    pub reorder: Option<OperationBody>,
    pub item_action: Option<ItemAction>,
}

/// Per-item action of a primitive list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemAction {
    pub icon_url_expression: Option<String>,
    pub precondition_expression: Option<String>,
    pub body: OperationBody,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrimitiveRadioDescription {
    pub value_expression: Option<String>,
    pub candidates_expression: Option<String>,
    pub operations: RadioOperations,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadioOperations {
    pub set: Option<OperationBody>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LanguageExpressionDescription {}
