//! Description document format (schema version 1)
//!
//! ```yaml
//! schema_version: 1
//! views:
//!   - id: library-view
//!     domainNamespaces: [library]
//!     groups:
//!       - id: general
//!         widgets:
//!           - id: books
//!             name: books
//!             kind: multi-reference
//!             valueExpression: self.books
//! ```

use serde::{Deserialize, Serialize};

use crate::model::WidgetDescription;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionDocument {
    pub schema_version: u32,
    #[serde(default)]
    pub views: Vec<ViewDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDescription {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub domain_namespaces: Vec<String>,
    #[serde(default)]
    pub groups: Vec<GroupDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDescription {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub widgets: Vec<WidgetDescription>,
}

impl DescriptionDocument {
    /// Every widget with its view and group, in document order
    pub fn widgets(&self) -> impl Iterator<Item = (&ViewDescription, &GroupDescription, &WidgetDescription)> {
        self.views.iter().flat_map(|view| {
            view.groups.iter().flat_map(move |group| {
                group.widgets.iter().map(move |widget| (view, group, widget))
            })
        })
    }
}
