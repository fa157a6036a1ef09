//! Id index over a loaded description document

use std::collections::HashMap;

use super::document::DescriptionDocument;
use crate::model::WidgetDescription;
use crate::services::{Container, DescriptionContainment, ViewRoot};

#[derive(Debug, Clone)]
pub struct DescriptionIndex {
    document: DescriptionDocument,
    parents: HashMap<String, Container>,
    /// widget id -> (view, group, widget) positions
    widgets: HashMap<String, (usize, usize, usize)>,
}

impl DescriptionIndex {
    pub fn new(document: DescriptionDocument) -> Self {
        let mut parents = HashMap::new();
        let mut widgets = HashMap::new();

        for (v, view) in document.views.iter().enumerate() {
            let root = ViewRoot {
                id: view.id.clone(),
                domain_namespaces: view.domain_namespaces.clone(),
            };
            for (g, group) in view.groups.iter().enumerate() {
                parents.insert(group.id.clone(), Container::View(root.clone()));
                for (w, widget) in group.widgets.iter().enumerate() {
                    parents.insert(widget.id.clone(), Container::Element(group.id.clone()));
                    widgets.insert(widget.id.clone(), (v, g, w));
                }
            }
        }

        Self {
            document,
            parents,
            widgets,
        }
    }

    pub fn document(&self) -> &DescriptionDocument {
        &self.document
    }

    pub fn widget(&self, id: &str) -> Option<&WidgetDescription> {
        let (v, g, w) = *self.widgets.get(id)?;
        self.document
            .views
            .get(v)?
            .groups
            .get(g)?
            .widgets
            .get(w)
    }

    /// Number of widgets
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl DescriptionContainment for DescriptionIndex {
    fn parent_of(&self, element_id: &str) -> Option<Container> {
        self.parents.get(element_id).cloned()
    }
}
