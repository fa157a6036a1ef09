//! Child creation descriptors for reference and containment editing
//!
//! Enumerates every (containment relation, instantiable subtype) pair under
//! which a new element can be created, encoded as one reversible key.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use crate::config::SubtypeScope;
use crate::model::{DomainNode, DomainType};
use crate::registry::resolve_type;
use crate::services::{DomainTypeRegistry, ObjectService};
use crate::{log_op_end, log_op_start};

/// Separator between the relation name and the type name of a key
pub const KEY_SEPARATOR: &str = "::";

/// One place where a new element can be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildCreationDescription {
    pub key: String,
    pub label: String,
    pub icon_paths: Vec<String>,
}

pub fn encode_key(relation: &str, type_name: &str) -> String {
    format!("{relation}{KEY_SEPARATOR}{type_name}")
}

/// Split a key at the first separator into `(relation, type name)`
pub fn decode_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(KEY_SEPARATOR)
        .filter(|(relation, type_name)| !relation.is_empty() && !type_name.is_empty())
}

pub struct ChildTypeResolver {
    registry: Arc<dyn DomainTypeRegistry>,
    objects: Arc<dyn ObjectService>,
    scope: SubtypeScope,
}

impl ChildTypeResolver {
    pub fn new(
        registry: Arc<dyn DomainTypeRegistry>,
        objects: Arc<dyn ObjectService>,
        scope: SubtypeScope,
    ) -> Self {
        Self {
            registry,
            objects,
            scope,
        }
    }

    /// Creation descriptors for elements of `reference_kind` under a
    /// `kind` container, sorted by label
    ///
    /// Unresolvable type names yield an empty list.
    pub fn child_creation_descriptions(
        &self,
        kind: &str,
        reference_kind: &str,
    ) -> Vec<ChildCreationDescription> {
        let start = Instant::now();
        log_op_start!("child_creation_descriptions", kind = kind, reference_kind = reference_kind);

        let descriptions = match (
            resolve_type(self.registry.as_ref(), kind),
            resolve_type(self.registry.as_ref(), reference_kind),
        ) {
            (Ok(container), Ok(reference)) => self.enumerate(&container, &reference),
            (container, reference) => {
                for err in [container.err(), reference.err()].into_iter().flatten() {
                    tracing::debug!(error = %err, "child creation skipped");
                }
                Vec::new()
            }
        };

        log_op_end!(
            "child_creation_descriptions",
            duration_ms = start.elapsed().as_millis() as u64,
            candidate_count = descriptions.len()
        );
        descriptions
    }

    fn enumerate(
        &self,
        container: &DomainType,
        reference: &DomainType,
    ) -> Vec<ChildCreationDescription> {
        let namespace = match self.scope {
            SubtypeScope::DefiningNamespace => Some(reference.namespace.as_str()),
            SubtypeScope::Registry => None,
        };
        let subtypes: Vec<DomainType> = self
            .registry
            .subtypes(reference, namespace)
            .into_iter()
            .filter(DomainType::is_instantiable)
            .collect();

        let mut seen = HashSet::new();
        let mut descriptions = Vec::new();
        for relation in self.registry.containment_relations(container) {
            for subtype in &subtypes {
                if !self.registry.is_assignable(&relation.target, subtype) {
                    continue;
                }
                let type_name = self.key_type_name(reference, subtype);
                let key = encode_key(&relation.name, &type_name);
                if !seen.insert(key.clone()) {
                    continue;
                }
                descriptions.push(ChildCreationDescription {
                    key,
                    label: format!("{} (in {})", type_name, relation.name),
                    icon_paths: self.icon_paths(subtype),
                });
            }
        }

        sort_by_label(&mut descriptions);
        descriptions
    }

    /// Simple name inside the reference namespace, qualified outside of it
    ///
    /// Used for both key and label, so subtypes sharing a simple name stay
    /// distinguishable.
    fn key_type_name(&self, reference: &DomainType, subtype: &DomainType) -> String {
        if subtype.namespace == reference.namespace {
            subtype.name.clone()
        } else {
            subtype.qualified_name()
        }
    }

    fn icon_paths(&self, ty: &DomainType) -> Vec<String> {
        self.registry
            .create_transient(ty)
            .map(|instance| self.objects.icon_paths(&instance))
            .unwrap_or_default()
    }

    /// Root-level creation is never offered
    pub fn root_object_creation_descriptions(
        &self,
        domain_namespaces: &[String],
    ) -> Vec<ChildCreationDescription> {
        tracing::debug!(
            namespaces = domain_namespaces.len(),
            "root object creation is not supported"
        );
        Vec::new()
    }

    /// Root-level creation is always declined
    pub fn create_root_object(&self, key: &str, domain_namespaces: &[String]) -> Option<DomainNode> {
        tracing::debug!(
            key = key,
            namespaces = domain_namespaces.len(),
            "root object creation declined"
        );
        None
    }
}

/// Stable sort: equal labels keep enumeration order
fn sort_by_label(descriptions: &mut [ChildCreationDescription]) {
    descriptions.sort_by(|a, b| a.label.cmp(&b.label));
}
