//! In-memory domain type registry
//!
//! Explicitly constructed and passed in; there is no process-wide instance.
//! Types keep their registration order, which is the stable enumeration
//! order seen by the child type resolver.

use std::collections::{HashMap, HashSet};

use crate::errors::{FormBindError, Result};
use crate::model::{DomainNode, DomainType, Relation};
use crate::services::DomainTypeRegistry;

/// Split `"Ns::Type"` or `"Ns.Type"` into exactly two non-empty tokens
pub fn parse_qualified_type_name(qualified: &str) -> Option<(&str, &str)> {
    let qualified = qualified.trim();
    let (namespace, name) = if qualified.contains("::") {
        let mut parts = qualified.split("::");
        let namespace = parts.next()?;
        let name = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        (namespace, name)
    } else {
        let mut parts = qualified.split('.');
        let namespace = parts.next()?;
        let name = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        (namespace, name)
    };

    if namespace.is_empty() || name.is_empty() {
        None
    } else {
        Some((namespace, name))
    }
}

/// Parse and resolve a qualified type name against `registry`
///
/// # Errors
///
/// Returns `UnresolvedType` if the name is malformed or unknown.
pub fn resolve_type(registry: &dyn DomainTypeRegistry, qualified: &str) -> Result<DomainType> {
    parse_qualified_type_name(qualified)
        .and_then(|(namespace, name)| registry.find(namespace, name))
        .ok_or_else(|| FormBindError::UnresolvedType {
            qualified_name: qualified.to_string(),
        })
}

/// Declaration of one type, built fluently before registration
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    ty: DomainType,
    supertypes: Vec<String>,
    relations: Vec<RelationDefinition>,
}

#[derive(Debug, Clone)]
struct RelationDefinition {
    name: String,
    target: String,
    containment: bool,
    many: bool,
}

impl TypeDefinition {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: DomainType::new(namespace, name),
            supertypes: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn abstract_type(mut self) -> Self {
        self.ty.is_abstract = true;
        self
    }

    pub fn interface(mut self) -> Self {
        self.ty.is_interface = true;
        self
    }

    /// Direct supertype, as a qualified name
    pub fn supertype(mut self, qualified: impl Into<String>) -> Self {
        self.supertypes.push(qualified.into());
        self
    }

    /// Containment relation towards the qualified `target` type
    pub fn containment(mut self, name: impl Into<String>, target: impl Into<String>, many: bool) -> Self {
        self.relations.push(RelationDefinition {
            name: name.into(),
            target: target.into(),
            containment: true,
            many,
        });
        self
    }

    /// Non-containment reference towards the qualified `target` type
    pub fn reference(mut self, name: impl Into<String>, target: impl Into<String>, many: bool) -> Self {
        self.relations.push(RelationDefinition {
            name: name.into(),
            target: target.into(),
            containment: false,
            many,
        });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    definitions: Vec<TypeDefinition>,
    by_name: HashMap<(String, String), usize>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one type
    ///
    /// # Errors
    ///
    /// Returns `InvalidDescription` if a type with the same qualified name
    /// is already registered.
    pub fn register(&mut self, definition: TypeDefinition) -> Result<()> {
        let key = (
            definition.ty.namespace.clone(),
            definition.ty.name.clone(),
        );
        if self.by_name.contains_key(&key) {
            return Err(FormBindError::InvalidDescription {
                element_id: definition.ty.qualified_name(),
                reason: "type registered twice".to_string(),
            });
        }
        self.by_name.insert(key, self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the first registration error.
    pub fn with_types(definitions: impl IntoIterator<Item = TypeDefinition>) -> Result<Self> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    fn definition(&self, namespace: &str, name: &str) -> Option<&TypeDefinition> {
        self.by_name
            .get(&(namespace.to_string(), name.to_string()))
            .and_then(|index| self.definitions.get(*index))
    }

    fn definition_by_qualified(&self, qualified: &str) -> Option<&TypeDefinition> {
        parse_qualified_type_name(qualified)
            .and_then(|(namespace, name)| self.definition(namespace, name))
    }

    /// `ty` followed by all of its ancestors, nearest first; cycles are cut
    fn lineage(&self, ty: &DomainType) -> Vec<&TypeDefinition> {
        let mut seen = HashSet::new();
        let mut lineage = Vec::new();
        let mut pending: Vec<&TypeDefinition> =
            self.definition(&ty.namespace, &ty.name).into_iter().collect();

        while let Some(definition) = pending.pop() {
            if !seen.insert(definition.ty.qualified_name()) {
                continue;
            }
            lineage.push(definition);
            for supertype in definition.supertypes.iter().rev() {
                if let Some(parent) = self.definition_by_qualified(supertype) {
                    pending.push(parent);
                }
            }
        }
        lineage
    }

    fn is_subtype_of(&self, candidate: &DomainType, ancestor: &DomainType) -> bool {
        self.lineage(candidate)
            .iter()
            .any(|definition| definition.ty == *ancestor)
    }
}

impl DomainTypeRegistry for TypeRegistry {
    fn find(&self, namespace: &str, name: &str) -> Option<DomainType> {
        self.definition(namespace, name)
            .map(|definition| definition.ty.clone())
    }

    fn subtypes(&self, ty: &DomainType, namespace: Option<&str>) -> Vec<DomainType> {
        self.definitions
            .iter()
            .map(|definition| &definition.ty)
            .filter(|candidate| namespace.map_or(true, |ns| candidate.namespace == ns))
            .filter(|candidate| self.is_subtype_of(candidate, ty))
            .cloned()
            .collect()
    }

    fn containment_relations(&self, ty: &DomainType) -> Vec<Relation> {
        let mut relations = Vec::new();
        for definition in self.lineage(ty) {
            for relation in definition.relations.iter().filter(|r| r.containment) {
                // Relations towards unregistered types cannot hold any instance
                if let Some(target) = self.definition_by_qualified(&relation.target) {
                    relations.push(Relation {
                        name: relation.name.clone(),
                        target: target.ty.clone(),
                        containment: true,
                        many: relation.many,
                    });
                }
            }
        }
        relations
    }

    fn is_assignable(&self, target: &DomainType, candidate: &DomainType) -> bool {
        self.is_subtype_of(candidate, target)
    }

    fn create_transient(&self, ty: &DomainType) -> Option<DomainNode> {
        self.definition(&ty.namespace, &ty.name)
            .map(|definition| DomainNode::new(format!("transient:{}", definition.ty.qualified_name())))
    }
}
