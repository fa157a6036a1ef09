//! Domain types as seen through the type registry

/// A type of the host's metamodel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainType {
    pub namespace: String,
    pub name: String,
    pub is_abstract: bool,
    pub is_interface: bool,
}

impl DomainType {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            is_abstract: false,
            is_interface: false,
        }
    }

    /// `Namespace::Name`
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.namespace, self.name)
    }

    /// Concrete types only; abstract classes and interfaces cannot be created
    pub fn is_instantiable(&self) -> bool {
        !self.is_abstract && !self.is_interface
    }
}

/// A relation declared on a domain type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub name: String,
    pub target: DomainType,
    pub containment: bool,
    pub many: bool,
}
