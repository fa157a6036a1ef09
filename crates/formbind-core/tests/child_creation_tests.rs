#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{library_registry, FakeObjects};
use formbind_core::child_types::{decode_key, encode_key, ChildTypeResolver};
use formbind_core::registry::parse_qualified_type_name;
use formbind_core::services::DomainTypeRegistry;
use formbind_core::{SubtypeScope, TypeDefinition, TypeRegistry};
use proptest::prelude::*;

fn resolver(scope: SubtypeScope) -> ChildTypeResolver {
    ChildTypeResolver::new(
        Arc::new(library_registry()),
        Arc::new(FakeObjects::new()),
        scope,
    )
}

fn labels(resolver: &ChildTypeResolver, kind: &str, reference_kind: &str) -> Vec<String> {
    resolver
        .child_creation_descriptions(kind, reference_kind)
        .into_iter()
        .map(|d| d.label)
        .collect()
}

#[test]
fn test_concrete_subtypes_under_matching_relation() {
    let resolver = resolver(SubtypeScope::DefiningNamespace);

    let descriptions = resolver.child_creation_descriptions("library::Library", "library::Book");

    let keys: Vec<&str> = descriptions.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(keys, vec!["books::Comic", "books::Novel"]);
    assert_eq!(descriptions[0].label, "Comic (in books)");
    assert_eq!(descriptions[0].icon_paths, vec!["icons/Comic.svg"]);
}

#[test]
fn test_inherited_relations_are_enumerated_and_sorted_by_label() {
    let resolver = resolver(SubtypeScope::DefiningNamespace);

    assert_eq!(
        labels(&resolver, "library::Branch", "library.Book"),
        vec![
            "Comic (in archive)",
            "Comic (in books)",
            "Novel (in archive)",
            "Novel (in books)",
        ]
    );
}

#[test]
fn test_abstract_and_interface_types_are_never_offered() {
    let registry = library_registry();
    let resolver = resolver(SubtypeScope::Registry);

    for reference_kind in ["library::NamedElement", "library::Book", "library::Readable"] {
        for description in resolver.child_creation_descriptions("library::Branch", reference_kind) {
            let (_, type_name) = decode_key(&description.key).unwrap();
            let (namespace, name) =
                parse_qualified_type_name(type_name).unwrap_or(("library", type_name));
            let ty = registry.find(namespace, name).unwrap();
            assert!(ty.is_instantiable(), "{} offered", ty.qualified_name());
        }
    }
}

#[test]
fn test_interface_reference_offers_implementations_only() {
    let resolver = resolver(SubtypeScope::DefiningNamespace);

    assert_eq!(
        labels(&resolver, "library::Library", "library::Readable"),
        vec!["Magazine (in periodicals)"]
    );
}

#[test]
fn test_non_containment_relations_are_ignored() {
    let resolver = resolver(SubtypeScope::DefiningNamespace);

    let descriptions = resolver.child_creation_descriptions("library::Library", "library::Book");
    assert!(descriptions.iter().all(|d| !d.key.starts_with("highlights")));
}

#[test]
fn test_registry_scope_reaches_other_namespaces() {
    let defining = resolver(SubtypeScope::DefiningNamespace);
    let registry = resolver(SubtypeScope::Registry);

    let narrow = defining.child_creation_descriptions("library::Library", "library::Book");
    let wide = registry.child_creation_descriptions("library::Library", "library::Book");

    assert_eq!(narrow.len(), 2);
    assert_eq!(wide.len(), 3);
    let ebook = wide.iter().find(|d| d.label == "store::EBook (in books)").unwrap();
    assert_eq!(ebook.key, "books::store::EBook");
    assert_eq!(decode_key(&ebook.key), Some(("books", "store::EBook")));
}

#[test]
fn test_same_simple_name_across_namespaces_is_qualified_and_ordered() {
    let registry = TypeRegistry::with_types([
        TypeDefinition::new("library", "Book").abstract_type(),
        TypeDefinition::new("library", "Library").containment("books", "library::Book", true),
        TypeDefinition::new("library", "Novel").supertype("library::Book"),
        TypeDefinition::new("press", "Novel").supertype("library::Book"),
        TypeDefinition::new("store", "Novel").supertype("library::Book"),
    ])
    .unwrap();
    let resolver = ChildTypeResolver::new(
        Arc::new(registry),
        Arc::new(FakeObjects::new()),
        SubtypeScope::Registry,
    );

    let descriptions = resolver.child_creation_descriptions("library::Library", "library::Book");

    let keys: Vec<&str> = descriptions.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["books::Novel", "books::press::Novel", "books::store::Novel"]
    );
    let labels: HashSet<&str> = descriptions.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels.len(), 3);
    assert!(labels.contains("press::Novel (in books)"));

    let again = resolver.child_creation_descriptions("library::Library", "library::Book");
    assert_eq!(again, descriptions);
}

#[test]
fn test_unresolved_types_yield_nothing() {
    let resolver = resolver(SubtypeScope::DefiningNamespace);

    assert!(resolver
        .child_creation_descriptions("library::Dragon", "library::Book")
        .is_empty());
    assert!(resolver
        .child_creation_descriptions("library::Library", "Book")
        .is_empty());
    assert!(resolver.child_creation_descriptions("", "").is_empty());
}

#[test]
fn test_root_object_creation_always_declines() {
    let resolver = resolver(SubtypeScope::Registry);
    let namespaces = vec!["library".to_string()];

    assert!(resolver.root_object_creation_descriptions(&namespaces).is_empty());
    assert!(resolver.create_root_object("books::Novel", &namespaces).is_none());
}

#[test]
fn test_keys_are_unique_per_relation_and_type() {
    let resolver = resolver(SubtypeScope::Registry);

    for reference_kind in ["library::NamedElement", "library::Book", "library::Readable"] {
        let descriptions = resolver.child_creation_descriptions("library::Branch", reference_kind);
        let keys: HashSet<&str> = descriptions.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys.len(), descriptions.len());
    }
}

proptest! {
    #[test]
    fn prop_key_decoding_recovers_relation_and_type(
        relation in "[A-Za-z_][A-Za-z0-9_]{0,15}",
        type_name in "[A-Za-z_][A-Za-z0-9_]{0,15}",
    ) {
        let key = encode_key(&relation, &type_name);
        prop_assert_eq!(decode_key(&key), Some((relation.as_str(), type_name.as_str())));
    }

    #[test]
    fn prop_distinct_pairs_give_distinct_keys(
        a in ("[a-z]{1,6}", "[A-Z][a-z]{0,6}"),
        b in ("[a-z]{1,6}", "[A-Z][a-z]{0,6}"),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(encode_key(&a.0, &a.1), encode_key(&b.0, &b.1));
    }
}
