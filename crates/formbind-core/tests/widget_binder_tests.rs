#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{CountingRunner, FakeObjects, Harness, ScriptedEvaluator};
use formbind_core::binder::{Affordance, WidgetRuntime};
use formbind_core::model::{
    variables, DomainNode, EvaluationContext, Status, Value, WidgetDescription, WidgetKind,
    WidgetKindDescription, WidgetStyle,
};
use formbind_core::services::FeedbackMessages;
use formbind_core::{EngineConfig, WidgetBinder};

fn widget(yaml: &str) -> WidgetDescription {
    serde_yaml::from_str(yaml).unwrap()
}

fn binder(harness: &Harness, objects: FakeObjects) -> WidgetBinder {
    WidgetBinder::new(harness.services(objects), EngineConfig::default())
}

fn node(id: &str) -> Value {
    Value::Node(DomainNode::new(id))
}

fn library_ctx() -> EvaluationContext {
    EvaluationContext::with_self(DomainNode::new("lib"))
}

#[test]
fn test_multi_reference_add_runs_body_once_and_reports_change() {
    let harness = Harness::new(
        ScriptedEvaluator::new().with("self.children", vec![node("b1"), node("b2")]),
        CountingRunner::succeeding(),
    );
    let binder = binder(&harness, FakeObjects::new());
    let description = widget(
        r#"
id: children
name: children
kind: multi-reference
valueExpression: self.children
operations:
  add:
    - op: add
      feature: children
      valueExpression: newValue
"#,
    );

    let WidgetRuntime::MultiReference(runtime) = binder.bind(&description) else {
        panic!("expected a multi-reference runtime");
    };
    let ctx = library_ctx();

    assert_eq!(
        (runtime.reference.items)(&ctx),
        vec![DomainNode::new("b1"), DomainNode::new("b2")]
    );

    let status = runtime.add_values(&ctx, vec![node("b3")]);

    assert_eq!(harness.runner.calls(), 1);
    assert!(status.is_semantic_change());
    let seen = harness.runner.last_context().unwrap();
    assert_eq!(seen.get(variables::NEW_VALUE), Some(&Value::List(vec![node("b3")])));
    assert_eq!(seen.self_value(), Some(&node("lib")));
    assert!(!ctx.contains(variables::NEW_VALUE));
}

#[test]
fn test_containment_many_is_the_declared_value() {
    let harness = Harness::new(ScriptedEvaluator::new(), CountingRunner::succeeding());
    let binder = binder(&harness, FakeObjects::new().with_kind("lib", "library::Library"));

    // `books` is a many-valued relation in the registry
    let single = widget(
        r#"
id: books
name: books
kind: containment-reference
many: false
valueExpression: self.books
typeExpression: "'library::Book'"
"#,
    );
    let WidgetRuntime::ContainmentReference(runtime) = binder.bind(&single) else {
        panic!("expected a containment runtime");
    };
    assert!(!runtime.is_many(&library_ctx()));

    let mut many = single.clone();
    if let WidgetKindDescription::ContainmentReference(c) = &mut many.kind {
        c.many = true;
    }
    let WidgetRuntime::ContainmentReference(runtime) = binder.bind(&many) else {
        panic!("expected a containment runtime");
    };
    assert!(runtime.is_many(&library_ctx()));
}

#[test]
fn test_primitive_list_with_empty_delete_body_is_deletable() {
    let harness = Harness::new(ScriptedEvaluator::new(), CountingRunner::succeeding());
    let binder = binder(&harness, FakeObjects::new());
    let description = widget(
        r#"
id: tags
name: tags
kind: primitive-list
valueExpression: self.tags
operations:
  delete: []
"#,
    );

    let WidgetRuntime::PrimitiveList(runtime) = binder.bind(&description) else {
        panic!("expected a primitive-list runtime");
    };

    assert!(runtime.is_deletable());
    let status = runtime.delete_item(&library_ctx(), Value::from("sf")).unwrap();
    assert_eq!(status, Status::neutral(Vec::new()));
    assert_eq!(harness.runner.calls(), 0);

    assert!(runtime.add_handler.is_none());
    assert!(runtime.add_value(&library_ctx(), Value::from("x")).is_none());
    assert!(runtime.item_action.is_none());
}

#[test]
fn test_absent_or_empty_slots_never_reach_the_runner() {
    let harness = Harness::new(ScriptedEvaluator::new(), CountingRunner::succeeding());
    let binder = binder(&harness, FakeObjects::new());
    let ctx = library_ctx();

    let mono = widget(
        r#"
id: favourite
name: favourite
kind: mono-reference
operations:
  unset: []
"#,
    );
    let WidgetRuntime::MonoReference(runtime) = binder.bind(&mono) else {
        panic!("expected a mono-reference runtime");
    };
    assert!(runtime.set_value(&ctx, node("b1")).is_success());
    assert!(runtime.unset_value(&ctx, node("b1")).is_success());
    assert!(runtime.clear_value(&ctx).is_success());
    assert!(!runtime.create_element(&ctx, "books::Novel").is_semantic_change());

    let multi = widget(
        r#"
id: shelf
name: shelf
kind: multi-reference
operations:
  add: []
"#,
    );
    let WidgetRuntime::MultiReference(runtime) = binder.bind(&multi) else {
        panic!("expected a multi-reference runtime");
    };
    assert!(!runtime.add_values(&ctx, vec![node("b1")]).is_semantic_change());
    assert!(!runtime.remove_value(&ctx, node("b1")).is_semantic_change());
    assert!(!runtime.reorder(&ctx, node("b1"), 0, 1).is_semantic_change());

    assert_eq!(harness.runner.calls(), 0);
}

#[test]
fn test_failure_status_carries_fixed_message_and_feedback() {
    let harness = Harness::reporting(ScriptedEvaluator::new(), false);
    let binder = binder(&harness, FakeObjects::new());
    let description = widget(
        r#"
id: shelf
name: shelf
kind: multi-reference
operations:
  remove:
    - op: remove
      feature: books
      elementExpression: item
  clear:
    - op: clear
      feature: books
"#,
    );
    let WidgetRuntime::MultiReference(runtime) = binder.bind(&description) else {
        panic!("expected a multi-reference runtime");
    };

    match runtime.remove_value(&library_ctx(), node("b1")) {
        Status::Failure { message, messages } => {
            assert_eq!(message, Affordance::Remove.failure_message());
            assert_eq!(message, "Something went wrong while updating the list of values.");
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].body, "body ran");
        }
        other => panic!("unexpected status {:?}", other),
    }

    match runtime.clear_values(&library_ctx()) {
        Status::Failure { message, .. } => {
            assert_eq!(message, "Something went wrong while clearing the reference.")
        }
        other => panic!("unexpected status {:?}", other),
    }
}

#[test]
fn test_success_status_carries_feedback() {
    let harness = Harness::reporting(ScriptedEvaluator::new(), true);
    let binder = binder(&harness, FakeObjects::new());
    let description = widget(
        r#"
id: favourite
name: favourite
kind: mono-reference
operations:
  set:
    - op: set
      feature: favourite
      valueExpression: newValue
"#,
    );
    let WidgetRuntime::MonoReference(runtime) = binder.bind(&description) else {
        panic!("expected a mono-reference runtime");
    };

    let status = runtime.set_value(&library_ctx(), node("b1"));

    assert!(status.is_semantic_change());
    assert_eq!(status.messages().len(), 1);
    assert!(harness.feedback.take().is_empty());
}

#[test]
fn test_create_element_binds_key_parts_and_owner() {
    let harness = Harness::new(
        ScriptedEvaluator::new().with("self.library", node("lib")),
        CountingRunner::succeeding(),
    );
    let binder = binder(&harness, FakeObjects::new());
    let description = widget(
        r#"
id: books
name: books
kind: containment-reference
ownerExpression: self.library
operations:
  createElement:
    - op: create
      typeName: typeName
      referenceName: containmentReference
"#,
    );
    let WidgetRuntime::ContainmentReference(runtime) = binder.bind(&description) else {
        panic!("expected a containment runtime");
    };
    let ctx = EvaluationContext::with_self(DomainNode::new("member"));

    let status = runtime.create_element(&ctx, "books::Novel");

    assert!(status.is_semantic_change());
    let seen = harness.runner.last_context().unwrap();
    assert_eq!(seen.get(variables::CONTAINMENT_REFERENCE), Some(&Value::from("books")));
    assert_eq!(seen.get(variables::TYPE_NAME), Some(&Value::from("Novel")));
    assert_eq!(seen.self_value(), Some(&node("lib")));

    let status = runtime.create_element(&ctx, "garbage");
    assert_eq!(
        status,
        Status::failure("Something went wrong while creating the element.", Vec::new())
    );
    assert_eq!(harness.runner.calls(), 1);
}

#[test]
fn test_containment_click_and_reorder_only_when_declared() {
    let harness = Harness::new(ScriptedEvaluator::new(), CountingRunner::succeeding());
    let binder = binder(&harness, FakeObjects::new());

    let bare = widget(
        r#"
id: books
name: books
kind: containment-reference
"#,
    );
    let WidgetRuntime::ContainmentReference(runtime) = binder.bind(&bare) else {
        panic!("expected a containment runtime");
    };
    assert!(runtime.click(&library_ctx(), node("b1")).is_none());
    assert!(runtime.reorder(&library_ctx(), node("b1"), 0, 1).is_none());

    let clickable = widget(
        r#"
id: books
name: books
kind: containment-reference
operations:
  click:
    - op: custom
      name: open
"#,
    );
    let WidgetRuntime::ContainmentReference(runtime) = binder.bind(&clickable) else {
        panic!("expected a containment runtime");
    };
    let status = runtime.click(&library_ctx(), node("b1")).unwrap();
    assert!(status.is_semantic_change());
    let seen = harness.runner.last_context().unwrap();
    assert_eq!(seen.get(variables::CLICKED_ELEMENT), Some(&node("b1")));
    assert!(runtime.reorder_handler.is_none());
}

#[test]
fn test_common_providers() {
    let harness = Harness::new(
        ScriptedEvaluator::new()
            .with("'Books'", "Books")
            .with("'Pick books'", "Pick books")
            .with("self.locked", true)
            .with("self.readonly", false),
        CountingRunner::succeeding(),
    );
    let binder = binder(&harness, FakeObjects::new());
    let description = widget(
        r#"
id: books
name: books
kind: language-expression
labelExpression: "'Books'"
helpExpression: "'Pick books'"
isEnabledExpression: self.readonly
style:
  bold: true
conditionalStyles:
  - condition: self.locked
    style:
      italic: true
"#,
    );

    let runtime = binder.bind(&description);
    assert_eq!(runtime.kind(), WidgetKind::LanguageExpression);
    let common = runtime.common();
    let ctx = library_ctx();

    assert_eq!((common.id)(&ctx), "books:id-lib");
    assert_eq!((common.id)(&EvaluationContext::new()), "books");
    assert_eq!((common.label)(&ctx), "Books");
    assert_eq!((common.help.as_ref().unwrap())(&ctx), "Pick books");
    assert!(!(common.is_enabled)(&ctx));
    assert_eq!(
        (common.style)(&ctx),
        Some(WidgetStyle {
            italic: true,
            ..WidgetStyle::default()
        })
    );
}

#[test]
fn test_blank_help_is_not_wired_and_enablement_defaults_to_true() {
    let harness = Harness::new(ScriptedEvaluator::new(), CountingRunner::succeeding());
    let binder = binder(&harness, FakeObjects::new());
    let description = widget(
        r#"
id: notes
name: notes
kind: language-expression
helpExpression: "  "
isEnabledExpression: self.unknown
style:
  bold: true
"#,
    );

    let runtime = binder.bind(&description);
    let common = runtime.common();
    let ctx = library_ctx();

    assert!(common.help.is_none());
    assert!((common.is_enabled)(&ctx));
    assert_eq!((common.label)(&ctx), "");
    assert_eq!(
        (common.style)(&ctx),
        Some(WidgetStyle {
            bold: true,
            ..WidgetStyle::default()
        })
    );
}

#[test]
fn test_reference_providers() {
    let harness = Harness::new(
        ScriptedEvaluator::new()
            .with("'library.Book'", "library.Book")
            .with("self.library", node("lib"))
            .with("self.library.books", vec![node("b1"), node("b2")]),
        CountingRunner::succeeding(),
    );
    let binder = binder(
        &harness,
        FakeObjects::new().with_kind("lib", "library::Library"),
    );
    let description = widget(
        r#"
id: favourite
name: favourite
kind: mono-reference
ownerExpression: self.library
typeExpression: "'library.Book'"
candidatesSearchScopeExpression: self.library.books
"#,
    );

    let WidgetRuntime::MonoReference(runtime) = binder.bind(&description) else {
        panic!("expected a mono-reference runtime");
    };
    let reference = &runtime.reference;
    let ctx = EvaluationContext::with_self(DomainNode::new("member"));

    assert_eq!((reference.owner)(&ctx), Some(DomainNode::new("lib")));
    assert_eq!((reference.reference_kind)(&ctx), "library::Book");
    assert_eq!(
        (reference.candidates)(&ctx),
        vec![DomainNode::new("b1"), DomainNode::new("b2")]
    );
    let labels: Vec<String> = (reference.child_creation)(&ctx)
        .into_iter()
        .map(|d| d.label)
        .collect();
    assert_eq!(labels, vec!["Comic (in books)", "Novel (in books)"]);

    let item_ctx = ctx.clone().with(variables::ITEM, DomainNode::new("b1"));
    assert_eq!((reference.item.id)(&item_ctx), "id-b1");
    assert_eq!((reference.item.label)(&item_ctx), "Label b1");
    assert_eq!((reference.item.icon_paths)(&item_ctx), vec!["icons/b1.svg"]);
    assert_eq!((reference.item.kind)(&ctx), "");
}

#[test]
fn test_owner_defaults_to_self_and_bad_type_is_empty() {
    let harness = Harness::new(
        ScriptedEvaluator::new()
            .with("'Book'", "Book")
            .with("'a::b::c'", "a::b::c"),
        CountingRunner::succeeding(),
    );
    let binder = binder(&harness, FakeObjects::new());

    for type_expression in ["'Book'", "'a::b::c'", "missing"] {
        let mut description = widget(
            r#"
id: shelf
name: shelf
kind: multi-reference
"#,
        );
        if let WidgetKindDescription::MultiReference(r) = &mut description.kind {
            r.type_expression = Some(type_expression.to_string());
        }
        let WidgetRuntime::MultiReference(runtime) = binder.bind(&description) else {
            panic!("expected a multi-reference runtime");
        };
        let ctx = library_ctx();

        assert_eq!((runtime.reference.owner)(&ctx), Some(DomainNode::new("lib")));
        assert_eq!((runtime.reference.reference_kind)(&ctx), "");
        assert!((runtime.reference.child_creation)(&ctx).is_empty());
        assert!((runtime.reference.candidates)(&ctx).is_empty());
    }
}

#[test]
fn test_primitive_list_item_action() {
    let harness = Harness::new(
        ScriptedEvaluator::new()
            .with("self.tags", vec![Value::from("sf"), Value::from("classic")])
            .with("'icons/tag.svg'", "icons/tag.svg")
            .with("self.options", vec![Value::from("sf"), Value::from("crime")]),
        CountingRunner::succeeding(),
    );
    let binder = binder(&harness, FakeObjects::new());
    let description = widget(
        r#"
id: tags
name: tags
kind: primitive-list
valueExpression: self.tags
dropdownOptionsExpression: self.options
operations:
  itemAction:
    iconUrlExpression: "'icons/tag.svg'"
    body:
      - op: custom
        name: highlight
"#,
    );

    let WidgetRuntime::PrimitiveList(runtime) = binder.bind(&description) else {
        panic!("expected a primitive-list runtime");
    };
    let ctx = library_ctx();

    assert_eq!(
        (runtime.items)(&ctx),
        vec![Value::from("sf"), Value::from("classic")]
    );
    assert_eq!((runtime.options)(&ctx).len(), 2);
    assert!(!runtime.is_deletable());

    let item_ctx = ctx.clone().with(variables::ITEM, "sf");
    assert_eq!((runtime.item.label)(&item_ctx), "sf");

    let action = runtime.item_action.as_ref().unwrap();
    assert_eq!((action.icon_url)(&item_ctx), "icons/tag.svg");
    assert!((action.precondition)(&item_ctx));

    let status = runtime.run_item_action(&ctx, Value::from("sf")).unwrap();
    assert!(status.is_semantic_change());
    let seen = harness.runner.last_context().unwrap();
    assert_eq!(seen.get(variables::ITEM), Some(&Value::from("sf")));
}

#[test]
fn test_primitive_radio_candidates_and_select() {
    let harness = Harness::new(
        ScriptedEvaluator::new()
            .with("self.formats", vec![Value::from("paperback"), node("hardcover")])
            .with("self.format", "paperback"),
        CountingRunner::succeeding(),
    );
    let binder = binder(&harness, FakeObjects::new());
    let description = widget(
        r#"
id: format
name: format
kind: primitive-radio
valueExpression: self.format
candidatesExpression: self.formats
operations:
  set:
    - op: set
      feature: format
      valueExpression: newValue
"#,
    );

    let WidgetRuntime::PrimitiveRadio(runtime) = binder.bind(&description) else {
        panic!("expected a primitive-radio runtime");
    };
    let ctx = library_ctx();

    assert_eq!((runtime.candidates)(&ctx), vec!["paperback", "Label hardcover"]);
    assert_eq!((runtime.value)(&ctx), "paperback");

    let status = runtime.select(&ctx, "hardcover");
    assert!(status.is_semantic_change());
    let seen = harness.runner.last_context().unwrap();
    assert_eq!(seen.get(variables::NEW_VALUE), Some(&Value::from("hardcover")));
}

#[test]
fn test_binder_capability_check() {
    let harness = Harness::new(ScriptedEvaluator::new(), CountingRunner::succeeding());
    let binder = binder(&harness, FakeObjects::new());

    assert!(binder.can_handle("view:multi-reference:shelf"));
    assert!(!binder.can_handle("diagram:multi-reference:shelf"));
    assert!(!binder.can_handle("view:tree:shelf"));
}

#[test]
fn test_binder_resolvers_share_its_services() {
    let harness = Harness::new(
        ScriptedEvaluator::new().with("self.library.books", vec![node("b1")]),
        CountingRunner::succeeding(),
    );
    let binder = binder(&harness, FakeObjects::new());
    let namespaces = vec!["library".to_string()];

    let child_types = binder.child_type_resolver();
    let keys: Vec<String> = child_types
        .child_creation_descriptions("library::Library", "library::Book")
        .into_iter()
        .map(|d| d.key)
        .collect();
    assert_eq!(keys, vec!["books::Comic", "books::Novel"]);
    assert!(child_types.root_object_creation_descriptions(&namespaces).is_empty());
    assert!(child_types.create_root_object("books::Novel", &namespaces).is_none());

    let candidates = binder.candidate_resolver();
    assert!(candidates
        .find_candidates(&DomainNode::new("member"), Some("  "), "favourite")
        .is_empty());
    assert_eq!(harness.evaluator.calls(), 0);
    assert_eq!(
        candidates.find_candidates(
            &DomainNode::new("member"),
            Some("self.library.books"),
            "favourite"
        ),
        vec![DomainNode::new("b1")]
    );
    assert_eq!(harness.factory.views()[0].domain_namespaces, vec!["library"]);
}
