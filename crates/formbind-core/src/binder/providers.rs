//! Context-driven providers wired by the binder
//!
//! A provider is a closure over the injected collaborators, re-evaluated by
//! the host every time it renders with a fresh evaluation context.

use std::sync::Arc;

use super::BinderServices;
use crate::candidate_resolver::ReferenceCandidateResolver;
use crate::child_types::{ChildCreationDescription, ChildTypeResolver};
use crate::evaluation::{is_blank, EvaluatorExt};
use crate::model::{
    variables, ConditionalStyle, DomainNode, EvaluationContext, Value, WidgetDescription,
    WidgetStyle,
};
use crate::registry::resolve_type;
use crate::style_resolver;

pub type Provider<T> = Arc<dyn Fn(&EvaluationContext) -> T + Send + Sync>;

/// Providers every widget kind carries
#[derive(Clone)]
pub struct CommonProviders {
    pub id: Provider<String>,
    pub label: Provider<String>,
    /// Wired only when the help expression is present and non-blank
    pub help: Option<Provider<String>>,
    pub is_enabled: Provider<bool>,
    pub style: Provider<Option<WidgetStyle>>,
}

/// Metadata of whatever is bound to `item`
#[derive(Clone)]
pub struct ItemProviders {
    pub id: Provider<String>,
    pub kind: Provider<String>,
    pub label: Provider<String>,
    pub icon_paths: Provider<Vec<String>>,
}

/// Providers shared by the reference widget kinds
#[derive(Clone)]
pub struct ReferenceProviders {
    pub items: Provider<Vec<DomainNode>>,
    pub item: ItemProviders,
    pub owner: Provider<Option<DomainNode>>,
    /// Qualified name of the referenced type, or empty when unresolvable
    pub reference_kind: Provider<String>,
    pub candidates: Provider<Vec<DomainNode>>,
    pub child_creation: Provider<Vec<ChildCreationDescription>>,
}

/// Expressions behind [`ReferenceProviders`]
pub(crate) struct ReferenceExpressions<'a> {
    pub value: Option<&'a str>,
    pub owner: Option<&'a str>,
    pub type_name: Option<&'a str>,
    pub search_scope: Option<&'a str>,
}

fn owned(expression: Option<&str>) -> Option<String> {
    expression.map(str::to_string)
}

pub(crate) fn string_provider(services: &BinderServices, expression: Option<&str>) -> Provider<String> {
    let evaluator = Arc::clone(&services.evaluator);
    let expression = owned(expression);
    Arc::new(move |ctx: &EvaluationContext| evaluator.string_or_empty(ctx, expression.as_deref()))
}

/// Blank or failed evaluation yields `default`
pub(crate) fn boolean_provider(
    services: &BinderServices,
    expression: Option<&str>,
    default: bool,
) -> Provider<bool> {
    let evaluator = Arc::clone(&services.evaluator);
    let expression = owned(expression);
    Arc::new(move |ctx: &EvaluationContext| evaluator.boolean_or(ctx, expression.as_deref(), default))
}

pub(crate) fn objects_provider(
    services: &BinderServices,
    expression: Option<&str>,
) -> Provider<Vec<DomainNode>> {
    let evaluator = Arc::clone(&services.evaluator);
    let expression = owned(expression);
    Arc::new(move |ctx: &EvaluationContext| evaluator.objects(ctx, expression.as_deref()))
}

pub(crate) fn values_provider(services: &BinderServices, expression: Option<&str>) -> Provider<Vec<Value>> {
    let evaluator = Arc::clone(&services.evaluator);
    let expression = owned(expression);
    Arc::new(move |ctx: &EvaluationContext| evaluator.values(ctx, expression.as_deref()))
}

pub(crate) fn common_providers(
    services: &BinderServices,
    description: &WidgetDescription,
) -> CommonProviders {
    let id = {
        let objects = Arc::clone(&services.objects);
        let description_id = description.id.clone();
        Arc::new(move |ctx: &EvaluationContext| {
            match ctx.self_value().and_then(Value::as_node) {
                Some(node) => format!("{}:{}", description_id, objects.id(node)),
                None => description_id.clone(),
            }
        }) as Provider<String>
    };

    let help = if is_blank(description.help_expression.as_deref()) {
        None
    } else {
        Some(string_provider(services, description.help_expression.as_deref()))
    };

    let style = {
        let evaluator = Arc::clone(&services.evaluator);
        let conditional: Arc<[ConditionalStyle]> = description.conditional_styles.clone().into();
        let default_style = description.style.clone();
        Arc::new(move |ctx: &EvaluationContext| {
            style_resolver::resolve(evaluator.as_ref(), ctx, &conditional, default_style.as_ref())
        }) as Provider<Option<WidgetStyle>>
    };

    CommonProviders {
        id,
        label: string_provider(services, description.label_expression.as_deref()),
        help,
        is_enabled: boolean_provider(services, description.is_enabled_expression.as_deref(), true),
        style,
    }
}

fn bound_item(ctx: &EvaluationContext) -> Option<&Value> {
    ctx.get(variables::ITEM)
}

/// Nodes go through the object service; scalars render as themselves
pub(crate) fn item_providers(services: &BinderServices) -> ItemProviders {
    let objects = Arc::clone(&services.objects);
    let id = Arc::new(move |ctx: &EvaluationContext| match bound_item(ctx) {
        Some(Value::Node(node)) => objects.id(node),
        Some(other) => other.to_scalar_string().unwrap_or_default(),
        None => String::new(),
    }) as Provider<String>;

    let objects = Arc::clone(&services.objects);
    let kind = Arc::new(move |ctx: &EvaluationContext| match bound_item(ctx) {
        Some(Value::Node(node)) => objects.kind(node),
        _ => String::new(),
    }) as Provider<String>;

    let objects = Arc::clone(&services.objects);
    let label = Arc::new(move |ctx: &EvaluationContext| match bound_item(ctx) {
        Some(Value::Node(node)) => objects.label(node),
        Some(other) => other.to_scalar_string().unwrap_or_default(),
        None => String::new(),
    }) as Provider<String>;

    let objects = Arc::clone(&services.objects);
    let icon_paths = Arc::new(move |ctx: &EvaluationContext| match bound_item(ctx) {
        Some(Value::Node(node)) => objects.icon_paths(node),
        _ => Vec::new(),
    }) as Provider<Vec<String>>;

    ItemProviders {
        id,
        kind,
        label,
        icon_paths,
    }
}

/// `ownerExpression` when present, else the bound `self`
pub(crate) fn owner_provider(
    services: &BinderServices,
    owner_expression: Option<&str>,
) -> Provider<Option<DomainNode>> {
    let evaluator = Arc::clone(&services.evaluator);
    let expression = owned(owner_expression);
    Arc::new(move |ctx: &EvaluationContext| {
        if is_blank(expression.as_deref()) {
            ctx.self_value().and_then(Value::as_node).cloned()
        } else {
            evaluator.evaluate_opt(ctx, expression.as_deref()).as_object()
        }
    })
}

/// Qualified name of the type named by `typeExpression`; empty on any failure
pub(crate) fn reference_kind_provider(
    services: &BinderServices,
    type_expression: Option<&str>,
) -> Provider<String> {
    let evaluator = Arc::clone(&services.evaluator);
    let registry = Arc::clone(&services.registry);
    let expression = owned(type_expression);
    Arc::new(move |ctx: &EvaluationContext| {
        let Some(type_name) = evaluator.evaluate_opt(ctx, expression.as_deref()).as_string() else {
            return String::new();
        };
        match resolve_type(registry.as_ref(), &type_name) {
            Ok(ty) => ty.qualified_name(),
            Err(err) => {
                tracing::debug!(error = %err, "reference kind unresolved");
                String::new()
            }
        }
    })
}

pub(crate) fn reference_providers(
    services: &BinderServices,
    description_id: &str,
    expressions: ReferenceExpressions<'_>,
    candidate_resolver: &Arc<ReferenceCandidateResolver>,
    child_types: &Arc<ChildTypeResolver>,
) -> ReferenceProviders {
    let owner = owner_provider(services, expressions.owner);
    let reference_kind = reference_kind_provider(services, expressions.type_name);

    let candidates = {
        let resolver = Arc::clone(candidate_resolver);
        let search_scope = owned(expressions.search_scope);
        let description_id = description_id.to_string();
        Arc::new(move |ctx: &EvaluationContext| {
            match ctx.self_value().and_then(Value::as_node) {
                Some(target) => {
                    resolver.find_candidates(target, search_scope.as_deref(), &description_id)
                }
                None => Vec::new(),
            }
        }) as Provider<Vec<DomainNode>>
    };

    let child_creation = {
        let resolver = Arc::clone(child_types);
        let objects = Arc::clone(&services.objects);
        let owner = Arc::clone(&owner);
        let reference_kind = Arc::clone(&reference_kind);
        Arc::new(move |ctx: &EvaluationContext| {
            let Some(owner) = owner(ctx) else {
                return Vec::new();
            };
            let reference_kind = reference_kind(ctx);
            if reference_kind.is_empty() {
                return Vec::new();
            }
            resolver.child_creation_descriptions(&objects.kind(&owner), &reference_kind)
        }) as Provider<Vec<ChildCreationDescription>>
    };

    ReferenceProviders {
        items: objects_provider(services, expressions.value),
        item: item_providers(services),
        owner,
        reference_kind,
        candidates,
        child_creation,
    }
}
