//! Widget binder
//!
//! Converts a widget description into a [`WidgetRuntime`]: providers over
//! the expression evaluator and edit handlers over the operation runner,
//! wired per widget kind.

pub mod handler;
pub mod providers;
pub mod runtime;

use std::sync::Arc;
use std::time::Instant;

use crate::candidate_resolver::ReferenceCandidateResolver;
use crate::capability;
use crate::child_types::ChildTypeResolver;
use crate::config::EngineConfig;
use crate::evaluation::{is_blank, EvaluatorExt, EvaluatorFactory, ExpressionEvaluator};
use crate::model::{
    ContainmentReferenceDescription, EvaluationContext, OperationBody, PrimitiveListDescription,
    PrimitiveRadioDescription, ReferenceDescription, Value, WidgetDescription,
    WidgetKindDescription,
};
use crate::operations::OperationRunner;
use crate::services::{DescriptionContainment, DomainTypeRegistry, FeedbackMessages, ObjectService};
use crate::{log_op_end, log_op_start};

pub use handler::{Affordance, EditHandler};
pub use providers::{CommonProviders, ItemProviders, Provider, ReferenceProviders};
pub use runtime::{
    ContainmentReferenceWidget, ItemActionHandler, LanguageExpressionWidget, MonoReferenceWidget,
    MultiReferenceWidget, PrimitiveListWidget, PrimitiveRadioWidget, WidgetRuntime,
};

use providers::{
    common_providers, item_providers, reference_providers, string_provider, values_provider,
    ReferenceExpressions,
};

/// Collaborators the binder wires into providers and handlers
#[derive(Clone)]
pub struct BinderServices {
    pub evaluator: Arc<dyn ExpressionEvaluator>,
    pub operations: Arc<dyn OperationRunner>,
    pub objects: Arc<dyn ObjectService>,
    pub registry: Arc<dyn DomainTypeRegistry>,
    pub feedback: Arc<dyn FeedbackMessages>,
    pub evaluators: Arc<dyn EvaluatorFactory>,
    pub containment: Arc<dyn DescriptionContainment>,
}

pub struct WidgetBinder {
    services: BinderServices,
    config: EngineConfig,
    candidates: Arc<ReferenceCandidateResolver>,
    child_types: Arc<ChildTypeResolver>,
}

impl WidgetBinder {
    pub fn new(services: BinderServices, config: EngineConfig) -> Self {
        let candidates = Arc::new(ReferenceCandidateResolver::new(
            Arc::clone(&services.containment),
            Arc::clone(&services.evaluators),
        ));
        let child_types = Arc::new(ChildTypeResolver::new(
            Arc::clone(&services.registry),
            Arc::clone(&services.objects),
            config.subtype_scope,
        ));
        Self {
            services,
            config,
            candidates,
            child_types,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn candidate_resolver(&self) -> &ReferenceCandidateResolver {
        &self.candidates
    }

    pub fn child_type_resolver(&self) -> &ChildTypeResolver {
        &self.child_types
    }

    /// Whether `description_id` routes to this engine
    pub fn can_handle(&self, description_id: &str) -> bool {
        capability::can_handle(&self.config, description_id)
    }

    pub fn bind(&self, description: &WidgetDescription) -> WidgetRuntime {
        let start = Instant::now();
        let kind = description.kind.kind();
        log_op_start!(
            "bind_widget",
            widget_id = description.id.as_str(),
            widget_kind = kind.tag()
        );

        let runtime = match &description.kind {
            WidgetKindDescription::MonoReference(reference) => {
                WidgetRuntime::MonoReference(self.bind_mono_reference(description, reference))
            }
            WidgetKindDescription::MultiReference(reference) => {
                WidgetRuntime::MultiReference(self.bind_multi_reference(description, reference))
            }
            WidgetKindDescription::ContainmentReference(containment) => {
                WidgetRuntime::ContainmentReference(
                    self.bind_containment_reference(description, containment),
                )
            }
            WidgetKindDescription::PrimitiveList(list) => {
                WidgetRuntime::PrimitiveList(self.bind_primitive_list(description, list))
            }
            WidgetKindDescription::PrimitiveRadio(radio) => {
                WidgetRuntime::PrimitiveRadio(self.bind_primitive_radio(description, radio))
            }
            WidgetKindDescription::LanguageExpression(_) => {
                WidgetRuntime::LanguageExpression(LanguageExpressionWidget {
                    common: common_providers(&self.services, description),
                })
            }
        };

        log_op_end!(
            "bind_widget",
            duration_ms = start.elapsed().as_millis() as u64,
            widget_id = description.id.as_str(),
            widget_kind = kind.tag()
        );
        runtime
    }

    fn handler(
        &self,
        affordance: Affordance,
        description: &WidgetDescription,
        body: Option<&OperationBody>,
    ) -> EditHandler {
        EditHandler::new(
            affordance,
            description.id.as_str(),
            body,
            Arc::clone(&self.services.operations),
            Arc::clone(&self.services.feedback),
        )
    }

    /// Wired only when the slot is declared
    fn optional_handler(
        &self,
        affordance: Affordance,
        description: &WidgetDescription,
        body: Option<&OperationBody>,
    ) -> Option<EditHandler> {
        body.map(|body| self.handler(affordance, description, Some(body)))
    }

    fn reference(
        &self,
        description: &WidgetDescription,
        expressions: ReferenceExpressions<'_>,
    ) -> ReferenceProviders {
        reference_providers(
            &self.services,
            &description.id,
            expressions,
            &self.candidates,
            &self.child_types,
        )
    }

    fn bind_mono_reference(
        &self,
        description: &WidgetDescription,
        reference: &ReferenceDescription,
    ) -> MonoReferenceWidget {
        let ops = &reference.operations;
        MonoReferenceWidget {
            common: common_providers(&self.services, description),
            reference: self.reference(description, reference_expressions(reference)),
            set_handler: self.handler(Affordance::Set, description, ops.set.as_ref()),
            unset_handler: self.handler(Affordance::Unset, description, ops.unset.as_ref()),
            clear_handler: self.handler(Affordance::Clear, description, ops.clear.as_ref()),
            create_element_handler: self.handler(
                Affordance::CreateElement,
                description,
                ops.create_element.as_ref(),
            ),
        }
    }

    fn bind_multi_reference(
        &self,
        description: &WidgetDescription,
        reference: &ReferenceDescription,
    ) -> MultiReferenceWidget {
        let ops = &reference.operations;
        MultiReferenceWidget {
            common: common_providers(&self.services, description),
            reference: self.reference(description, reference_expressions(reference)),
            add_handler: self.handler(Affordance::Add, description, ops.add.as_ref()),
            remove_handler: self.handler(Affordance::Remove, description, ops.remove.as_ref()),
            clear_handler: self.handler(Affordance::Clear, description, ops.clear.as_ref()),
            reorder_handler: self.handler(Affordance::Reorder, description, ops.reorder.as_ref()),
            create_element_handler: self.handler(
                Affordance::CreateElement,
                description,
                ops.create_element.as_ref(),
            ),
        }
    }

    fn bind_containment_reference(
        &self,
        description: &WidgetDescription,
        containment: &ContainmentReferenceDescription,
    ) -> ContainmentReferenceWidget {
        let ops = &containment.operations;
        let declared_many = containment.many;
        ContainmentReferenceWidget {
            common: common_providers(&self.services, description),
            reference: self.reference(
                description,
                ReferenceExpressions {
                    value: containment.value_expression.as_deref(),
                    owner: containment.owner_expression.as_deref(),
                    type_name: containment.type_expression.as_deref(),
                    search_scope: None,
                },
            ),
            many: Arc::new(move |_: &EvaluationContext| declared_many),
            create_element_handler: self.handler(
                Affordance::CreateElement,
                description,
                ops.create_element.as_ref(),
            ),
            click_handler: self.optional_handler(Affordance::Click, description, ops.click.as_ref()),
            reorder_handler: self.optional_handler(
                Affordance::Reorder,
                description,
                ops.reorder.as_ref(),
            ),
        }
    }

    fn bind_primitive_list(
        &self,
        description: &WidgetDescription,
        list: &PrimitiveListDescription,
    ) -> PrimitiveListWidget {
        let ops = &list.operations;
        let item_action = ops.item_action.as_ref().map(|action| {
            let evaluator = Arc::clone(&self.services.evaluator);
            let precondition = action.precondition_expression.clone();
            ItemActionHandler {
                handler: self.handler(Affordance::ItemAction, description, Some(&action.body)),
                icon_url: string_provider(&self.services, action.icon_url_expression.as_deref()),
                precondition: Arc::new(move |ctx: &EvaluationContext| {
                    is_blank(precondition.as_deref())
                        || evaluator.boolean_or(ctx, precondition.as_deref(), false)
                }),
            }
        });

        PrimitiveListWidget {
            common: common_providers(&self.services, description),
            items: values_provider(&self.services, list.value_expression.as_deref()),
            item: item_providers(&self.services),
            options: values_provider(&self.services, list.dropdown_options_expression.as_deref()),
            delete_handler: self.optional_handler(Affordance::Delete, description, ops.delete.as_ref()),
            add_handler: self.optional_handler(Affordance::Add, description, ops.add.as_ref()),
            reorder_handler: self.optional_handler(
                Affordance::Reorder,
                description,
                ops.reorder.as_ref(),
            ),
            item_action,
        }
    }

    fn bind_primitive_radio(
        &self,
        description: &WidgetDescription,
        radio: &PrimitiveRadioDescription,
    ) -> PrimitiveRadioWidget {
        let candidates = {
            let values = values_provider(&self.services, radio.candidates_expression.as_deref());
            let objects = Arc::clone(&self.services.objects);
            Arc::new(move |ctx: &EvaluationContext| {
                values(ctx)
                    .into_iter()
                    .filter_map(|value| match value {
                        Value::Node(node) => Some(objects.label(&node)),
                        other => other.to_scalar_string(),
                    })
                    .collect()
            }) as Provider<Vec<String>>
        };

        PrimitiveRadioWidget {
            common: common_providers(&self.services, description),
            candidates,
            value: string_provider(&self.services, radio.value_expression.as_deref()),
            select_handler: self.handler(
                Affordance::Select,
                description,
                radio.operations.set.as_ref(),
            ),
        }
    }
}

fn reference_expressions(reference: &ReferenceDescription) -> ReferenceExpressions<'_> {
    ReferenceExpressions {
        value: reference.value_expression.as_deref(),
        owner: reference.owner_expression.as_deref(),
        type_name: reference.type_expression.as_deref(),
        search_scope: reference.candidates_search_scope_expression.as_deref(),
    }
}
