//! Reference candidate resolution
//!
//! Finds the domain nodes a reference widget may point to, by evaluating the
//! widget's search-scope expression with an evaluator scoped to the view that
//! owns the widget.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use crate::evaluation::{is_blank, EvaluatorFactory};
use crate::model::{DomainNode, EvaluationContext};
use crate::services::{Container, DescriptionContainment, ViewRoot};
use crate::{log_op_end, log_op_start};

pub struct ReferenceCandidateResolver {
    containment: Arc<dyn DescriptionContainment>,
    evaluators: Arc<dyn EvaluatorFactory>,
}

impl ReferenceCandidateResolver {
    pub fn new(
        containment: Arc<dyn DescriptionContainment>,
        evaluators: Arc<dyn EvaluatorFactory>,
    ) -> Self {
        Self {
            containment,
            evaluators,
        }
    }

    /// Candidates for `target`; empty when the expression is blank, the
    /// description has no owning view, or evaluation yields nothing
    pub fn find_candidates(
        &self,
        target: &DomainNode,
        search_scope_expression: Option<&str>,
        description_id: &str,
    ) -> Vec<DomainNode> {
        let expression = match search_scope_expression {
            Some(expression) if !is_blank(Some(expression)) => expression,
            _ => return Vec::new(),
        };

        let start = Instant::now();
        log_op_start!("find_candidates", widget_id = description_id);

        let candidates = match self.owning_view(description_id) {
            Some(view) => {
                let evaluator = self.evaluators.evaluator_for(&view);
                let ctx = EvaluationContext::with_self(target.clone());
                evaluator.evaluate(&ctx, expression).as_objects()
            }
            None => {
                tracing::debug!(
                    widget_id = description_id,
                    "no owning view; candidate search skipped"
                );
                Vec::new()
            }
        };

        log_op_end!(
            "find_candidates",
            duration_ms = start.elapsed().as_millis() as u64,
            candidate_count = candidates.len()
        );
        candidates
    }

    /// Walk container links upward until a view is reached
    pub fn owning_view(&self, description_id: &str) -> Option<ViewRoot> {
        let mut visited = HashSet::new();
        let mut current = description_id.to_string();
        loop {
            if !visited.insert(current.clone()) {
                return None;
            }
            match self.containment.parent_of(&current)? {
                Container::View(view) => return Some(view),
                Container::Element(parent) => current = parent,
            }
        }
    }
}
