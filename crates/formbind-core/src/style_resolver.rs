//! First-match conditional style resolution

use crate::evaluation::{EvaluatorExt, ExpressionEvaluator};
use crate::model::{ConditionalStyle, EvaluationContext};

/// Pick the style of the first conditional style whose condition holds
///
/// Conditions are evaluated in declared order and evaluation stops at the
/// first match. Blank conditions count as false and are not evaluated. With
/// no match the default style is returned, or `None` when there is none.
pub fn resolve<S: Clone>(
    evaluator: &dyn ExpressionEvaluator,
    ctx: &EvaluationContext,
    conditional_styles: &[ConditionalStyle<S>],
    default_style: Option<&S>,
) -> Option<S> {
    conditional_styles
        .iter()
        .find(|candidate| evaluator.boolean_or(ctx, Some(candidate.condition.as_str()), false))
        .map(|matched| matched.style.clone())
        .or_else(|| default_style.cloned())
}
