//! Rewrite rules for the unary functions.

use crate::{
    expr::Expression,
    simplify::step::Step,
    step_collector::StepCollector,
};

/// `tan(0.5) = 0.5463...`, `floor(2.7) = 2`, etc.
///
/// Nothing is folded if the value would not be finite, which leaves `ln(0)` and `ln(-1)` as they
/// are.
pub fn fold_function(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let Expression::Unary(op, operand) = expr else {
        return None;
    };

    let value = op.apply(operand.as_number()?);
    if !value.is_finite() {
        return None;
    }

    step_collector.push(Step::FoldFunction);
    Some(Expression::real(value))
}
