//! Rewrite rules for summations.
//!
//! The Fourier and Laplace transforms have no rewrite rules; their parts are rewritten and the
//! transform is rebuilt around them.

use crate::{
    expr::Expression,
    simplify::step::Step,
    specialize::{Generalize, Multiply, Num, Specialize, Sum, Var, Zero},
    step_collector::StepCollector,
};

/// Returns the number of integers visited when counting up from `lower` to `upper` inclusive, in
/// steps of one.
fn index_count(lower: f64, upper: f64) -> f64 {
    if upper >= lower {
        (upper - lower).floor() + 1.0
    } else {
        0.0
    }
}

/// `Σ(a, b, c) = (b - a + 1)c`, where `c` does not depend on the index.
pub fn sum_constant(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Sum::<&Expression>::specialize(expr)?;
    if view.operand.contains_variable(view.var) {
        return None;
    }
    let Num(lower) = Num::specialize(view.lower?)?;
    let Num(upper) = Num::specialize(view.upper?)?;

    step_collector.push(Step::SumConstant);
    Some(Multiply::new(Expression::constant(index_count(lower, upper)), view.operand).generalize())
}

/// `Σ(0, n, i) = n(n-1)/2`
pub fn sum_index(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Sum::<Var>::specialize(expr)?;
    if view.operand.0 != view.var {
        return None;
    }
    Zero::specialize(view.lower?)?;
    let Num(n) = Num::specialize(view.upper?)?;

    step_collector.push(Step::SumIndex);
    Some(
        Expression::constant(n) * Expression::constant(n - 1.0)
            / Expression::constant(2.0)
    )
}
