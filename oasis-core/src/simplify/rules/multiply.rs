//! Rewrite rules for multiplication.

use crate::{
    expr::Expression,
    simplify::step::Step,
    specialize::{Multiply, One, Specialize, Zero},
    step_collector::StepCollector,
};

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    Multiply::<&Expression, Zero>::specialize_commutative(expr)?;
    step_collector.push(Step::MultiplyZero);
    Some(Expression::constant(0.0))
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Multiply::<&Expression, One>::specialize_commutative(expr)?;
    step_collector.push(Step::MultiplyOne);
    Some(view.lhs.clone())
}

/// `a*a = a^2`
pub fn multiply_same(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Multiply::<&Expression, &Expression>::specialize(expr)?;
    if view.lhs != view.rhs {
        return None;
    }

    step_collector.push(Step::MultiplySame);
    Some(Expression::pow(view.lhs.clone(), Expression::constant(2.0)))
}
