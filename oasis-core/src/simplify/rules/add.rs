//! Rewrite rules for addition and subtraction.

use crate::{
    expr::Expression,
    simplify::step::Step,
    specialize::{Add, Specialize, Subtract, Zero},
    step_collector::StepCollector,
};

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Add::<&Expression, Zero>::specialize_commutative(expr)?;
    step_collector.push(Step::AddZero);
    Some(view.lhs.clone())
}

/// `a+a = 2a`
pub fn add_same(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Add::<&Expression, &Expression>::specialize(expr)?;
    if view.lhs != view.rhs {
        return None;
    }

    step_collector.push(Step::AddSame);
    Some(Expression::constant(2.0) * view.lhs.clone())
}

/// `a-0 = a`
pub fn subtract_zero(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Subtract::<&Expression, Zero>::specialize(expr)?;
    step_collector.push(Step::SubtractZero);
    Some(view.lhs.clone())
}

/// `a-a = 0`
pub fn subtract_same(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Subtract::<&Expression, &Expression>::specialize(expr)?;
    if view.lhs != view.rhs {
        return None;
    }

    step_collector.push(Step::SubtractSame);
    Some(Expression::constant(0.0))
}
