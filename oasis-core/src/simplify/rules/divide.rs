//! Rewrite rules for division and modulo.
//!
//! Division and modulo by an exact zero are never rewritten; they are rejected before any rule is
//! tried.

use crate::{
    expr::Expression,
    simplify::step::Step,
    specialize::{Divide, Modulo, One, Specialize, Zero},
    step_collector::StepCollector,
};

/// `a/1 = a`
pub fn divide_one(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Divide::<&Expression, One>::specialize(expr)?;
    step_collector.push(Step::DivideOne);
    Some(view.lhs.clone())
}

/// `0/a = 0`
pub fn divide_zero(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    Divide::<Zero, &Expression>::specialize(expr)?;
    step_collector.push(Step::DivideZero);
    Some(Expression::constant(0.0))
}

/// `a/a = 1`
pub fn divide_same(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Divide::<&Expression, &Expression>::specialize(expr)?;
    if view.lhs != view.rhs {
        return None;
    }

    step_collector.push(Step::DivideSame);
    Some(Expression::constant(1.0))
}

/// `a%1 = 0`
pub fn modulo_one(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    Modulo::<&Expression, One>::specialize(expr)?;
    step_collector.push(Step::ModuloOne);
    Some(Expression::constant(0.0))
}

/// `0%a = 0`
pub fn modulo_zero(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    Modulo::<Zero, &Expression>::specialize(expr)?;
    step_collector.push(Step::ModuloZero);
    Some(Expression::constant(0.0))
}

/// `a%a = 0`
pub fn modulo_same(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Modulo::<&Expression, &Expression>::specialize(expr)?;
    if view.lhs != view.rhs {
        return None;
    }

    step_collector.push(Step::ModuloSame);
    Some(Expression::constant(0.0))
}
