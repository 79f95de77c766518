//! Implementation of the rewrite rules.
//!
//! Each rule in this module is a function that takes the expression to rewrite as an argument,
//! and returns `Some(expr)` with the rewritten expression if the rule applies, or `None` if the
//! rule does not apply. Rules assume that the operands of the expression have already been
//! rewritten.

pub mod add;
pub mod bounded;
pub mod divide;
pub mod function;
pub mod imaginary;
pub mod multiply;
pub mod numeric;
pub mod power;

use crate::{
    error::{DivisionByZero, Result},
    expr::Expression,
    specialize::{Divide, Modulo, Specialize, Zero},
    step_collector::StepCollector,
};
use super::step::Step;
use tracing::debug;

/// A single rewrite rule.
pub type Rule = fn(&Expression, &mut dyn StepCollector<Step>) -> Option<Expression>;

/// Every rewrite rule, in the order they are tried. The first rule that applies wins.
pub const RULES: &[Rule] = &[
    numeric::fold_numbers,
    function::fold_function,
    add::add_zero,
    add::add_same,
    add::subtract_zero,
    add::subtract_same,
    multiply::multiply_zero,
    multiply::multiply_one,
    imaginary::i_squared,
    multiply::multiply_same,
    divide::divide_one,
    divide::divide_zero,
    divide::divide_same,
    divide::modulo_one,
    divide::modulo_zero,
    divide::modulo_same,
    power::power_zero,
    power::power_one,
    power::one_power,
    imaginary::i_pow,
    imaginary::euler,
    bounded::sum_constant,
    bounded::sum_index,
];

/// Fails with [`DivisionByZero`] if the expression divides by an exact zero.
fn check_division(expr: &Expression) -> Result<()> {
    let dividend = Divide::<&Expression, Zero>::specialize(expr)
        .map(|view| view.lhs)
        .or_else(|| Modulo::<&Expression, Zero>::specialize(expr).map(|view| view.lhs));

    match dividend {
        Some(dividend) => Err(DivisionByZero { dividend: dividend.to_string() }.into()),
        None => Ok(()),
    }
}

/// Applies the first rule in [`RULES`] that matches the expression. If no rule matches, the
/// expression is returned unchanged.
pub fn rewrite(expr: Expression, step_collector: &mut dyn StepCollector<Step>) -> Result<Expression> {
    check_division(&expr)?;

    match RULES.iter().find_map(|rule| rule(&expr, step_collector)) {
        Some(rewritten) => {
            debug!(from = %expr, to = %rewritten, "applied rewrite rule");
            Ok(rewritten)
        },
        None => Ok(expr),
    }
}
