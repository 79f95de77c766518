//! Folding of binary operators whose operands are both numbers.

use crate::{
    expr::{BinOp, Expression},
    simplify::step::Step,
    step_collector::StepCollector,
};

/// `2+3 = 5`, `7%3 = 1`, etc.
///
/// The result is a [`Primary::Real`](crate::expr::Primary::Real). Nothing is folded if the
/// result would not be finite, which includes division by zero.
pub fn fold_numbers(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let Expression::Binary(op, lhs, rhs) = expr else {
        return None;
    };
    let (lhs, rhs) = (lhs.as_number()?, rhs.as_number()?);

    let value = match op {
        BinOp::Add => lhs + rhs,
        BinOp::Subtract => lhs - rhs,
        BinOp::Multiply => lhs * rhs,
        BinOp::Divide => lhs / rhs,
        BinOp::Modulo => lhs % rhs,
        BinOp::Exponent => lhs.powf(rhs),
    };
    if !value.is_finite() {
        return None;
    }

    step_collector.push(Step::FoldNumbers);
    Some(Expression::real(value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn folds_to_real() {
        let expr = Expression::constant(7.0) % Expression::real(3.0);
        assert_eq!(fold_numbers(&expr, &mut ()), Some(Expression::real(1.0)));
    }

    #[test]
    fn symbolic_constants_do_not_fold() {
        let expr = Expression::pi() * Expression::constant(2.0);
        assert_eq!(fold_numbers(&expr, &mut ()), None);
    }

    #[test]
    fn non_finite_results_do_not_fold() {
        let expr = Expression::pow(Expression::real(-1.0), Expression::real(0.5));
        assert_eq!(fold_numbers(&expr, &mut ()), None);
    }
}
