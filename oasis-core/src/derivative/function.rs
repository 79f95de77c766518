//! Symbolic derivatives of the unary functions.

use crate::{
    error::Result,
    expr::{Expression, UnaryOp},
};
use super::{derivative, quotient, MultBuilder};

/// Computes the derivative of a unary function and performs the chain rule.
pub(super) fn function_derivative(op: UnaryOp, f: &Expression, with: &str) -> Result<Expression> {
    let df = derivative(f, with)?;
    let mut mult_group = MultBuilder::default();

    match op {
        UnaryOp::Sin => {
            mult_group.mult(df);
            mult_group.mult(Expression::cos(f.clone()));
        },
        UnaryOp::Cos => {
            mult_group.mult(df);
            mult_group.mult(Expression::constant(-1.0));
            mult_group.mult(Expression::sin(f.clone()));
        },
        UnaryOp::Tan => {
            // tan' = 1 / cos^2
            let cos_squared = Expression::pow(Expression::cos(f.clone()), Expression::constant(2.0));
            return Ok(quotient(df, cos_squared));
        },
        UnaryOp::ArcTan => {
            // arctan' = 1 / (1 + x^2)
            let denominator = Expression::constant(1.0)
                + Expression::pow(f.clone(), Expression::constant(2.0));
            return Ok(quotient(df, denominator));
        },
        UnaryOp::Ln => return Ok(quotient(df, f.clone())),
        UnaryOp::Floor => mult_group.mult(Expression::constant(0.0)),
    };

    Ok(mult_group.into())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use super::super::tests::test_for_function;

    fn x() -> Expression {
        Expression::variable("x")
    }

    #[test]
    fn chain_rule() {
        test_for_function(&Expression::sin(Expression::pow(x(), Expression::constant(2.0))), [-1., 0.5, 2.]);
        test_for_function(&Expression::cos(Expression::constant(3.0) * x()), [-1., 0., 0.7]);
    }

    #[test]
    fn tan_of_constant_is_zero() {
        let expr = Expression::tan(Expression::variable("y"));
        assert_eq!(derivative(&expr, "x").unwrap(), Expression::constant(0.0));
    }

    #[test]
    fn ln() {
        let expr = Expression::ln(x());
        assert_eq!(function_derivative(UnaryOp::Ln, &x(), "x").unwrap(), Expression::constant(1.0) / x());
        test_for_function(&expr, [0.5, 1., 10.]);
    }
}
