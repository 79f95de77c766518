//! Numerical evaluation of expressions.

use crate::{
    error::{DivisionByZero, Result, UnboundVariable, UndefinedOperation},
    expr::{BinOp, Bounded, BoundedOp, Expression, Primary},
};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The variable that the unit impulse is a function of.
pub const IMPULSE_VAR: &str = "t";

/// Summation bounds must be smaller than this in magnitude, so that every index between them is
/// exactly representable (`2^53`).
const MAX_EXACT_INDEX: f64 = 9_007_199_254_740_992.0;

/// A set of variable bindings to use when evaluating an expression.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bindings {
    vars: HashMap<String, f64>,
}

impl Bindings {
    /// Creates a new, empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a variable to a value, replacing any previous value.
    pub fn add_var(&mut self, name: impl Into<String>, value: f64) {
        self.vars.insert(name.into(), value);
    }

    /// Binds a variable to a value, returning the new set of bindings.
    pub fn with_var(mut self, name: impl Into<String>, value: f64) -> Self {
        self.add_var(name, value);
        self
    }

    /// Returns the value of a variable, if it is bound.
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(name, value)| (name.into(), value)).collect(),
        }
    }
}

/// Evaluates the expression to a real number, using the given variable bindings.
///
/// The imaginary unit has no real value, and the Fourier and Laplace transforms have no numeric
/// evaluation, so evaluating any of them fails with
/// [`UndefinedOperation`](crate::error::UndefinedOperation).
pub fn evaluate(expr: &Expression, bindings: &Bindings) -> Result<f64> {
    match expr {
        Expression::Primary(primary) => evaluate_primary(expr, primary, bindings),
        Expression::Unary(op, operand) => Ok(op.apply(evaluate(operand, bindings)?)),
        Expression::Binary(op, lhs, rhs) => {
            let lhs_value = evaluate(lhs, bindings)?;
            let rhs_value = evaluate(rhs, bindings)?;
            match op {
                BinOp::Add => Ok(lhs_value + rhs_value),
                BinOp::Subtract => Ok(lhs_value - rhs_value),
                BinOp::Multiply => Ok(lhs_value * rhs_value),
                BinOp::Divide | BinOp::Modulo if rhs_value == 0.0 => Err(DivisionByZero {
                    dividend: lhs.to_string(),
                }.into()),
                BinOp::Divide => Ok(lhs_value / rhs_value),
                BinOp::Modulo => Ok(lhs_value % rhs_value),
                BinOp::Exponent => Ok(lhs_value.powf(rhs_value)),
            }
        },
        Expression::Bounded(bounded) => evaluate_bounded(expr, bounded, bindings),
    }
}

fn evaluate_primary(expr: &Expression, primary: &Primary, bindings: &Bindings) -> Result<f64> {
    match primary {
        Primary::Constant(constant) => Ok(constant.value()),
        Primary::Real(value) => Ok(*value),
        Primary::Variable(name) => bindings.get_var(name)
            .ok_or_else(|| UnboundVariable { name: name.clone() }.into()),
        Primary::Imaginary => Err(UndefinedOperation::new(
            "evaluate",
            expr,
            "the imaginary unit has no real value",
        ).into()),
        Primary::Impulse => {
            let t = bindings.get_var(IMPULSE_VAR)
                .ok_or_else(|| UnboundVariable { name: IMPULSE_VAR.to_string() })?;
            Ok(if t == 0.0 { f64::INFINITY } else { 0.0 })
        },
    }
}

fn evaluate_bounded(expr: &Expression, bounded: &Bounded, bindings: &Bindings) -> Result<f64> {
    match bounded.op {
        BoundedOp::Sum => {
            let (Some(lower), Some(upper)) = (bounded.lower_bound(), bounded.upper_bound()) else {
                return Err(UndefinedOperation::new(
                    "evaluate",
                    expr,
                    "a summation needs both a lower and an upper bound",
                ).into());
            };
            let lower = evaluate(lower, bindings)?;
            let upper = evaluate(upper, bindings)?;
            if !lower.is_finite() || !upper.is_finite() {
                return Err(UndefinedOperation::new(
                    "evaluate",
                    expr,
                    "summation bounds must be finite",
                ).into());
            }
            if lower.abs() >= MAX_EXACT_INDEX || upper.abs() >= MAX_EXACT_INDEX {
                return Err(UndefinedOperation::new(
                    "evaluate",
                    expr,
                    "summation bounds are too large to count through exactly",
                ).into());
            }

            let count = if upper >= lower { (upper - lower).floor() as u64 + 1 } else { 0 };
            let mut scope = bindings.clone();
            let mut total = 0.0;
            for k in 0..count {
                scope.add_var(bounded.var.as_str(), lower + k as f64);
                total += evaluate(&bounded.operand, &scope)?;
            }
            Ok(total)
        },
        BoundedOp::Fourier | BoundedOp::Laplace => Err(UndefinedOperation::new(
            "evaluate",
            expr,
            "integral transforms have no numeric evaluation",
        ).into()),
    }
}

impl Expression {
    /// Evaluates the expression to a real number. See [`evaluate`].
    pub fn evaluate(&self, bindings: &Bindings) -> Result<f64> {
        evaluate(self, bindings)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::error::Error;
    use super::*;

    fn x() -> Expression {
        Expression::variable("x")
    }

    #[test]
    fn arithmetic() {
        let bindings = Bindings::from_iter([("x", 3.0)]);
        let expr = Expression::pow(x(), Expression::constant(2.0)) + x() / Expression::real(2.0);
        assert_float_absolute_eq!(evaluate(&expr, &bindings).unwrap(), 10.5);
    }

    #[test]
    fn functions() {
        let expr = Expression::arctan(Expression::tan(Expression::constant(0.5)));
        assert_float_absolute_eq!(evaluate(&expr, &Bindings::new()).unwrap(), 0.5);

        let expr = Expression::floor(Expression::real(-1.5));
        assert_float_absolute_eq!(evaluate(&expr, &Bindings::new()).unwrap(), -2.0);
    }

    #[test]
    fn modulo_uses_truncated_remainder() {
        let expr = Expression::real(-7.0) % Expression::real(3.0);
        assert_float_absolute_eq!(evaluate(&expr, &Bindings::new()).unwrap(), -1.0);
    }

    #[test]
    fn divide_by_zero() {
        let expr = x() / (x() - x());
        let err = evaluate(&expr, &Bindings::from_iter([("x", 1.0)])).unwrap_err();
        assert!(matches!(err, Error::DivisionByZero(_)));
    }

    #[test]
    fn unbound_variable() {
        let err = evaluate(&(x() + Expression::constant(1.0)), &Bindings::new()).unwrap_err();
        assert_eq!(err, Error::UnboundVariable(UnboundVariable { name: "x".to_string() }));
    }

    #[test]
    fn impulse() {
        let at_zero = Bindings::from_iter([("t", 0.0)]);
        let elsewhere = Bindings::from_iter([("t", 0.25)]);
        assert_eq!(evaluate(&Expression::impulse(), &at_zero).unwrap(), f64::INFINITY);
        assert_eq!(evaluate(&Expression::impulse(), &elsewhere).unwrap(), 0.0);
    }

    #[test]
    fn imaginary_has_no_value() {
        let err = evaluate(&Expression::imaginary(), &Bindings::new()).unwrap_err();
        assert!(matches!(err, Error::UndefinedOperation(_)));
    }

    #[test]
    fn sum_is_inclusive() {
        let expr = Expression::sum(
            Expression::constant(1.0),
            Expression::constant(4.0),
            Expression::pow(Expression::variable("i"), Expression::constant(2.0)),
        );
        assert_float_absolute_eq!(evaluate(&expr, &Bindings::new()).unwrap(), 30.0);
    }

    #[test]
    fn sum_with_fractional_bounds() {
        let expr = Expression::sum_over(
            "k",
            Expression::real(0.5),
            Expression::real(3.0),
            Expression::variable("k"),
        );
        // 0.5 + 1.5 + 2.5
        assert_float_absolute_eq!(evaluate(&expr, &Bindings::new()).unwrap(), 4.5);

        let empty = Expression::sum(
            Expression::constant(3.0),
            Expression::constant(1.0),
            Expression::variable("i"),
        );
        assert_eq!(evaluate(&empty, &Bindings::new()).unwrap(), 0.0);
    }

    #[test]
    fn sum_needs_finite_exact_bounds() {
        let huge = 9_007_199_254_740_992.0;
        let cases = [
            (Expression::constant(0.0), Expression::constant(f64::INFINITY)),
            (Expression::constant(f64::NEG_INFINITY), Expression::constant(0.0)),
            (Expression::real(f64::NAN), Expression::constant(3.0)),
            (Expression::constant(huge), Expression::constant(huge + 2.0)),
            (Expression::variable("n"), Expression::constant(1.0)),
        ];

        let bindings = Bindings::new().with_var("n", -huge);
        for (lower, upper) in cases {
            let expr = Expression::sum(lower, upper, Expression::variable("i"));
            let err = evaluate(&expr, &bindings).unwrap_err();
            assert!(matches!(err, Error::UndefinedOperation(_)), "{}: {:?}", expr, err);
        }
    }

    #[test]
    fn sum_index_shadows_binding() {
        let bindings = Bindings::from_iter([("i", 100.0)]);
        let expr = Expression::sum(
            Expression::constant(0.0),
            Expression::constant(2.0),
            Expression::variable("i"),
        );
        assert_float_absolute_eq!(evaluate(&expr, &bindings).unwrap(), 3.0);
    }

    #[test]
    fn transforms_have_no_value() {
        let err = evaluate(&Expression::fourier(x()), &Bindings::from_iter([("x", 1.0)]))
            .unwrap_err();
        assert!(matches!(err, Error::UndefinedOperation(_)));
    }
}
