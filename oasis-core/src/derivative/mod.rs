//! Symbolic differentiation.

use crate::{
    error::{Result, UndefinedOperation},
    expr::{BinOp, Expression, Primary},
    specialize::{Euler, Specialize},
};

mod function;

/// Returns `true` if the given [`Expression`] is "clearly" zero. This is intended to clean up
/// trees and is not mathematically rigorous.
pub(crate) fn is_trivially_zero(e: &Expression) -> bool {
    match e {
        Expression::Primary(primary) => primary.as_number() == Some(0.0),
        Expression::Binary(BinOp::Add | BinOp::Subtract, lhs, rhs) => {
            is_trivially_zero(lhs) && is_trivially_zero(rhs)
        },
        Expression::Binary(BinOp::Multiply, lhs, rhs) => {
            is_trivially_zero(lhs) || is_trivially_zero(rhs)
        },
        Expression::Binary(BinOp::Divide, lhs, rhs) => {
            is_trivially_zero(lhs) && !is_trivially_zero(rhs)
        },
        Expression::Binary(BinOp::Exponent, base, exponent) => {
            is_trivially_zero(base) && !is_trivially_zero(exponent)
        },
        _ => false,
    }
}

/// Returns `true` if the given [`Expression`] is "clearly" one. This is intended to clean up
/// trees and is not mathematically rigorous.
pub(crate) fn is_trivially_unity(e: &Expression) -> bool {
    match e {
        Expression::Primary(primary) => primary.as_number() == Some(1.0),
        Expression::Binary(BinOp::Multiply, lhs, rhs) => {
            is_trivially_unity(lhs) && is_trivially_unity(rhs)
        },
        Expression::Binary(BinOp::Exponent, base, exponent) => {
            is_trivially_zero(exponent) || is_trivially_unity(base)
        },
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
pub(crate) struct MultBuilder(Vec<Expression>);

impl From<MultBuilder> for Expression {
    fn from(value: MultBuilder) -> Self {
        value.0.into_iter()
            .reduce(|product, factor| product * factor)
            .unwrap_or_else(|| Expression::constant(1.0))
    }
}

impl MultBuilder {
    pub(crate) fn mult(&mut self, e: Expression) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![Expression::constant(0.0)];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
pub(crate) struct SumBuilder(Vec<Expression>);

impl From<SumBuilder> for Expression {
    fn from(value: SumBuilder) -> Self {
        value.0.into_iter()
            .reduce(|sum, term| sum + term)
            .unwrap_or_else(|| Expression::constant(0.0))
    }
}

impl SumBuilder {
    pub(crate) fn add(&mut self, e: Expression) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `a - b`, dropping trivially zero operands.
fn difference(a: Expression, b: Expression) -> Expression {
    match (is_trivially_zero(&a), is_trivially_zero(&b)) {
        (_, true) => a,
        (true, false) => -b,
        (false, false) => a - b,
    }
}

/// `a / b`, reduced to zero if `a` is trivially zero.
fn quotient(a: Expression, b: Expression) -> Expression {
    if is_trivially_zero(&a) {
        Expression::constant(0.0)
    } else {
        a / b
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(f: &Expression, g: &Expression, with: &str) -> Result<Expression> {
    let mut sum = SumBuilder::default();
    sum.add(derivative(f, with)?);
    sum.add(derivative(g, with)?);
    Ok(sum.into())
}

/// `(f * g)' = f' * g + f * g'`
fn product_rule(f: &Expression, g: &Expression, with: &str) -> Result<Expression> {
    let (df, dg) = (derivative(f, with)?, derivative(g, with)?);

    let mut left = MultBuilder::default();
    left.mult(df);
    left.mult(g.clone());

    let mut right = MultBuilder::default();
    right.mult(f.clone());
    right.mult(dg);

    let mut sum = SumBuilder::default();
    sum.add(left.into());
    sum.add(right.into());
    Ok(sum.into())
}

/// `(f / g)' = (f' * g - f * g') / g^2`
///
/// If `g` is constant, this is just `f' / g`.
fn quotient_rule(f: &Expression, g: &Expression, with: &str) -> Result<Expression> {
    let df = derivative(f, with)?;
    if g.is_constant_wrt(with) {
        return Ok(quotient(df, g.clone()));
    }
    let dg = derivative(g, with)?;

    let mut left = MultBuilder::default();
    left.mult(df);
    left.mult(g.clone());

    let mut right = MultBuilder::default();
    right.mult(f.clone());
    right.mult(dg);

    Ok(quotient(
        difference(left.into(), right.into()),
        Expression::pow(g.clone(), Expression::constant(2.0)),
    ))
}

/// `(u mod v)' = u' - (v * floor(u / v))' = u' - v' * floor(u / v)`
///
/// The derivative of `floor` is zero wherever it is defined.
fn modulo_rule(u: &Expression, v: &Expression, with: &str) -> Result<Expression> {
    let du = derivative(u, with)?;
    let dv = derivative(v, with)?;

    let mut product = MultBuilder::default();
    product.mult(dv);
    product.mult(Expression::floor(u.clone() / v.clone()));

    Ok(difference(du, product.into()))
}

/// Returns `ln(base)`, or `1` if the base is `e`.
fn ln_of(base: &Expression) -> Expression {
    if Euler::specialize(base).is_some() {
        Expression::constant(1.0)
    } else {
        Expression::ln(base.clone())
    }
}

/// Differentiates `f^g`:
///
/// - `(f^c)' = c * f^(c - 1) * f'` when the exponent is constant (the power rule),
/// - `(a^g)' = a^g * ln(a) * g'` when the base is constant,
/// - `(f^g)' = f^g * (g' * ln(f) + g * f' / f)` otherwise.
fn power_rule(f: &Expression, g: &Expression, with: &str) -> Result<Expression> {
    if g.is_constant_wrt(with) {
        let df = derivative(f, with)?;
        let lowered = match g.as_number() {
            Some(n) => Expression::constant(n - 1.0),
            None => g.clone() - Expression::constant(1.0),
        };

        let mut product = MultBuilder::default();
        product.mult(g.clone());
        product.mult(Expression::pow(f.clone(), lowered));
        product.mult(df);
        return Ok(product.into());
    }

    if f.is_constant_wrt(with) {
        let dg = derivative(g, with)?;

        let mut product = MultBuilder::default();
        product.mult(Expression::pow(f.clone(), g.clone()));
        product.mult(ln_of(f));
        product.mult(dg);
        return Ok(product.into());
    }

    let (df, dg) = (derivative(f, with)?, derivative(g, with)?);

    let mut exponent_term = MultBuilder::default();
    exponent_term.mult(dg);
    exponent_term.mult(ln_of(f));

    let mut base_term = MultBuilder::default();
    base_term.mult(g.clone());
    base_term.mult(quotient(df, f.clone()));

    let mut sum = SumBuilder::default();
    sum.add(exponent_term.into());
    sum.add(base_term.into());

    let mut product = MultBuilder::default();
    product.mult(Expression::pow(f.clone(), g.clone()));
    product.mult(sum.into());
    Ok(product.into())
}

/// Computes the derivative of the given expression with respect to the variable `with`.
///
/// Returns [`Err`] with [`UndefinedOperation`] if the expression contains a node with no
/// derivative: the impulse, a summation, or an integral transform.
pub fn derivative(f: &Expression, with: &str) -> Result<Expression> {
    let expr = match f {
        Expression::Primary(Primary::Impulse) => {
            return Err(UndefinedOperation::new(
                "differentiate",
                f,
                "the impulse has no derivative",
            ).into());
        },
        Expression::Primary(Primary::Variable(name)) if name == with => Expression::constant(1.0),
        Expression::Primary(_) => Expression::constant(0.0),
        Expression::Unary(op, operand) => function::function_derivative(*op, operand, with)?,
        Expression::Binary(op, lhs, rhs) => match op {
            BinOp::Add => sum_rule(lhs, rhs, with)?,
            BinOp::Subtract => difference(derivative(lhs, with)?, derivative(rhs, with)?),
            BinOp::Multiply => product_rule(lhs, rhs, with)?,
            BinOp::Divide => quotient_rule(lhs, rhs, with)?,
            BinOp::Modulo => modulo_rule(lhs, rhs, with)?,
            BinOp::Exponent => power_rule(lhs, rhs, with)?,
        },
        Expression::Bounded(_) => {
            return Err(UndefinedOperation::new(
                "differentiate",
                f,
                "summations and integral transforms have no symbolic derivative",
            ).into());
        },
    };

    if is_trivially_zero(&expr) {
        Ok(Expression::constant(0.0))
    } else {
        Ok(expr)
    }
}

impl Expression {
    /// Computes the derivative of the expression with respect to the given variable. See
    /// [`derivative`].
    pub fn differentiate(&self, with: &str) -> Result<Expression> {
        derivative(self, with)
    }
}
