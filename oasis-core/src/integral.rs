//! Symbolic integration.
//!
//! Only a small catalogue of antiderivatives is known: linearity, constant multiples, the power
//! rule, exponentials of a constant base, and `sin` / `cos` of the variable itself. Anything else
//! fails with [`UndefinedOperation`]. No constant of integration is added.

use crate::{
    error::{Result, UndefinedOperation},
    expr::{BinOp, Expression, Primary},
    specialize::{Cos, Euler, Exponent, Num, Sin, Specialize, Var},
};

fn undefined(f: &Expression, reason: &str) -> crate::error::Error {
    UndefinedOperation::new("integrate", f, reason).into()
}

/// Integrates `x^n`, `a^x` and `e^x`, where `x` is the variable of integration.
fn integrate_power(f: &Expression, with: &str) -> Option<Expression> {
    let x = Expression::variable(with);

    if let Some(Exponent { lhs: Var(base), rhs: Num(n) }) = f.specialize() {
        if base != with {
            return None;
        }
        if n == -1.0 {
            return Some(Expression::ln(x));
        }
        let raised = Expression::constant(n + 1.0);
        return Some(Expression::pow(x, raised.clone()) / raised);
    }

    let view = Exponent::<&Expression, Var>::specialize(f)?;
    if view.rhs.0 != with || !view.lhs.is_constant_wrt(with) {
        return None;
    }
    if Euler::specialize(view.lhs).is_some() {
        Some(f.clone())
    } else {
        Some(f.clone() / Expression::ln(view.lhs.clone()))
    }
}

/// Integrates `sin(x)` and `cos(x)`, where `x` is the variable of integration.
fn integrate_trigonometric(f: &Expression, with: &str) -> Option<Expression> {
    let x = Expression::variable(with);
    if let Some(Sin { operand: Var(var) }) = f.specialize() {
        return (var == with).then(|| -Expression::cos(x));
    }
    if let Some(Cos { operand: Var(var) }) = f.specialize() {
        return (var == with).then(|| Expression::sin(x));
    }
    None
}

/// Computes the indefinite integral of the given expression with respect to the variable `with`.
///
/// Returns [`Err`] with [`UndefinedOperation`] if no rule in the catalogue applies, or if the
/// expression contains a node with no integral (the impulse, modulo, a summation, or an integral
/// transform).
pub fn integral(f: &Expression, with: &str) -> Result<Expression> {
    let x = || Expression::variable(with);

    match f {
        Expression::Primary(Primary::Impulse) => {
            Err(undefined(f, "the impulse has no integral"))
        },
        Expression::Binary(BinOp::Modulo, ..) => Err(undefined(f, "modulo has no integral")),
        Expression::Bounded(_) => {
            Err(undefined(f, "summations and integral transforms have no symbolic integral"))
        },

        // ∫c dx = xc
        _ if f.is_constant_wrt(with) => Ok(x() * f.clone()),

        // ∫x dx = x^2 / 2
        Expression::Primary(Primary::Variable(_)) => {
            Ok(Expression::pow(x(), Expression::constant(2.0)) / Expression::constant(2.0))
        },

        Expression::Binary(BinOp::Add, lhs, rhs) => Ok(integral(lhs, with)? + integral(rhs, with)?),
        Expression::Binary(BinOp::Subtract, lhs, rhs) => Ok(integral(lhs, with)? - integral(rhs, with)?),

        // ∫cf dx = c∫f dx
        Expression::Binary(BinOp::Multiply, lhs, rhs) if lhs.is_constant_wrt(with) => {
            Ok(lhs.as_ref().clone() * integral(rhs, with)?)
        },
        Expression::Binary(BinOp::Multiply, lhs, rhs) if rhs.is_constant_wrt(with) => {
            Ok(integral(lhs, with)? * rhs.as_ref().clone())
        },

        // ∫f/c dx = (∫f dx) / c
        Expression::Binary(BinOp::Divide, lhs, rhs) if rhs.is_constant_wrt(with) => {
            Ok(integral(lhs, with)? / rhs.as_ref().clone())
        },

        // ∫c/x dx = c ln(x)
        Expression::Binary(BinOp::Divide, lhs, rhs)
            if lhs.is_constant_wrt(with) && rhs.as_variable() == Some(with) => {
            Ok(lhs.as_ref().clone() * Expression::ln(x()))
        },

        _ => integrate_power(f, with)
            .or_else(|| integrate_trigonometric(f, with))
            .ok_or_else(|| undefined(f, "no integration rule applies")),
    }
}

impl Expression {
    /// Computes the indefinite integral of the expression with respect to the given variable.
    /// See [`integral`].
    pub fn integrate(&self, with: &str) -> Result<Expression> {
        integral(self, with)
    }
}
