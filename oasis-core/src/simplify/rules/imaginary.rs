//! Rewrite rules for expressions involving the imaginary unit, including Euler's identity.

use crate::{
    expr::Expression,
    simplify::step::Step,
    specialize::{factors, Euler, Exponent, Imag, Multiply, Num, Pi, Specialize},
    step_collector::StepCollector,
};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// How close an angle must be to a multiple of `π/2` to be treated as one.
const ANGLE_TOLERANCE: f64 = 1e-9;

// i^..
// 0 1 2  3
// 1 i -1 -i
//
// 4 5 6  7
// 1 i -1 -i

/// Returns the power of the imaginary unit with the given remainder modulo 4, and the step that
/// names it.
fn i_cycle(remainder: u8) -> (Expression, Step) {
    match remainder % 4 {
        0 => (Expression::constant(1.0), Step::I0),
        1 => (Expression::imaginary(), Step::I1),
        2 => (Expression::constant(-1.0), Step::I2),
        _ => (Expression::constant(-1.0) * Expression::imaginary(), Step::I3),
    }
}

/// `i*i = -1`
pub fn i_squared(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    Multiply::<Imag, Imag>::specialize(expr)?;
    step_collector.push(Step::ISquared);
    Some(Expression::constant(-1.0))
}

/// `i^(4n) = 1`
/// `i^(4n+1) = i`
/// `i^(4n+2) = -1`
/// `i^(4n+3) = -i`
pub fn i_pow(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Exponent::<Imag, Num>::specialize(expr)?;
    let Num(exponent) = view.rhs;
    if exponent.fract() != 0.0 {
        return None;
    }

    let (result, step) = i_cycle(exponent.rem_euclid(4.0) as u8);
    step_collector.push(step);
    Some(result)
}

/// Euler's identity, `e^(iπc)`, where the exponent is a product of the imaginary unit, `π`, and
/// any number of numeric factors `c`, in any order.
///
/// If `cπ` is a multiple of `π/2`, the power is replaced by `1`, `i`, `-1` or `-i`. Otherwise, the
/// exponent is normalized to `i * ((c mod 2) * π)`.
pub fn euler(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Exponent::<Euler, &Expression>::specialize(expr)?;

    let (mut imaginary, mut pi, mut coefficient) = (0, 0, 1.0);
    for factor in factors(view.rhs) {
        if Imag::specialize(factor).is_some() {
            imaginary += 1;
        } else if Pi::specialize(factor).is_some() {
            pi += 1;
        } else {
            coefficient *= Num::specialize(factor)?.0;
        }
    }
    if imaginary != 1 || pi != 1 || !coefficient.is_finite() {
        return None;
    }

    let quarter_turns = (coefficient * PI).rem_euclid(TAU) / FRAC_PI_2;
    let nearest = quarter_turns.round();
    if (quarter_turns - nearest).abs() < ANGLE_TOLERANCE {
        let (result, _) = i_cycle(nearest as u8);
        step_collector.push(Step::EulerIdentity);
        return Some(result);
    }

    let normalized = Expression::pow(
        Expression::e(),
        Expression::imaginary() * (Expression::real(coefficient.rem_euclid(2.0)) * Expression::pi()),
    );
    if &normalized == expr {
        return None;
    }

    step_collector.push(Step::EulerNormalize);
    Some(normalized)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn euler_power(exponent: Expression) -> Expression {
        Expression::pow(Expression::e(), exponent)
    }

    #[test]
    fn euler_identity() {
        let expr = euler_power(Expression::imaginary() * Expression::pi());
        assert_eq!(euler(&expr, &mut ()), Some(Expression::constant(-1.0)));

        // order of the factors does not matter
        let expr = euler_power(Expression::pi() * Expression::imaginary());
        assert_eq!(euler(&expr, &mut ()), Some(Expression::constant(-1.0)));
    }

    #[test]
    fn euler_quadrants() {
        let cases = [
            (0.5, Expression::imaginary()),
            (2.0, Expression::constant(1.0)),
            (1.5, Expression::constant(-1.0) * Expression::imaginary()),
            (-0.5, Expression::constant(-1.0) * Expression::imaginary()),
            (4.0, Expression::constant(1.0)),
        ];

        for (c, expected) in cases {
            let expr = euler_power(
                Expression::real(c) * (Expression::imaginary() * Expression::pi()),
            );
            assert_eq!(euler(&expr, &mut ()), Some(expected), "c = {}", c);
        }
    }

    #[test]
    fn euler_normalizes_other_angles() {
        let expr = euler_power(
            Expression::pi() * (Expression::constant(2.25) * Expression::imaginary()),
        );
        let normalized = euler(&expr, &mut ()).unwrap();
        assert_eq!(normalized, euler_power(
            Expression::imaginary() * (Expression::real(0.25) * Expression::pi()),
        ));

        // already normalized
        assert_eq!(euler(&normalized, &mut ()), None);
    }

    #[test]
    fn euler_needs_exactly_one_i_and_pi() {
        let expr = euler_power(Expression::imaginary() * Expression::variable("x"));
        assert_eq!(euler(&expr, &mut ()), None);

        let expr = euler_power(
            Expression::imaginary() * (Expression::pi() * Expression::pi()),
        );
        assert_eq!(euler(&expr, &mut ()), None);
    }

    #[test]
    fn powers_of_i() {
        let mut steps = Vec::new();
        let cases = [
            (4.0, Expression::constant(1.0)),
            (5.0, Expression::imaginary()),
            (6.0, Expression::constant(-1.0)),
            (-1.0, Expression::constant(-1.0) * Expression::imaginary()),
        ];
        for (n, expected) in cases {
            let expr = Expression::pow(Expression::imaginary(), Expression::real(n));
            assert_eq!(i_pow(&expr, &mut steps), Some(expected));
        }
        assert_eq!(steps, vec![Step::I0, Step::I1, Step::I2, Step::I3]);

        let expr = Expression::pow(Expression::imaginary(), Expression::real(0.5));
        assert_eq!(i_pow(&expr, &mut ()), None);
    }

    #[test]
    fn i_times_i() {
        let expr = Expression::imaginary() * Expression::imaginary();
        assert_eq!(i_squared(&expr, &mut ()), Some(Expression::constant(-1.0)));
    }
}
