//! Rewrite rules for exponentiation.

use crate::{
    expr::Expression,
    simplify::step::Step,
    specialize::{Exponent, One, Specialize, Zero},
    step_collector::StepCollector,
};

/// `a^0 = 1`
pub fn power_zero(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    Exponent::<&Expression, Zero>::specialize(expr)?;
    step_collector.push(Step::PowerZero);
    Some(Expression::constant(1.0))
}

/// `a^1 = a`
pub fn power_one(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    let view = Exponent::<&Expression, One>::specialize(expr)?;
    step_collector.push(Step::PowerOne);
    Some(view.lhs.clone())
}

/// `1^a = 1`
pub fn one_power(expr: &Expression, step_collector: &mut dyn StepCollector<Step>) -> Option<Expression> {
    Exponent::<One, &Expression>::specialize(expr)?;
    step_collector.push(Step::OnePower);
    Some(Expression::constant(1.0))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expression {
        Expression::variable("x")
    }

    #[test]
    fn power_identities() {
        assert_eq!(
            power_zero(&Expression::pow(x(), Expression::real(0.0)), &mut ()),
            Some(Expression::constant(1.0)),
        );
        assert_eq!(power_one(&Expression::pow(x(), Expression::constant(1.0)), &mut ()), Some(x()));
        assert_eq!(
            one_power(&Expression::pow(Expression::constant(1.0), x()), &mut ()),
            Some(Expression::constant(1.0)),
        );
        assert_eq!(power_one(&Expression::pow(Expression::constant(1.0), x()), &mut ()), None);
    }
}
