//! Property-based tests for the rewriting driver.

use oasis_core::{
    error::Error,
    expr::{BinOp, Expression, UnaryOp},
    markup,
    Bindings,
    Simplifier,
};
use proptest::prelude::*;

/// Bindings for every variable the strategies generate.
fn bindings() -> Bindings {
    Bindings::from_iter([("x", 1.5), ("y", -2.0)])
}

fn small_number() -> impl Strategy<Value = Expression> {
    prop_oneof![
        (-4i32..=4).prop_map(|n| Expression::constant(n as f64)),
        (-4i32..=4).prop_map(|n| Expression::real(n as f64 / 2.0)),
    ]
}

fn non_finite_number() -> impl Strategy<Value = Expression> {
    prop_oneof![
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ].prop_flat_map(|value| prop_oneof![
        Just(Expression::constant(value)),
        Just(Expression::real(value)),
    ])
}

fn variable() -> impl Strategy<Value = Expression> {
    prop_oneof![Just(Expression::variable("x")), Just(Expression::variable("y"))]
}

/// Expressions that evaluate to a real number wherever they are defined.
///
/// Exponents are small integer constants, which keeps every intermediate value far from
/// overflowing.
fn real_expression() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        3 => small_number(),
        3 => variable(),
        1 => Just(Expression::pi()),
    ];

    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (
                prop_oneof![
                    Just(BinOp::Add),
                    Just(BinOp::Subtract),
                    Just(BinOp::Multiply),
                    Just(BinOp::Divide),
                ],
                inner.clone(),
                inner.clone(),
            ).prop_map(|(op, lhs, rhs)| Expression::binary(op, lhs, rhs)),
            (inner.clone(), 0i32..=3)
                .prop_map(|(base, n)| Expression::pow(base, Expression::constant(n as f64))),
            (
                prop_oneof![
                    Just(UnaryOp::Sin),
                    Just(UnaryOp::Cos),
                    Just(UnaryOp::Tan),
                    Just(UnaryOp::ArcTan),
                ],
                inner,
            ).prop_map(|(op, operand)| Expression::unary(op, operand)),
        ]
    })
}

/// Any expression, including nodes with no real value and nodes that rewriting may reject.
fn any_expression() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        3 => small_number(),
        3 => variable(),
        1 => Just(Expression::pi()),
        1 => Just(Expression::e()),
        1 => Just(Expression::imaginary()),
        1 => Just(Expression::impulse()),
    ];

    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (
                prop_oneof![
                    Just(BinOp::Add),
                    Just(BinOp::Subtract),
                    Just(BinOp::Multiply),
                    Just(BinOp::Divide),
                    Just(BinOp::Modulo),
                    Just(BinOp::Exponent),
                ],
                inner.clone(),
                inner.clone(),
            ).prop_map(|(op, lhs, rhs)| Expression::binary(op, lhs, rhs)),
            (
                prop_oneof![
                    Just(UnaryOp::Sin),
                    Just(UnaryOp::Cos),
                    Just(UnaryOp::Tan),
                    Just(UnaryOp::ArcTan),
                    Just(UnaryOp::Ln),
                    Just(UnaryOp::Floor),
                ],
                inner.clone(),
            ).prop_map(|(op, operand)| Expression::unary(op, operand)),
            (0i32..=3, 0i32..=5, inner.clone()).prop_map(|(lower, upper, operand)| {
                Expression::sum(
                    Expression::constant(lower as f64),
                    Expression::constant(upper as f64),
                    operand,
                )
            }),
            (0i32..=3).prop_map(|upper| Expression::sum(
                Expression::constant(0.0),
                Expression::constant(upper as f64),
                Expression::variable("i"),
            )),
            inner.clone().prop_map(Expression::fourier),
            inner.prop_map(Expression::laplace),
        ]
    })
}

/// Expressions whose leaves and summation bounds may be `NaN` or infinite.
fn non_finite_expression() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        2 => non_finite_number(),
        2 => small_number(),
        2 => variable(),
        1 => Just(Expression::pi()),
        1 => Just(Expression::imaginary()),
    ];

    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (
                prop_oneof![
                    Just(BinOp::Add),
                    Just(BinOp::Subtract),
                    Just(BinOp::Multiply),
                    Just(BinOp::Divide),
                    Just(BinOp::Modulo),
                    Just(BinOp::Exponent),
                ],
                inner.clone(),
                inner.clone(),
            ).prop_map(|(op, lhs, rhs)| Expression::binary(op, lhs, rhs)),
            (
                prop_oneof![Just(UnaryOp::Sin), Just(UnaryOp::Ln), Just(UnaryOp::Floor)],
                inner.clone(),
            ).prop_map(|(op, operand)| Expression::unary(op, operand)),
            (non_finite_number(), small_number(), inner).prop_map(|(lower, upper, operand)| {
                Expression::sum(lower, upper, operand)
            }),
            non_finite_number().prop_map(|upper| Expression::sum(
                Expression::constant(0.0),
                upper,
                Expression::variable("i"),
            )),
        ]
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #[test]
    fn rewriting_terminates(expr in any_expression()) {
        match Simplifier::new().simplify(expr) {
            Ok(_) | Err(Error::DivisionByZero(_)) => {},
            Err(err) => prop_assert!(false, "unexpected error: {}", err),
        }
    }

    #[test]
    fn normal_forms_are_fixpoints(expr in any_expression()) {
        if let Ok(result) = Simplifier::new().simplify(expr) {
            prop_assert_eq!(result.simplify(), Ok(result.clone()));

            let mut again = Simplifier::new();
            prop_assert_eq!(again.simplify(result.clone()), Ok(result));
            prop_assert_eq!(again.graph().len(), 1);
        }
    }

    #[test]
    fn history_is_a_chain(expr in any_expression()) {
        let mut simplifier = Simplifier::new();
        if let Ok(result) = simplifier.simplify(expr.clone()) {
            let graph = simplifier.graph();
            prop_assert_eq!(graph.edges().len() + 1, graph.len());

            let mut vertices = graph.vertices().map(|(_, node)| node.expression());
            prop_assert_eq!(vertices.next(), Some(&expr));
            prop_assert_eq!(vertices.last().unwrap_or(&expr), &result);
            for &(from, to) in graph.edges() {
                prop_assert_eq!(to.index(), from.index() + 1);
                prop_assert_ne!(graph.node(from), graph.node(to));
            }
        }
    }

    #[test]
    fn parallel_matches_sequential(expr in any_expression()) {
        let mut sequential = Simplifier::new();
        let mut parallel = Simplifier::parallel();
        prop_assert_eq!(sequential.simplify(expr.clone()), parallel.simplify(expr));
        prop_assert_eq!(sequential.graph(), parallel.graph());
    }

    #[test]
    fn rewriting_preserves_value(expr in real_expression()) {
        let bindings = bindings();
        let expected = match expr.evaluate(&bindings) {
            Ok(value) if value.is_finite() => value,
            _ => return Ok(()),
        };

        let result = Simplifier::new().simplify(expr.clone());
        prop_assert!(result.is_ok(), "`{}` failed to rewrite: {:?}", expr, result);
        let simplified = result.unwrap_or(expr);
        let actual = simplified.evaluate(&bindings);
        prop_assert!(
            matches!(actual, Ok(value) if close(value, expected)),
            "`{}` evaluates to {:?}, expected {}",
            simplified,
            actual,
            expected,
        );
    }

    #[test]
    fn non_finite_leaves_terminate(expr in non_finite_expression()) {
        prop_assert_eq!(expr.clone(), expr.clone());

        let mut sequential = Simplifier::new();
        let result = sequential.simplify(expr.clone());
        if let Ok(result) = &result {
            prop_assert_eq!(result.simplify(), Ok(result.clone()));
        }

        let mut parallel = Simplifier::parallel();
        prop_assert_eq!(parallel.simplify(expr.clone()), result);
        prop_assert_eq!(sequential.graph(), parallel.graph());

        // evaluation either fails or gives some number, but always returns
        let _ = expr.evaluate(&bindings());

        let element = markup::serialize(&expr);
        prop_assert_eq!(markup::deserialize(&element), Ok(expr));
    }

    #[test]
    fn markup_round_trip(expr in any_expression()) {
        let element = markup::serialize(&expr);
        prop_assert_eq!(markup::deserialize(&element), Ok(expr));
    }
}
