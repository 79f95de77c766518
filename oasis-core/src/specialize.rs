//! Shape-directed pattern matching on expressions.
//!
//! Rewrite rules need to ask questions like "is this a multiplication whose right operand is the
//! number one?" and, if so, get at the left operand. The [`Specialize`] trait answers that
//! question: a type implementing it describes a *shape* of expression, and
//! [`Specialize::specialize`] either fails (the expression does not have that shape) or produces
//! a typed view of the expression, borrowing its parts.
//!
//! Shapes nest. `Multiply<&Expression, One>` matches any multiplication whose right operand is
//! the number one, and `Exponent<Euler, Multiply<Imag, Pi>>` matches exactly `e^(i * π)`.
//! Specializing never allocates or copies; only the leaf views copy a number out.
//!
//! The [`Generalize`] trait goes the other way, producing an owned [`Expression`] from a view.
//! This is where the deep copy of any borrowed subtree happens.
//!
//! ```
//! use oasis_core::expr::Expression;
//! use oasis_core::specialize::{Multiply, One, Specialize};
//!
//! let expr = Expression::variable("x") * Expression::constant(1.0);
//! let view = Multiply::<&Expression, One>::specialize(&expr).unwrap();
//! assert_eq!(view.lhs, &Expression::variable("x"));
//! ```

use crate::expr::{BinOp, Bounded, BoundedOp, Constant, Expression, Primary, UnaryOp};

/// A shape that an [`Expression`] may be viewed as.
pub trait Specialize<'a>: Sized {
    /// Returns the view of the expression, or [`None`] if the expression does not have this
    /// shape.
    fn specialize(expr: &'a Expression) -> Option<Self>;
}

/// A view that can be turned back into an owned [`Expression`].
pub trait Generalize {
    /// Produces the owned expression, copying any borrowed parts.
    fn generalize(self) -> Expression;
}

impl Expression {
    /// Views the expression as the given shape. See [`Specialize`].
    pub fn specialize<'a, T: Specialize<'a>>(&'a self) -> Option<T> {
        T::specialize(self)
    }
}

/// Any expression at all.
impl<'a> Specialize<'a> for &'a Expression {
    fn specialize(expr: &'a Expression) -> Option<Self> {
        Some(expr)
    }
}

impl Generalize for &Expression {
    fn generalize(self) -> Expression {
        self.clone()
    }
}

impl Generalize for Expression {
    fn generalize(self) -> Expression {
        self
    }
}

/// A [`Constant`], symbolic or numeric.
impl<'a> Specialize<'a> for &'a Constant {
    fn specialize(expr: &'a Expression) -> Option<Self> {
        match expr {
            Expression::Primary(Primary::Constant(constant)) => Some(constant),
            _ => None,
        }
    }
}

impl Generalize for &Constant {
    fn generalize(self) -> Expression {
        Expression::from(self.clone())
    }
}

/// A number that may be folded: a [`Primary::Real`], or a numeric [`Constant`]. Generalizes to a
/// [`Primary::Real`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Num(pub f64);

impl<'a> Specialize<'a> for Num {
    fn specialize(expr: &'a Expression) -> Option<Self> {
        expr.as_number().map(Num)
    }
}

impl Generalize for Num {
    fn generalize(self) -> Expression {
        Expression::real(self.0)
    }
}

/// A number that may be folded and that is exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zero;

impl<'a> Specialize<'a> for Zero {
    fn specialize(expr: &'a Expression) -> Option<Self> {
        (expr.as_number()? == 0.0).then_some(Zero)
    }
}

impl Generalize for Zero {
    fn generalize(self) -> Expression {
        Expression::constant(0.0)
    }
}

/// A number that may be folded and that is exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct One;

impl<'a> Specialize<'a> for One {
    fn specialize(expr: &'a Expression) -> Option<Self> {
        (expr.as_number()? == 1.0).then_some(One)
    }
}

impl Generalize for One {
    fn generalize(self) -> Expression {
        Expression::constant(1.0)
    }
}

/// A [`Primary::Variable`], viewed as its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Var<'a>(pub &'a str);

impl<'a> Specialize<'a> for Var<'a> {
    fn specialize(expr: &'a Expression) -> Option<Self> {
        expr.as_variable().map(Var)
    }
}

impl Generalize for Var<'_> {
    fn generalize(self) -> Expression {
        Expression::variable(self.0)
    }
}

/// The imaginary unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Imag;

impl<'a> Specialize<'a> for Imag {
    fn specialize(expr: &'a Expression) -> Option<Self> {
        matches!(expr, Expression::Primary(Primary::Imaginary)).then_some(Imag)
    }
}

impl Generalize for Imag {
    fn generalize(self) -> Expression {
        Expression::imaginary()
    }
}

/// The symbolic constant `π`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pi;

impl<'a> Specialize<'a> for Pi {
    fn specialize(expr: &'a Expression) -> Option<Self> {
        match expr {
            Expression::Primary(Primary::Constant(constant)) if constant.is_pi() => Some(Pi),
            _ => None,
        }
    }
}

impl Generalize for Pi {
    fn generalize(self) -> Expression {
        Expression::pi()
    }
}

/// The symbolic constant `e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Euler;

impl<'a> Specialize<'a> for Euler {
    fn specialize(expr: &'a Expression) -> Option<Self> {
        match expr {
            Expression::Primary(Primary::Constant(constant)) if constant.is_e() => Some(Euler),
            _ => None,
        }
    }
}

impl Generalize for Euler {
    fn generalize(self) -> Expression {
        Expression::e()
    }
}

/// Defines a view of a binary operator node, with typed views of both operands.
macro_rules! binary_shape {
    ($(#[$attr:meta])* $name:ident => $op:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name<L, R> {
            /// The left operand.
            pub lhs: L,

            /// The right operand.
            pub rhs: R,
        }

        impl<L, R> $name<L, R> {
            /// Creates the view from its operands.
            pub fn new(lhs: L, rhs: R) -> Self {
                Self { lhs, rhs }
            }
        }

        impl<'a, L: Specialize<'a>, R: Specialize<'a>> Specialize<'a> for $name<L, R> {
            fn specialize(expr: &'a Expression) -> Option<Self> {
                match expr {
                    Expression::Binary(BinOp::$op, lhs, rhs) => Some(Self {
                        lhs: L::specialize(lhs)?,
                        rhs: R::specialize(rhs)?,
                    }),
                    _ => None,
                }
            }
        }

        impl<L: Generalize, R: Generalize> Generalize for $name<L, R> {
            fn generalize(self) -> Expression {
                Expression::binary(BinOp::$op, self.lhs.generalize(), self.rhs.generalize())
            }
        }
    };
}

/// Adds [`specialize_commutative`] to the view of a commutative binary operator node.
macro_rules! commutative_shape {
    ($name:ident => $op:ident) => {
        impl<'a, L: Specialize<'a>, R: Specialize<'a>> $name<L, R> {
            /// Like [`Specialize::specialize`], but also tries the operands in swapped order.
            /// The left view always binds to the operand matching `L`, so the rule using the view
            /// does not have to care about the order the operands appeared in.
            pub fn specialize_commutative(expr: &'a Expression) -> Option<Self> {
                Self::specialize(expr).or_else(|| match expr {
                    Expression::Binary(BinOp::$op, lhs, rhs) => Some(Self {
                        lhs: L::specialize(rhs)?,
                        rhs: R::specialize(lhs)?,
                    }),
                    _ => None,
                })
            }
        }
    };
}

binary_shape!(/** `lhs + rhs` */ Add => Add);
binary_shape!(/** `lhs - rhs` */ Subtract => Subtract);
binary_shape!(/** `lhs * rhs` */ Multiply => Multiply);
binary_shape!(/** `lhs / rhs` */ Divide => Divide);
binary_shape!(/** `lhs % rhs` */ Modulo => Modulo);
binary_shape!(/** `lhs ^ rhs` */ Exponent => Exponent);
commutative_shape!(Add => Add);
commutative_shape!(Multiply => Multiply);

/// Defines a view of a unary operator node, with a typed view of the operand.
macro_rules! unary_shape {
    ($(#[$attr:meta])* $name:ident => $op:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name<O> {
            /// The operand.
            pub operand: O,
        }

        impl<'a, O: Specialize<'a>> Specialize<'a> for $name<O> {
            fn specialize(expr: &'a Expression) -> Option<Self> {
                match expr {
                    Expression::Unary(UnaryOp::$op, operand) => Some(Self {
                        operand: O::specialize(operand)?,
                    }),
                    _ => None,
                }
            }
        }

        impl<O: Generalize> Generalize for $name<O> {
            fn generalize(self) -> Expression {
                Expression::unary(UnaryOp::$op, self.operand.generalize())
            }
        }
    };
}

unary_shape!(/** `sin(operand)` */ Sin => Sin);
unary_shape!(/** `cos(operand)` */ Cos => Cos);
unary_shape!(/** `tan(operand)` */ Tan => Tan);
unary_shape!(/** `arctan(operand)` */ ArcTan => ArcTan);
unary_shape!(/** `ln(operand)` */ Ln => Ln);
unary_shape!(/** `floor(operand)` */ Floor => Floor);

/// Defines a view of a bounded operator node, with a typed view of the operand. The bounds are
/// borrowed as-is.
macro_rules! bounded_shape {
    ($(#[$attr:meta])* $name:ident => $op:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name<'a, O> {
            /// The operand.
            pub operand: O,

            /// The variable bound by the operator.
            pub var: &'a str,

            /// The lower bound, if present.
            pub lower: Option<&'a Expression>,

            /// The upper bound, if present.
            pub upper: Option<&'a Expression>,
        }

        impl<'a, O> $name<'a, O> {
            /// Returns true if the lower bound is present.
            pub fn has_lower_bound(&self) -> bool {
                self.lower.is_some()
            }

            /// Returns true if the upper bound is present.
            pub fn has_upper_bound(&self) -> bool {
                self.upper.is_some()
            }
        }

        impl<'a, O: Specialize<'a>> Specialize<'a> for $name<'a, O> {
            fn specialize(expr: &'a Expression) -> Option<Self> {
                match expr {
                    Expression::Bounded(bounded) if bounded.op == BoundedOp::$op => Some(Self {
                        operand: O::specialize(&bounded.operand)?,
                        var: &bounded.var,
                        lower: bounded.lower_bound(),
                        upper: bounded.upper_bound(),
                    }),
                    _ => None,
                }
            }
        }

        impl<O: Generalize> Generalize for $name<'_, O> {
            fn generalize(self) -> Expression {
                Expression::Bounded(Bounded {
                    op: BoundedOp::$op,
                    var: self.var.to_string(),
                    operand: Box::new(self.operand.generalize()),
                    lower: self.lower.cloned().map(Box::new),
                    upper: self.upper.cloned().map(Box::new),
                })
            }
        }
    };
}

bounded_shape!(/** `Σ(lower, upper, operand)` */ Sum => Sum);
bounded_shape!(/** The Fourier transform of the operand. */ Fourier => Fourier);
bounded_shape!(/** The Laplace transform of the operand. */ Laplace => Laplace);

/// Returns the factors of a chain of multiplications, in left-to-right order. An expression that
/// is not a multiplication is a single factor.
///
/// `a * (b * c) * d` -> `[a, b, c, d]`
pub fn factors(expr: &Expression) -> Vec<&Expression> {
    fn collect<'a>(expr: &'a Expression, out: &mut Vec<&'a Expression>) {
        match expr {
            Expression::Binary(BinOp::Multiply, lhs, rhs) => {
                collect(lhs, out);
                collect(rhs, out);
            },
            _ => out.push(expr),
        }
    }

    let mut out = Vec::new();
    collect(expr, &mut out);
    out
}
