//! The expression tree.
//!
//! Every expression is an [`Expression`], a closed sum type over all node shapes. The leaves of
//! the tree are [`Primary`] values (constants, variables, real literals, the imaginary unit and
//! the impulse). Operator nodes own their operands exclusively through [`Box`]es, so the tree is
//! always acyclic and no node is ever shared between two trees. Any conversion between trees
//! copies.
//!
//! # Structural equality
//!
//! The [`PartialEq`] implementation for [`Expression`] implements **structural equality**. Two
//! expressions are structurally equal if they have the same shape (the same variant and operator
//! kind), and all of their owned children are structurally equal, in the same order. Structural
//! equality never evaluates anything, so `2 + 3` and `5` are **not** structurally equal, and
//! neither are `x + y` and `y + x`.
//!
//! Structural equality is what the [`Simplifier`](crate::simplifier::Simplifier) uses to detect
//! that rewriting has reached a fixpoint.
//!
//! [`Constant`]s are the only exception to "compare everything": two constants are equal if their
//! values are equal, regardless of their display names.
//!
//! Numbers at the leaves compare with [`same_number`], so `NaN` is equal to itself and every
//! expression is equal to its own copy.

mod iter;

use iter::ExprIter;
use std::{cmp::Ordering, fmt, ops::{Add, Div, Mul, Neg, Rem, Sub}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A constant value with an optional symbolic name, such as `π` or `e`.
///
/// A constant without a name is a *numeric* constant, and is free to be folded together with other
/// numbers by the simplifier. A named constant is *symbolic*, and is never folded, so that `π`
/// survives simplification as `π` instead of turning into `3.141592653589793`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constant {
    value: f64,
    name: Option<String>,
}

impl Constant {
    /// Creates a numeric constant.
    pub fn new(value: f64) -> Self {
        Self { value, name: None }
    }

    /// Creates a symbolic constant with the given display name.
    pub fn named(value: f64, name: impl Into<String>) -> Self {
        Self { value, name: Some(name.into()) }
    }

    /// The constant `π`.
    pub fn pi() -> Self {
        Self::named(std::f64::consts::PI, PI_NAME)
    }

    /// Euler's number, `e`.
    pub fn e() -> Self {
        Self::named(std::f64::consts::E, E_NAME)
    }

    /// Returns the value of the constant.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the display name of the constant, if it is symbolic.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns true if the constant has a symbolic name.
    pub fn is_symbolic(&self) -> bool {
        self.name.is_some()
    }

    /// Returns true if this is the symbolic constant `π`.
    pub fn is_pi(&self) -> bool {
        self.name() == Some(PI_NAME) && self.value == std::f64::consts::PI
    }

    /// Returns true if this is the symbolic constant `e`.
    pub fn is_e(&self) -> bool {
        self.name() == Some(E_NAME) && self.value == std::f64::consts::E
    }
}

const PI_NAME: &str = "π";
const E_NAME: &str = "e";

/// Returns true if two leaf numbers are structurally equal: equal by `==`, or both `NaN`.
pub fn same_number(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Constants compare by value only; the name is for display.
impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        same_number(self.value, other.value)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.value),
        }
    }
}

/// A leaf of the expression tree, with no owned operands.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// A constant, such as `π`, `e`, or `5`.
    Constant(Constant),

    /// A named variable, such as `x`.
    Variable(String),

    /// An evaluated real number, usually the result of folding numbers together.
    Real(f64),

    /// The imaginary unit, `i`.
    Imaginary,

    /// The unit impulse (Dirac delta) `δ(t)`. It has no derivative or integral.
    Impulse,
}

impl PartialEq for Primary {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Constant(a), Self::Constant(b)) => a == b,
            (Self::Variable(a), Self::Variable(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => same_number(*a, *b),
            (Self::Imaginary, Self::Imaginary) | (Self::Impulse, Self::Impulse) => true,
            _ => false,
        }
    }
}

impl Primary {
    /// If this leaf is a number that may be folded (a [`Primary::Real`] or a numeric
    /// [`Constant`]), returns its value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Real(value) => Some(*value),
            Self::Constant(constant) if !constant.is_symbolic() => Some(constant.value()),
            _ => None,
        }
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(constant) => write!(f, "{}", constant),
            Self::Variable(name) => write!(f, "{}", name),
            Self::Real(value) => write!(f, "{}", value),
            Self::Imaginary => write!(f, "i"),
            Self::Impulse => write!(f, "δ(t)"),
        }
    }
}

/// The kind of a unary operator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOp {
    Sin,
    Cos,
    Tan,
    ArcTan,
    Ln,
    Floor,
}

impl UnaryOp {
    /// Returns the name of the function, as it is displayed.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::ArcTan => "arctan",
            Self::Ln => "ln",
            Self::Floor => "floor",
        }
    }

    /// Applies the function to a number.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Sin => value.sin(),
            Self::Cos => value.cos(),
            Self::Tan => value.tan(),
            Self::ArcTan => value.atan(),
            Self::Ln => value.ln(),
            Self::Floor => value.floor(),
        }
    }
}

/// The kind of a binary operator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponent,
}

impl BinOp {
    /// Returns the symbol of the operator, as it is displayed.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => " + ",
            Self::Subtract => " - ",
            Self::Multiply => " * ",
            Self::Divide => " / ",
            Self::Modulo => " % ",
            Self::Exponent => "^",
        }
    }

    /// Returns the precedence of the operator. Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide | Self::Modulo => 2,
            Self::Exponent => 3,
        }
    }

    /// Returns true if the order of the operands does not change the result.
    pub fn is_commutative(self) -> bool {
        matches!(self, Self::Add | Self::Multiply)
    }
}

/// The kind of a bounded unary operator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundedOp {
    Sum,
    Fourier,
    Laplace,
}

impl BoundedOp {
    /// The name of the variable the operator binds, when none is given.
    pub fn default_var(self) -> &'static str {
        match self {
            Self::Sum => "i",
            Self::Fourier => "ω",
            Self::Laplace => "s",
        }
    }
}

/// An operator with one operand and an optional lower and upper bound, such as a summation.
///
/// The bounds are optional; use [`Bounded::has_lower_bound`] and [`Bounded::has_upper_bound`] to
/// check for them before use.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounded {
    /// The kind of operator.
    pub op: BoundedOp,

    /// The variable bound by the operator, such as the index of a summation.
    pub var: String,

    /// The operand, such as the function being summed.
    pub operand: Box<Expression>,

    /// The lower bound.
    pub lower: Option<Box<Expression>>,

    /// The upper bound.
    pub upper: Option<Box<Expression>>,
}

impl Bounded {
    /// Returns true if the lower bound is present.
    pub fn has_lower_bound(&self) -> bool {
        self.lower.is_some()
    }

    /// Returns true if the upper bound is present.
    pub fn has_upper_bound(&self) -> bool {
        self.upper.is_some()
    }

    /// Returns the lower bound, if present.
    pub fn lower_bound(&self) -> Option<&Expression> {
        self.lower.as_deref()
    }

    /// Returns the upper bound, if present.
    pub fn upper_bound(&self) -> Option<&Expression> {
        self.upper.as_deref()
    }
}

/// A mathematical expression.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expression {
    /// A leaf value.
    Primary(Primary),

    /// A function of one operand, such as `tan(x)`.
    Unary(UnaryOp, Box<Expression>),

    /// An operator with a most-significant (left) and least-significant (right) operand.
    Binary(BinOp, Box<Expression>, Box<Expression>),

    /// An operator with one operand and optional bounds.
    Bounded(Bounded),
}

impl Expression {
    /// Creates a numeric [`Constant`].
    pub fn constant(value: f64) -> Self {
        Self::Primary(Primary::Constant(Constant::new(value)))
    }

    /// Creates a symbolic [`Constant`] with a display name.
    pub fn named_constant(value: f64, name: impl Into<String>) -> Self {
        Self::Primary(Primary::Constant(Constant::named(value, name)))
    }

    /// The constant `π`.
    pub fn pi() -> Self {
        Self::Primary(Primary::Constant(Constant::pi()))
    }

    /// The constant `e`.
    pub fn e() -> Self {
        Self::Primary(Primary::Constant(Constant::e()))
    }

    /// Creates a [`Primary::Real`].
    pub fn real(value: f64) -> Self {
        Self::Primary(Primary::Real(value))
    }

    /// Creates a [`Primary::Variable`].
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Variable(name.into()))
    }

    /// The imaginary unit.
    pub fn imaginary() -> Self {
        Self::Primary(Primary::Imaginary)
    }

    /// The unit impulse.
    pub fn impulse() -> Self {
        Self::Primary(Primary::Impulse)
    }

    /// Creates a unary operator node.
    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Self::Unary(op, Box::new(operand))
    }

    /// Creates a binary operator node.
    pub fn binary(op: BinOp, lhs: Expression, rhs: Expression) -> Self {
        Self::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Creates `base ^ exponent`.
    pub fn pow(base: Expression, exponent: Expression) -> Self {
        Self::binary(BinOp::Exponent, base, exponent)
    }

    /// Creates `sin(operand)`.
    pub fn sin(operand: Expression) -> Self {
        Self::unary(UnaryOp::Sin, operand)
    }

    /// Creates `cos(operand)`.
    pub fn cos(operand: Expression) -> Self {
        Self::unary(UnaryOp::Cos, operand)
    }

    /// Creates `tan(operand)`.
    pub fn tan(operand: Expression) -> Self {
        Self::unary(UnaryOp::Tan, operand)
    }

    /// Creates `arctan(operand)`.
    pub fn arctan(operand: Expression) -> Self {
        Self::unary(UnaryOp::ArcTan, operand)
    }

    /// Creates `ln(operand)`.
    pub fn ln(operand: Expression) -> Self {
        Self::unary(UnaryOp::Ln, operand)
    }

    /// Creates `floor(operand)`.
    pub fn floor(operand: Expression) -> Self {
        Self::unary(UnaryOp::Floor, operand)
    }

    /// Creates a bounded operator node binding the operator's default variable.
    pub fn bounded(
        op: BoundedOp,
        operand: Expression,
        lower: Option<Expression>,
        upper: Option<Expression>,
    ) -> Self {
        Self::Bounded(Bounded {
            op,
            var: op.default_var().to_string(),
            operand: Box::new(operand),
            lower: lower.map(Box::new),
            upper: upper.map(Box::new),
        })
    }

    /// Creates a summation of `function` over the index `i`, from `lower` to `upper` inclusive.
    pub fn sum(lower: Expression, upper: Expression, function: Expression) -> Self {
        Self::bounded(BoundedOp::Sum, function, Some(lower), Some(upper))
    }

    /// Creates a summation of `function` over the given index, from `lower` to `upper` inclusive.
    pub fn sum_over(
        index: impl Into<String>,
        lower: Expression,
        upper: Expression,
        function: Expression,
    ) -> Self {
        Self::Bounded(Bounded {
            op: BoundedOp::Sum,
            var: index.into(),
            operand: Box::new(function),
            lower: Some(Box::new(lower)),
            upper: Some(Box::new(upper)),
        })
    }

    /// Creates the Fourier transform of `operand`, without bounds.
    pub fn fourier(operand: Expression) -> Self {
        Self::bounded(BoundedOp::Fourier, operand, None, None)
    }

    /// Creates the Laplace transform of `operand`, without bounds.
    pub fn laplace(operand: Expression) -> Self {
        Self::bounded(BoundedOp::Laplace, operand, None, None)
    }

    /// If the expression is a number that may be folded, returns its value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Primary(primary) => primary.as_number(),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Variable`], returns its name.
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Variable(name)) => Some(name),
            _ => None,
        }
    }

    /// Returns true if the expression is a leaf.
    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Primary(_))
    }

    /// Returns the owned children of this node, in order: the operand of a unary node, the left
    /// and right operands of a binary node, or the operand and present bounds of a bounded node.
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Self::Primary(_) => Vec::new(),
            Self::Unary(_, operand) => vec![&**operand],
            Self::Binary(_, lhs, rhs) => vec![&**lhs, &**rhs],
            Self::Bounded(bounded) => {
                let mut children = vec![&*bounded.operand];
                children.extend(bounded.lower_bound());
                children.extend(bounded.upper_bound());
                children
            },
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns true if the variable with the given name appears anywhere in the expression.
    pub fn contains_variable(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_variable() == Some(name))
    }

    /// Returns true if any node of the expression has no calculus rules at all (the impulse,
    /// modulo, and the bounded operators).
    pub fn has_undefined_calculus(&self) -> bool {
        self.post_order_iter().any(|expr| matches!(
            expr,
            Self::Primary(Primary::Impulse)
                | Self::Binary(BinOp::Modulo, ..)
                | Self::Bounded(_)
        ))
    }

    /// Returns true if the expression is constant with respect to the given variable, and can be
    /// treated as a constant factor by the calculus rules.
    pub fn is_constant_wrt(&self, var: &str) -> bool {
        !self.contains_variable(var) && !self.has_undefined_calculus()
    }

    /// Returns the number of nodes in the expression.
    pub fn node_count(&self) -> usize {
        self.post_order_iter().count()
    }

    /// Returns the precedence of the expression, for the purposes of printing.
    fn precedence(&self) -> u8 {
        match self {
            Self::Binary(op, ..) => op.precedence(),
            _ => u8::MAX,
        }
    }

    /// Compares the precedence of this expression with another.
    ///
    /// This is used to determine if parentheses are needed around the given expression when
    /// printing.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Unary(op, operand) => write!(f, "{}({})", op.name(), operand),
            Self::Binary(op, lhs, rhs) => {
                let left_parens = match lhs.cmp_precedence(self) {
                    Ordering::Less => true,
                    Ordering::Equal => *op == BinOp::Exponent,
                    Ordering::Greater => false,
                };
                let right_parens = match rhs.cmp_precedence(self) {
                    Ordering::Less => true,
                    Ordering::Equal => match (op, &**rhs) {
                        (BinOp::Exponent, _) => false,
                        (op, Self::Binary(rhs_op, ..)) => !op.is_commutative() || op != rhs_op,
                        _ => true,
                    },
                    Ordering::Greater => false,
                };

                if left_parens {
                    write!(f, "({})", lhs)?;
                } else {
                    write!(f, "{}", lhs)?;
                }
                write!(f, "{}", op.symbol())?;
                if right_parens {
                    write!(f, "({})", rhs)
                } else {
                    write!(f, "{}", rhs)
                }
            },
            Self::Bounded(bounded) => match bounded.op {
                BoundedOp::Sum => {
                    let bound = |bound: Option<&Expression>| {
                        bound.map(ToString::to_string).unwrap_or_else(|| "_".to_string())
                    };
                    write!(f, "Σ(")?;
                    if bounded.var != bounded.op.default_var() {
                        write!(f, "{} = ", bounded.var)?;
                    }
                    write!(
                        f,
                        "{}, {}, {})",
                        bound(bounded.lower_bound()),
                        bound(bounded.upper_bound()),
                        bounded.operand,
                    )
                },
                BoundedOp::Fourier => write!(f, "Fourier({})", bounded.operand),
                BoundedOp::Laplace => write!(f, "Laplace({})", bounded.operand),
            },
        }
    }
}

impl From<Primary> for Expression {
    fn from(primary: Primary) -> Self {
        Self::Primary(primary)
    }
}

impl From<Constant> for Expression {
    fn from(constant: Constant) -> Self {
        Self::Primary(Primary::Constant(constant))
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Self::real(value)
    }
}

macro_rules! impl_binary_ops {
    ($($trait:ident, $method:ident => $op:ident;)*) => {
        $(
            /// Builds the binary node. No simplification is done.
            impl $trait for Expression {
                type Output = Self;

                fn $method(self, rhs: Self) -> Self::Output {
                    Self::binary(BinOp::$op, self, rhs)
                }
            }
        )*
    };
}

impl_binary_ops! {
    Add, add => Add;
    Sub, sub => Subtract;
    Mul, mul => Multiply;
    Div, div => Divide;
    Rem, rem => Modulo;
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, in which case the number is negated.
impl Neg for Expression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Real(value)) => Self::real(-value),
            Self::Primary(Primary::Constant(constant)) if !constant.is_symbolic() => {
                Self::constant(-constant.value())
            },
            expr => Self::constant(-1.0) * expr,
        }
    }
}
