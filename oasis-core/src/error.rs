//! Errors raised while evaluating, rewriting, differentiating, integrating, or reading
//! expressions.
//!
//! Each kind of error is its own struct deriving [`ErrorKind`], so that it can be rendered into a
//! report pointing at the offending expression with [`Error::locate`]. The [`Error`] enum ties
//! them together into the single error type returned by every fallible operation in this crate.

use ariadne::Report;
use crate::expr::Expression;
use oasis_attrs::ErrorKind;
use oasis_error::ErrorKind;
use std::{fmt, ops::Range};

/// A division or modulo by an exact zero.
#[derive(Debug, Clone, PartialEq, ErrorKind)]
#[error(
    message = format!("cannot divide `{}` by zero", dividend),
    labels = ["this expression divides by zero"],
    help = "the divisor of a division or modulo must not be zero",
)]
pub struct DivisionByZero {
    /// The expression that was being divided.
    pub dividend: String,
}

/// A variable was evaluated without a value in the [`Bindings`](crate::eval::Bindings).
#[derive(Debug, Clone, PartialEq, ErrorKind)]
#[error(
    message = format!("unknown variable `{}`", name),
    labels = ["this expression"],
    help = format!("bind `{}` to a value before evaluating", name),
)]
pub struct UnboundVariable {
    /// The name of the variable.
    pub name: String,
}

/// An operation that is not defined for some node, such as the derivative of the impulse.
#[derive(Debug, Clone, PartialEq, ErrorKind)]
#[error(
    message = format!("cannot {} `{}`", operation, expr),
    labels = ["this expression"],
    help = reason,
)]
pub struct UndefinedOperation {
    /// The operation that was attempted, such as `"differentiate"`.
    pub operation: &'static str,

    /// The expression the operation was attempted on.
    pub expr: String,

    /// Why the operation is undefined.
    pub reason: String,
}

impl UndefinedOperation {
    /// Creates the error for the given operation and expression.
    pub fn new(operation: &'static str, expr: &Expression, reason: impl Into<String>) -> Self {
        Self {
            operation,
            expr: expr.to_string(),
            reason: reason.into(),
        }
    }
}

/// A markup document does not describe a valid expression.
#[derive(Debug, Clone, PartialEq, ErrorKind)]
#[error(
    message = format!("malformed markup: {}", reason),
    labels = ["in this document"],
)]
pub struct MalformedInput {
    /// What is wrong with the document.
    pub reason: String,
}

impl MalformedInput {
    /// Creates the error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Any error that can occur in this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    DivisionByZero(DivisionByZero),
    UnboundVariable(UnboundVariable),
    UndefinedOperation(UndefinedOperation),
    MalformedInput(MalformedInput),
}

impl Error {
    /// Attaches the text of the expression this error originated from, producing an error that
    /// can be rendered into a report.
    pub fn locate(self, expr: &Expression) -> oasis_error::Error {
        oasis_error::Error::whole(expr.to_string(), self)
    }
}

impl ErrorKind for Error {
    fn message(&self) -> String {
        match self {
            Self::DivisionByZero(e) => e.message(),
            Self::UnboundVariable(e) => e.message(),
            Self::UndefinedOperation(e) => e.message(),
            Self::MalformedInput(e) => e.message(),
        }
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        match self {
            Self::DivisionByZero(e) => e.build_report(src_id, spans),
            Self::UnboundVariable(e) => e.build_report(src_id, spans),
            Self::UndefinedOperation(e) => e.build_report(src_id, spans),
            Self::MalformedInput(e) => e.build_report(src_id, spans),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for Error {}

macro_rules! impl_from_kind {
    ($($kind:ident),* $(,)?) => {
        $(
            impl From<$kind> for Error {
                fn from(kind: $kind) -> Self {
                    Self::$kind(kind)
                }
            }
        )*
    };
}

impl_from_kind!(DivisionByZero, UnboundVariable, UndefinedOperation, MalformedInput);

/// The result type of every fallible operation in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn messages() {
        let error = Error::from(UnboundVariable { name: "x".to_string() });
        assert_eq!(error.to_string(), "unknown variable `x`");

        let error = Error::from(UndefinedOperation::new(
            "differentiate",
            &Expression::impulse(),
            "the impulse has no derivative",
        ));
        assert_eq!(error.to_string(), "cannot differentiate `δ(t)`");
    }

    #[test]
    fn locate_renders_report() {
        let expr = Expression::variable("x") % Expression::constant(0.0);
        let error = Error::from(DivisionByZero { dividend: "x".to_string() }).locate(&expr);
        assert_eq!(error.source, "x % 0");
        assert_eq!(error.spans, vec![0..5]);

        let rendered = error.render("input").unwrap();
        assert!(rendered.contains("cannot divide `x` by zero"));
        assert!(rendered.contains("the divisor of a division or modulo must not be zero"));
    }
}
