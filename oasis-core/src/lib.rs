//! Symbolic expression trees, rewriting to a fixpoint, and symbolic calculus.
//!
//! Expressions are trees of [`Expression`] nodes, built with the constructors on [`Expression`]
//! and the arithmetic operators:
//!
//! ```
//! use oasis_core::{Expression, Simplifier};
//!
//! // e^(iπ)
//! let expr = Expression::pow(Expression::e(), Expression::imaginary() * Expression::pi());
//!
//! let mut simplifier = Simplifier::new();
//! assert_eq!(simplifier.simplify(expr).unwrap(), Expression::constant(-1.0));
//! ```
//!
//! The main entry points are:
//!
//! - [`Expression::evaluate`] to compute the value of an expression given [`Bindings`] for its
//!   variables,
//! - [`Expression::simplify`] to perform a single rewrite step, and [`Simplifier`] to rewrite to a
//!   fixpoint while recording the [history](graph::SimplificationGraph) of every step,
//! - [`Expression::differentiate`] and [`Expression::integrate`] for symbolic calculus,
//! - [`markup::serialize`] and [`markup::deserialize`] to convert to and from a MathML-shaped
//!   markup tree.
//!
//! Rewrite rules are written against the [`specialize`] protocol, which views an expression as a
//! typed shape without copying it.
//!
//! # Features
//!
//! - `serde`: Derives [`Serialize`] and [`Deserialize`] for the expression model and the
//! simplification history.
//!
//! [`Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html

pub mod derivative;
pub mod error;
pub mod eval;
pub mod executor;
pub mod expr;
pub mod graph;
pub mod integral;
pub mod markup;
pub mod simplifier;
pub mod simplify;
pub mod specialize;
pub mod step_collector;

pub use error::{Error, Result};
pub use eval::Bindings;
pub use expr::Expression;
pub use simplifier::Simplifier;
