//! Rewriting of expressions toward simpler forms.
//!
//! [`simplify`] performs **one** rewrite step over the whole tree: the operands of every node are
//! rewritten first (bottom-up), and then the first rule in [`rules::RULES`] that applies to the
//! node itself is applied to it. A single step is not guaranteed to reach the simplest form; for
//! that, repeat steps until the expression stops changing, which is exactly what the
//! [`Simplifier`](crate::simplifier::Simplifier) does.
//!
//! ```
//! use oasis_core::expr::Expression;
//! use oasis_core::simplify::simplify;
//!
//! // `0 + x = x`
//! let expr = Expression::constant(0.0) + Expression::variable("x");
//! assert_eq!(simplify(&expr).unwrap(), Expression::variable("x"));
//! ```
//!
//! The operands of a node are rewritten through an [`Executor`], which may rewrite them in
//! parallel. The result is the same regardless of the executor.
//!
//! Division or modulo by an exact zero is an error, and aborts the whole step.

pub mod rules;
pub mod step;

use crate::{
    error::Result,
    executor::{Executor, Sequential},
    expr::{Bounded, Expression},
    step_collector::StepCollector,
};
use step::Step;

/// A rewritten subtree, along with the steps taken to rewrite it.
type Rewritten = Result<(Expression, Vec<Step>)>;

/// Rewrites a subtree as its own task, collecting its steps separately so that the task does not
/// share any mutable state with its siblings.
fn task<E: Executor>(expr: &Expression, executor: &E) -> Rewritten {
    let mut steps = Vec::new();
    let rewritten = rewrite_tree(expr, executor, &mut steps)?;
    Ok((rewritten, steps))
}

/// Settles the result of a task, forwarding its steps to the parent's collector.
fn settle(result: Rewritten, step_collector: &mut dyn StepCollector<Step>) -> Result<Expression> {
    let (expr, steps) = result?;
    step_collector.push_all(steps);
    Ok(expr)
}

/// Rewrites an optional bound.
fn task_opt<E: Executor>(expr: Option<&Expression>, executor: &E) -> Option<Rewritten> {
    expr.map(|expr| task(expr, executor))
}

/// Rewrites the operands of the expression, then applies one rule to the expression itself.
fn rewrite_tree<E: Executor>(
    expr: &Expression,
    executor: &E,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Expression> {
    let rebuilt = match expr {
        Expression::Primary(_) => return Ok(expr.clone()),
        Expression::Unary(op, operand) => {
            Expression::unary(*op, rewrite_tree(operand, executor, step_collector)?)
        },
        Expression::Binary(op, lhs, rhs) => {
            let (lhs, rhs) = executor.join(
                || task(lhs, executor),
                || task(rhs, executor),
            );

            // both tasks have finished here, so an error on the left never leaves the right
            // running
            let lhs = settle(lhs, step_collector)?;
            let rhs = settle(rhs, step_collector)?;
            Expression::binary(*op, lhs, rhs)
        },
        Expression::Bounded(bounded) => {
            let (operand, (lower, upper)) = executor.join(
                || task(&bounded.operand, executor),
                || executor.join(
                    || task_opt(bounded.lower_bound(), executor),
                    || task_opt(bounded.upper_bound(), executor),
                ),
            );

            let operand = settle(operand, step_collector)?;
            let lower = lower.map(|lower| settle(lower, step_collector)).transpose()?;
            let upper = upper.map(|upper| settle(upper, step_collector)).transpose()?;
            Expression::Bounded(Bounded {
                op: bounded.op,
                var: bounded.var.clone(),
                operand: Box::new(operand),
                lower: lower.map(Box::new),
                upper: upper.map(Box::new),
            })
        },
    };

    rules::rewrite(rebuilt, step_collector)
}

/// Performs one rewrite step over the whole expression on the calling thread.
///
/// See the [module-level documentation](self) for more information.
pub fn simplify(expr: &Expression) -> Result<Expression> {
    simplify_with(expr, &Sequential)
}

/// Performs one rewrite step over the whole expression, rewriting independent operands with the
/// given executor.
pub fn simplify_with<E: Executor>(expr: &Expression, executor: &E) -> Result<Expression> {
    rewrite_tree(expr, executor, &mut ())
}

/// Performs one rewrite step over the whole expression, also returning the rules that fired, in
/// post-order.
pub fn simplify_with_steps<E: Executor>(expr: &Expression, executor: &E) -> Result<(Expression, Vec<Step>)> {
    let mut steps = Vec::new();
    let rewritten = rewrite_tree(expr, executor, &mut steps)?;
    Ok((rewritten, steps))
}

impl Expression {
    /// Performs one rewrite step over the whole expression. See [`simplify`].
    pub fn simplify(&self) -> Result<Expression> {
        simplify(self)
    }
}
