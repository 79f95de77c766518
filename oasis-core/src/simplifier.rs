//! Repeated rewriting to a fixpoint.
//!
//! A [`Simplifier`] rewrites an expression with [`simplify_with`] over and over, until one more
//! step no longer changes it. Every intermediate expression is recorded in a
//! [`SimplificationGraph`], with an edge from each expression to the one it was rewritten into.
//!
//! ```
//! use oasis_core::expr::Expression;
//! use oasis_core::simplifier::Simplifier;
//!
//! let mut simplifier = Simplifier::new();
//! let expr = Expression::variable("x") * (Expression::constant(2.0) - Expression::constant(1.0));
//! assert_eq!(simplifier.simplify(expr).unwrap(), Expression::variable("x"));
//! assert_eq!(simplifier.graph().len(), 2);
//! ```

use crate::{
    error::{Result, UndefinedOperation},
    executor::{Executor, Parallel, Sequential},
    expr::Expression,
    graph::SimplificationGraph,
    simplify::simplify_with,
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Drives rewriting of expressions to a fixpoint, recording the history of each run.
///
/// See the [module-level documentation](self) for more information.
#[derive(Debug, Clone, Default)]
pub struct Simplifier<E: Executor = Sequential> {
    /// The history of every run.
    graph: SimplificationGraph,

    /// The strategy used to rewrite independent operands.
    executor: E,
}

impl Simplifier<Sequential> {
    /// Creates a simplifier that rewrites on the calling thread.
    pub fn new() -> Self {
        Self::with_executor(Sequential)
    }
}

impl Simplifier<Parallel> {
    /// Creates a simplifier that rewrites independent operands in parallel.
    pub fn parallel() -> Self {
        Self::with_executor(Parallel)
    }
}

impl<E: Executor> Simplifier<E> {
    /// Creates a simplifier using the given execution strategy.
    pub fn with_executor(executor: E) -> Self {
        Self {
            graph: SimplificationGraph::new(),
            executor,
        }
    }

    /// Rewrites the expression until it stops changing, and returns the result.
    ///
    /// The input and every intermediate expression are added to the [graph](Self::graph), with
    /// an edge for each rewrite. An expression already recorded by an earlier run reuses that
    /// run's vertex. There is no limit on the number of steps. However, if a step produces an
    /// expression that was already produced earlier in the same run, rewriting would never
    /// terminate, so this fails with [`UndefinedOperation`] instead.
    ///
    /// If a step fails, the error is returned immediately. Whatever was recorded in the graph up
    /// to that point is kept.
    pub fn simplify(&mut self, expr: Expression) -> Result<Expression> {
        let executor = &self.executor;
        Self::run(&mut self.graph, expr, |current| simplify_with(current, executor))
    }

    /// Repeats the given rewrite step until it stops changing the expression, recording each
    /// step in the graph.
    fn run(
        graph: &mut SimplificationGraph,
        expr: Expression,
        mut rewrite: impl FnMut(&Expression) -> Result<Expression>,
    ) -> Result<Expression> {
        let mut current_id = graph.add_expression_node(expr.clone());
        let mut visited = HashSet::from([current_id]);
        let mut current = expr;
        let mut steps = 0usize;

        loop {
            let next = rewrite(&current)?;
            if next == current {
                debug!(steps, result = %current, "reached fixpoint");
                return Ok(current);
            }

            if let Some(seen) = graph.find(&next).filter(|id| visited.contains(id)) {
                warn!(vertex = %seen, expr = %next, "rewriting revisited an earlier expression");
                return Err(UndefinedOperation::new(
                    "simplify",
                    &next,
                    format!("rewriting cycles back to {}", seen),
                ).into());
            }

            steps += 1;
            debug!(step = steps, from = %current, to = %next, "rewrote expression");
            let next_id = graph.add_expression_node(next.clone());
            graph.add_simplification_step(current_id, next_id);
            visited.insert(next_id);
            current = next;
            current_id = next_id;
        }
    }

    /// Returns the history of every run of this simplifier.
    pub fn graph(&self) -> &SimplificationGraph {
        &self.graph
    }

    /// Consumes the simplifier, returning the history of every run.
    pub fn into_graph(self) -> SimplificationGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::Error, graph::VertexId};
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expression {
        Expression::variable("x")
    }

    #[test]
    fn records_each_step() {
        let mut simplifier = Simplifier::new();
        let expr = Expression::sum(
            Expression::constant(0.0),
            Expression::constant(4.0),
            Expression::variable("i"),
        );
        assert_eq!(simplifier.simplify(expr.clone()).unwrap(), Expression::real(6.0));

        let graph = simplifier.graph();
        let labels = graph.vertices()
            .map(|(_, node)| node.to_string())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["Σ(0, 4, i)", "4 * 3 / 2", "6"]);
        assert_eq!(graph.edges().len(), 2);
        let (first, node) = graph.vertices().next().unwrap();
        assert_eq!(node.expression(), &expr);
        assert_eq!(graph.successors(first).map(VertexId::index).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn normal_form_records_single_vertex() {
        let mut simplifier = Simplifier::new();
        assert_eq!(simplifier.simplify(x()).unwrap(), x());
        assert_eq!(simplifier.graph().len(), 1);
        assert!(simplifier.graph().edges().is_empty());
    }

    #[test]
    fn runs_share_vertices() {
        let mut simplifier = Simplifier::new();
        simplifier.simplify(x() + Expression::constant(0.0)).unwrap();
        simplifier.simplify(x() + Expression::constant(0.0)).unwrap();
        assert_eq!(simplifier.graph().len(), 2);
        assert_eq!(simplifier.graph().edges().len(), 1);

        // the second run ends at the vertex the first run produced
        let nested = (x() + Expression::constant(0.0)) + Expression::constant(0.0);
        assert_eq!(simplifier.simplify(nested).unwrap(), x());

        let graph = simplifier.into_graph();
        let x_vertices = graph.vertices().filter(|(_, node)| node.expression() == &x()).count();
        assert_eq!(x_vertices, 1);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edges().len(), 2);
    }

    #[test]
    fn non_finite_leaves_reach_a_fixpoint() {
        let cases = [
            Expression::constant(f64::NAN),
            Expression::real(f64::NAN) * x(),
            Expression::constant(f64::INFINITY) + Expression::real(f64::NEG_INFINITY),
            Expression::pow(x(), Expression::real(f64::NAN)),
        ];
        for expr in cases {
            let mut simplifier = Simplifier::new();
            let result = simplifier.simplify(expr.clone()).unwrap();
            assert_eq!(result.simplify(), Ok(result.clone()), "{}", expr);
            assert!(simplifier.graph().len() <= 2, "{}", expr);
        }
    }

    #[test]
    fn cycles_through_earlier_runs_are_allowed() {
        // `y` was produced by an earlier run, so reaching it again is not a cycle
        let flip_once = |expr: &Expression| Ok(match expr.as_variable() {
            Some("x") => Expression::variable("y"),
            _ => expr.clone(),
        });

        let mut graph = SimplificationGraph::new();
        Simplifier::<Sequential>::run(&mut graph, Expression::variable("y"), flip_once).unwrap();
        let result = Simplifier::<Sequential>::run(&mut graph, x(), flip_once).unwrap();
        assert_eq!(result, Expression::variable("y"));
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn cycles_are_rejected() {
        // a rewrite that flips between two expressions forever
        let flip = |expr: &Expression| Ok(match expr.as_variable() {
            Some("x") => Expression::variable("y"),
            _ => x(),
        });

        let mut graph = SimplificationGraph::new();
        let err = Simplifier::<Sequential>::run(&mut graph, x(), flip).unwrap_err();
        assert!(matches!(err, Error::UndefinedOperation(_)));
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn failure_keeps_history() {
        let mut simplifier = Simplifier::parallel();
        let expr = x() % (Expression::constant(1.0) - Expression::constant(1.0));
        assert!(matches!(simplifier.simplify(expr), Err(Error::DivisionByZero(_))));
        assert_eq!(simplifier.graph().len(), 1);
    }
}
