//! The history of a simplification.
//!
//! A [`SimplificationGraph`] records every expression the [`Simplifier`] produced, and which
//! expression each one was rewritten into. Vertices are stored in an arena and referred to by
//! [`VertexId`]s, so the graph never holds pointers into itself. The graph is append-only: vertices
//! and edges are never removed or merged.
//!
//! Each distinct expression has exactly one vertex, where distinctness is structural equality.
//! Adding an expression that is already in the graph returns the existing vertex, so the runs of
//! one [`Simplifier`] share the vertices they have in common.
//!
//! [`Simplifier`]: crate::simplifier::Simplifier

use crate::expr::Expression;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A handle to a vertex of a [`SimplificationGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexId(usize);

impl VertexId {
    /// Returns the position of the vertex in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A vertex of a [`SimplificationGraph`], holding one expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpressionNode {
    expression: Expression,
}

impl ExpressionNode {
    /// Wraps an expression.
    pub fn new(expression: Expression) -> Self {
        Self { expression }
    }

    /// Returns the expression held by this vertex.
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Consumes the vertex, returning its expression.
    pub fn into_expression(self) -> Expression {
        self.expression
    }
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// A directed graph of expressions, where an edge `a -> b` means that `a` was rewritten into `b`.
///
/// See the [module-level documentation](self) for more information.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimplificationGraph {
    /// The vertices, in insertion order.
    nodes: Vec<ExpressionNode>,

    /// The edges, in insertion order.
    edges: Vec<(VertexId, VertexId)>,
}

impl SimplificationGraph {
    /// Creates a new, empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle of the vertex holding the given expression, adding the vertex if no
    /// structurally equal expression is in the graph yet.
    pub fn add_expression_node(&mut self, expression: Expression) -> VertexId {
        if let Some(id) = self.find(&expression) {
            return id;
        }
        self.nodes.push(ExpressionNode::new(expression));
        VertexId(self.nodes.len() - 1)
    }

    /// Records that the expression at `from` was rewritten into the expression at `to`. An edge
    /// that is already recorded is not added again.
    ///
    /// Returns a mutable reference to the graph to allow chaining.
    pub fn add_simplification_step(&mut self, from: VertexId, to: VertexId) -> &mut Self {
        debug_assert!(from.0 < self.nodes.len() && to.0 < self.nodes.len());
        if !self.edges.contains(&(from, to)) {
            self.edges.push((from, to));
        }
        self
    }

    /// Returns the vertex with the given handle.
    pub fn node(&self, id: VertexId) -> Option<&ExpressionNode> {
        self.nodes.get(id.0)
    }

    /// Returns an iterator over every vertex, in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &ExpressionNode)> + '_ {
        self.nodes.iter().enumerate().map(|(index, node)| (VertexId(index), node))
    }

    /// Returns every edge, in insertion order.
    pub fn edges(&self) -> &[(VertexId, VertexId)] {
        &self.edges
    }

    /// Returns the vertices that the vertex with the given handle was rewritten into.
    pub fn successors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.edges.iter()
            .filter(move |(from, _)| *from == id)
            .map(|(_, to)| *to)
    }

    /// Returns the vertex holding an expression structurally equal to the given one.
    pub fn find(&self, expression: &Expression) -> Option<VertexId> {
        self.nodes.iter()
            .position(|node| node.expression() == expression)
            .map(VertexId)
    }

    /// Returns the number of vertices.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
