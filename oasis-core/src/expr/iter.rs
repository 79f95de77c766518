use super::Expression;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expression::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expression>,
    last_visited: Option<&'a Expression>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expression) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expression> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a Expression) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expression;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            let children = expr.children();
            match children.last() {
                Some(&last) if !self.is_last_visited(last) => {
                    self.stack.extend(children.into_iter().rev());
                },
                _ => return self.visit(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn post_order() {
        let expr = Expression::sum(
            Expression::constant(1.0),
            Expression::variable("n"),
            Expression::tan(Expression::variable("i")),
        );
        let visited = expr.post_order_iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(visited, vec!["i", "tan(i)", "1", "n", "Σ(1, n, tan(i))"]);
    }

    #[test]
    fn post_order_binary() {
        let expr = (Expression::variable("a") + Expression::variable("b"))
            * Expression::variable("c");
        let visited = expr.post_order_iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(visited, vec!["a", "b", "a + b", "c", "(a + b) * c"]);
    }
}
