//! Recording which rewrite rules fired.

/// Receives the steps taken while rewriting an expression.
///
/// Rewriting code takes a `&mut dyn StepCollector<S>` and reports every rule it applies. Pass
/// `&mut ()` to discard the steps, or a `&mut Vec<S>` to record them in order.
pub trait StepCollector<S> {
    /// Records one step.
    fn push(&mut self, step: S);

    /// Records a batch of steps that were collected elsewhere, such as by a task rewriting one
    /// operand, preserving their order.
    fn push_all(&mut self, steps: Vec<S>) {
        for step in steps {
            self.push(step);
        }
    }
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}

    #[inline]
    fn push_all(&mut self, _: Vec<S>) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }

    fn push_all(&mut self, mut steps: Vec<S>) {
        self.append(&mut steps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(collector: &mut dyn StepCollector<u8>) {
        collector.push(1);
        collector.push_all(vec![2, 3]);
    }

    #[test]
    fn vec_keeps_order() {
        let mut steps: Vec<u8> = vec![0];
        report(&mut steps);
        assert_eq!(steps, vec![0, 1, 2, 3]);
    }

    #[test]
    fn unit_discards() {
        report(&mut ());
    }
}
