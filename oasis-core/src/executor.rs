//! Execution strategies for rewriting independent subexpressions.
//!
//! The operands of a binary or bounded node are independent of each other, so they can be
//! rewritten at the same time. An [`Executor`] decides whether they are. Both strategies run the
//! same rules and produce structurally identical results; they only differ in where the work runs.
//!
//! The contract is fork-join: [`Executor::join`] does not return until both tasks have finished,
//! so no task outlives the rewrite call that spawned it, and the caller only ever sees fully
//! settled results.

use tracing::trace;

/// A fork-join primitive.
pub trait Executor: Sync {
    /// Runs both closures, possibly in parallel, and returns both results once both have finished.
    fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send;
}

/// Runs every task on the calling thread, left before right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sequential;

impl Executor for Sequential {
    fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        let ra = a();
        let rb = b();
        (ra, rb)
    }
}

/// Runs tasks on the [`rayon`] global thread pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parallel;

impl Executor for Parallel {
    fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        trace!("forking rewrite of two operands");
        let joined = rayon::join(a, b);
        trace!("joined rewrite of two operands");
        joined
    }
}
