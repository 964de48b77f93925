//! The runtime context trait consumed by the harness and parallel tasks.

/// Reduction operators supported by the collective contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Element-wise sum across participants.
    Sum,
    /// Element-wise maximum across participants.
    Max,
}

/// Handle to a fixed set of cooperating SPMD participants.
///
/// The same program logic runs replicated across every participant; a
/// context tells each replica who it is and lets the replicas synchronize
/// and combine values. The participant count is fixed for the lifetime of
/// the context.
///
/// Collective calls (`barrier`, broadcasts, reductions) must be entered by
/// every participant, in the same order, with equal buffer lengths; the
/// contract leaves mismatched collective calls undefined, as the underlying
/// transports do.
pub trait CommContext: Send + Sync {
    /// This participant's rank, in `0..size()`.
    fn rank(&self) -> usize;

    /// Total number of participants.
    fn size(&self) -> usize;

    /// Blocks until every participant has reached the same barrier.
    fn barrier(&self);

    /// Replaces `buf` on every participant with the coordinator `root`'s
    /// copy.
    fn broadcast_f64(&self, buf: &mut [f64], root: usize);

    /// Replaces `buf` on every participant with the coordinator `root`'s
    /// copy.
    fn broadcast_i64(&self, buf: &mut [i64], root: usize);

    /// Element-wise reduction of `buf` across all participants; every
    /// participant receives the combined result.
    fn all_reduce_f64(&self, buf: &mut [f64], op: ReduceOp);

    /// Element-wise reduction of `buf` across all participants; every
    /// participant receives the combined result.
    fn all_reduce_i64(&self, buf: &mut [i64], op: ReduceOp);

    /// Returns `true` on the participant that owns authoritative outputs
    /// and reporting. Rank 0 by convention.
    fn is_coordinator(&self) -> bool {
        self.rank() == 0
    }

    /// Reduces a single value across all participants.
    fn reduce_f64(&self, value: f64, op: ReduceOp) -> f64 {
        let mut buf = [value];
        self.all_reduce_f64(&mut buf, op);
        buf[0]
    }

    /// Reduces a single value across all participants.
    fn reduce_i64(&self, value: i64, op: ReduceOp) -> i64 {
        let mut buf = [value];
        self.all_reduce_i64(&mut buf, op);
        buf[0]
    }
}
