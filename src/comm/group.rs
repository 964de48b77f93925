//! In-process SPMD worker group.
//!
//! Each worker thread plays the role of one SPMD process: the group gives
//! every worker a rank, a reusable barrier, and shared-slot collectives.
//! Transports over real OS processes implement [`CommContext`] outside this
//! crate; this group exists so multi-participant timing and reduction
//! semantics can be exercised without one.

use std::sync::{Arc, Barrier, Mutex};

use tracing::debug;

use super::context::{CommContext, ReduceOp};

/// Shared exchange slots for one collective element type.
///
/// Each participant deposits into its own slot; the barrier leader combines
/// the slots into `result` between barrier generations.
#[derive(Debug)]
struct ExchangeCell<T> {
    slots: Mutex<Vec<Option<Vec<T>>>>,
    result: Mutex<Vec<T>>,
}

impl<T: Copy> ExchangeCell<T> {
    fn new(size: usize) -> Self {
        Self {
            slots: Mutex::new(vec![None; size]),
            result: Mutex::new(Vec::new()),
        }
    }
}

#[derive(Debug)]
struct GroupShared {
    size: usize,
    barrier: Barrier,
    f64_cell: ExchangeCell<f64>,
    i64_cell: ExchangeCell<i64>,
}

/// Launcher for a fixed-size group of cooperating workers.
///
/// # Example
///
/// ```
/// use spmd_bench::comm::{CommContext, ProcessGroup, ReduceOp};
///
/// let group = ProcessGroup::new(4);
/// let totals = group.run(|ctx| ctx.reduce_i64(ctx.rank() as i64, ReduceOp::Sum));
/// assert_eq!(totals, vec![6, 6, 6, 6]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProcessGroup {
    size: usize,
}

impl ProcessGroup {
    /// Creates a group descriptor for `size` participants (at least 1).
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size: size.max(1),
        }
    }

    /// Number of participants the group launches.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Runs `f` once per participant, each on its own worker thread, and
    /// returns the per-participant results in rank order.
    ///
    /// Blocks until every worker has finished.
    ///
    /// # Panics
    ///
    /// Panics if a worker panics; the group has no recovery semantics.
    pub fn run<F, R>(&self, f: F) -> Vec<R>
    where
        F: Fn(GroupContext) -> R + Send + Sync,
        R: Send,
    {
        debug!(size = self.size, "launching worker group");
        let shared = Arc::new(GroupShared {
            size: self.size,
            barrier: Barrier::new(self.size),
            f64_cell: ExchangeCell::new(self.size),
            i64_cell: ExchangeCell::new(self.size),
        });

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..self.size)
                .map(|rank| {
                    let ctx = GroupContext {
                        rank,
                        shared: Arc::clone(&shared),
                    };
                    let f = &f;
                    scope.spawn(move || f(ctx))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("group worker panicked"))
                .collect()
        })
    }
}

/// One participant's handle into a [`ProcessGroup`].
#[derive(Debug)]
pub struct GroupContext {
    rank: usize,
    shared: Arc<GroupShared>,
}

impl GroupContext {
    fn broadcast<T: Copy>(&self, cell: &ExchangeCell<T>, buf: &mut [T], root: usize) {
        if self.rank == root {
            let mut slots = cell.slots.lock().expect("exchange mutex poisoned");
            slots[root] = Some(buf.to_vec());
        }
        self.shared.barrier.wait();
        {
            let slots = cell.slots.lock().expect("exchange mutex poisoned");
            let src = slots[root]
                .as_ref()
                .expect("broadcast root deposited no data");
            buf.copy_from_slice(src);
        }
        // nobody may start the next collective until every copy finished
        self.shared.barrier.wait();
    }

    fn all_reduce<T, F>(&self, cell: &ExchangeCell<T>, buf: &mut [T], combine: F)
    where
        T: Copy,
        F: Fn(T, T) -> T,
    {
        {
            let mut slots = cell.slots.lock().expect("exchange mutex poisoned");
            slots[self.rank] = Some(buf.to_vec());
        }
        if self.shared.barrier.wait().is_leader() {
            let mut slots = cell.slots.lock().expect("exchange mutex poisoned");
            let mut acc: Option<Vec<T>> = None;
            for slot in slots.iter_mut() {
                let contribution = slot.take().expect("all_reduce slot missing");
                match acc.as_mut() {
                    None => acc = Some(contribution),
                    Some(acc) => {
                        for (a, c) in acc.iter_mut().zip(&contribution) {
                            *a = combine(*a, *c);
                        }
                    },
                }
            }
            let mut result = cell.result.lock().expect("exchange mutex poisoned");
            *result = acc.unwrap_or_default();
        }
        self.shared.barrier.wait();
        {
            let result = cell.result.lock().expect("exchange mutex poisoned");
            buf.copy_from_slice(&result);
        }
        self.shared.barrier.wait();
    }
}

impl CommContext for GroupContext {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.shared.size
    }

    fn barrier(&self) {
        self.shared.barrier.wait();
    }

    fn broadcast_f64(&self, buf: &mut [f64], root: usize) {
        self.broadcast(&self.shared.f64_cell, buf, root);
    }

    fn broadcast_i64(&self, buf: &mut [i64], root: usize) {
        self.broadcast(&self.shared.i64_cell, buf, root);
    }

    fn all_reduce_f64(&self, buf: &mut [f64], op: ReduceOp) {
        match op {
            ReduceOp::Sum => self.all_reduce(&self.shared.f64_cell, buf, |a, b| a + b),
            ReduceOp::Max => self.all_reduce(&self.shared.f64_cell, buf, f64::max),
        }
    }

    fn all_reduce_i64(&self, buf: &mut [i64], op: ReduceOp) {
        match op {
            ReduceOp::Sum => self.all_reduce(&self.shared.i64_cell, buf, |a, b| a + b),
            ReduceOp::Max => self.all_reduce(&self.shared.i64_cell, buf, i64::max),
        }
    }
}
