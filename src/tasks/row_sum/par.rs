//! SPMD row-sum variant.

use tracing::debug;

use crate::comm::{CommContext, ReduceOp};
use crate::task::{BufferDescriptorSet, Phase, TaskContract, TaskError, TaskResult};
use crate::tasks::block_range;

use super::{check_shape, read_inputs, sum_rows, SUMS_OUTPUT};

/// Sums matrix rows cooperatively: the coordinator owns the buffers, every
/// participant computes a contiguous stripe of rows, and the stripes are
/// combined with a sum-reduction so each participant ends up with the full
/// result.
pub struct RowSumPar<'a> {
    buffers: BufferDescriptorSet<'a>,
    rank: usize,
    state: Option<State>,
}

struct State {
    rows: usize,
    cols: usize,
    matrix: Vec<i64>,
    sums: Vec<i64>,
}

impl<'a> RowSumPar<'a> {
    /// Binds the task to its descriptor set and this participant's identity.
    ///
    /// Non-coordinator participants may pass
    /// [`BufferDescriptorSet::empty()`]; their buffers are never read or
    /// written.
    #[must_use]
    pub fn new(buffers: BufferDescriptorSet<'a>, ctx: &dyn CommContext) -> Self {
        Self {
            buffers,
            rank: ctx.rank(),
            state: None,
        }
    }

    fn is_coordinator(&self) -> bool {
        self.rank == 0
    }
}

impl TaskContract for RowSumPar<'_> {
    fn validate(&self) -> TaskResult<()> {
        if !self.is_coordinator() {
            return Ok(());
        }
        check_shape(&self.buffers)
    }

    fn pre_process(&mut self) -> TaskResult<()> {
        let (rows, cols, matrix) = if self.is_coordinator() {
            read_inputs(&self.buffers)?
        } else {
            (0, 0, Vec::new())
        };
        self.state = Some(State {
            rows,
            cols,
            matrix,
            sums: Vec::new(),
        });
        Ok(())
    }

    fn execute(&mut self, ctx: &dyn CommContext) -> TaskResult<()> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| TaskError::phase(Phase::Execute, "pre_process has not run"))?;

        // agree on the problem size, then ship the matrix to everyone
        let mut dims = [state.rows as i64, state.cols as i64];
        ctx.broadcast_i64(&mut dims, 0);
        let (rows, cols) = (dims[0] as usize, dims[1] as usize);
        if !ctx.is_coordinator() {
            state.rows = rows;
            state.cols = cols;
            state.matrix.resize(rows * cols, 0);
        }
        ctx.broadcast_i64(&mut state.matrix, 0);

        let stripe = block_range(rows, ctx.rank(), ctx.size());
        debug!(rank = ctx.rank(), rows = stripe.len(), "summing stripe");
        let mut sums = vec![0i64; rows];
        sum_rows(&state.matrix, cols, stripe, &mut sums);
        ctx.all_reduce_i64(&mut sums, ReduceOp::Sum);
        state.sums = sums;
        Ok(())
    }

    fn post_process(&mut self) -> TaskResult<()> {
        if !self.is_coordinator() {
            return Ok(());
        }
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| TaskError::phase(Phase::PostProcess, "execute has not run"))?;
        let out = self
            .buffers
            .output_mut(SUMS_OUTPUT)
            .ok_or_else(|| TaskError::phase(Phase::PostProcess, "missing sums buffer"))?;
        out.as_slice_mut::<i64>()?.copy_from_slice(&state.sums);
        Ok(())
    }
}
