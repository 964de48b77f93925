//! Sequential row-sum variant.

use tracing::debug;

use crate::comm::CommContext;
use crate::task::{BufferDescriptorSet, Phase, TaskContract, TaskError, TaskResult};

use super::{check_shape, read_inputs, sum_rows, SUMS_OUTPUT};

/// Sums each row of an integer matrix on a single participant.
pub struct RowSumSeq<'a> {
    buffers: BufferDescriptorSet<'a>,
    state: Option<State>,
}

struct State {
    rows: usize,
    cols: usize,
    matrix: Vec<i64>,
    sums: Vec<i64>,
}

impl<'a> RowSumSeq<'a> {
    /// Binds the task to its descriptor set.
    #[must_use]
    pub fn new(buffers: BufferDescriptorSet<'a>) -> Self {
        Self {
            buffers,
            state: None,
        }
    }
}

impl TaskContract for RowSumSeq<'_> {
    fn validate(&self) -> TaskResult<()> {
        check_shape(&self.buffers)
    }

    fn pre_process(&mut self) -> TaskResult<()> {
        let (rows, cols, matrix) = read_inputs(&self.buffers)?;
        debug!(rows, cols, "materialized matrix");
        self.state = Some(State {
            rows,
            cols,
            matrix,
            sums: Vec::new(),
        });
        Ok(())
    }

    fn execute(&mut self, _ctx: &dyn CommContext) -> TaskResult<()> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| TaskError::phase(Phase::Execute, "pre_process has not run"))?;
        let mut sums = vec![0i64; state.rows];
        sum_rows(&state.matrix, state.cols, 0..state.rows, &mut sums);
        state.sums = sums;
        Ok(())
    }

    fn post_process(&mut self) -> TaskResult<()> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::SingleProcess;
    use crate::task::run_once;

    #[test]
    fn test_row_sums() {
        let dims = [4i64, 3];
        let matrix = [1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let mut sums = [0i64; 4];
        let buffers = BufferDescriptorSet::builder()
            .input(&dims)
            .input(&matrix)
            .output(&mut sums)
            .build();

        let ctx = SingleProcess::new();
        let mut task = RowSumSeq::new(buffers);
        run_once(&mut task, &ctx).unwrap();
        drop(task);
        assert_eq!(sums, [6, 15, 24, 33]);
    }

    #[test]
    fn test_negative_rows_rejected() {
        let dims = [2i64, 3];
        let matrix = [0i64; 5]; // 2x3 needs 6 elements
        let mut sums = [0i64; 2];
        let buffers = BufferDescriptorSet::builder()
            .input(&dims)
            .input(&matrix)
            .output(&mut sums)
            .build();

        let task = RowSumSeq::new(buffers);
        let err = task.validate().unwrap_err();
        assert!(matches!(err, TaskError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_matrix() {
        let dims = [0i64, 0];
        let matrix: [i64; 0] = [];
        let mut sums: [i64; 0] = [];
        let buffers = BufferDescriptorSet::builder()
            .input(&dims)
            .input(&matrix)
            .output(&mut sums)
            .build();

        let ctx = SingleProcess::new();
        let mut task = RowSumSeq::new(buffers);
        run_once(&mut task, &ctx).unwrap();
    }

    #[test]
    fn test_execute_before_pre_process_fails() {
        let dims = [1i64, 1];
        let matrix = [5i64];
        let mut sums = [0i64; 1];
        let buffers = BufferDescriptorSet::builder()
            .input(&dims)
            .input(&matrix)
            .output(&mut sums)
            .build();

        let ctx = SingleProcess::new();
        let mut task = RowSumSeq::new(buffers);
        let err = task.execute(&ctx).unwrap_err();
        assert!(matches!(err, TaskError::PhaseFailure { phase: Phase::Execute, .. }));
    }
}
