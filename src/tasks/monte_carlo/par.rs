//! SPMD Monte Carlo variant.

use tracing::debug;

use crate::comm::{CommContext, ReduceOp};
use crate::task::{BufferDescriptorSet, Phase, TaskContract, TaskError, TaskResult};
use crate::tasks::block_range;

use super::{check_shape, read_params, sample_sum, Integrand, Params, ESTIMATE_OUTPUT};

/// Estimates a 1-D integral cooperatively: the coordinator owns the buffers,
/// the sample budget is split across participants, and the partial sums are
/// combined with a sum-reduction.
pub struct MonteCarloPar<'a> {
    buffers: BufferDescriptorSet<'a>,
    integrand: Integrand,
    rank: usize,
    params: Option<Params>,
    estimate: Option<f64>,
}

impl<'a> MonteCarloPar<'a> {
    /// Binds the task to its descriptor set, the function to integrate, and
    /// this participant's identity.
    ///
    /// Non-coordinator participants may pass
    /// [`BufferDescriptorSet::empty()`]; their buffers are never read or
    /// written. Every participant must supply the same integrand.
    #[must_use]
    pub fn new(
        buffers: BufferDescriptorSet<'a>,
        integrand: Integrand,
        ctx: &dyn CommContext,
    ) -> Self {
        Self {
            buffers,
            integrand,
            rank: ctx.rank(),
            params: None,
            estimate: None,
        }
    }

    fn is_coordinator(&self) -> bool {
        self.rank == 0
    }
}

impl TaskContract for MonteCarloPar<'_> {
    fn validate(&self) -> TaskResult<()> {
        if !self.is_coordinator() {
            return Ok(());
        }
        check_shape(&self.buffers)
    }

    fn pre_process(&mut self) -> TaskResult<()> {
        self.params = if self.is_coordinator() {
            Some(read_params(&self.buffers)?)
        } else {
            Some(Params {
                lo: 0.0,
                hi: 0.0,
                samples: 0,
            })
        };
        Ok(())
    }

    fn execute(&mut self, ctx: &dyn CommContext) -> TaskResult<()> {
        let params = self
            .params
            .ok_or_else(|| TaskError::phase(Phase::Execute, "pre_process has not run"))?;

        let mut agreed = [params.lo, params.hi, params.samples as f64];
        ctx.broadcast_f64(&mut agreed, 0);
        let (lo, hi, samples) = (agreed[0], agreed[1], agreed[2] as u64);

        let share = block_range(samples as usize, ctx.rank(), ctx.size());
        debug!(rank = ctx.rank(), samples = share.len(), "sampling share");
        let local_sum = sample_sum(self.integrand, lo, hi, share.len() as u64);
        let total_sum = ctx.reduce_f64(local_sum, ReduceOp::Sum);

        self.estimate = Some((hi - lo) * total_sum / samples as f64);
        Ok(())
    }

    fn post_process(&mut self) -> TaskResult<()> {
        if !self.is_coordinator() {
            return Ok(());
        }
        let estimate = self
            .estimate
            .ok_or_else(|| TaskError::phase(Phase::PostProcess, "execute has not run"))?;
        let out = self
            .buffers
            .output_mut(ESTIMATE_OUTPUT)
            .ok_or_else(|| TaskError::phase(Phase::PostProcess, "missing estimate buffer"))?;
        out.as_slice_mut::<f64>()?[0] = estimate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::ProcessGroup;
    use crate::task::run_once;

    fn constant_one(_x: f64) -> f64 {
        1.0
    }

    #[test]
    fn test_constant_integrand_is_exact_for_any_group_size() {
        for size in [1, 2, 4] {
            let group = ProcessGroup::new(size);
            let estimates = group.run(|ctx| {
                let params = [1.0f64, 4.0, 50_000.0];
                let mut estimate = [0.0f64];
                let buffers = if ctx.is_coordinator() {
                    BufferDescriptorSet::builder()
                        .input(&params)
                        .output(&mut estimate)
                        .build()
                } else {
                    BufferDescriptorSet::empty()
                };
                let mut task = MonteCarloPar::new(buffers, constant_one, &ctx);
                run_once(&mut task, &ctx).unwrap();
                drop(task);
                estimate[0]
            });
            assert!(
                (estimates[0] - 3.0).abs() < 1e-9,
                "group size {size}: {}",
                estimates[0]
            );
        }
    }

    #[test]
    fn test_sample_budget_is_split_exactly() {
        // every participant derives its share deterministically
        let samples = 100_001usize;
        let total: usize = (0..4).map(|rank| block_range(samples, rank, 4).len()).sum();
        assert_eq!(total, samples);
    }
}
