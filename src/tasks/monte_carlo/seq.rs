//! Sequential Monte Carlo variant.

use tracing::debug;

use crate::comm::CommContext;
use crate::task::{BufferDescriptorSet, Phase, TaskContract, TaskError, TaskResult};

use super::{check_shape, read_params, sample_sum, Integrand, Params, ESTIMATE_OUTPUT};

/// Estimates a 1-D integral by uniform sampling on a single participant.
pub struct MonteCarloSeq<'a> {
    buffers: BufferDescriptorSet<'a>,
    integrand: Integrand,
    params: Option<Params>,
    estimate: Option<f64>,
}

impl<'a> MonteCarloSeq<'a> {
    /// Binds the task to its descriptor set and the function to integrate.
    #[must_use]
    pub fn new(buffers: BufferDescriptorSet<'a>, integrand: Integrand) -> Self {
        Self {
            buffers,
            integrand,
            params: None,
            estimate: None,
        }
    }
}

impl TaskContract for MonteCarloSeq<'_> {
    fn validate(&self) -> TaskResult<()> {
        check_shape(&self.buffers)
    }

    fn pre_process(&mut self) -> TaskResult<()> {
        self.params = Some(read_params(&self.buffers)?);
        Ok(())
    }

    fn execute(&mut self, _ctx: &dyn CommContext) -> TaskResult<()> {
        let params = self
            .params
            .ok_or_else(|| TaskError::phase(Phase::Execute, "pre_process has not run"))?;
        let sum = sample_sum(self.integrand, params.lo, params.hi, params.samples);
        let estimate = (params.hi - params.lo) * sum / params.samples as f64;
        debug!(estimate, samples = params.samples, "monte carlo estimate");
        self.estimate = Some(estimate);
        Ok(())
    }

    fn post_process(&mut self) -> TaskResult<()> {
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
