//! The core task lifecycle trait.
//!
//! All benchmarkable tasks implement this trait to be driven by the
//! measurement harness.

use crate::comm::CommContext;

use super::error::TaskResult;

/// Identifies one phase of the task lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Structural check of the bound descriptor set.
    Validate,
    /// Materialization of raw buffers into typed internal state.
    PreProcess,
    /// The algorithm's computation.
    Execute,
    /// Write-back of results into the output descriptors.
    PostProcess,
}

impl Phase {
    /// Stable lowercase name of the phase.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::PreProcess => "pre_process",
            Self::Execute => "execute",
            Self::PostProcess => "post_process",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The lifecycle contract implemented by every algorithm variant.
///
/// A task is bound to one [`BufferDescriptorSet`](super::BufferDescriptorSet)
/// at construction and is driven through exactly four phases, in this order:
///
/// 1. [`validate`](Self::validate) - shape check, no mutation
/// 2. [`pre_process`](Self::pre_process) - read buffers into typed state
/// 3. [`execute`](Self::execute) - compute, possibly cooperating across
///    participants through the supplied [`CommContext`]
/// 4. [`post_process`](Self::post_process) - write results back out
///
/// Lifecycle state is implicit: there is no explicit state field, and a task
/// is not reusable after a failed phase. Callers (normally the
/// [`PerfHarness`](crate::perf::PerfHarness)) must stop the sequence at the
/// first error; no phase retries or recovers another phase's failure.
///
/// # Example
///
/// ```
/// use spmd_bench::comm::{CommContext, SingleProcess};
/// use spmd_bench::task::{BufferDescriptorSet, TaskContract, TaskError, TaskResult};
///
/// /// Copies its single input buffer to its single output buffer.
/// struct Passthrough<'a> {
///     buffers: BufferDescriptorSet<'a>,
///     data: Vec<i64>,
/// }
///
/// impl TaskContract for Passthrough<'_> {
///     fn validate(&self) -> TaskResult<()> {
///         if self.buffers.input_count() != 1 || self.buffers.output_count() != 1 {
///             return Err(TaskError::invalid_input("expected 1 input and 1 output"));
///         }
///         Ok(())
///     }
///
///     fn pre_process(&mut self) -> TaskResult<()> {
///         self.data = self.buffers.inputs()[0].as_slice::<i64>()?.to_vec();
///         Ok(())
///     }
///
///     fn execute(&mut self, _ctx: &dyn CommContext) -> TaskResult<()> {
///         Ok(())
///     }
///
///     fn post_process(&mut self) -> TaskResult<()> {
///         let out = self.buffers.outputs_mut()[0].as_slice_mut::<i64>()?;
///         out.copy_from_slice(&self.data);
///         Ok(())
///     }
/// }
///
/// let input = [1i64, 2, 3];
/// let mut output = [0i64; 3];
/// let buffers = BufferDescriptorSet::builder()
///     .input(&input)
///     .output(&mut output)
///     .build();
/// let mut task = Passthrough { buffers, data: Vec::new() };
///
/// let ctx = SingleProcess::new();
/// task.validate().unwrap();
/// task.pre_process().unwrap();
/// task.execute(&ctx).unwrap();
/// task.post_process().unwrap();
/// drop(task);
/// assert_eq!(output, [1, 2, 3]);
/// ```
pub trait TaskContract: Send {
    /// Checks that the bound descriptor set's shape (number of buffers and
    /// their element counts) matches what this algorithm requires.
    ///
    /// Must not mutate internal state or referenced memory, and repeated
    /// calls without intervening mutation return the same result.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidInput`] on any shape mismatch; the
    /// remaining phases must not be invoked afterwards.
    fn validate(&self) -> TaskResult<()>;

    /// Reads the raw input buffers and materializes them into typed internal
    /// state. Precondition: [`validate`](Self::validate) succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::PhaseFailure`] if materialization fails, or
    /// [`TaskError::MalformedDescriptor`] if a descriptor's declared count
    /// does not match its memory.
    fn pre_process(&mut self) -> TaskResult<()>;

    /// Performs the computation using internal state.
    ///
    /// This is the only phase that may involve cross-participant cooperation;
    /// any collective communication goes through `ctx`, never through ambient
    /// global state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::PhaseFailure`] if the computation fails.
    fn execute(&mut self, ctx: &dyn CommContext) -> TaskResult<()>;

    /// Writes computed results into the output side of the descriptor set.
    ///
    /// On failure the output buffers are left partially written; callers must
    /// not read them.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::PhaseFailure`] if write-back fails, or
    /// [`TaskError::MalformedDescriptor`] on an inconsistent output
    /// descriptor.
    fn post_process(&mut self) -> TaskResult<()>;
}

/// Drives one complete lifecycle pass in the required order, stopping at the
/// first failing phase.
///
/// # Errors
///
/// Propagates the first phase error unchanged.
pub fn run_once(task: &mut dyn TaskContract, ctx: &dyn CommContext) -> TaskResult<()> {
    task.validate()?;
    task.pre_process()?;
    task.execute(ctx)?;
    task.post_process()
}
