//! The measurement harness.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::comm::{CommContext, ReduceOp};
use crate::task::{TaskContract, TaskError};

use super::clock::{Clock, MonotonicClock};

/// Measurement granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerfMode {
    /// Times the entire validate → pre-process → execute → post-process
    /// sequence, repeated every iteration.
    FullPipeline,
    /// Runs setup once untimed, times only the repeated `execute` calls,
    /// then runs teardown once untimed.
    ExecuteOnly,
}

impl PerfMode {
    /// Stable label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullPipeline => "full_pipeline",
            Self::ExecuteOnly => "execute_only",
        }
    }
}

impl fmt::Display for PerfMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configuration for one harness invocation.
#[derive(Clone)]
pub struct PerfConfig {
    iterations: u32,
    clock: Arc<dyn Clock>,
}

impl PerfConfig {
    /// Creates a configuration running `iterations` timed repetitions with
    /// the default monotonic clock.
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations,
            clock: Arc::new(MonotonicClock::new()),
        }
    }

    /// Replaces the clock source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Number of timed repetitions.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// The injected clock source.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

impl fmt::Debug for PerfConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerfConfig")
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

/// Result of a completed measurement run.
///
/// Produced only when every iteration completed; there is no partial-result
/// reporting.
#[derive(Debug, Clone, Serialize)]
pub struct PerfResult {
    /// Measurement mode the run used.
    pub mode: PerfMode,
    /// Number of timed repetitions.
    pub iterations: u32,
    /// Number of cooperating participants.
    pub participants: usize,
    /// Mean elapsed seconds per timed repetition. Each repetition's elapsed
    /// time is the maximum across participants, so stragglers dominate.
    pub average_seconds: f64,
}

impl PerfResult {
    /// Formats the one-line record handed to the report consumer.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "mode={} iterations={} participants={} average_seconds={:.9}",
            self.mode, self.iterations, self.participants, self.average_seconds
        )
    }
}

/// Errors terminating a measurement run.
#[derive(Debug, Error)]
pub enum PerfError {
    /// The configuration requested zero repetitions; an average over zero
    /// runs is meaningless.
    #[error("iterations must be at least 1")]
    ZeroIterations,

    /// A lifecycle phase failed. The run stops immediately: no further
    /// phases, no further iterations, no result.
    #[error(transparent)]
    Task(#[from] TaskError),
}

/// Orchestrates repeated lifecycle execution of one task.
///
/// Timing discipline for SPMD execution: every timed iteration starts with a
/// barrier so no participant begins early, each participant measures its own
/// elapsed time, and the per-iteration times are combined with a
/// max-reduction before accumulating, so the reported cost matches real
/// end-to-end latency. All participants compute the same [`PerfResult`];
/// [`report`](Self::report) emits it exactly once, from the coordinator.
pub struct PerfHarness<'a, T: TaskContract> {
    task: &'a mut T,
    comm: &'a dyn CommContext,
}

impl<'a, T: TaskContract> PerfHarness<'a, T> {
    /// Binds the harness to a task and the runtime context driving it.
    pub fn new(task: &'a mut T, comm: &'a dyn CommContext) -> Self {
        Self { task, comm }
    }

    /// Times the full four-phase sequence, repeated `iterations` times.
    ///
    /// # Errors
    ///
    /// Returns [`PerfError::ZeroIterations`] for an empty configuration, or
    /// the first phase error, which aborts the whole run.
    pub fn pipeline_run(&mut self, config: &PerfConfig) -> Result<PerfResult, PerfError> {
        self.measure(config, PerfMode::FullPipeline)
    }

    /// Runs setup once, times `iterations` repeated `execute` calls, then
    /// runs teardown once.
    ///
    /// # Errors
    ///
    /// Same conditions as [`pipeline_run`](Self::pipeline_run).
    pub fn execute_run(&mut self, config: &PerfConfig) -> Result<PerfResult, PerfError> {
        self.measure(config, PerfMode::ExecuteOnly)
    }

    fn measure(&mut self, config: &PerfConfig, mode: PerfMode) -> Result<PerfResult, PerfError> {
        if config.iterations == 0 {
            return Err(PerfError::ZeroIterations);
        }

        if mode == PerfMode::ExecuteOnly {
            self.task.validate()?;
            self.task.pre_process()?;
        }

        let mut total = 0.0f64;
        for iteration in 0..config.iterations {
            self.comm.barrier();
            let start = config.clock.elapsed();
            match mode {
                PerfMode::FullPipeline => {
                    self.task.validate()?;
                    self.task.pre_process()?;
                    self.task.execute(self.comm)?;
                    self.task.post_process()?;
                },
                PerfMode::ExecuteOnly => self.task.execute(self.comm)?,
            }
            let local = config.clock.elapsed() - start;
            let agreed = self.comm.reduce_f64(local, ReduceOp::Max);
            total += agreed;
            debug!(
                iteration,
                local_seconds = local,
                agreed_seconds = agreed,
                "timed iteration complete"
            );
        }

        if mode == PerfMode::ExecuteOnly {
            self.task.post_process()?;
        }

        Ok(PerfResult {
            mode,
            iterations: config.iterations,
            participants: self.comm.size(),
            average_seconds: total / f64::from(config.iterations),
        })
    }

    /// Emits the measurement record, exactly once, from the coordinator.
    /// Non-coordinator participants return silently.
    pub fn report(&self, result: &PerfResult) {
        if !self.comm.is_coordinator() {
            return;
        }
        info!(
            mode = %result.mode,
            iterations = result.iterations,
            participants = result.participants,
            average_seconds = result.average_seconds,
            "perf measurement"
        );
    }
}
