//! # Performance Measurement
//!
//! The measurement orchestrator: drives a task through repeated lifecycle
//! invocations and reports a statistically meaningful per-iteration timing.
//!
//! ## Modes
//!
//! - **FullPipeline**: every iteration times the whole four-phase sequence.
//! - **ExecuteOnly**: setup and teardown run once untimed; only the repeated
//!   `execute` calls are timed.
//!
//! Separating the two lets a caller distinguish fixed per-call overhead
//! (marshalling, validation) from the steady-state cost of the computation.
//!
//! ## Example
//!
//! ```
//! use spmd_bench::comm::SingleProcess;
//! use spmd_bench::perf::{PerfConfig, PerfHarness};
//! use spmd_bench::task::BufferDescriptorSet;
//! use spmd_bench::tasks::row_sum::RowSumSeq;
//!
//! let dims = [2i64, 3];
//! let matrix = [1i64, 2, 3, 4, 5, 6];
//! let mut sums = [0i64; 2];
//! let buffers = BufferDescriptorSet::builder()
//!     .input(&dims)
//!     .input(&matrix)
//!     .output(&mut sums)
//!     .build();
//!
//! let ctx = SingleProcess::new();
//! let mut task = RowSumSeq::new(buffers);
//! let mut harness = PerfHarness::new(&mut task, &ctx);
//! let result = harness.pipeline_run(&PerfConfig::new(10)).unwrap();
//! harness.report(&result);
//! assert!(result.average_seconds >= 0.0);
//! ```

mod clock;
mod harness;

pub use clock::{Clock, MonotonicClock};
pub use harness::{PerfConfig, PerfError, PerfHarness, PerfMode, PerfResult};
