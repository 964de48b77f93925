//! # spmd-bench
//!
//! A benchmarking and execution harness that runs and times parallel-algorithm
//! implementations uniformly, independent of what each algorithm computes.
//!
//! ## Features
//!
//! - Four-phase task lifecycle (validate → pre-process → execute → post-process)
//! - Pipeline and execute-only timing modes
//! - Cross-participant timing agreement for SPMD execution (barrier before
//!   every timed iteration, straggler-dominated max-reduction of elapsed time)
//! - Untyped, non-owning buffer descriptors decoupling the harness from
//!   algorithm payloads
//!
//! ## Architecture
//!
//! Every algorithm variant implements the [`task::TaskContract`] trait and is
//! bound to a [`task::BufferDescriptorSet`] describing caller-owned memory.
//! The [`perf::PerfHarness`] drives a task through repeated lifecycle
//! invocations against an explicit [`comm::CommContext`], which supplies the
//! participant's rank, a barrier, and the collective reductions the timing
//! discipline relies on.
//!
//! ## Tasks
//!
//! Concrete algorithms live in [`tasks`], one directory per algorithm with a
//! sequential and an SPMD-parallel variant of each. See the [`task`]
//! documentation for the lifecycle rules new tasks must honor.

pub mod comm;
pub mod perf;
pub mod task;
pub mod tasks;
