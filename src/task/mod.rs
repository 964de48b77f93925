//! # Task Lifecycle Contract
//!
//! This module defines the contract every benchmarkable task must implement.
//! The contract provides a standardized four-phase lifecycle so the
//! measurement harness can drive arbitrary algorithms without knowing what
//! they compute, along with the untyped buffer descriptors that carry a
//! task's inputs and outputs.

mod buffer;
mod contract;
mod error;

pub use buffer::{BufferDescriptorSet, BufferSetBuilder, InputDescriptor, OutputDescriptor};
pub use contract::{run_once, Phase, TaskContract};
pub use error::{TaskError, TaskResult};
