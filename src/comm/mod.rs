//! # Distributed Runtime Contract
//!
//! This module defines the primitives the harness and parallel tasks consume
//! from whatever transport replicates the program: each participant's rank
//! and the total participant count, a barrier, broadcasts, and collective
//! reductions. The core depends only on the [`CommContext`] trait, never on
//! a specific transport.
//!
//! Two implementations ship in-crate: [`SingleProcess`] for sequential
//! execution, and [`ProcessGroup`], a fixed-size in-process worker group
//! whose workers stand in for SPMD processes. Real multi-process transports
//! implement the same trait outside this crate.

mod context;
mod group;
mod single;

pub use context::{CommContext, ReduceOp};
pub use group::{GroupContext, ProcessGroup};
pub use single::SingleProcess;
