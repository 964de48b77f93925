//! Monte Carlo integration tasks.
//!
//! Estimates the integral of a caller-supplied function over `[lo, hi]` by
//! uniform sampling. Buffer layout shared by both variants:
//!
//! - `inputs[0]`: parameters, 3 × `f64` (`lo`, `hi`, `samples`)
//! - `outputs[0]`: the estimate, 1 × `f64`
//!
//! The integrand itself is not part of the descriptor set; it is supplied at
//! construction. The parallel variant expects buffers only on the
//! coordinator and splits the sample budget across participants during
//! `execute`.

mod par;
mod seq;

pub use par::MonteCarloPar;
pub use seq::MonteCarloSeq;

use rand::Rng;

use crate::task::{BufferDescriptorSet, Phase, TaskError, TaskResult};

/// Integrand signature for the Monte Carlo tasks.
pub type Integrand = fn(f64) -> f64;

const PARAMS_INPUT: usize = 0;
const ESTIMATE_OUTPUT: usize = 0;

/// Integration parameters materialized during pre-processing.
#[derive(Debug, Clone, Copy)]
struct Params {
    lo: f64,
    hi: f64,
    samples: u64,
}

/// Shape check shared by both variants.
fn check_shape(buffers: &BufferDescriptorSet<'_>) -> TaskResult<()> {
    if buffers.input_count() != 1 {
        return Err(TaskError::invalid_input(format!(
            "expected 1 input buffer, found {}",
            buffers.input_count()
        )));
    }
    if buffers.output_count() != 1 {
        return Err(TaskError::invalid_input(format!(
            "expected 1 output buffer, found {}",
            buffers.output_count()
        )));
    }
    let params = buffers
        .input(PARAMS_INPUT)
        .ok_or_else(|| TaskError::invalid_input("missing params buffer"))?;
    if params.len() != 3 {
        return Err(TaskError::invalid_input(format!(
            "params buffer must hold 3 elements, holds {}",
            params.len()
        )));
    }
    let estimate = buffers
        .output(ESTIMATE_OUTPUT)
        .ok_or_else(|| TaskError::invalid_input("missing estimate buffer"))?;
    if estimate.len() != 1 {
        return Err(TaskError::invalid_input(format!(
            "estimate buffer must hold 1 element, holds {}",
            estimate.len()
        )));
    }
    Ok(())
}

/// Reads and range-checks the parameter buffer.
fn read_params(buffers: &BufferDescriptorSet<'_>) -> TaskResult<Params> {
    let raw = buffers
        .input(PARAMS_INPUT)
        .ok_or_else(|| TaskError::phase(Phase::PreProcess, "missing params buffer"))?
        .as_slice::<f64>()?;
    if raw.len() != 3 {
        return Err(TaskError::phase(
            Phase::PreProcess,
            "params buffer must hold 3 elements",
        ));
    }
    let (lo, hi, samples) = (raw[0], raw[1], raw[2]);
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(TaskError::phase(
            Phase::PreProcess,
            format!("invalid bounds [{lo}, {hi}]"),
        ));
    }
    if !samples.is_finite() || samples < 1.0 {
        return Err(TaskError::phase(
            Phase::PreProcess,
            format!("sample count {samples} must be at least 1"),
        ));
    }
    Ok(Params {
        lo,
        hi,
        samples: samples as u64,
    })
}

/// Sums `count` evaluations of `f` at uniform points in `[lo, hi]`.
fn sample_sum(f: Integrand, lo: f64, hi: f64, count: u64) -> f64 {
    let mut rng = rand::rng();
    let mut sum = 0.0;
    for _ in 0..count {
        sum += f(rng.random_range(lo..=hi));
    }
    sum
}
