//! Matrix row-sum tasks.
//!
//! Buffer layout shared by both variants:
//!
//! - `inputs[0]`: dimensions, 2 × `i64` (`rows`, `cols`)
//! - `inputs[1]`: the matrix, `rows * cols` × `i64`, row-major
//! - `outputs[0]`: per-row sums, `rows` × `i64`
//!
//! The parallel variant expects buffers only on the coordinator; every other
//! participant binds an empty descriptor set and receives the matrix over
//! the runtime context during `execute`.

mod par;
mod seq;

pub use par::RowSumPar;
pub use seq::RowSumSeq;

use crate::task::{BufferDescriptorSet, Phase, TaskError, TaskResult};

const DIMS_INPUT: usize = 0;
const MATRIX_INPUT: usize = 1;
const SUMS_OUTPUT: usize = 0;

/// Shape check shared by both variants.
fn check_shape(buffers: &BufferDescriptorSet<'_>) -> TaskResult<()> {
    if buffers.input_count() != 2 {
        return Err(TaskError::invalid_input(format!(
            "expected 2 input buffers, found {}",
            buffers.input_count()
        )));
    }
    if buffers.output_count() != 1 {
        return Err(TaskError::invalid_input(format!(
            "expected 1 output buffer, found {}",
            buffers.output_count()
        )));
    }

    let dims = buffers
        .input(DIMS_INPUT)
        .ok_or_else(|| TaskError::invalid_input("missing dims buffer"))?;
    if dims.len() != 2 {
        return Err(TaskError::invalid_input(format!(
            "dims buffer must hold 2 elements, holds {}",
            dims.len()
        )));
    }
    let dims = dims.as_slice::<i64>()?;
    let (rows, cols) = (dims[0], dims[1]);
    if rows < 0 || cols < 0 {
        return Err(TaskError::invalid_input(format!(
            "negative dimensions {rows}x{cols}"
        )));
    }
    let expected = (rows as usize)
        .checked_mul(cols as usize)
        .ok_or_else(|| TaskError::invalid_input(format!("dimensions {rows}x{cols} overflow")))?;

    let matrix = buffers
        .input(MATRIX_INPUT)
        .ok_or_else(|| TaskError::invalid_input("missing matrix buffer"))?;
    if matrix.len() != expected {
        return Err(TaskError::invalid_input(format!(
            "matrix buffer holds {} elements, dims require {expected}",
            matrix.len()
        )));
    }

    let sums = buffers
        .output(SUMS_OUTPUT)
        .ok_or_else(|| TaskError::invalid_input("missing sums buffer"))?;
    if sums.len() != rows as usize {
        return Err(TaskError::invalid_input(format!(
            "sums buffer holds {} elements, expected {rows}",
            sums.len()
        )));
    }
    Ok(())
}

/// Materializes the validated inputs into owned state.
fn read_inputs(buffers: &BufferDescriptorSet<'_>) -> TaskResult<(usize, usize, Vec<i64>)> {
    let dims = buffers
        .input(DIMS_INPUT)
        .ok_or_else(|| TaskError::phase(Phase::PreProcess, "missing dims buffer"))?
        .as_slice::<i64>()?;
    if dims.len() != 2 {
        return Err(TaskError::phase(
            Phase::PreProcess,
            "dims buffer must hold 2 elements",
        ));
    }
    let (rows, cols) = (dims[0] as usize, dims[1] as usize);
    let matrix = buffers
        .input(MATRIX_INPUT)
        .ok_or_else(|| TaskError::phase(Phase::PreProcess, "missing matrix buffer"))?
        .as_slice::<i64>()?
        .to_vec();
    Ok((rows, cols, matrix))
}

/// Sums each row in `range` of a row-major matrix into `sums`.
fn sum_rows(matrix: &[i64], cols: usize, range: std::ops::Range<usize>, sums: &mut [i64]) {
    for row in range {
        sums[row] = matrix[row * cols..(row + 1) * cols].iter().sum();
    }
}
