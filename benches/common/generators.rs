//! Test data generators for benchmarks.
//!
//! Provides matrices and integration parameter sets in the buffer layouts
//! the built-in tasks expect.

use rand::Rng;

/// A generated row-sum problem: dims buffer, matrix buffer, and the
/// expected per-row sums.
pub struct MatrixProblem {
    pub dims: [i64; 2],
    pub matrix: Vec<i64>,
    pub expected: Vec<i64>,
}

/// Generate a random `rows` x `cols` matrix with small entries.
pub fn matrix_problem(rows: usize, cols: usize) -> MatrixProblem {
    let mut rng = rand::rng();
    let matrix: Vec<i64> = (0..rows * cols)
        .map(|_| rng.random_range(-100i64..=100))
        .collect();
    let expected = (0..rows)
        .map(|r| matrix[r * cols..(r + 1) * cols].iter().sum())
        .collect();
    MatrixProblem {
        dims: [rows as i64, cols as i64],
        matrix,
        expected,
    }
}

/// Generate Monte Carlo parameters over a unit-ish interval, in the
/// `[lo, hi, samples]` layout the task reads.
pub fn monte_carlo_params(samples: u64) -> [f64; 3] {
    let mut rng = rand::rng();
    let lo = rng.random_range(0.0f64..1.0);
    let width = rng.random_range(0.5f64..1.0);
    [lo, lo + width, samples as f64]
}

/// Integrand used by the randomized measurement scenarios.
pub fn scenario_integrand(x: f64) -> f64 {
    ((4.0 * x).sin() + 2.0 * x * x).exp()
}
