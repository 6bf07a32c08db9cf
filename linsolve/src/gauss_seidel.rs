//! Gauss-Seidel iteration without relaxation.
//!
//! The coefficient matrix `A` is split once into an iteration operator `C`
//! (the off-diagonal entries of each row divided by that row's pivot) and an
//! offset vector `d = b / diag(A)`, so that a sweep is the affine update
//! `x <- d - C * x`. Components are updated one at a time in ascending
//! order, and every update reads the current `x`: entries below `i` already
//! hold this sweep's values, entries above `i` still hold the previous
//! sweep's. That read-after-write order is what separates Gauss-Seidel from
//! Jacobi iteration, so the inner loop stays sequential.
//!
//! The iteration stops once every component's relative change
//! `|(x_i - x_old_i) / x_i|` is below the tolerance. A component that lands
//! exactly on zero keeps the relative change of its last nonzero update.

use crate::{
    error::{Result, SolveError},
    math::{dot, Matrix},
    options::{PivotCheck, SolverOptions},
};
use tracing::{debug, trace, warn};

/// The pair `(C, d)` derived from `A` and `b`.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationOperator {
    c: Matrix,
    d: Vec<f64>,
}

impl IterationOperator {
    pub fn build(a: &Matrix, b: &[f64], pivot_check: PivotCheck) -> Result<Self> {
        validate(a, b)?;

        let n = a.rows();
        let mut c = Matrix::zeros(n, n);
        let mut d = vec![0.0; n];
        for i in 0..n {
            let pivot = a[(i, i)];
            if pivot == 0.0 {
                match pivot_check {
                    PivotCheck::Reject => return Err(SolveError::SingularPivot { row: i }),
                    PivotCheck::Unchecked => warn!(row = i, "dividing by a zero pivot"),
                }
            }

            for (j, (c_ij, &a_ij)) in c.row_mut(i).iter_mut().zip(a.row(i)).enumerate() {
                if j != i {
                    *c_ij = a_ij / pivot;
                }
            }
            d[i] = b[i] / pivot;
        }

        Ok(IterationOperator { c, d })
    }

    #[inline]
    pub fn c(&self) -> &Matrix {
        &self.c
    }

    #[inline]
    pub fn d(&self) -> &[f64] {
        &self.d
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.d.len()
    }

    /// Runs one sweep over `x`, recording the relative change of every
    /// component that ends up nonzero into `ea`.
    fn sweep(&self, x: &mut [f64], x_old: &[f64], ea: &mut [f64]) {
        for i in 0..self.dimension() {
            let x_i = self.d[i] - dot(self.c.row(i), x);
            x[i] = x_i;

            if x_i != 0.0 {
                ea[i] = ((x_i - x_old[i]) / x_i).abs();
            }
        }
    }
}

fn validate(a: &Matrix, b: &[f64]) -> Result<()> {
    if !a.is_square() {
        return Err(SolveError::DimensionMismatch {
            rows: a.rows(),
            cols: a.cols(),
        });
    }
    if a.rows() == 0 {
        return Err(SolveError::EmptyMatrix);
    }
    if b.len() != a.rows() {
        return Err(SolveError::RhsLengthMismatch {
            expected: a.rows(),
            actual: b.len(),
        });
    }
    Ok(())
}

// NaN is sticky so a poisoned component shows up in the report.
fn max_relative_change(ea: &[f64]) -> f64 {
    ea.iter()
        .fold(0.0, |max, &e| if e.is_nan() || e > max { e } else { max })
}

/// An iterate together with how it was reached.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub x: Vec<f64>,
    /// Number of sweeps performed.
    pub iterations: usize,
    pub max_relative_change: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Converged(Solution),
    /// The budget ran out. The iterate has not met the stopping criterion.
    Exhausted(Solution),
}

impl Outcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, Outcome::Converged(_))
    }

    pub fn solution(&self) -> &Solution {
        match self {
            Outcome::Converged(solution) | Outcome::Exhausted(solution) => solution,
        }
    }

    pub fn into_solution(self) -> Solution {
        match self {
            Outcome::Converged(solution) | Outcome::Exhausted(solution) => solution,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GaussSeidel {
    options: SolverOptions,
}

impl GaussSeidel {
    pub fn new(options: SolverOptions) -> Self {
        GaussSeidel { options }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    pub fn solve(&self, a: &Matrix, b: &[f64]) -> Result<Vec<f64>> {
        self.solve_detailed(a, b).map(|solution| solution.x)
    }

    /// Like [`GaussSeidel::solve`] but also reports the sweep count and the
    /// final relative change.
    pub fn solve_detailed(&self, a: &Matrix, b: &[f64]) -> Result<Solution> {
        match self.solve_best_effort(a, b)? {
            Outcome::Converged(solution) => Ok(solution),
            Outcome::Exhausted(solution) => Err(SolveError::MaxIterationsExceeded {
                iterations: solution.iterations,
                max_relative_change: solution.max_relative_change,
            }),
        }
    }

    /// Hands back the last iterate even when the budget runs out. Only
    /// validation failures are reported as errors.
    pub fn solve_best_effort(&self, a: &Matrix, b: &[f64]) -> Result<Outcome> {
        let operator = IterationOperator::build(a, b, self.options.pivot_check)?;
        let n = operator.dimension();
        let tolerance = self.options.tolerance;

        let mut x = vec![0.0; n];
        let mut x_old = vec![0.0; n];
        let mut ea = vec![0.0; n];
        let mut max_change = f64::INFINITY;
        let mut iterations = 0;

        while iterations < self.options.max_iterations {
            iterations += 1;
            x_old.copy_from_slice(&x);
            operator.sweep(&mut x, &x_old, &mut ea);

            max_change = max_relative_change(&ea);
            trace!(iteration = iterations, max_relative_change = max_change);

            // all() rather than comparing the max so that NaN never passes
            if ea.iter().all(|&e| e < tolerance) {
                debug!(n, iterations, max_relative_change = max_change, "converged");
                return Ok(Outcome::Converged(Solution {
                    x,
                    iterations,
                    max_relative_change: max_change,
                }));
            }
        }

        warn!(
            n,
            iterations,
            max_relative_change = max_change,
            tolerance,
            "maximum iterations reached"
        );
        Ok(Outcome::Exhausted(Solution {
            x,
            iterations,
            max_relative_change: max_change,
        }))
    }
}

/// Solves `a * x = b` starting from `x = 0`.
pub fn gauss_seidel(a: &Matrix, b: &[f64], tolerance: f64, max_iterations: usize) -> Result<Vec<f64>> {
    GaussSeidel::new(SolverOptions {
        tolerance,
        max_iterations,
        ..SolverOptions::default()
    })
    .solve(a, b)
}
