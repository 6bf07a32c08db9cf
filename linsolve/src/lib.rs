//! Iterative solution of square linear systems by Gauss-Seidel sweeps.

pub mod error;
pub mod gauss_seidel;
mod math;
pub mod options;
pub mod system;

pub use error::{MatrixError, SolveError};
pub use gauss_seidel::{gauss_seidel, GaussSeidel, IterationOperator, Outcome, Solution};
pub use math::Matrix;
pub use options::{PivotCheck, SolverOptions};
pub use system::{load_system, save_system, LinearSystem};
