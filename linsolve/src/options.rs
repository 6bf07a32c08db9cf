use serde::{Deserialize, Serialize};
use std::{error::Error, fs::File, io::BufReader, path::Path};

/// What to do with a zero on the diagonal of the coefficient matrix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotCheck {
    /// Fail with `SolveError::SingularPivot` before sweeping.
    Reject,
    /// Divide anyway. The non-finite values that result keep the
    /// stopping criterion from ever holding.
    Unchecked,
}

impl Default for PivotCheck {
    fn default() -> Self {
        PivotCheck::Reject
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Stop once every component's relative change is below this.
    pub tolerance: f64,
    pub max_iterations: usize,
    pub pivot_check: PivotCheck,
}

impl SolverOptions {
    pub const DEFAULT_TOLERANCE: f64 = 1e-7;
    pub const DEFAULT_MAX_ITERATIONS: usize = 50;

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let options = serde_json::from_reader(reader)?;

        Ok(options)
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            tolerance: Self::DEFAULT_TOLERANCE,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            pivot_check: PivotCheck::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_json() {
        let options: SolverOptions = serde_json::from_str(r#"{"tolerance": 1e-9}"#).unwrap();
        assert_eq!(
            options,
            SolverOptions {
                tolerance: 1e-9,
                ..SolverOptions::default()
            }
        );

        let options: SolverOptions =
            serde_json::from_str(r#"{"max_iterations": 200, "pivot_check": "unchecked"}"#).unwrap();
        assert_eq!(options.tolerance, 1e-7);
        assert_eq!(options.max_iterations, 200);
        assert_eq!(options.pivot_check, PivotCheck::Unchecked);
    }
}
