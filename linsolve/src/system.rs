use crate::{
    error::Result,
    gauss_seidel::GaussSeidel,
    math::{norm, Matrix},
    options::SolverOptions,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// A coefficient matrix paired with its right-hand side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearSystem {
    pub a: Matrix,
    pub b: Vec<f64>,
}

impl LinearSystem {
    pub fn new(a: Matrix, b: Vec<f64>) -> Self {
        LinearSystem { a, b }
    }

    /// A strictly diagonally dominant system of size `n`. Off-diagonal
    /// entries are drawn from `[-1, 1)`, so each pivot exceeds its row's
    /// off-diagonal sum by at least `n`.
    pub fn random_diagonally_dominant<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut a = Matrix::zeros(n, n);
        for i in 0..n {
            let mut off_diagonal = 0.0;
            for j in 0..n {
                if j != i {
                    let v: f64 = rng.gen_range(-1.0..1.0);
                    a[(i, j)] = v;
                    off_diagonal += v.abs();
                }
            }
            let pivot = off_diagonal + n as f64 * rng.gen_range(1.0_f64..2.0);
            a[(i, i)] = if rng.gen_bool(0.5) { pivot } else { -pivot };
        }
        let b = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
        LinearSystem { a, b }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.b.len()
    }

    pub fn solve(&self, options: &SolverOptions) -> Result<Vec<f64>> {
        GaussSeidel::new(*options).solve(&self.a, &self.b)
    }

    /// `A * x - b`
    pub fn residual(&self, x: &[f64]) -> Vec<f64> {
        self.a
            .mul_vec(x)
            .iter()
            .zip(self.b.iter())
            .map(|(ax, b)| ax - b)
            .collect()
    }

    pub fn residual_norm(&self, x: &[f64]) -> f64 {
        norm(&self.residual(x))
    }

    /// `|A * x - b| / |b|`, falling back to `|A * x|` for a zero right-hand side.
    pub fn relative_residual(&self, x: &[f64]) -> f64 {
        let b_norm = norm(&self.b);
        if b_norm == 0.0 {
            norm(&self.a.mul_vec(x))
        } else {
            self.residual_norm(x) / b_norm
        }
    }
}

pub fn load_system<P: AsRef<Path>>(path: P) -> std::result::Result<LinearSystem, Box<dyn Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let system = serde_json::from_reader(reader)?;

    Ok(system)
}

pub fn save_system<P: AsRef<Path>>(
    path: P,
    system: &LinearSystem,
) -> std::result::Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, system)?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::SolveError;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_residual() {
        let system = LinearSystem::new(
            Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap(),
            vec![3.0, 4.0],
        );
        assert_eq!(system.residual(&[1.0, 1.0]), vec![0.0, 0.0]);
        assert_eq!(system.residual(&[0.0, 0.0]), vec![-3.0, -4.0]);
        assert_abs_diff_eq!(system.residual_norm(&[0.0, 0.0]), 5.0);
        assert_abs_diff_eq!(system.relative_residual(&[0.0, 0.0]), 1.0);
    }

    #[test]
    fn test_solve() {
        let system: LinearSystem = serde_json::from_str(
            r#"{
                "a": [[3.0, -0.1, -0.2], [0.1, 7.0, -0.3], [0.3, -0.2, 10.0]],
                "b": [7.85, -19.3, 71.4]
            }"#,
        )
        .unwrap();
        let x = system.solve(&SolverOptions::default()).unwrap();
        assert!(system.relative_residual(&x) < 1e-6);

        let strict = SolverOptions {
            tolerance: 0.0,
            max_iterations: 1,
            ..SolverOptions::default()
        };
        assert!(matches!(
            system.solve(&strict),
            Err(SolveError::MaxIterationsExceeded { .. })
        ));
    }

    #[test]
    fn test_random_system_is_seeded() {
        let first = LinearSystem::random_diagonally_dominant(5, &mut Pcg64::seed_from_u64(7));
        let second = LinearSystem::random_diagonally_dominant(5, &mut Pcg64::seed_from_u64(7));
        assert_eq!(first, second);
        assert_eq!(first.dimension(), 5);
        assert!(first.a.is_strictly_diagonally_dominant());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("linsolve-system-{}.json", std::process::id()));
        let system = LinearSystem::random_diagonally_dominant(4, &mut Pcg64::seed_from_u64(1));

        save_system(&path, &system).unwrap();
        let loaded = load_system(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.a.rows(), 4);
        assert_eq!(loaded.b.len(), 4);
        for i in 0..4 {
            assert_abs_diff_eq!(loaded.b[i], system.b[i]);
        }
    }
}
