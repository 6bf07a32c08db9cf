use linsolve::Matrix;

/// Solves `a * x = b` directly by Gaussian elimination with partial pivoting.
///
/// Returns `None` when `a` is not square, `b` has the wrong length or the
/// matrix is singular.
pub fn gaussian_elimination(a: &Matrix, b: &[f64]) -> Option<Vec<f64>> {
    let n = a.rows();
    if !a.is_square() || b.len() != n {
        return None;
    }

    // augmented [a | b]
    let mut tmp: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let mut row = a.row(i).to_vec();
            row.push(b[i]);
            row
        })
        .collect();

    for k in 0..n {
        let pivot_row = (k..n).max_by(|&i, &j| tmp[i][k].abs().total_cmp(&tmp[j][k].abs()))?;
        if tmp[pivot_row][k] == 0.0 {
            return None;
        }
        tmp.swap(pivot_row, k);

        let pivot = tmp[k][k];
        for j in k..=n {
            tmp[k][j] /= pivot;
        }

        for i in (k + 1)..n {
            let factor = tmp[i][k];
            for j in k..=n {
                tmp[i][j] -= factor * tmp[k][j];
            }
        }
    }

    let mut x = vec![0.0; n];
    for m in (0..n).rev() {
        x[m] = tmp[m][n];
        for j in (m + 1)..n {
            x[m] -= tmp[m][j] * x[j];
        }
    }
    Some(x)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use linsolve::{GaussSeidel, LinearSystem};
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_textbook_system() {
        let a = Matrix::from_rows(&[[3.0, -0.1, -0.2], [0.1, 7.0, -0.3], [0.3, -0.2, 10.0]]).unwrap();
        let x = gaussian_elimination(&a, &[7.85, -19.3, 71.4]).unwrap();
        assert_abs_diff_eq!(x[0], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], -2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(x[2], 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_needs_pivoting() {
        // zero in the top-left corner
        let a = Matrix::from_rows(&[[0.0, 1.0], [1.0, 1.0]]).unwrap();
        let x = gaussian_elimination(&a, &[2.0, 3.0]).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_singular() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        assert_eq!(gaussian_elimination(&a, &[1.0, 2.0]), None);
        assert_eq!(gaussian_elimination(&Matrix::zeros(2, 3), &[1.0, 2.0]), None);
    }

    #[test]
    fn test_agrees_with_gauss_seidel() {
        let mut rng = Pcg64::seed_from_u64(42);
        for n in 1..=8 {
            let system = LinearSystem::random_diagonally_dominant(n, &mut rng);
            let direct = gaussian_elimination(&system.a, &system.b).unwrap();
            let iterative = GaussSeidel::default().solve(&system.a, &system.b).unwrap();
            for (d, i) in direct.iter().zip(iterative.iter()) {
                assert_abs_diff_eq!(d, i, epsilon = 1e-5);
            }
        }
    }
}
