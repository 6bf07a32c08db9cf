use super::dot;
use crate::error::MatrixError;
use core::ops::{Index, IndexMut};
use serde::{Deserialize, Serialize};

/// Dense matrix with row-major contiguous storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut mat = Matrix::zeros(n, n);
        for i in 0..n {
            mat[(i, i)] = 1.0;
        }
        mat
    }

    /// Wraps `data`, which must hold `rows * cols` values in row-major order.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if data.len() != rows * cols {
            return Err(MatrixError::DataLength {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Builds a matrix from a slice of rows. Every row must have the length of the first.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, MatrixError> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatrixError::RaggedRow {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Matrix {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.cols;
        &self.data[start..start + self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, index: usize) -> &mut [f64] {
        let start = index * self.cols;
        &mut self.data[start..start + self.cols]
    }

    pub fn transpose(&self) -> Self {
        let mut mat = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                mat[(j, i)] = self[(i, j)];
            }
        }
        mat
    }

    /// Computes `self * rhs`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs.len()` differs from the column count.
    pub fn mul_vec(&self, rhs: &[f64]) -> Vec<f64> {
        assert_eq!(rhs.len(), self.cols, "mul_vec: length mismatch");
        (0..self.rows).map(|i| dot(self.row(i), rhs)).collect()
    }

    /// Each diagonal magnitude is strictly larger than the sum of the
    /// off-diagonal magnitudes in its row.
    pub fn is_strictly_diagonally_dominant(&self) -> bool {
        self.is_square()
            && (0..self.rows).all(|i| {
                let off_diagonal: f64 = self
                    .row(i)
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, v)| v.abs())
                    .sum();
                self[(i, i)].abs() > off_diagonal
            })
    }

    #[inline]
    fn offset(&self, (i, j): (usize, usize)) -> usize {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for a ({}, {}) matrix",
            i,
            j,
            self.rows,
            self.cols
        );
        i * self.cols + j
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;
    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[self.offset(index)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index);
        &mut self.data[offset]
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MatrixError;
    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(&rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(mat: Matrix) -> Self {
        (0..mat.rows).map(|i| mat.row(i).to_vec()).collect()
    }
}

#[test]
fn test_matrix() {
    let m0 = Matrix::from_rows(&[[1., 2.], [3., 4.], [5., 6.]]).unwrap();
    assert_eq!((m0.rows(), m0.cols()), (3, 2));
    assert_eq!(m0.row(1), &[3., 4.]);
    assert_eq!(m0[(2, 1)], 6.);

    let m1 = m0.transpose();
    assert_eq!(m1, Matrix::from_rows(&[[1., 3., 5.], [2., 4., 6.]]).unwrap());
    assert_eq!(m1.mul_vec(&[1., 1., 1.]), vec![9., 12.]);
    assert_eq!(Matrix::identity(2).mul_vec(&[7., -2.]), vec![7., -2.]);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rejects_bad_shapes() {
        assert_eq!(
            Matrix::from_rows(&[vec![1., 2.], vec![3.]]),
            Err(MatrixError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            Matrix::new(2, 2, vec![1., 2., 3.]),
            Err(MatrixError::DataLength {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds() {
        let m = Matrix::zeros(2, 3);
        let _ = m[(0, 3)];
    }

    #[test]
    fn test_json_rows() {
        let m: Matrix = serde_json::from_str("[[3.0, -0.1], [0.1, 7.0]]").unwrap();
        assert_eq!(m.row(0), &[3.0, -0.1]);
        assert_eq!(serde_json::to_string(&m).unwrap(), "[[3.0,-0.1],[0.1,7.0]]");
        assert!(serde_json::from_str::<Matrix>("[[1.0, 2.0], [3.0]]").is_err());
    }

    #[test]
    fn test_diagonal_dominance() {
        let dominant = Matrix::from_rows(&[[4., 1., -2.], [1., -3., 1.], [0., 1., 2.]]).unwrap();
        assert!(dominant.is_strictly_diagonally_dominant());

        let weak = Matrix::from_rows(&[[2., 1., 1.], [0., 1., 0.], [0., 0., 1.]]).unwrap();
        assert!(!weak.is_strictly_diagonally_dominant());
        assert!(!Matrix::zeros(2, 3).is_strictly_diagonally_dominant());
    }
}
