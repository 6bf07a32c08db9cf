use super::Matrix;
use glam::{DMat2, DMat3, DMat4};

// glam stores columns, Matrix stores rows.
macro_rules! impl_from_glam {
    ($t:ty, $n:expr) => {
        impl From<$t> for Matrix {
            fn from(m: $t) -> Self {
                let mut mat = Matrix::zeros($n, $n);
                for i in 0..$n {
                    mat.row_mut(i).copy_from_slice(&m.row(i).to_array());
                }
                mat
            }
        }
    };
}

impl_from_glam!(DMat2, 2);
impl_from_glam!(DMat3, 3);
impl_from_glam!(DMat4, 4);

#[test]
fn test_from_dmat3() {
    use approx::assert_abs_diff_eq;
    use glam::DVec3;

    let m = DMat3::from_cols(
        DVec3::new(3.0, 0.1, 0.3),
        DVec3::new(-0.1, 7.0, -0.2),
        DVec3::new(-0.2, -0.3, 10.0),
    );
    let mat = Matrix::from(m);
    assert_eq!(mat.row(0), &[3.0, -0.1, -0.2]);
    assert_eq!(mat.row(2), &[0.3, -0.2, 10.0]);

    let v = DVec3::new(1.0, 2.0, 3.0);
    let expected = (m * v).to_array();
    for (lhs, rhs) in mat.mul_vec(&v.to_array()).iter().zip(expected.iter()) {
        assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-12);
    }
}

#[test]
fn test_from_dmat2() {
    let mat = Matrix::from(DMat2::from_cols_array(&[4.0, 2.0, 1.0, 5.0]));
    assert_eq!(mat, Matrix::from_rows(&[[4.0, 1.0], [2.0, 5.0]]).unwrap());
}
