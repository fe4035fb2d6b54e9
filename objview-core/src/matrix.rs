/// Dense row-major matrix of `f32` used for model transformations
use std::ops::{Index, IndexMut, Mul};

use nalgebra::Matrix4;

use crate::error::{MatrixError, MatrixResult};

/// Absolute tolerance used by matrix equality.
pub const EPSILON: f32 = 1e-6;

/// A dense `rows x cols` matrix. Dimensions are fixed for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Create a zero-filled matrix. Both dimensions must be non-zero.
    pub fn new(rows: usize, cols: usize) -> MatrixResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::InvalidDimensions { rows, cols });
        }
        Ok(Self::zeroed(rows, cols))
    }

    /// Create a matrix with ones on the main diagonal.
    pub fn identity(rows: usize, cols: usize) -> MatrixResult<Self> {
        let mut matrix = Self::new(rows, cols)?;
        matrix.set_identity();
        Ok(matrix)
    }

    /// The 4x4 identity, the starting point of every model transform.
    pub fn identity4() -> Self {
        let mut matrix = Self::zeroed(4, 4);
        matrix.set_identity();
        matrix
    }

    fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entries in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Checked access to one row.
    pub fn row(&self, row: usize) -> MatrixResult<&[f32]> {
        if row >= self.rows {
            return Err(MatrixError::OutOfRange {
                row,
                rows: self.rows,
            });
        }
        let start = row * self.cols;
        Ok(&self.data[start..start + self.cols])
    }

    /// Checked mutable access to one row.
    pub fn row_mut(&mut self, row: usize) -> MatrixResult<&mut [f32]> {
        if row >= self.rows {
            return Err(MatrixError::OutOfRange {
                row,
                rows: self.rows,
            });
        }
        let start = row * self.cols;
        Ok(&mut self.data[start..start + self.cols])
    }

    /// Set entry `(i, j)` to 1.0 where `i == j` and 0.0 elsewhere. Works for rectangular shapes.
    pub fn set_identity(&mut self) {
        for i in 0..self.rows {
            for j in 0..self.cols {
                self.data[i * self.cols + j] = if i == j { 1.0 } else { 0.0 };
            }
        }
    }

    /// Return `self * other` without touching either operand.
    pub fn product(&self, other: &Matrix) -> MatrixResult<Matrix> {
        if self.cols != other.rows {
            return Err(MatrixError::IncompatibleDimensions {
                left: (self.rows, self.cols),
                right: (other.rows, other.cols),
            });
        }

        let mut result = Self::zeroed(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.data[i * self.cols + k] * other.data[k * other.cols + j];
                }
                result.data[i * other.cols + j] = sum;
            }
        }
        Ok(result)
    }

    /// Replace `self` with `self * other`.
    pub fn multiply(&mut self, other: &Matrix) -> MatrixResult<()> {
        *self = self.product(other)?;
        Ok(())
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= EPSILON)
    }
}

/// Row access. Panics when `row >= rows`; use [`Matrix::row`] for a checked variant.
impl Index<usize> for Matrix {
    type Output = [f32];

    fn index(&self, row: usize) -> &[f32] {
        match self.row(row) {
            Ok(slice) => slice,
            Err(e) => panic!("{e}"),
        }
    }
}

impl IndexMut<usize> for Matrix {
    fn index_mut(&mut self, row: usize) -> &mut [f32] {
        match self.row_mut(row) {
            Ok(slice) => slice,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<'a> Mul<&'a Matrix> for &'a Matrix {
    type Output = MatrixResult<Matrix>;

    fn mul(self, rhs: &'a Matrix) -> Self::Output {
        self.product(rhs)
    }
}

impl TryFrom<&Matrix> for Matrix4<f32> {
    type Error = MatrixError;

    fn try_from(matrix: &Matrix) -> Result<Self, Self::Error> {
        if matrix.rows != 4 || matrix.cols != 4 {
            return Err(MatrixError::IncompatibleDimensions {
                left: (matrix.rows, matrix.cols),
                right: (4, 4),
            });
        }
        Ok(Matrix4::from_row_slice(&matrix.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_rows(rows: &[&[f32]]) -> Matrix {
        let mut m = Matrix::new(rows.len(), rows[0].len()).unwrap();
        for (i, row) in rows.iter().enumerate() {
            m[i].copy_from_slice(row);
        }
        m
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Matrix::new(0, 3).unwrap_err(),
            MatrixError::InvalidDimensions { rows: 0, cols: 3 }
        );
        assert!(Matrix::new(3, 0).is_err());
        assert!(Matrix::new(1, 1).is_ok());
    }

    #[test]
    fn test_identity_equality() {
        for (rows, cols) in [(1, 1), (2, 3), (4, 4), (5, 2)] {
            let a = Matrix::identity(rows, cols).unwrap();
            let b = Matrix::identity(rows, cols).unwrap();
            assert_eq!(a, a);
            assert_eq!(a, b);
        }
        assert_eq!(Matrix::identity(4, 4).unwrap(), Matrix::identity4());
    }

    #[test]
    fn test_rectangular_identity() {
        let m = Matrix::identity(2, 3).unwrap();
        assert_eq!(m.as_slice(), &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_equality_tolerance() {
        let a = Matrix::identity4();
        let mut b = Matrix::identity4();
        b[2][1] = 5e-7;
        assert_eq!(a, b);

        b[2][1] = 1e-5;
        assert_ne!(a, b);

        assert_ne!(Matrix::identity(3, 3).unwrap(), Matrix::identity(4, 4).unwrap());
    }

    #[test]
    fn test_row_out_of_range() {
        let mut m = Matrix::new(2, 2).unwrap();
        assert_eq!(m.row(2).unwrap_err(), MatrixError::OutOfRange { row: 2, rows: 2 });
        assert!(m.row_mut(5).is_err());
        assert_eq!(m.row(1).unwrap().len(), 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_panics_past_last_row() {
        let m = Matrix::identity4();
        let _ = m[4][0];
    }

    #[test]
    fn test_multiply() {
        let a = from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let b = from_rows(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]);

        let c = (&a * &b).unwrap();
        assert_eq!(c.rows(), 2);
        assert_eq!(c.cols(), 2);
        assert_eq!(c, from_rows(&[&[58.0, 64.0], &[139.0, 154.0]]));

        // Operator form leaves both operands untouched
        assert_eq!(a.rows(), 2);
        assert_eq!(b.rows(), 3);
    }

    #[test]
    fn test_multiply_in_place() {
        let mut a = from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = from_rows(&[&[0.0, 1.0], &[1.0, 0.0]]);
        a.multiply(&b).unwrap();
        assert_eq!(a, from_rows(&[&[2.0, 1.0], &[4.0, 3.0]]));
    }

    #[test]
    fn test_multiply_incompatible() {
        let mut a = Matrix::new(2, 3).unwrap();
        let b = Matrix::new(2, 3).unwrap();
        assert_eq!(
            a.multiply(&b).unwrap_err(),
            MatrixError::IncompatibleDimensions {
                left: (2, 3),
                right: (2, 3)
            }
        );
        // Failed multiply keeps the original shape
        assert_eq!(a.cols(), 3);
    }

    #[test]
    fn test_clone_is_deep() {
        let a = Matrix::identity4();
        let mut b = a.clone();
        b[0][0] = 3.0;
        assert_eq!(a[0][0], 1.0);
    }

    #[test]
    fn test_into_nalgebra() {
        let mut m = Matrix::identity4();
        m[0][3] = 2.5;
        let n = Matrix4::try_from(&m).unwrap();
        assert_eq!(n[(0, 3)], 2.5);
        assert_eq!(n[(3, 0)], 0.0);

        assert!(Matrix4::try_from(&Matrix::identity(3, 3).unwrap()).is_err());
    }
}
