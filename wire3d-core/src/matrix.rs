/// Dense matrices shared by the transform and the point store
use nalgebra::{DMatrix, Matrix4};

use crate::error::{Error, Result};

/// Real-valued matrix whose columns are homogeneous points.
///
/// Transforms are 4x4; the point store hands out 4xN matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f64>,
}

impl Matrix {
    /// The 4x4 identity transform
    pub fn identity() -> Self {
        Self {
            data: DMatrix::identity(4, 4),
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: DMatrix::zeros(rows, cols),
        }
    }

    /// Build a 4xN matrix with one column per point
    pub fn from_columns(columns: &[[f64; 4]]) -> Self {
        Self {
            data: DMatrix::from_fn(4, columns.len(), |row, col| columns[col][row]),
        }
    }

    /// Build a matrix from row-major values
    pub fn from_rows<const C: usize>(rows: &[[f64; C]]) -> Self {
        Self {
            data: DMatrix::from_fn(rows.len(), C, |row, col| rows[row][col]),
        }
    }

    /// Build a matrix from a column-major buffer
    pub fn from_column_slice(rows: usize, cols: usize, values: &[f64]) -> Self {
        Self {
            data: DMatrix::from_column_slice(rows, cols, values),
        }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    /// Column-major view of the entries
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice()
    }

    /// Matrix product `self * rhs`
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols() != rhs.rows() {
            return Err(Error::Dimension {
                left: self.data.shape(),
                right: rhs.data.shape(),
            });
        }
        Ok(Self {
            data: &self.data * &rhs.data,
        })
    }

    /// Overwrite a column-major point buffer with `self * points`.
    ///
    /// The buffer holds `self.cols()` values per point, and `self` must be
    /// square so the result fits back into the same buffer.
    pub fn apply_to_points(&self, points: &mut [f64]) -> Result<()> {
        let rows = self.cols();
        if self.rows() != rows || rows == 0 || points.len() % rows != 0 {
            return Err(Error::Dimension {
                left: self.data.shape(),
                right: (rows, points.len() / rows.max(1)),
            });
        }

        let input = DMatrix::from_column_slice(rows, points.len() / rows, points);
        let product = &self.data * input;
        points.copy_from_slice(product.as_slice());
        Ok(())
    }

    /// True when both matrices share a shape and every entry is within `eps`
    pub fn approx_eq(&self, other: &Matrix, eps: f64) -> bool {
        self.data.shape() == other.data.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4<f64>> for Matrix {
    fn from(m: Matrix4<f64>) -> Self {
        Self::from_column_slice(4, 4, m.as_slice())
    }
}
