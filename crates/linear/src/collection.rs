use nalgebra::{DMatrix, DVector, Scalar};
use nalgebra_sparse::CscMatrix;

use crate::Error;

/// A one- or two-dimensional collection of scalars.
///
/// Sparse matrices are column-compressed: the nonzeros of column `j` are
/// `values[col_offsets[j]..col_offsets[j + 1]]`, with their rows in `row_indices`.
#[derive(Clone, Debug, PartialEq)]
pub enum Collection<T: Scalar> {
    /// One-dimensional vector.
    Vector(DVector<T>),
    Dense(DMatrix<T>),
    Sparse(CscMatrix<T>),
}

impl<T: Scalar> Collection<T> {
    /// `[len]` for vectors, `[rows, columns]` for matrices.
    pub fn size(&self) -> Vec<usize> {
        match self {
            Collection::Vector(v) => vec![v.len()],
            Collection::Dense(m) => vec![m.nrows(), m.ncols()],
            Collection::Sparse(m) => vec![m.nrows(), m.ncols()],
        }
    }

    /// Builds a dense matrix from nested rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, Error> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(Error::RaggedRows {
                row,
                len: r.len(),
                expected: ncols,
            });
        }
        Ok(Collection::Dense(DMatrix::from_fn(nrows, ncols, |i, j| {
            rows[i][j].clone()
        })))
    }

    /// Dense copy of a matrix, filling structural zeros of sparse storage with `zero`.
    pub fn to_matrix(&self, zero: &T) -> Result<DMatrix<T>, Error> {
        match self {
            Collection::Vector(v) => Err(Error::NotTwoDimensional {
                size: vec![v.len()],
            }),
            Collection::Dense(m) => Ok(m.clone()),
            Collection::Sparse(m) => {
                let mut dense = DMatrix::from_element(m.nrows(), m.ncols(), zero.clone());
                for (i, j, v) in m.triplet_iter() {
                    dense[(i, j)] = v.clone();
                }
                Ok(dense)
            }
        }
    }

    /// Converts every stored element, keeping the shape (and sparsity pattern).
    pub fn try_map<U, F>(&self, mut f: F) -> Result<Collection<U>, Error>
    where
        U: Scalar,
        F: FnMut(&T) -> Result<U, scalar::Error>,
    {
        Ok(match self {
            Collection::Vector(v) => {
                let values = v.iter().map(&mut f).collect::<Result<Vec<_>, _>>()?;
                Collection::Vector(DVector::from_vec(values))
            }
            Collection::Dense(m) => {
                let values = m.iter().map(&mut f).collect::<Result<Vec<_>, _>>()?;
                Collection::Dense(DMatrix::from_vec(m.nrows(), m.ncols(), values))
            }
            Collection::Sparse(m) => {
                let values = m.values().iter().map(&mut f).collect::<Result<Vec<_>, _>>()?;
                Collection::Sparse(CscMatrix::try_from_pattern_and_values(
                    m.pattern().clone(),
                    values,
                )?)
            }
        })
    }
}

impl<T: Scalar> From<DMatrix<T>> for Collection<T> {
    fn from(m: DMatrix<T>) -> Self {
        Collection::Dense(m)
    }
}

impl<T: Scalar> From<DVector<T>> for Collection<T> {
    fn from(v: DVector<T>) -> Self {
        Collection::Vector(v)
    }
}

impl<T: Scalar> From<Vec<T>> for Collection<T> {
    fn from(v: Vec<T>) -> Self {
        Collection::Vector(DVector::from_vec(v))
    }
}

impl<T: Scalar> From<CscMatrix<T>> for Collection<T> {
    fn from(m: CscMatrix<T>) -> Self {
        Collection::Sparse(m)
    }
}
