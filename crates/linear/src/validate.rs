//! Validation of triangular systems and normalization of their right-hand side.

use nalgebra::{DVector, Dyn, Scalar, U1};

use crate::{Collection, Error};

/// Checks that `size` describes a square matrix and returns its order.
pub fn square_order(size: &[usize]) -> Result<usize, Error> {
    match size {
        [rows, columns] if rows == columns => Ok(*rows),
        [_, _] => Err(Error::NotSquare {
            size: size.to_vec(),
        }),
        _ => Err(Error::NotTwoDimensional {
            size: size.to_vec(),
        }),
    }
}

fn check_rhs(n: usize, b: &Collection<impl Scalar>) -> Result<(), Error> {
    let size = b.size();
    let matches = match (b, size.as_slice()) {
        (Collection::Vector(_), [len]) => *len == n,
        (_, [rows, 1]) => *rows == n,
        _ => false,
    };
    if matches {
        Ok(())
    } else {
        Err(Error::DimensionMismatch { expected: n, size })
    }
}

fn scatter_sparse<T: Scalar>(n: usize, b: &nalgebra_sparse::CscMatrix<T>, zero: &T) -> DVector<T> {
    let mut data = DVector::from_element(n, zero.clone());
    let column = b.col(0);
    for (&i, v) in column.row_indices().iter().zip(column.values()) {
        data[i] = v.clone();
    }
    data
}

/// Turns the right-hand side of an `n`×`n` system into a fresh column vector of length `n`.
///
/// * `None` becomes the zero vector.
/// * a vector of length `n` is taken as a column.
/// * an `n`×1 matrix is copied; sparse columns are densified.
///
/// Any other shape is a [`Error::DimensionMismatch`].
pub fn normalize_rhs<T: Scalar>(
    n: usize,
    b: Option<&Collection<T>>,
    zero: &T,
) -> Result<DVector<T>, Error> {
    let b = match b {
        Some(b) => b,
        None => return Ok(DVector::from_element(n, zero.clone())),
    };
    check_rhs(n, b)?;

    Ok(match b {
        Collection::Vector(v) => v.clone(),
        Collection::Dense(m) => m.column(0).into_owned(),
        Collection::Sparse(m) => scatter_sparse(n, m, zero),
    })
}

/// Like [`normalize_rhs`], but reuses the storage of an owned dense right-hand side instead of
/// copying it.
pub fn normalize_rhs_owned<T: Scalar>(
    n: usize,
    b: Option<Collection<T>>,
    zero: &T,
) -> Result<DVector<T>, Error> {
    let b = match b {
        Some(b) => b,
        None => return Ok(DVector::from_element(n, zero.clone())),
    };
    check_rhs(n, &b)?;

    Ok(match b {
        Collection::Vector(v) => v,
        Collection::Dense(m) => m.reshape_generic(Dyn(n), U1),
        Collection::Sparse(m) => scatter_sparse(n, &m, zero),
    })
}

/// Validates a triangular system: the matrix must be square and `b` must fit it.
///
/// Returns a private copy of the right-hand side that the solvers are free to overwrite.
pub fn solve_validation<T: Scalar>(
    m: &Collection<T>,
    b: Option<&Collection<T>>,
    zero: &T,
) -> Result<DVector<T>, Error> {
    let n = square_order(&m.size())?;
    normalize_rhs(n, b, zero)
}

#[cfg(test)]
mod tests {
    use nalgebra::{dmatrix, dvector};
    use nalgebra_sparse::CscMatrix;

    use super::*;

    #[test]
    fn test_square_order() {
        assert_eq!(square_order(&[3, 3]).unwrap(), 3);
        assert!(matches!(
            square_order(&[3, 2]),
            Err(Error::NotSquare { .. })
        ));
        assert!(matches!(
            square_order(&[3]),
            Err(Error::NotTwoDimensional { .. })
        ));
        assert!(matches!(
            square_order(&[]),
            Err(Error::NotTwoDimensional { .. })
        ));
    }

    #[test]
    fn test_missing_rhs_is_zero() {
        let b = normalize_rhs::<f64>(3, None, &0.0).unwrap();
        assert_eq!(b, dvector![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_vector_and_column() {
        let v = Collection::from(vec![1.0, 2.0]);
        assert_eq!(normalize_rhs(2, Some(&v), &0.0).unwrap(), dvector![1.0, 2.0]);

        let column = Collection::from(dmatrix![1.0; 2.0]);
        assert_eq!(
            normalize_rhs(2, Some(&column), &0.0).unwrap(),
            dvector![1.0, 2.0]
        );
        assert_eq!(
            normalize_rhs_owned(2, Some(column), &0.0).unwrap(),
            dvector![1.0, 2.0]
        );
    }

    #[test]
    fn test_sparse_column_is_densified() {
        let csc = CscMatrix::try_from_csc_data(3, 1, vec![0, 1], vec![2], vec![7.0]).unwrap();
        let b = Collection::from(csc);
        assert_eq!(
            normalize_rhs(3, Some(&b), &0.0).unwrap(),
            dvector![0.0, 0.0, 7.0]
        );
        assert_eq!(
            normalize_rhs_owned(3, Some(b), &0.0).unwrap(),
            dvector![0.0, 0.0, 7.0]
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let short = Collection::from(vec![1.0, 2.0]);
        let wide = Collection::from(dmatrix![1.0, 2.0; 3.0, 4.0; 5.0, 6.0]);
        let tall = Collection::from(dmatrix![1.0; 2.0; 3.0; 4.0]);

        for b in [&short, &wide, &tall] {
            let err = normalize_rhs(3, Some(b), &0.0).unwrap_err();
            assert!(err.is_shape_error(), "{}", err);
        }
    }

    #[test]
    fn test_solve_validation() {
        let m = Collection::from(dmatrix![1.0, 0.0; 2.0, 1.0]);
        let b = Collection::from(vec![1.0, 1.0]);
        assert_eq!(
            solve_validation(&m, Some(&b), &0.0).unwrap(),
            dvector![1.0, 1.0]
        );

        let rect = Collection::from(dmatrix![1.0, 0.0, 1.0; 2.0, 1.0, 1.0]);
        assert!(matches!(
            solve_validation(&rect, Some(&b), &0.0),
            Err(Error::NotSquare { .. })
        ));
    }
}
