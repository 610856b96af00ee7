use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CscMatrix;
use scalar::Arithmetic;

use crate::{
    substitution::{sparse_column, substitute, Column},
    validate::{normalize_rhs, square_order},
    Collection, Error, Options, Solution,
};

/// Solves `L x = b` by forward substitution, `L` being a lower triangular matrix.
///
/// Only the diagonal and the part of `L` below it are read. `b` may be omitted (zero vector),
/// a vector of length N, or an N×1 dense or sparse matrix.
///
/// A zero diagonal entry fails with [`Error::Singular`] when the system is inconsistent. When it
/// is consistent the free variables are enumerated and a [`Solution::Multiple`] is returned.
pub fn forward_solve<A: Arithmetic>(
    arith: &A,
    l: &Collection<A::Scalar>,
    b: Option<&Collection<A::Scalar>>,
    options: &Options,
) -> Result<Solution<A::Scalar>, Error> {
    let n = square_order(&l.size())?;
    let b = normalize_rhs(n, b, &arith.zero())?;
    forward_substitute(arith, l, b, options)
}

/// [`forward_solve`] with an already normalized right-hand side, which is consumed.
pub fn forward_substitute<A: Arithmetic>(
    arith: &A,
    l: &Collection<A::Scalar>,
    b: DVector<A::Scalar>,
    options: &Options,
) -> Result<Solution<A::Scalar>, Error> {
    let n = square_order(&l.size())?;
    if b.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            size: vec![b.len()],
        });
    }
    match l {
        Collection::Dense(m) => lower_dense(arith, m, b, options),
        Collection::Sparse(m) => lower_sparse(arith, m, b, options),
        Collection::Vector(v) => Err(Error::NotTwoDimensional {
            size: vec![v.len()],
        }),
    }
}

pub(crate) fn lower_dense<A: Arithmetic>(
    arith: &A,
    m: &DMatrix<A::Scalar>,
    b: DVector<A::Scalar>,
    options: &Options,
) -> Result<Solution<A::Scalar>, Error> {
    let n = m.nrows();
    substitute(
        arith,
        b,
        0..n,
        |j| Column {
            diagonal: m[(j, j)].clone(),
            entries: ((j + 1)..n).map(|i| (i, m[(i, j)].clone())).collect(),
        },
        options,
    )
}

fn lower_sparse<A: Arithmetic>(
    arith: &A,
    m: &CscMatrix<A::Scalar>,
    b: DVector<A::Scalar>,
    options: &Options,
) -> Result<Solution<A::Scalar>, Error> {
    substitute(
        arith,
        b,
        0..m.ncols(),
        |j| sparse_column(m, j, arith.zero(), |i| i > j),
        options,
    )
}
