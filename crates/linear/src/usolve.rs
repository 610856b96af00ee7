use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CscMatrix;
use scalar::Arithmetic;

use crate::{
    substitution::{sparse_column, substitute, Column},
    validate::{normalize_rhs, square_order},
    Collection, Error, Options, Solution,
};

/// Solves `U x = b` by backward substitution, `U` being an upper triangular matrix.
///
/// Only the diagonal and the part of `U` above it are read. When `U` is singular the system has
/// either no solution ([`Error::Singular`]) or infinitely many, in which case one vector per
/// free-variable assignment is returned (at most `options.max_solutions`).
pub fn backward_solve<A: Arithmetic>(
    arith: &A,
    u: &Collection<A::Scalar>,
    b: Option<&Collection<A::Scalar>>,
    options: &Options,
) -> Result<Solution<A::Scalar>, Error> {
    let n = square_order(&u.size())?;
    let b = normalize_rhs(n, b, &arith.zero())?;
    backward_substitute(arith, u, b, options)
}

/// [`backward_solve`] with an already normalized right-hand side, which is consumed.
pub fn backward_substitute<A: Arithmetic>(
    arith: &A,
    u: &Collection<A::Scalar>,
    b: DVector<A::Scalar>,
    options: &Options,
) -> Result<Solution<A::Scalar>, Error> {
    let n = square_order(&u.size())?;
    if b.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            size: vec![b.len()],
        });
    }
    match u {
        Collection::Dense(m) => upper_dense(arith, m, b, options),
        Collection::Sparse(m) => upper_sparse(arith, m, b, options),
        Collection::Vector(v) => Err(Error::NotTwoDimensional {
            size: vec![v.len()],
        }),
    }
}

pub(crate) fn upper_dense<A: Arithmetic>(
    arith: &A,
    m: &DMatrix<A::Scalar>,
    b: DVector<A::Scalar>,
    options: &Options,
) -> Result<Solution<A::Scalar>, Error> {
    substitute(
        arith,
        b,
        (0..m.ncols()).rev(),
        |j| Column {
            diagonal: m[(j, j)].clone(),
            entries: (0..j).rev().map(|i| (i, m[(i, j)].clone())).collect(),
        },
        options,
    )
}

fn upper_sparse<A: Arithmetic>(
    arith: &A,
    m: &CscMatrix<A::Scalar>,
    b: DVector<A::Scalar>,
    options: &Options,
) -> Result<Solution<A::Scalar>, Error> {
    substitute(
        arith,
        b,
        (0..m.ncols()).rev(),
        |j| sparse_column(m, j, arith.zero(), |i| i < j),
        options,
    )
}
