//! LU factorization with partial pivoting over any scalar domain.
//!
use log::trace;
use nalgebra::{DMatrix, Scalar};
use scalar::Arithmetic;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{Collection, Error};

/// The factors of `A` such that row `i` of `A` is row `p[i]` of `L U`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Lup<T: Scalar> {
    /// Unit lower triangular (trapezoidal when `A` has more rows than columns), rows × min(rows, columns).
    pub l: DMatrix<T>,
    /// Upper triangular, min(rows, columns) × columns.
    pub u: DMatrix<T>,
    /// Position of each row of `A` in `L U`.
    pub p: Vec<usize>,
}

impl<T: Scalar> Lup<T> {
    /// The inverse of `p`: row `i` of `L U` is row `row_order()[i]` of `A`.
    ///
    /// This is the order the rows end up in after the pivoting swaps.
    pub fn row_order(&self) -> Vec<usize> {
        let mut order = vec![0; self.p.len()];
        for (i, &pi) in self.p.iter().enumerate() {
            order[pi] = i;
        }
        order
    }
}

/// Performs the LUP factorization of a dense or sparse matrix.
///
/// Sparse input is densified first; a one-dimensional collection is rejected with
/// [`Error::NotTwoDimensional`]. See [`decompose_dense`].
pub fn decompose<A: Arithmetic>(
    arith: &A,
    a: &Collection<A::Scalar>,
) -> Result<Lup<A::Scalar>, Error> {
    let data = a.to_matrix(&arith.zero())?;
    factorize(arith, data)
}

/// Performs the LU factorization of the M by N matrix A with partial (row) pivoting.
///
/// The input is not modified. Columns are processed left to right (Doolittle's scheme):
///
/// 1. column j is reduced by the contributions of the factors computed so far,
///     `a(i,j) -= sum_{k < min(i,j)} l(i,k) u(k,j)`.
///
/// 2. among the rows i >= j, the entry with the strictly largest magnitude becomes the pivot (the
///     first one wins ties) and its row is swapped into row j.
///
/// 3. the entries below the pivot are divided by it, giving the multipliers of L. Entries equal to
///     zero are left untouched.
///
/// There is no check for a zero pivot: a column without a nonzero candidate leaves zeros below
/// the diagonal, and the zero diagonal of U surfaces as [`Error::Singular`] when solving.
///
/// The row permutation is tracked in swap order while factoring and returned inverted, as the
/// position of each row of A in `L U`.
pub fn decompose_dense<A: Arithmetic>(
    arith: &A,
    a: &DMatrix<A::Scalar>,
) -> Result<Lup<A::Scalar>, Error> {
    factorize(arith, a.clone())
}

fn factorize<A: Arithmetic>(
    arith: &A,
    mut data: DMatrix<A::Scalar>,
) -> Result<Lup<A::Scalar>, Error> {
    let rows = data.nrows();
    let columns = data.ncols();
    let n = rows.min(columns);

    // row-swap order: row i of the working matrix is row p[i] of A
    let mut p: Vec<usize> = (0..rows).collect();

    for j in 0..columns {
        // the first column of U needs no reduction
        if j > 0 {
            for i in 0..rows {
                let mut s = arith.zero();
                for k in 0..i.min(j) {
                    let lu = arith.multiply_scalar(&data[(i, k)], &data[(k, j)])?;
                    s = arith.add(&s, &lu)?;
                }
                data[(i, j)] = arith.subtract(&data[(i, j)], &s)?;
            }
        }

        // find pi = pivot row number
        let mut pi = j;
        let mut pabsv = arith.abs(&arith.zero());
        let mut vjj = arith.zero();
        for i in j..rows {
            let absv = arith.abs(&data[(i, j)]);
            if arith.larger(&absv, &pabsv) {
                pi = i;
                pabsv = absv;
                vjj = data[(i, j)].clone();
            }
        }

        if pi != j {
            trace!("lup: column {}, swapping rows {} and {}", j, j, pi);
            p.swap(j, pi);
            data.swap_rows(j, pi);
        }

        // store the multipliers l(i,j) = a(i,j) / a(j,j), i = j+1, ..., rows-1
        for i in (j + 1)..rows {
            if !arith.is_zero(&data[(i, j)]) {
                data[(i, j)] = arith.divide_scalar(&data[(i, j)], &vjj)?;
            }
        }
    }

    let zero = arith.zero();
    let one = arith.one();
    let l = DMatrix::from_fn(rows, n, |i, j| {
        if i > j {
            data[(i, j)].clone()
        } else if i == j {
            one.clone()
        } else {
            zero.clone()
        }
    });
    let u = DMatrix::from_fn(n, columns, |i, j| {
        if i <= j {
            data[(i, j)].clone()
        } else {
            zero.clone()
        }
    });

    let mut pv = vec![0; rows];
    for (i, &pi) in p.iter().enumerate() {
        pv[pi] = i;
    }

    Ok(Lup { l, u, p: pv })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::dmatrix;
    use scalar::{ComplexArithmetic, FractionArithmetic, NumberArithmetic};

    use super::*;

    /// Rows of `L U` put back in the order of `A`.
    fn reconstruct(lup: &Lup<f64>) -> DMatrix<f64> {
        let lu = &lup.l * &lup.u;
        DMatrix::from_fn(lu.nrows(), lu.ncols(), |i, j| lu[(lup.p[i], j)])
    }

    #[test]
    fn test_lup_2x2() {
        let a = dmatrix![2.0, 1.0; 1.0, 4.0];
        let lup = decompose_dense(&NumberArithmetic::default(), &a).unwrap();

        assert_relative_eq!(lup.l, dmatrix![1.0, 0.0; 0.5, 1.0]);
        assert_relative_eq!(lup.u, dmatrix![2.0, 1.0; 0.0, 3.5]);
        assert_eq!(lup.p, vec![0, 1]);
    }

    #[test]
    fn test_lup_pivoting() {
        let a = dmatrix![
            1.0, 2.0, 3.0;
            4.0, 5.0, 6.0;
            7.0, 8.0, 10.0;
        ];
        let lup = decompose_dense(&NumberArithmetic::default(), &a).unwrap();

        assert_eq!(lup.row_order()[0], 2);
        assert_relative_eq!(reconstruct(&lup), a, max_relative = 1e-12);
        for i in 0..3 {
            assert_eq!(lup.l[(i, i)], 1.0);
            for j in (i + 1)..3 {
                assert_eq!(lup.l[(i, j)], 0.0);
                assert_eq!(lup.u[(j, i)], 0.0);
            }
        }
    }

    #[test]
    fn test_lup_cyclic_permutation() {
        let a = dmatrix![
            0.0, 1.0, 0.0;
            0.0, 0.0, 1.0;
            1.0, 0.0, 0.0;
        ];
        let lup = decompose_dense(&NumberArithmetic::default(), &a).unwrap();

        assert_eq!(lup.l, DMatrix::identity(3, 3));
        assert_eq!(lup.u, DMatrix::identity(3, 3));
        assert_eq!(lup.p, vec![1, 2, 0]);
        assert_eq!(lup.row_order(), vec![2, 0, 1]);
        assert_eq!(reconstruct(&lup), a);
    }

    #[test]
    fn test_lup_tall() {
        let a = dmatrix![
            1.0, 2.0;
            3.0, 4.0;
            5.0, 6.0;
        ];
        let lup = decompose_dense(&NumberArithmetic::default(), &a).unwrap();

        assert_eq!(lup.l.shape(), (3, 2));
        assert_eq!(lup.u.shape(), (2, 2));
        assert_relative_eq!(reconstruct(&lup), a, max_relative = 1e-12);
    }

    #[test]
    fn test_lup_wide() {
        let a = dmatrix![
            1.0, 2.0, 3.0;
            4.0, 5.0, 6.0;
        ];
        let lup = decompose_dense(&NumberArithmetic::default(), &a).unwrap();

        assert_eq!(lup.l.shape(), (2, 2));
        assert_eq!(lup.u.shape(), (2, 3));
        assert_eq!(lup.p, vec![1, 0]);
        assert_relative_eq!(reconstruct(&lup), a, max_relative = 1e-12);
    }

    #[test]
    fn test_lup_singular_keeps_zero_pivot() {
        let a = dmatrix![
            1.0, 2.0;
            2.0, 4.0;
        ];
        let lup = decompose_dense(&NumberArithmetic::default(), &a).unwrap();
        assert_eq!(lup.u[(1, 1)], 0.0);
        assert_relative_eq!(reconstruct(&lup), a);
    }

    #[test]
    fn test_lup_vector_input() {
        let v = Collection::from(vec![1.0, 2.0, 3.0]);
        let err = decompose(&NumberArithmetic::default(), &v).unwrap_err();
        assert!(matches!(err, Error::NotTwoDimensional { .. }));
    }

    #[test]
    fn test_lup_sparse_input() {
        // [[0, 2], [3, 0]]
        let csc = nalgebra_sparse::CscMatrix::try_from_csc_data(
            2,
            2,
            vec![0, 1, 2],
            vec![1, 0],
            vec![3.0, 2.0],
        )
        .unwrap();
        let lup = decompose(&NumberArithmetic::default(), &Collection::from(csc)).unwrap();
        assert_eq!(lup.p, vec![1, 0]);
        assert_eq!(lup.u, dmatrix![3.0, 0.0; 0.0, 2.0]);
    }

    #[test]
    fn test_lup_fraction_is_exact() {
        use num_bigint::BigInt;
        use scalar::BigRational;

        let f = |n: i64| BigRational::from_integer(BigInt::from(n));
        let a = Collection::from_rows(vec![vec![f(2), f(1)], vec![f(1), f(4)]]).unwrap();
        let lup = decompose(&FractionArithmetic::new(), &a).unwrap();

        let half = BigRational::new(BigInt::from(1), BigInt::from(2));
        let seven_halves = BigRational::new(BigInt::from(7), BigInt::from(2));
        assert_eq!(lup.l[(1, 0)], half);
        assert_eq!(lup.u[(1, 1)], seven_halves);
    }

    #[test]
    fn test_lup_complex() {
        use scalar::Complex64;

        let c = |re: f64, im: f64| Complex64::new(re, im);
        let a = dmatrix![
            c(1.0, 0.0), c(0.0, 1.0);
            c(0.0, 3.0), c(2.0, 0.0);
        ];
        let lup = decompose_dense(&ComplexArithmetic::default(), &a).unwrap();
        assert_eq!(lup.p, vec![1, 0]);

        let lu = &lup.l * &lup.u;
        for i in 0..2 {
            for j in 0..2 {
                let d = lu[(lup.p[i], j)] - a[(i, j)];
                assert_relative_eq!(d.norm(), 0.0, epsilon = 1e-12);
            }
        }
    }
}
