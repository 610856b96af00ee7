use nalgebra::{DVector, Scalar};
use scalar::Arithmetic;

use crate::{
    lsolve::lower_dense,
    lup::decompose,
    usolve::upper_dense,
    validate::{normalize_rhs, square_order},
    Collection, Error, Lup, Options, Solution,
};

impl<T: Scalar> Lup<T> {
    /// Solves `A x = b` for the matrix `A` this is the factorization of.
    pub fn solve<A>(
        &self,
        arith: &A,
        b: Option<&Collection<T>>,
        options: &Options,
    ) -> Result<Solution<T>, Error>
    where
        A: Arithmetic<Scalar = T>,
    {
        let n = square_order(&[self.l.nrows(), self.l.ncols()])?;
        let b = normalize_rhs(n, b, &arith.zero())?;
        self.solve_vector(arith, b, options)
    }

    /// [`Lup::solve`] with an already normalized right-hand side.
    pub fn solve_vector<A>(
        &self,
        arith: &A,
        b: DVector<T>,
        options: &Options,
    ) -> Result<Solution<T>, Error>
    where
        A: Arithmetic<Scalar = T>,
    {
        let n = square_order(&[self.l.nrows(), self.l.ncols()])?;
        if b.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                size: vec![b.len()],
            });
        }

        // row i of A is row p[i] of L U
        let mut permuted = b.clone();
        for (i, &pi) in self.p.iter().enumerate() {
            permuted[pi] = b[i].clone();
        }

        let forward = lower_dense(arith, &self.l, permuted, options)?;
        let mut free = !forward.is_unique();
        let mut solutions = Vec::new();
        for y in forward.into_vec() {
            match upper_dense(arith, &self.u, y, options) {
                Ok(Solution::Unique(x)) => solutions.push(x),
                Ok(Solution::Multiple(xs)) => {
                    free = true;
                    solutions.extend(xs);
                }
                Err(Error::Singular) => free = true,
                Err(e) => return Err(e),
            }
        }

        match solutions.len() {
            0 => Err(Error::Singular),
            1 if !free => Ok(Solution::Unique(solutions.remove(0))),
            _ => {
                solutions.truncate(options.max_solutions.max(1));
                Ok(Solution::Multiple(solutions))
            }
        }
    }
}

/// Solves `A x = b` for a square matrix `A` through its LUP factorization.
///
/// A singular `A` yields either [`Error::Singular`] or an enumerated [`Solution::Multiple`],
/// as for [`crate::backward_solve`].
pub fn lu_solve<A: Arithmetic>(
    arith: &A,
    a: &Collection<A::Scalar>,
    b: Option<&Collection<A::Scalar>>,
    options: &Options,
) -> Result<Solution<A::Scalar>, Error> {
    square_order(&a.size())?;
    decompose(arith, a)?.solve(arith, b, options)
}
