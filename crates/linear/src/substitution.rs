//! Column sweep shared by forward and backward substitution, including enumeration of the
//! solution set of singular triangular systems.

use log::{trace, warn};
use nalgebra::{DVector, Scalar};
use nalgebra_sparse::CscMatrix;
use scalar::Arithmetic;

use crate::{Error, Options};

/// Result of a triangular solve.
#[derive(Clone, Debug, PartialEq)]
pub enum Solution<T: Scalar> {
    /// Every diagonal entry met was nonzero.
    Unique(DVector<T>),
    /// The matrix is singular and the system consistent: one vector per enumerated
    /// assignment of the free variables.
    Multiple(Vec<DVector<T>>),
}

impl<T: Scalar> Solution<T> {
    pub fn len(&self) -> usize {
        match self {
            Solution::Unique(_) => 1,
            Solution::Multiple(xs) => xs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_unique(&self) -> bool {
        matches!(self, Solution::Unique(_))
    }

    pub fn as_slice(&self) -> &[DVector<T>] {
        match self {
            Solution::Unique(x) => std::slice::from_ref(x),
            Solution::Multiple(xs) => xs,
        }
    }

    pub fn into_vec(self) -> Vec<DVector<T>> {
        match self {
            Solution::Unique(x) => vec![x],
            Solution::Multiple(xs) => xs,
        }
    }

    /// The solution of a non-singular system.
    pub fn into_unique(self) -> Option<DVector<T>> {
        match self {
            Solution::Unique(x) => Some(x),
            Solution::Multiple(_) => None,
        }
    }
}

/// The part of column `j` a sweep needs: the diagonal entry and the entries in the rows that
/// are still to be solved.
pub(crate) struct Column<T> {
    pub diagonal: T,
    pub entries: Vec<(usize, T)>,
}

/// Gathers column `j` of a compressed matrix. Rows rejected by `keep` are ignored; a missing
/// diagonal entry reads as `zero`.
pub(crate) fn sparse_column<T: Scalar>(
    m: &CscMatrix<T>,
    j: usize,
    zero: T,
    keep: impl Fn(usize) -> bool,
) -> Column<T> {
    let col = m.col(j);
    let mut column = Column {
        diagonal: zero,
        entries: Vec::with_capacity(col.nnz()),
    };
    for (&i, v) in col.row_indices().iter().zip(col.values()) {
        if i == j {
            column.diagonal = v.clone();
        } else if keep(i) {
            column.entries.push((i, v.clone()));
        }
    }
    column
}

/// One partial solution: the values fixed so far and the right-hand side left over for the
/// remaining rows.
#[derive(Clone)]
struct Branch<T: Scalar> {
    x: DVector<T>,
    rhs: DVector<T>,
}

impl<T: Scalar> Branch<T> {
    /// Fixes `x[j] = xj` and removes its contribution from the remaining rows.
    fn eliminate<A>(
        &mut self,
        arith: &A,
        j: usize,
        xj: T,
        entries: &[(usize, T)],
    ) -> Result<(), Error>
    where
        A: Arithmetic<Scalar = T>,
    {
        for (i, mij) in entries {
            let delta = arith.multiply_scalar(&xj, mij)?;
            self.rhs[*i] = arith.subtract(&self.rhs[*i], &delta)?;
        }
        self.x[j] = xj;
        Ok(())
    }
}

/// The value a free variable `x[j]` takes in the alternate branch: one, in whatever units make
/// `m[i, j] * x[j]` commensurable with the rows it is eliminated from.
fn free_unit<A: Arithmetic>(
    arith: &A,
    branch: &Branch<A::Scalar>,
    bj: &A::Scalar,
    diagonal: &A::Scalar,
    entries: &[(usize, A::Scalar)],
) -> A::Scalar {
    match entries.iter().find(|(_, mij)| !arith.is_zero(mij)) {
        Some((i, mij)) => arith.unit_of(&branch.rhs[*i], mij),
        None => arith.unit_of(bj, diagonal),
    }
}

/// Solves a triangular system one column at a time, in the order given by `columns`.
///
/// For each column `j` with diagonal `d` and residual right-hand side `b[j]`:
///
/// * `b[j] != 0`, `d != 0`: `x[j] = b[j] / d`, then `b[i] -= x[j] * m[i, j]` for the remaining rows.
/// * `b[j] == 0`, `d != 0`: `x[j] = 0`.
/// * `b[j] != 0`, `d == 0`: the partial solution is inconsistent and dropped.
/// * `b[j] == 0`, `d == 0`: `x[j]` is free. The partial solution continues with `x[j] = 0` and
///   a copy continues with `x[j] = 1` (in the units the column implies), as long as fewer than
///   `options.max_solutions` partial solutions are tracked.
///
/// Fails with [`Error::Singular`] once every partial solution has been dropped.
pub(crate) fn substitute<A, I, F>(
    arith: &A,
    b: DVector<A::Scalar>,
    columns: I,
    mut column: F,
    options: &Options,
) -> Result<Solution<A::Scalar>, Error>
where
    A: Arithmetic,
    I: IntoIterator<Item = usize>,
    F: FnMut(usize) -> Column<A::Scalar>,
{
    let n = b.len();
    let mut branches = vec![Branch {
        x: DVector::from_element(n, arith.zero()),
        rhs: b,
    }];
    let mut free = false;
    let mut capped = false;

    for j in columns {
        let Column { diagonal, entries } = column(j);
        let singular = arith.is_zero(&diagonal);
        let pending = branches.len();
        let mut next = Vec::with_capacity(pending);

        for (k, mut branch) in branches.into_iter().enumerate() {
            let bj = branch.rhs[j].clone();

            if !arith.is_zero(&bj) {
                if singular {
                    trace!("column {}: zero pivot with nonzero rhs, dropping partial solution", j);
                    continue;
                }
                let xj = arith.divide_scalar(&bj, &diagonal)?;
                branch.eliminate(arith, j, xj, &entries)?;
                next.push(branch);
            } else if singular {
                free = true;
                let unit = free_unit(arith, &branch, &bj, &diagonal, &entries);
                branch.x[j] = arith.multiply_scalar(&arith.zero(), &unit)?;

                // room for this branch, its alternate and every branch not yet visited
                let tracked = next.len() + (pending - k - 1) + 2;
                if tracked <= options.max_solutions {
                    trace!("column {}: free variable, branching", j);
                    let mut alternate = branch.clone();
                    let eliminated = alternate.eliminate(arith, j, unit, &entries);
                    next.push(branch);
                    match eliminated {
                        Ok(()) => next.push(alternate),
                        Err(err) => trace!("column {}: dropping alternate branch: {}", j, err),
                    }
                } else {
                    if !capped {
                        warn!(
                            "Solution set limited to {} vectors; further free variables are set to zero.",
                            options.max_solutions
                        );
                        capped = true;
                    }
                    next.push(branch);
                }
            } else {
                next.push(branch);
            }
        }

        if next.is_empty() {
            return Err(Error::Singular);
        }
        branches = next;
    }

    let mut solutions: Vec<_> = branches.into_iter().map(|branch| branch.x).collect();
    if !free && solutions.len() == 1 {
        Ok(Solution::Unique(solutions.remove(0)))
    } else {
        Ok(Solution::Multiple(solutions))
    }
}
