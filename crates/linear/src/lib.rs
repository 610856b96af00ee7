//! LUP decomposition and triangular substitution over generic scalar domains.
//!
//! The algorithms are written against [`scalar::Arithmetic`] and run unchanged over plain
//! numbers, decimals, fractions, complex numbers and quantities. [`dispatch`] picks the
//! capability set at run time for collections whose domain is only known dynamically.

mod collection;
pub mod dispatch;
mod lsolve;
mod lup;
mod lusolve;
mod substitution;
mod usolve;
mod validate;

pub use collection::Collection;
pub use dispatch::{AnyLup, AnyMatrix, AnySolution};
pub use lsolve::{forward_solve, forward_substitute};
pub use lup::{decompose, decompose_dense, Lup};
pub use lusolve::lu_solve;
pub use substitution::Solution;
pub use usolve::{backward_solve, backward_substitute};
pub use validate::{normalize_rhs, normalize_rhs_owned, solve_validation, square_order};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Matrix must be two dimensional (size: {size:?})")]
    NotTwoDimensional { size: Vec<usize> },

    #[error("Matrix must be square (size: {size:?})")]
    NotSquare { size: Vec<usize> },

    #[error("Dimension mismatch. Matrix columns ({expected}) must match vector length (size: {size:?})")]
    DimensionMismatch { expected: usize, size: Vec<usize> },

    #[error("Row {row} has {len} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("Linear system cannot be solved since matrix is singular")]
    Singular,

    #[error(transparent)]
    Arithmetic(#[from] scalar::Error),

    #[error(transparent)]
    SparseFormat(#[from] nalgebra_sparse::SparseFormatError),
}

impl Error {
    /// Whether this error reports an invalid matrix or vector shape.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Error::NotTwoDimensional { .. }
                | Error::NotSquare { .. }
                | Error::DimensionMismatch { .. }
                | Error::RaggedRows { .. }
        )
    }
}

/// Solver options.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Options {
    /// Upper bound on the number of partial solutions tracked while enumerating the solution
    /// set of a singular triangular system.
    pub max_solutions: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options { max_solutions: 64 }
    }
}

impl Options {
    pub fn with_max_solutions(mut self, max_solutions: usize) -> Self {
        self.max_solutions = max_solutions;
        self
    }
}

/// Settings for the runtime-dispatched entry points in [`dispatch`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Config {
    pub arithmetic: scalar::Config,
    pub options: Options,
}

impl Config {
    pub fn new(arithmetic: scalar::Config, options: Options) -> Self {
        Config {
            arithmetic,
            options,
        }
    }
}
