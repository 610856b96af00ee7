//! Scalar arithmetic domains for the generic linear solvers.
//!
//! Every numeric domain (plain `f64`, arbitrary-precision decimals, exact fractions, complex
//! numbers and unit-valued quantities) exposes the same small capability set through the
//! [`Arithmetic`] trait. The [`resolve`] module picks the single domain shared by a set of
//! operands, promoting plain numbers into a richer domain when that domain can absorb them.

mod arithmetic;
mod bignumber;
mod complex;
mod config;
mod fraction;
mod number;
pub mod resolve;
mod unit;
mod value;

pub use arithmetic::{nearly_equal, Arithmetic, FromNumber};
pub use bignumber::BigNumberArithmetic;
pub use complex::ComplexArithmetic;
pub use config::Config;
pub use fraction::FractionArithmetic;
pub use number::NumberArithmetic;
pub use resolve::{resolve_domain, resolve_values, AnyArithmetic};
pub use unit::{Dimension, Quantity, UnitArithmetic};
pub use value::{Domain, Value};

pub use bigdecimal::BigDecimal;
pub use num_complex::Complex64;
pub use num_rational::BigRational;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Cannot resolve an arithmetic domain without any operands")]
    NoOperands,

    #[error("Incompatible scalar types: {}", list_domains(.domains))]
    IncompatibleTypes { domains: Vec<Domain> },

    #[error("Division by zero in {domain} arithmetic")]
    DivisionByZero { domain: Domain },

    /// Addition or subtraction of quantities with different dimensions.
    #[error("Units do not match ({lhs} vs {rhs})")]
    UnitMismatch { lhs: Dimension, rhs: Dimension },

    #[error("The number {value} cannot be represented as a {domain}")]
    NotRepresentable { value: f64, domain: Domain },
}

fn list_domains(domains: &[Domain]) -> String {
    domains
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
