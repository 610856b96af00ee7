use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::{Arithmetic, Domain, Error, FromNumber};

/// Exact rational arithmetic on arbitrary-size fractions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FractionArithmetic;

impl FractionArithmetic {
    pub fn new() -> Self {
        FractionArithmetic
    }
}

impl Arithmetic for FractionArithmetic {
    type Scalar = BigRational;
    type Magnitude = BigRational;

    fn domain(&self) -> Domain {
        Domain::Fraction
    }

    fn zero(&self) -> BigRational {
        BigRational::zero()
    }

    fn one(&self) -> BigRational {
        BigRational::one()
    }

    fn add(&self, x: &BigRational, y: &BigRational) -> Result<BigRational, Error> {
        Ok(x + y)
    }

    fn subtract(&self, x: &BigRational, y: &BigRational) -> Result<BigRational, Error> {
        Ok(x - y)
    }

    fn multiply_scalar(&self, x: &BigRational, y: &BigRational) -> Result<BigRational, Error> {
        Ok(x * y)
    }

    fn divide_scalar(&self, x: &BigRational, y: &BigRational) -> Result<BigRational, Error> {
        if y.is_zero() {
            return Err(Error::DivisionByZero {
                domain: Domain::Fraction,
            });
        }
        Ok(x / y)
    }

    fn equal_scalar(&self, x: &BigRational, y: &BigRational) -> bool {
        x == y
    }

    fn abs(&self, x: &BigRational) -> BigRational {
        x.abs()
    }

    fn larger(&self, x: &BigRational, y: &BigRational) -> bool {
        x > y
    }
}

impl FromNumber for FractionArithmetic {
    /// Converts the exact binary value of `x`; non-finite numbers are rejected.
    fn from_number(&self, x: f64) -> Result<BigRational, Error> {
        BigRational::from_float(x).ok_or(Error::NotRepresentable {
            value: x,
            domain: Domain::Fraction,
        })
    }
}
