use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, Zero};

use crate::{Arithmetic, Config, Domain, Error, FromNumber};

/// Arbitrary-precision decimal arithmetic.
///
/// Every produced value is rounded to the configured number of significant digits.
#[derive(Clone, Debug, PartialEq)]
pub struct BigNumberArithmetic {
    precision: u64,
    /// `None` when the configured tolerance has no decimal representation, in which case
    /// equality is exact.
    epsilon: Option<BigDecimal>,
}

impl BigNumberArithmetic {
    pub fn new(config: &Config) -> Self {
        BigNumberArithmetic {
            precision: config.precision,
            epsilon: BigDecimal::from_f64(config.epsilon),
        }
    }

    pub fn precision(&self) -> u64 {
        self.precision
    }

    fn round(&self, x: BigDecimal) -> BigDecimal {
        x.with_prec(self.precision)
    }

    /// `x / y` carried out to at least `precision + 1` significant digits. The `Div` impl of
    /// `BigDecimal` stops at a fixed number of digits regardless of the configured precision.
    fn quotient(&self, x: &BigDecimal, y: &BigDecimal) -> BigDecimal {
        let (xi, xs) = x.as_bigint_and_exponent();
        let (yi, ys) = y.as_bigint_and_exponent();
        let shift = self.precision + 1 + decimal_digits(&yi);
        let q = xi * num_traits::pow(BigInt::from(10), shift as usize) / yi;
        BigDecimal::new(q, xs - ys + shift as i64)
    }
}

/// Upper bound on the number of decimal digits of `n`.
fn decimal_digits(n: &BigInt) -> u64 {
    // log10(2) < 0.30103
    n.bits() * 30103 / 100000 + 1
}

impl Default for BigNumberArithmetic {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Arithmetic for BigNumberArithmetic {
    type Scalar = BigDecimal;
    type Magnitude = BigDecimal;

    fn domain(&self) -> Domain {
        Domain::BigNumber
    }

    fn zero(&self) -> BigDecimal {
        BigDecimal::zero()
    }

    fn one(&self) -> BigDecimal {
        BigDecimal::one()
    }

    fn add(&self, x: &BigDecimal, y: &BigDecimal) -> Result<BigDecimal, Error> {
        Ok(self.round(x + y))
    }

    fn subtract(&self, x: &BigDecimal, y: &BigDecimal) -> Result<BigDecimal, Error> {
        Ok(self.round(x - y))
    }

    fn multiply_scalar(&self, x: &BigDecimal, y: &BigDecimal) -> Result<BigDecimal, Error> {
        Ok(self.round(x * y))
    }

    fn divide_scalar(&self, x: &BigDecimal, y: &BigDecimal) -> Result<BigDecimal, Error> {
        if y.is_zero() {
            return Err(Error::DivisionByZero {
                domain: Domain::BigNumber,
            });
        }
        Ok(self.round(self.quotient(x, y)))
    }

    fn equal_scalar(&self, x: &BigDecimal, y: &BigDecimal) -> bool {
        if x == y {
            return true;
        }
        let diff = (x - y).abs();
        if diff.is_zero() {
            return true;
        }
        match &self.epsilon {
            Some(epsilon) => {
                let max = std::cmp::max(x.abs(), y.abs());
                diff <= max * epsilon
            }
            None => false,
        }
    }

    fn abs(&self, x: &BigDecimal) -> BigDecimal {
        x.abs()
    }

    fn larger(&self, x: &BigDecimal, y: &BigDecimal) -> bool {
        x > y
    }
}

impl FromNumber for BigNumberArithmetic {
    fn from_number(&self, x: f64) -> Result<BigDecimal, Error> {
        BigDecimal::from_f64(x)
            .map(|value| self.round(value))
            .ok_or(Error::NotRepresentable {
                value: x,
                domain: Domain::BigNumber,
            })
    }
}
