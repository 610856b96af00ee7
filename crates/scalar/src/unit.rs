use std::fmt;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{nearly_equal, Arithmetic, Config, Domain, Error};

const BASE_SYMBOLS: [&str; 7] = ["m", "kg", "s", "A", "K", "mol", "cd"];

/// Exponents of the seven SI base dimensions, in the order
/// length, mass, time, current, temperature, amount, luminous intensity.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dimension(pub [i8; 7]);

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension([0; 7]);
    pub const LENGTH: Dimension = Dimension([1, 0, 0, 0, 0, 0, 0]);
    pub const MASS: Dimension = Dimension([0, 1, 0, 0, 0, 0, 0]);
    pub const TIME: Dimension = Dimension([0, 0, 1, 0, 0, 0, 0]);
    pub const CURRENT: Dimension = Dimension([0, 0, 0, 1, 0, 0, 0]);
    pub const TEMPERATURE: Dimension = Dimension([0, 0, 0, 0, 1, 0, 0]);
    pub const AMOUNT: Dimension = Dimension([0, 0, 0, 0, 0, 1, 0]);
    pub const LUMINOSITY: Dimension = Dimension([0, 0, 0, 0, 0, 0, 1]);

    /// Dimension of a product.
    pub fn times(self, rhs: Dimension) -> Dimension {
        let mut exponents = self.0;
        exponents
            .iter_mut()
            .zip(rhs.0.iter())
            .for_each(|(a, b)| *a += b);
        Dimension(exponents)
    }

    /// Dimension of a quotient.
    pub fn over(self, rhs: Dimension) -> Dimension {
        let mut exponents = self.0;
        exponents
            .iter_mut()
            .zip(rhs.0.iter())
            .for_each(|(a, b)| *a -= b);
        Dimension(exponents)
    }

    pub fn is_dimensionless(&self) -> bool {
        *self == Self::DIMENSIONLESS
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }
        let parts = self
            .0
            .iter()
            .zip(BASE_SYMBOLS.iter())
            .filter(|(exp, _)| **exp != 0)
            .map(|(exp, sym)| match exp {
                1 => sym.to_string(),
                _ => format!("{}^{}", sym, exp),
            })
            .collect::<Vec<_>>();
        write!(f, "{}", parts.join("·"))
    }
}

/// A physical quantity: a magnitude together with its dimension.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub dimension: Dimension,
}

impl Quantity {
    pub fn new(value: f64, dimension: Dimension) -> Self {
        Quantity { value, dimension }
    }

    pub fn dimensionless(value: f64) -> Self {
        Self::new(value, Dimension::DIMENSIONLESS)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dimension.is_dimensionless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.dimension)
        }
    }
}

/// Arithmetic on unit-valued quantities.
///
/// Sums require matching dimensions, except that an exact zero of any dimension is the additive
/// identity. This lets the solvers start accumulations from a dimensionless zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitArithmetic {
    epsilon: f64,
}

impl UnitArithmetic {
    pub fn new(config: &Config) -> Self {
        UnitArithmetic {
            epsilon: config.epsilon,
        }
    }

    fn combine(
        &self,
        x: &Quantity,
        y: &Quantity,
        op: impl Fn(f64, f64) -> f64,
    ) -> Result<Quantity, Error> {
        if x.dimension == y.dimension {
            Ok(Quantity::new(op(x.value, y.value), x.dimension))
        } else if y.value == 0.0 {
            Ok(*x)
        } else if x.value == 0.0 {
            Ok(Quantity::new(op(0.0, y.value), y.dimension))
        } else {
            Err(Error::UnitMismatch {
                lhs: x.dimension,
                rhs: y.dimension,
            })
        }
    }
}

impl Default for UnitArithmetic {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Arithmetic for UnitArithmetic {
    type Scalar = Quantity;
    type Magnitude = f64;

    fn domain(&self) -> Domain {
        Domain::Unit
    }

    fn zero(&self) -> Quantity {
        Quantity::dimensionless(0.0)
    }

    fn one(&self) -> Quantity {
        Quantity::dimensionless(1.0)
    }

    fn add(&self, x: &Quantity, y: &Quantity) -> Result<Quantity, Error> {
        self.combine(x, y, |a, b| a + b)
    }

    fn subtract(&self, x: &Quantity, y: &Quantity) -> Result<Quantity, Error> {
        self.combine(x, y, |a, b| a - b)
    }

    fn multiply_scalar(&self, x: &Quantity, y: &Quantity) -> Result<Quantity, Error> {
        Ok(Quantity::new(
            x.value * y.value,
            x.dimension.times(y.dimension),
        ))
    }

    fn divide_scalar(&self, x: &Quantity, y: &Quantity) -> Result<Quantity, Error> {
        Ok(Quantity::new(x.value / y.value, x.dimension.over(y.dimension)))
    }

    fn equal_scalar(&self, x: &Quantity, y: &Quantity) -> bool {
        if !nearly_equal(x.value, y.value, self.epsilon) {
            return false;
        }
        x.dimension == y.dimension
            || nearly_equal(x.value, 0.0, self.epsilon)
            || nearly_equal(y.value, 0.0, self.epsilon)
    }

    fn abs(&self, x: &Quantity) -> f64 {
        x.value.abs()
    }

    fn larger(&self, x: &f64, y: &f64) -> bool {
        x > y
    }

    fn unit_of(&self, rhs: &Quantity, coefficient: &Quantity) -> Quantity {
        Quantity::new(1.0, rhs.dimension.over(coefficient.dimension))
    }
}
