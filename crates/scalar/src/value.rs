use std::fmt;

use bigdecimal::BigDecimal;
use num_complex::Complex64;
use num_rational::BigRational;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    BigNumberArithmetic, ComplexArithmetic, Config, Error, FractionArithmetic, FromNumber,
    Quantity,
};

/// Tag identifying a numeric domain and, with it, the capability set that applies.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Domain {
    Number,
    BigNumber,
    Fraction,
    Complex,
    Unit,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Number,
        Domain::BigNumber,
        Domain::Fraction,
        Domain::Complex,
        Domain::Unit,
    ];

    /// Whether plain numbers can be promoted into this domain.
    pub fn has_from_number(self) -> bool {
        matches!(self, Domain::BigNumber | Domain::Fraction | Domain::Complex)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Domain::Number => "number",
            Domain::BigNumber => "BigNumber",
            Domain::Fraction => "Fraction",
            Domain::Complex => "Complex",
            Domain::Unit => "Unit",
        };
        f.write_str(name)
    }
}

/// A scalar of any supported domain.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    BigNumber(BigDecimal),
    Fraction(BigRational),
    Complex(Complex64),
    Unit(Quantity),
}

impl Value {
    pub fn domain(&self) -> Domain {
        match self {
            Value::Number(_) => Domain::Number,
            Value::BigNumber(_) => Domain::BigNumber,
            Value::Fraction(_) => Domain::Fraction,
            Value::Complex(_) => Domain::Complex,
            Value::Unit(_) => Domain::Unit,
        }
    }

    /// Converts this value into `target`.
    ///
    /// Values already in `target` are returned unchanged. Plain numbers are promoted into any
    /// domain that has a `from_number` coercion; every other combination is incompatible.
    pub fn coerce(&self, target: Domain, config: &Config) -> Result<Value, Error> {
        if self.domain() == target {
            return Ok(self.clone());
        }
        match (self, target) {
            (Value::Number(x), Domain::BigNumber) => BigNumberArithmetic::new(config)
                .from_number(*x)
                .map(Value::BigNumber),
            (Value::Number(x), Domain::Fraction) => {
                FractionArithmetic::new().from_number(*x).map(Value::Fraction)
            }
            (Value::Number(x), Domain::Complex) => ComplexArithmetic::new(config)
                .from_number(*x)
                .map(Value::Complex),
            _ => Err(Error::IncompatibleTypes {
                domains: vec![self.domain(), target],
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(x) => write!(f, "{}", x),
            Value::BigNumber(x) => write!(f, "{}", x),
            Value::Fraction(x) => write!(f, "{}", x),
            Value::Complex(x) => write!(f, "{}", x),
            Value::Unit(x) => write!(f, "{}", x),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<BigDecimal> for Value {
    fn from(x: BigDecimal) -> Self {
        Value::BigNumber(x)
    }
}

impl From<BigRational> for Value {
    fn from(x: BigRational) -> Self {
        Value::Fraction(x)
    }
}

impl From<Complex64> for Value {
    fn from(x: Complex64) -> Self {
        Value::Complex(x)
    }
}

impl From<Quantity> for Value {
    fn from(x: Quantity) -> Self {
        Value::Unit(x)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;

    use super::*;
    use crate::Dimension;

    #[test]
    fn test_coerce_number() {
        let config = Config::default();
        let half = Value::Number(0.5);

        assert_eq!(
            half.coerce(Domain::Fraction, &config).unwrap(),
            Value::Fraction(BigRational::new(BigInt::from(1), BigInt::from(2)))
        );
        assert_eq!(
            half.coerce(Domain::Complex, &config).unwrap(),
            Value::Complex(Complex64::new(0.5, 0.0))
        );
        assert_eq!(half.coerce(Domain::Number, &config).unwrap(), half);
    }

    #[test]
    fn test_coerce_incompatible() {
        let config = Config::default();
        let metre = Value::Unit(Quantity::new(1.0, Dimension::LENGTH));

        assert_eq!(
            Value::Number(1.0).coerce(Domain::Unit, &config),
            Err(Error::IncompatibleTypes {
                domains: vec![Domain::Number, Domain::Unit]
            })
        );
        assert!(metre.coerce(Domain::Number, &config).is_err());
        assert!(Value::Complex(Complex64::new(1.0, 0.0))
            .coerce(Domain::Fraction, &config)
            .is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Domain::BigNumber.to_string(), "BigNumber");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(
            Value::Unit(Quantity::new(3.0, Dimension::MASS)).to_string(),
            "3 kg"
        );
    }
}
