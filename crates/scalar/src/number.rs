use crate::{nearly_equal, Arithmetic, Config, Domain, Error};

/// Plain `f64` arithmetic with IEEE semantics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumberArithmetic {
    epsilon: f64,
}

impl NumberArithmetic {
    pub fn new(config: &Config) -> Self {
        NumberArithmetic {
            epsilon: config.epsilon,
        }
    }
}

impl Default for NumberArithmetic {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Arithmetic for NumberArithmetic {
    type Scalar = f64;
    type Magnitude = f64;

    fn domain(&self) -> Domain {
        Domain::Number
    }

    fn zero(&self) -> f64 {
        0.0
    }

    fn one(&self) -> f64 {
        1.0
    }

    fn add(&self, x: &f64, y: &f64) -> Result<f64, Error> {
        Ok(x + y)
    }

    fn subtract(&self, x: &f64, y: &f64) -> Result<f64, Error> {
        Ok(x - y)
    }

    fn multiply_scalar(&self, x: &f64, y: &f64) -> Result<f64, Error> {
        Ok(x * y)
    }

    fn divide_scalar(&self, x: &f64, y: &f64) -> Result<f64, Error> {
        Ok(x / y)
    }

    fn equal_scalar(&self, x: &f64, y: &f64) -> bool {
        nearly_equal(*x, *y, self.epsilon)
    }

    fn abs(&self, x: &f64) -> f64 {
        x.abs()
    }

    fn larger(&self, x: &f64, y: &f64) -> bool {
        x > y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ieee_division() {
        let arith = NumberArithmetic::default();
        assert_eq!(arith.divide_scalar(&1.0, &0.0).unwrap(), f64::INFINITY);
        assert_eq!(arith.divide_scalar(&3.0, &2.0).unwrap(), 1.5);
    }

    #[test]
    fn test_is_zero_uses_tolerance() {
        let arith = NumberArithmetic::default();
        assert!(arith.is_zero(&0.0));
        assert!(arith.is_zero(&-0.0));
        assert!(arith.is_zero(&1e-17));
        assert!(!arith.is_zero(&1e-10));
    }

    #[test]
    fn test_larger_is_strict() {
        let arith = NumberArithmetic::default();
        assert!(arith.larger(&2.0, &1.0));
        assert!(!arith.larger(&1.0, &1.0));
        assert_eq!(arith.abs(&-4.0), 4.0);
    }
}
