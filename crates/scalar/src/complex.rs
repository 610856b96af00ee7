use num_complex::Complex64;

use crate::{nearly_equal, Arithmetic, Config, Domain, Error, FromNumber};

/// Complex arithmetic on `Complex64`. Magnitudes are moduli.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComplexArithmetic {
    epsilon: f64,
}

impl ComplexArithmetic {
    pub fn new(config: &Config) -> Self {
        ComplexArithmetic {
            epsilon: config.epsilon,
        }
    }
}

impl Default for ComplexArithmetic {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Arithmetic for ComplexArithmetic {
    type Scalar = Complex64;
    type Magnitude = f64;

    fn domain(&self) -> Domain {
        Domain::Complex
    }

    fn zero(&self) -> Complex64 {
        Complex64::new(0.0, 0.0)
    }

    fn one(&self) -> Complex64 {
        Complex64::new(1.0, 0.0)
    }

    fn add(&self, x: &Complex64, y: &Complex64) -> Result<Complex64, Error> {
        Ok(x + y)
    }

    fn subtract(&self, x: &Complex64, y: &Complex64) -> Result<Complex64, Error> {
        Ok(x - y)
    }

    fn multiply_scalar(&self, x: &Complex64, y: &Complex64) -> Result<Complex64, Error> {
        Ok(x * y)
    }

    fn divide_scalar(&self, x: &Complex64, y: &Complex64) -> Result<Complex64, Error> {
        Ok(x / y)
    }

    fn equal_scalar(&self, x: &Complex64, y: &Complex64) -> bool {
        nearly_equal(x.re, y.re, self.epsilon) && nearly_equal(x.im, y.im, self.epsilon)
    }

    fn abs(&self, x: &Complex64) -> f64 {
        x.norm()
    }

    fn larger(&self, x: &f64, y: &f64) -> bool {
        x > y
    }
}

impl FromNumber for ComplexArithmetic {
    fn from_number(&self, x: f64) -> Result<Complex64, Error> {
        Ok(Complex64::new(x, 0.0))
    }
}
