use std::fmt::Debug;

use crate::{Domain, Error};

/// The capability set the decomposition and substitution algorithms are written against.
///
/// An implementation bundles the scalar operations of one numeric domain. The algorithms never
/// look at concrete scalar values; they only combine them through these methods, so the same
/// code runs over `f64`, decimals, fractions, complex numbers and quantities.
///
/// Operations that produce a scalar are fallible: exact domains cannot represent a division by
/// zero, and quantities of different dimensions cannot be added.
pub trait Arithmetic {
    /// Element type stored in matrices of this domain.
    type Scalar: nalgebra::Scalar;

    /// Result of [`Arithmetic::abs`], compared with [`Arithmetic::larger`] during pivoting.
    type Magnitude: Debug;

    /// Tag identifying this capability set.
    fn domain(&self) -> Domain;

    fn zero(&self) -> Self::Scalar;

    fn one(&self) -> Self::Scalar;

    fn add(&self, x: &Self::Scalar, y: &Self::Scalar) -> Result<Self::Scalar, Error>;

    fn subtract(&self, x: &Self::Scalar, y: &Self::Scalar) -> Result<Self::Scalar, Error>;

    fn multiply_scalar(&self, x: &Self::Scalar, y: &Self::Scalar) -> Result<Self::Scalar, Error>;

    fn divide_scalar(&self, x: &Self::Scalar, y: &Self::Scalar) -> Result<Self::Scalar, Error>;

    /// Equality test; floating domains compare within the configured relative tolerance.
    fn equal_scalar(&self, x: &Self::Scalar, y: &Self::Scalar) -> bool;

    fn abs(&self, x: &Self::Scalar) -> Self::Magnitude;

    /// Strict `x > y` on magnitudes.
    fn larger(&self, x: &Self::Magnitude, y: &Self::Magnitude) -> bool;

    fn is_zero(&self, x: &Self::Scalar) -> bool {
        self.equal_scalar(x, &self.zero())
    }

    /// The value one, expressed so that `coefficient * unit_of(rhs, coefficient)` is
    /// commensurable with `rhs`.
    ///
    /// Only domains whose scalars carry units need to override this.
    fn unit_of(&self, _rhs: &Self::Scalar, _coefficient: &Self::Scalar) -> Self::Scalar {
        self.one()
    }
}

/// Capability sets that can absorb plain numbers.
///
/// A domain implementing this trait is eligible for one-way promotion when it meets the
/// `Number` domain during resolution.
pub trait FromNumber: Arithmetic {
    fn from_number(&self, x: f64) -> Result<Self::Scalar, Error>;
}

/// Relative comparison of two floats.
///
/// Two values are equal when they are identical, when their difference is below machine
/// epsilon, or when the difference is within `epsilon` relative to the larger magnitude. NaN is
/// never equal to anything.
pub fn nearly_equal(x: f64, y: f64, epsilon: f64) -> bool {
    if x == y {
        return true;
    }
    if x.is_nan() || y.is_nan() {
        return false;
    }
    if x.is_finite() && y.is_finite() {
        let diff = (x - y).abs();
        if diff < f64::EPSILON {
            return true;
        }
        return diff <= x.abs().max(y.abs()) * epsilon;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearly_equal() {
        assert!(nearly_equal(1.0, 1.0, 1e-12));
        assert!(nearly_equal(1.0, 1.0 + 1e-14, 1e-12));
        assert!(!nearly_equal(1.0, 1.0 + 1e-9, 1e-12));
        assert!(nearly_equal(1e-17, 0.0, 1e-12));
        assert!(!nearly_equal(1e-15, 0.0, 1e-12));
        assert!(nearly_equal(f64::INFINITY, f64::INFINITY, 1e-12));
        assert!(!nearly_equal(f64::INFINITY, 1e300, 1e-12));
        assert!(!nearly_equal(f64::NAN, f64::NAN, 1e-12));
    }
}
