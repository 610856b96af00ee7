#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Arithmetic settings shared by every capability set built for a call.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Relative tolerance used by `equal_scalar` in the floating point domains.
    pub epsilon: f64,
    /// Number of significant digits kept by the arbitrary-precision decimal domain.
    pub precision: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            epsilon: 1e-12,
            precision: 64,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_precision(mut self, precision: u64) -> Self {
        self.precision = precision;
        self
    }
}
