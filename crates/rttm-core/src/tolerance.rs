//! Epsilon-tolerant time comparison
//!
//! RTTM times are decimal text with rounding noise, so every temporal check
//! goes through these three predicates. They are deliberately not derived
//! from one another: near the boundary a pair can satisfy none of them.

use serde::{Deserialize, Serialize};

/// Default tolerance, just under one millisecond
pub const DEFAULT_EPSILON: f64 = 0.000999999;

/// Tolerant comparison over time values in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub epsilon: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl Tolerance {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// `a + ε < b`
    #[inline]
    pub fn less_than(&self, a: f64, b: f64) -> bool {
        a + self.epsilon < b
    }

    /// `a > b + ε`
    #[inline]
    pub fn greater_than(&self, a: f64, b: f64) -> bool {
        a > b + self.epsilon
    }

    /// `|a - b| < ε`
    #[inline]
    pub fn equal_to(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.epsilon
    }
}
