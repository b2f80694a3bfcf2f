//! Passenger weight
//!
//! Weights are entered and shown as decimal numbers but held as whole
//! hundredths, so boarding and alighting the same amount always cancel out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Hundredths per whole weight unit
const SCALE: f64 = 100.0;

/// A weight held as whole hundredths of a unit
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "f64", into = "f64")]
pub struct Weight(i64);

impl Weight {
    /// No weight
    pub const ZERO: Weight = Weight(0);

    /// Round a decimal weight to the nearest hundredth
    ///
    /// Callers reject non-finite input first; out of range values saturate.
    pub fn from_f64(value: f64) -> Self {
        Weight((value * SCALE).round() as i64)
    }

    /// Build from whole hundredths
    pub fn from_hundredths(hundredths: i64) -> Self {
        Weight(hundredths)
    }

    /// Whole hundredths
    pub fn hundredths(self) -> i64 {
        self.0
    }

    /// Decimal value
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / SCALE
    }

    /// Whether this weight is below zero
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl From<f64> for Weight {
    fn from(value: f64) -> Self {
        Weight::from_f64(value)
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.as_f64()
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Weight) -> Weight {
        Weight(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Weight {
    type Output = Weight;

    fn sub(self, rhs: Weight) -> Weight {
        Weight(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}
