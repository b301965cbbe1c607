//! Objective weights for the fuel/time/congestion blend.

use serde::{Deserialize, Serialize};

const THIRD: f64 = 1.0 / 3.0;

/// Relative importance of fuel, elapsed time and congestion.
///
/// Weights are normalized to sum to one before use. Negative or non-finite
/// weights count as zero, and an all-zero set falls back to equal thirds.
///
/// # Examples
///
/// ```
/// use portwise_core::ObjectiveWeights;
///
/// let weights = ObjectiveWeights::new(2.0, 1.0, 1.0).normalized();
/// assert!((weights.fuel - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    /// Weight on fuel burned.
    #[serde(default)]
    pub fuel: f64,
    /// Weight on total elapsed time.
    #[serde(default)]
    pub time: f64,
    /// Weight on congestion delay.
    #[serde(default)]
    pub congestion: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self::new(THIRD, THIRD, THIRD)
    }
}

impl ObjectiveWeights {
    /// Construct raw, possibly unnormalized weights.
    #[must_use]
    pub const fn new(fuel: f64, time: f64, congestion: f64) -> Self {
        Self {
            fuel,
            time,
            congestion,
        }
    }

    /// Scale the weights so they sum to one.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let clean = |weight: f64| {
            if weight.is_finite() && weight > 0.0 {
                weight
            } else {
                0.0
            }
        };
        let (fuel, time, congestion) = (clean(self.fuel), clean(self.time), clean(self.congestion));
        let total = fuel + time + congestion;
        if total <= 0.0 || !total.is_finite() {
            return Self::default();
        }
        Self::new(fuel / total, time / total, congestion / total)
    }
}
