//! Traffic model constants.
//!
//! # Update rule
//!
//! For every open edge, once per traffic pass:
//!
//! ```text
//! traveled:  congestion = min(congestion + congestion_increment, 1.0)
//! otherwise: congestion = max(congestion * congestion_decay, 0.0)
//! weight     = round(base * fluctuation * (1 + congestion), weight_decimals)
//! fluctuation ~ U[fluctuation_min, fluctuation_max]
//! ```

use crate::{CoreError, CoreResult};

/// Parameters of the congestion update rule.
///
/// The defaults reproduce the road demo: +0.05 per traversal, 5 % decay,
/// a 0.9–1.2 random multiplier, weights rounded to cents.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficConfig {
    /// Added to a traveled edge's congestion level (capped at 1.0).
    pub congestion_increment: f64,

    /// Multiplier applied to an untraveled edge's congestion level.
    pub congestion_decay: f64,

    /// Lower bound of the per-edge random fluctuation factor.
    pub fluctuation_min: f64,

    /// Upper bound of the per-edge random fluctuation factor (inclusive).
    pub fluctuation_max: f64,

    /// Decimal places kept on effective weights.
    pub weight_decimals: u32,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            congestion_increment: 0.05,
            congestion_decay:     0.95,
            fluctuation_min:      0.9,
            fluctuation_max:      1.2,
            weight_decimals:      2,
        }
    }
}

impl TrafficConfig {
    /// Upper bound accepted for `fluctuation_max`.
    pub const MAX_FLUCTUATION: f64 = 10.0;

    /// A config with the fluctuation pinned to 1.0, for deterministic weights.
    pub fn without_fluctuation() -> Self {
        Self {
            fluctuation_min: 1.0,
            fluctuation_max: 1.0,
            ..Self::default()
        }
    }

    /// Reject parameter combinations that would break the `[0, 1]`
    /// congestion bound or produce non-positive weights.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.congestion_increment > 0.0 && self.congestion_increment <= 1.0) {
            return Err(CoreError::Config(format!(
                "congestion_increment must be in (0, 1], got {}",
                self.congestion_increment
            )));
        }
        if !(0.0..=1.0).contains(&self.congestion_decay) {
            return Err(CoreError::Config(format!(
                "congestion_decay must be in [0, 1], got {}",
                self.congestion_decay
            )));
        }
        if !(self.fluctuation_min > 0.0 && self.fluctuation_min.is_finite()) {
            return Err(CoreError::Config(format!(
                "fluctuation_min must be positive and finite, got {}",
                self.fluctuation_min
            )));
        }
        if !(self.fluctuation_max >= self.fluctuation_min && self.fluctuation_max <= Self::MAX_FLUCTUATION) {
            return Err(CoreError::Config(format!(
                "fluctuation range [{}, {}] is reversed or exceeds {}",
                self.fluctuation_min,
                self.fluctuation_max,
                Self::MAX_FLUCTUATION
            )));
        }
        if self.weight_decimals > 9 {
            return Err(CoreError::Config(format!(
                "weight_decimals must be at most 9, got {}",
                self.weight_decimals
            )));
        }
        Ok(())
    }

    /// Round `weight` to `weight_decimals` places.
    ///
    /// A weight too large to scale is returned unchanged.
    #[inline]
    pub fn round_weight(&self, weight: f64) -> f64 {
        let scale = 10f64.powi(self.weight_decimals as i32);
        let scaled = weight * scale;
        if !scaled.is_finite() {
            return weight;
        }
        scaled.round() / scale
    }
}
