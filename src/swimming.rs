//! Pool swimming workouts
//!
//! Distance still comes from the stroke count, but mean speed is taken from
//! the pool geometry: pool length times the number of lengths swum.

use crate::error::ValidationError;
use crate::training::{ensure_positive, Training, TrainingBase, M_IN_KM};

/// Pool swimming
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swimming {
    base: TrainingBase,
    /// Pool length in meters
    length_pool: f64,
    /// Number of pool lengths swum
    count_pool: u32,
}

impl Swimming {
    /// Length of one stroke in meters
    pub const LEN_STEP: f64 = 1.38;
    pub const COEFF_CALORIE_5: f64 = 1.1;
    pub const COEFF_CALORIE_6: f64 = 2.0;

    pub fn new(
        action: u32,
        duration: f64,
        weight: f64,
        length_pool: f64,
        count_pool: u32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            base: TrainingBase::new(action, duration, weight)?,
            length_pool: ensure_positive("length_pool", length_pool)?,
            count_pool,
        })
    }

    pub fn length_pool(&self) -> f64 {
        self.length_pool
    }

    pub fn count_pool(&self) -> u32 {
        self.count_pool
    }
}

impl Training for Swimming {
    fn base(&self) -> &TrainingBase {
        &self.base
    }

    fn display_name(&self) -> &'static str {
        "Swimming"
    }

    fn step_length(&self) -> f64 {
        Self::LEN_STEP
    }

    fn mean_speed(&self) -> f64 {
        self.length_pool * f64::from(self.count_pool) / M_IN_KM / self.base.duration
    }

    fn spent_calories(&self) -> f64 {
        (self.mean_speed() + Self::COEFF_CALORIE_5) * Self::COEFF_CALORIE_6 * self.base.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_swim() {
        let swim = Swimming::new(720, 1.0, 80.0, 25.0, 40).unwrap();

        assert!((swim.distance() - 0.9936).abs() < 1e-9);
        assert!((swim.mean_speed() - 1.0).abs() < 1e-9);
        assert!((swim.spent_calories() - 336.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_ignores_strokes() {
        let few = Swimming::new(10, 2.0, 80.0, 50.0, 20).unwrap();
        let many = Swimming::new(5000, 2.0, 80.0, 50.0, 20).unwrap();

        assert_eq!(few.mean_speed(), many.mean_speed());
        assert!((few.mean_speed() - 0.5).abs() < 1e-12);
        assert!(few.distance() < many.distance());
    }

    #[test]
    fn test_zero_lengths_means_zero_speed() {
        let swim = Swimming::new(100, 1.0, 60.0, 25.0, 0).unwrap();
        assert_eq!(swim.mean_speed(), 0.0);
        assert!((swim.spent_calories() - 1.1 * 2.0 * 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_pool_length() {
        assert!(matches!(
            Swimming::new(720, 1.0, 80.0, -25.0, 40),
            Err(ValidationError::NonPositive {
                field: "length_pool",
                ..
            })
        ));
        assert!(matches!(
            Swimming::new(720, 1.0, 80.0, f64::INFINITY, 40),
            Err(ValidationError::NonFinite {
                field: "length_pool"
            })
        ));
    }
}
