//! Running workouts

use crate::error::ValidationError;
use crate::training::{Training, TrainingBase, MIN_IN_HR, M_IN_KM};

/// Running: step-based distance, calories driven by mean speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Running {
    base: TrainingBase,
}

impl Running {
    pub const COEFF_CALORIE_1: f64 = 18.0;
    pub const COEFF_CALORIE_2: f64 = 20.0;

    pub fn new(action: u32, duration: f64, weight: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            base: TrainingBase::new(action, duration, weight)?,
        })
    }
}

impl Training for Running {
    fn base(&self) -> &TrainingBase {
        &self.base
    }

    fn display_name(&self) -> &'static str {
        "Running"
    }

    fn spent_calories(&self) -> f64 {
        (Self::COEFF_CALORIE_1 * self.mean_speed() - Self::COEFF_CALORIE_2) * self.base.weight
            / M_IN_KM
            * self.base.duration
            * MIN_IN_HR
    }
}
