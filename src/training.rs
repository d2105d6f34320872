//! Shared workout computation
//!
//! Every workout variant carries a [`TrainingBase`] with the sensor readings
//! common to all of them and implements [`Training`]. Distance, mean speed and
//! the summary come from default methods; calorie expenditure has no default
//! and must be provided by each variant.

use crate::error::ValidationError;
use crate::models::InfoMessage;

/// Meters in a kilometer
pub const M_IN_KM: f64 = 1000.0;

/// Default length of a single step in meters
pub const LEN_STEP: f64 = 0.65;

/// Minutes in an hour
pub const MIN_IN_HR: f64 = 60.0;

/// Sensor readings shared by all workout variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingBase {
    /// Steps or strokes counted by the sensor
    pub action: u32,
    /// Duration in hours, always > 0
    pub duration: f64,
    /// Athlete weight in kilograms
    pub weight: f64,
}

impl TrainingBase {
    /// Build the shared readings, rejecting durations that would make mean
    /// speed undefined
    pub fn new(action: u32, duration: f64, weight: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            action,
            duration: ensure_positive("duration", duration)?,
            weight: ensure_positive("weight", weight)?,
        })
    }
}

/// Check that a reading is finite and strictly positive
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(value)
}

/// Calculation contract implemented by every workout variant
pub trait Training {
    /// Shared sensor readings
    fn base(&self) -> &TrainingBase;

    /// Label used in the rendered summary
    fn display_name(&self) -> &'static str;

    /// Length of one step or stroke in meters
    fn step_length(&self) -> f64 {
        LEN_STEP
    }

    /// Distance covered in kilometers
    fn distance(&self) -> f64 {
        f64::from(self.base().action) * self.step_length() / M_IN_KM
    }

    /// Mean speed over the whole workout in km/h
    fn mean_speed(&self) -> f64 {
        self.distance() / self.base().duration
    }

    /// Calories burned during the workout
    fn spent_calories(&self) -> f64;

    /// Collect the computed figures into an [`InfoMessage`]
    fn summary(&self) -> InfoMessage {
        InfoMessage::new(
            self.display_name(),
            self.base().duration,
            self.distance(),
            self.mean_speed(),
            self.spent_calories(),
        )
    }
}
