//! Sports walking workouts

use crate::error::ValidationError;
use crate::training::{ensure_positive, Training, TrainingBase, MIN_IN_HR};

/// Sports walking: running's distance model, calories also depend on height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SportsWalking {
    base: TrainingBase,
    /// Athlete height in centimeters
    height: f64,
}

impl SportsWalking {
    pub const COEFF_CALORIE_3: f64 = 0.035;
    pub const COEFF_CALORIE_4: f64 = 0.029;

    pub fn new(
        action: u32,
        duration: f64,
        weight: f64,
        height: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            base: TrainingBase::new(action, duration, weight)?,
            height: ensure_positive("height", height)?,
        })
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Training for SportsWalking {
    fn base(&self) -> &TrainingBase {
        &self.base
    }

    fn display_name(&self) -> &'static str {
        "SportsWalking"
    }

    fn spent_calories(&self) -> f64 {
        // Floor division of speed² by height is part of the formula
        let speed = self.mean_speed();
        let speed_term = floor_div(speed * speed, self.height);
        (Self::COEFF_CALORIE_3 * self.base.weight
            + speed_term * Self::COEFF_CALORIE_4 * self.base.weight)
            * self.base.duration
            * MIN_IN_HR
    }
}

/// Floored quotient computed from the fmod remainder, so a quotient that
/// rounds up to a whole number in plain division still floors below it
fn floor_div(x: f64, y: f64) -> f64 {
    let rem = x % y;
    let mut div = (x - rem) / y;
    if rem != 0.0 && (y < 0.0) != (rem < 0.0) {
        div -= 1.0;
    }
    if div == 0.0 {
        return 0.0_f64.copysign(x / y);
    }
    let floored = div.floor();
    if div - floored > 0.5 {
        floored + 1.0
    } else {
        floored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_walk() {
        let walk = SportsWalking::new(9000, 1.0, 75.0, 180.0).unwrap();

        assert!((walk.distance() - 5.85).abs() < 1e-9);
        assert!((walk.mean_speed() - 5.85).abs() < 1e-9);
        // 5.85² = 34.2225 floors to 0 against 180 cm
        assert!((walk.spent_calories() - 157.5).abs() < 1e-9);
    }

    #[test]
    fn test_floor_term_kicks_in_for_short_athletes() {
        // 30000 steps in 1 h: 19.5 km/h, 380.25 / 150 floors to 2
        let walk = SportsWalking::new(30000, 1.0, 70.0, 150.0).unwrap();
        let expected = (0.035 * 70.0 + 2.0 * 0.029 * 70.0) * 60.0;
        assert!((walk.spent_calories() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_floor_div_uses_remainder() {
        // 389376 / 1.56 rounds to 249600.0 but the remainder is just under 1.56
        assert_eq!(389376.0 / 1.56, 249600.0);
        assert_eq!(floor_div(389376.0, 1.56), 249599.0);
        assert_eq!(floor_div(34.2225, 180.0), 0.0);
        assert_eq!(floor_div(380.25, 150.0), 2.0);
        assert_eq!(floor_div(-7.0, 2.0), -4.0);
    }

    #[test]
    fn test_floor_term_near_whole_quotient() {
        // 96000 steps in 6 minutes: 624 km/h, 624² against a 1.56 divisor
        let walk = SportsWalking::new(96000, 0.1, 75.0, 1.56).unwrap();
        assert_eq!(walk.mean_speed(), 624.0);

        let expected = (0.035 * 75.0 + 249599.0 * 0.029 * 75.0) * 0.1 * 60.0;
        assert!((walk.spent_calories() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_zero_height() {
        assert_eq!(
            SportsWalking::new(9000, 1.0, 75.0, 0.0).unwrap_err(),
            ValidationError::NonPositive {
                field: "height",
                value: 0.0
            }
        );
    }

    #[test]
    fn test_display_name() {
        let walk = SportsWalking::new(9000, 1.0, 75.0, 180.0).unwrap();
        assert_eq!(walk.summary().training_type, "SportsWalking");
        assert_eq!(walk.height(), 180.0);
    }
}
