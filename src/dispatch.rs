//! Turning raw sensor packages into typed workouts
//!
//! A package is a three-letter workout code plus a flat, positional list of
//! numbers. [`read_package`] checks the list against the field layout of the
//! variant the code selects and hands named values to its constructor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, Result};
use crate::models::InfoMessage;
use crate::running::Running;
use crate::swimming::Swimming;
use crate::training::{Training, TrainingBase};
use crate::walking::SportsWalking;

/// Workout codes understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutCode {
    #[serde(rename = "RUN")]
    Run,
    #[serde(rename = "WLK")]
    Walk,
    #[serde(rename = "SWM")]
    Swim,
}

impl WorkoutCode {
    pub const ALL: [WorkoutCode; 3] = [WorkoutCode::Run, WorkoutCode::Walk, WorkoutCode::Swim];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutCode::Run => "RUN",
            WorkoutCode::Walk => "WLK",
            WorkoutCode::Swim => "SWM",
        }
    }

    /// Names of the positional values, in order
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            WorkoutCode::Run => &["action", "duration", "weight"],
            WorkoutCode::Walk => &["action", "duration", "weight", "height"],
            WorkoutCode::Swim => &["action", "duration", "weight", "length_pool", "count_pool"],
        }
    }

    /// Number of positional values the variant is built from
    pub fn arity(&self) -> usize {
        self.fields().len()
    }
}

impl fmt::Display for WorkoutCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutCode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "RUN" => Ok(WorkoutCode::Run),
            "WLK" => Ok(WorkoutCode::Walk),
            "SWM" => Ok(WorkoutCode::Swim),
            _ => Err(format!("There is no such workout: {}", s)),
        }
    }
}

/// Closed set of workout variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Workout {
    Running(Running),
    SportsWalking(SportsWalking),
    Swimming(Swimming),
}

impl Workout {
    pub fn code(&self) -> WorkoutCode {
        match self {
            Workout::Running(_) => WorkoutCode::Run,
            Workout::SportsWalking(_) => WorkoutCode::Walk,
            Workout::Swimming(_) => WorkoutCode::Swim,
        }
    }

    fn as_training(&self) -> &dyn Training {
        match self {
            Workout::Running(w) => w,
            Workout::SportsWalking(w) => w,
            Workout::Swimming(w) => w,
        }
    }
}

impl Training for Workout {
    fn base(&self) -> &TrainingBase {
        self.as_training().base()
    }

    fn display_name(&self) -> &'static str {
        self.as_training().display_name()
    }

    fn step_length(&self) -> f64 {
        self.as_training().step_length()
    }

    fn distance(&self) -> f64 {
        self.as_training().distance()
    }

    fn mean_speed(&self) -> f64 {
        self.as_training().mean_speed()
    }

    fn spent_calories(&self) -> f64 {
        self.as_training().spent_calories()
    }

    fn summary(&self) -> InfoMessage {
        self.as_training().summary()
    }
}

impl From<Running> for Workout {
    fn from(w: Running) -> Self {
        Workout::Running(w)
    }
}

impl From<SportsWalking> for Workout {
    fn from(w: SportsWalking) -> Self {
        Workout::SportsWalking(w)
    }
}

impl From<Swimming> for Workout {
    fn from(w: Swimming) -> Self {
        Workout::Swimming(w)
    }
}

/// Result of looking a package up by its code
#[derive(Debug, Clone, PartialEq)]
pub enum PackageOutcome {
    /// Code was recognized and the values built a workout
    Found(Workout),
    /// Code is not one of the known workouts
    UnknownCode(String),
}

impl PackageOutcome {
    pub fn workout(&self) -> Option<&Workout> {
        match self {
            PackageOutcome::Found(workout) => Some(workout),
            PackageOutcome::UnknownCode(_) => None,
        }
    }
}

/// Build a workout from a code and its positional sensor values.
///
/// Unknown codes are not an error: they come back as
/// [`PackageOutcome::UnknownCode`] so callers can skip them. A known code with
/// the wrong number of values, a fractional count, or an out-of-range reading
/// fails with a typed error.
pub fn read_package(code: &str, values: &[f64]) -> Result<PackageOutcome> {
    let workout_code = match code.parse::<WorkoutCode>() {
        Ok(workout_code) => workout_code,
        Err(diagnostic) => {
            tracing::warn!(code, "{}", diagnostic);
            return Ok(PackageOutcome::UnknownCode(code.to_string()));
        }
    };

    build_workout(workout_code, values).map(PackageOutcome::Found)
}

/// Build a workout for an already-parsed code
pub fn build_workout(code: WorkoutCode, values: &[f64]) -> Result<Workout> {
    if values.len() != code.arity() {
        return Err(ParseError::WrongArity {
            code: code.to_string(),
            expected: code.arity(),
            actual: values.len(),
        }
        .into());
    }

    let action = whole_number("action", values[0])?;
    let (duration, weight) = (values[1], values[2]);

    let workout: Workout = match code {
        WorkoutCode::Run => Running::new(action, duration, weight)?.into(),
        WorkoutCode::Walk => SportsWalking::new(action, duration, weight, values[3])?.into(),
        WorkoutCode::Swim => {
            let count_pool = whole_number("count_pool", values[4])?;
            Swimming::new(action, duration, weight, values[3], count_pool)?.into()
        }
    };

    tracing::debug!(code = %code, ?values, "Built workout");
    Ok(workout)
}

fn whole_number(field: &'static str, value: f64) -> std::result::Result<u32, ParseError> {
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(ParseError::NotAnInteger { field, value });
    }
    Ok(value as u32)
}
