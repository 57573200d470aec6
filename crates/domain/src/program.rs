use std::fmt;

use derive_more::{Display, Into};
use strum::{EnumIter, EnumString};

use crate::{Exercise, ProgramSettings, TrainingMax};

/// Week of the four-week cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Week {
    #[default]
    One = 1,
    Two = 2,
    Three = 3,
    Deload = 4,
}

impl Week {
    #[must_use]
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Short label used by the week selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Week::One => "1",
            Week::Two => "2",
            Week::Three => "3",
            Week::Deload => "D",
        }
    }

    #[must_use]
    pub fn is_deload(self) -> bool {
        self == Week::Deload
    }

    fn scheme(self) -> [(Percent, TargetReps); 3] {
        const WEEK_1: [(Percent, TargetReps); 3] = [
            (Percent(65), TargetReps::Fixed(5)),
            (Percent(75), TargetReps::Fixed(5)),
            (Percent(85), TargetReps::Amrap { min: 5 }),
        ];
        const WEEK_2: [(Percent, TargetReps); 3] = [
            (Percent(70), TargetReps::Fixed(3)),
            (Percent(80), TargetReps::Fixed(3)),
            (Percent(90), TargetReps::Amrap { min: 3 }),
        ];
        const WEEK_3: [(Percent, TargetReps); 3] = [
            (Percent(75), TargetReps::Fixed(5)),
            (Percent(85), TargetReps::Fixed(3)),
            (Percent(95), TargetReps::Amrap { min: 1 }),
        ];
        const DELOAD: [(Percent, TargetReps); 3] = [
            (Percent(40), TargetReps::Fixed(5)),
            (Percent(50), TargetReps::Fixed(5)),
            (Percent(60), TargetReps::Fixed(5)),
        ];

        match self {
            Week::One => WEEK_1,
            Week::Two => WEEK_2,
            Week::Three => WEEK_3,
            Week::Deload => DELOAD,
        }
    }
}

impl TryFrom<u8> for Week {
    type Error = WeekError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Week::One),
            2 => Ok(Week::Two),
            3 => Ok(Week::Three),
            4 => Ok(Week::Deload),
            _ => Err(WeekError::OutOfRange(value)),
        }
    }
}

impl TryFrom<&str> for Week {
    type Error = WeekError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "d" | "D" | "deload" => Ok(Week::Deload),
            trimmed => match trimmed.parse::<u8>() {
                Ok(parsed_value) => Week::try_from(parsed_value),
                Err(_) => Err(WeekError::ParseError),
            },
        }
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Week::Deload => write!(f, "Week 4 (Deload)"),
            _ => write!(f, "Week {}", self.number()),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeekError {
    #[error("Week must be 1, 2, 3 or 4 ({0} is out of range)")]
    OutOfRange(u8),
    #[error("Week must be an integer")]
    ParseError,
}

/// Granularity all prescribed weights are snapped to.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Rounding(f32);

impl Rounding {
    pub const CHOICES: [Rounding; 3] = [Rounding(1.0), Rounding(2.5), Rounding(5.0)];

    pub fn new(value: f32) -> Result<Self, RoundingError> {
        if !value.is_finite() {
            return Err(RoundingError::NotFinite);
        }

        if value <= 0.0 {
            return Err(RoundingError::NotPositive);
        }

        Ok(Self(value))
    }

    /// Rounds to the nearest multiple, ties away from zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(self, weight: f64) -> f32 {
        let step = f64::from(self.0);
        ((weight / step).round() * step) as f32
    }
}

impl Default for Rounding {
    fn default() -> Self {
        Self(2.5)
    }
}

impl TryFrom<&str> for Rounding {
    type Error = RoundingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => Rounding::new(parsed_value),
            Err(_) => Err(RoundingError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RoundingError {
    #[error("Rounding must be greater than zero")]
    NotPositive,
    #[error("Rounding must be a finite number")]
    NotFinite,
    #[error("Rounding must be a decimal")]
    ParseError,
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, strum::Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Unit {
    #[default]
    Kg,
    Lbs,
}

/// Share of the training max, in whole percent.
#[derive(Debug, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percent(u8);

impl Percent {
    #[must_use]
    pub fn fraction(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    /// Computed in `f64`, so that it stays finite for any training max.
    #[must_use]
    pub fn of(self, training_max: TrainingMax) -> f64 {
        f64::from(f32::from(training_max)) * f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetReps {
    Fixed(u32),
    /// As many reps as possible, but at least `min`.
    Amrap { min: u32 },
}

impl TargetReps {
    #[must_use]
    pub fn min(self) -> u32 {
        match self {
            TargetReps::Fixed(reps) | TargetReps::Amrap { min: reps } => reps,
        }
    }

    #[must_use]
    pub fn is_amrap(self) -> bool {
        matches!(self, TargetReps::Amrap { .. })
    }
}

impl fmt::Display for TargetReps {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TargetReps::Fixed(reps) => write!(f, "{reps}"),
            TargetReps::Amrap { min } => write!(f, "{min}+"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrescribedSet {
    pub percent: Percent,
    pub target_reps: TargetReps,
    pub weight: f32,
}

#[must_use]
pub fn prescribe(
    training_max: TrainingMax,
    week: Week,
    rounding: Rounding,
) -> [PrescribedSet; 3] {
    week.scheme().map(|(percent, target_reps)| PrescribedSet {
        percent,
        target_reps,
        weight: rounding.apply(percent.of(training_max)),
    })
}

#[must_use]
pub fn generate_sets(exercise: &Exercise, settings: &ProgramSettings) -> [PrescribedSet; 3] {
    prescribe(
        exercise.training_max,
        settings.current_week,
        settings.rounding,
    )
}
