//! Persisted layout of the settings record.

use serde::{Deserialize, Serialize};
use simple531_domain as domain;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub exercises: Vec<Exercise>,
    pub current_week: u8,
    pub rounding: f32,
    pub unit: Unit,
}

impl From<domain::ProgramSettings> for Settings {
    fn from(value: domain::ProgramSettings) -> Self {
        Self::from(&value)
    }
}

impl From<&domain::ProgramSettings> for Settings {
    fn from(value: &domain::ProgramSettings) -> Self {
        Self {
            exercises: value.exercises().iter().map(Exercise::from).collect(),
            current_week: value.current_week.number(),
            rounding: value.rounding.into(),
            unit: value.unit.into(),
        }
    }
}

impl TryFrom<Settings> for domain::ProgramSettings {
    type Error = DecodeError;

    fn try_from(value: Settings) -> Result<Self, Self::Error> {
        Ok(domain::ProgramSettings::new(
            value
                .exercises
                .into_iter()
                .map(domain::Exercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            domain::Week::try_from(value.current_week)?,
            domain::Rounding::new(value.rounding)?,
            value.unit.into(),
        )?)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub training_max: f32,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            training_max: value.training_max.into(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = DecodeError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: domain::ExerciseID::try_from(value.id)?,
            name: domain::Name::new_lossy(&value.name),
            training_max: domain::TrainingMax::new(value.training_max)?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    Lbs,
}

impl From<domain::Unit> for Unit {
    fn from(value: domain::Unit) -> Self {
        match value {
            domain::Unit::Kg => Unit::Kg,
            domain::Unit::Lbs => Unit::Lbs,
        }
    }
}

impl From<Unit> for domain::Unit {
    fn from(value: Unit) -> Self {
        match value {
            Unit::Kg => domain::Unit::Kg,
            Unit::Lbs => domain::Unit::Lbs,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DecodeError {
    #[error(transparent)]
    ExerciseID(#[from] domain::ExerciseIDError),
    #[error(transparent)]
    TrainingMax(#[from] domain::TrainingMaxError),
    #[error(transparent)]
    Week(#[from] domain::WeekError),
    #[error(transparent)]
    Rounding(#[from] domain::RoundingError),
    #[error(transparent)]
    Settings(#[from] domain::SettingsError),
}

/// Parses a stored record. Anything that does not describe valid settings is
/// reported as [`domain::ReadError::Malformed`].
pub fn decode(json: &str) -> Result<domain::ProgramSettings, domain::ReadError> {
    let settings = serde_json::from_str::<Settings>(json)
        .map_err(|err| domain::ReadError::Malformed(err.to_string()))?;
    domain::ProgramSettings::try_from(settings)
        .map_err(|err| domain::ReadError::Malformed(err.to_string()))
}

pub fn encode(settings: &domain::ProgramSettings) -> Result<String, domain::WriteError> {
    serde_json::to_string(&Settings::from(settings))
        .map_err(|err| domain::WriteError::Other(Box::new(err)))
}
