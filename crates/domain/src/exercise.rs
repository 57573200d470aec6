use derive_more::{AsRef, Deref, Display, Into};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub training_max: TrainingMax,
}

impl Exercise {
    #[must_use]
    pub fn new(name: Name, training_max: TrainingMax) -> Self {
        Self {
            id: ExerciseID::random(),
            name,
            training_max,
        }
    }
}

/// Opaque identifier of an exercise.
///
/// Stored records carry whatever string was assigned when the exercise was
/// created, so no format is assumed beyond being non-empty.
#[derive(Deref, Debug, Default, Display, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(String);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for ExerciseID {
    type Error = ExerciseIDError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(ExerciseIDError::Empty);
        }

        Ok(Self(value))
    }
}

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(value.to_string())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseIDError {
    #[error("Exercise ID must not be empty")]
    Empty,
}

const MAX_NAME_LEN: usize = 64;

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.len();

        if len > MAX_NAME_LEN {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }

    /// Accepts any stored name. Blank names become the default name and long
    /// names are cut at the last character boundary within the limit.
    #[must_use]
    pub fn new_lossy(name: &str) -> Self {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Self::default();
        }

        let mut end = trimmed_name.len().min(MAX_NAME_LEN);
        while !trimmed_name.is_char_boundary(end) {
            end -= 1;
        }

        Name(trimmed_name[..end].trim_end().to_string())
    }
}

impl Default for Name {
    fn default() -> Self {
        Name("New Lift".to_string())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

/// The weight all percentages of a week are taken from.
///
/// Usually set somewhat below the true one-repetition maximum.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct TrainingMax(f32);

impl TrainingMax {
    pub const ZERO: TrainingMax = TrainingMax(0.0);

    pub fn new(value: f32) -> Result<Self, TrainingMaxError> {
        if !value.is_finite() {
            return Err(TrainingMaxError::NotFinite);
        }

        if value < 0.0 {
            return Err(TrainingMaxError::Negative);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for TrainingMax {
    type Error = TrainingMaxError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.replace(',', ".");
        match value.trim() {
            "" | "." => Err(TrainingMaxError::ParseError),
            trimmed => match trimmed.parse::<f32>() {
                Ok(parsed_value) => TrainingMax::new(parsed_value),
                Err(_) => Err(TrainingMaxError::ParseError),
            },
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TrainingMaxError {
    #[error("Training max must not be negative")]
    Negative,
    #[error("Training max must be a finite number")]
    NotFinite,
    #[error("Training max must be a decimal")]
    ParseError,
}
