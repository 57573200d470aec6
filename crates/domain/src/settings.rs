use std::collections::HashSet;

use crate::{
    Exercise, ExerciseID, Name, PrescribedSet, ReadError, Rounding, TrainingMax, Unit,
    ValidationError, Week, WriteError, generate_sets,
};

pub trait SettingsService {
    /// Absent or malformed state yields the defaults. Fails only if the storage
    /// itself cannot be read, so nothing gets written over data that was never
    /// loaded.
    fn load_settings(&self) -> Result<ProgramSettings, ReadError>;

    /// Never fails. Unreadable state yields the defaults as well.
    fn get_settings(&self) -> ProgramSettings {
        self.load_settings().unwrap_or_default()
    }

    fn set_settings(&self, settings: &ProgramSettings) -> Result<(), WriteError>;

    fn validate_exercise_name(
        &self,
        settings: &ProgramSettings,
        name: &str,
        id: &ExerciseID,
    ) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => {
                if settings
                    .exercises()
                    .iter()
                    .all(|e| e.id == *id || e.name != name)
                {
                    Ok(name)
                } else {
                    Err(ValidationError::Conflict("name".to_string()))
                }
            }
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }

    fn validate_training_max(&self, training_max: &str) -> Result<TrainingMax, ValidationError> {
        TrainingMax::try_from(training_max).map_err(|err| ValidationError::Other(err.into()))
    }

    fn validate_week(&self, week: &str) -> Result<Week, ValidationError> {
        Week::try_from(week).map_err(|err| ValidationError::Other(err.into()))
    }

    fn validate_rounding(&self, rounding: &str) -> Result<Rounding, ValidationError> {
        Rounding::try_from(rounding).map_err(|err| ValidationError::Other(err.into()))
    }
}

pub trait SettingsRepository {
    /// Returns `None` if nothing has been stored yet.
    fn read_settings(&self) -> Result<Option<ProgramSettings>, ReadError>;
    fn write_settings(&self, settings: &ProgramSettings) -> Result<(), WriteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSettings {
    exercises: Vec<Exercise>,
    pub current_week: Week,
    pub rounding: Rounding,
    pub unit: Unit,
}

impl ProgramSettings {
    pub fn new(
        exercises: Vec<Exercise>,
        current_week: Week,
        rounding: Rounding,
        unit: Unit,
    ) -> Result<Self, SettingsError> {
        let mut ids = HashSet::new();
        for exercise in &exercises {
            if !ids.insert(&exercise.id) {
                return Err(SettingsError::DuplicateExercise(exercise.id.clone()));
            }
        }

        Ok(Self {
            exercises,
            current_week,
            rounding,
            unit,
        })
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn exercise(&self, id: &ExerciseID) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == *id)
    }

    /// Prescribed sets of the current week for every exercise, in list order.
    #[must_use]
    pub fn workout(&self) -> Vec<(&Exercise, [PrescribedSet; 3])> {
        self.exercises
            .iter()
            .map(|e| (e, generate_sets(e, self)))
            .collect()
    }

    pub fn add_exercise(&mut self, name: Name, training_max: TrainingMax) -> ExerciseID {
        let mut exercise = Exercise::new(name, training_max);
        while self.exercise(&exercise.id).is_some() {
            exercise.id = ExerciseID::random();
        }
        let id = exercise.id.clone();
        self.exercises.push(exercise);
        id
    }

    pub fn insert_exercise(&mut self, exercise: Exercise) -> Result<(), SettingsError> {
        if self.exercise(&exercise.id).is_some() {
            return Err(SettingsError::DuplicateExercise(exercise.id));
        }
        self.exercises.push(exercise);
        Ok(())
    }

    pub fn remove_exercise(&mut self, id: &ExerciseID) -> Result<Exercise, SettingsError> {
        let index = self.position(id)?;
        Ok(self.exercises.remove(index))
    }

    /// Moves the exercise at `from` so that it ends up at `to`.
    pub fn move_exercise(&mut self, from: usize, to: usize) -> Result<(), SettingsError> {
        let len = self.exercises.len();
        for index in [from, to] {
            if index >= len {
                return Err(SettingsError::IndexOutOfRange { index, len });
            }
        }

        if from != to {
            let exercise = self.exercises.remove(from);
            self.exercises.insert(to, exercise);
        }

        Ok(())
    }

    pub fn rename_exercise(&mut self, id: &ExerciseID, name: Name) -> Result<(), SettingsError> {
        let index = self.position(id)?;
        self.exercises[index].name = name;
        Ok(())
    }

    pub fn set_training_max(
        &mut self,
        id: &ExerciseID,
        training_max: TrainingMax,
    ) -> Result<(), SettingsError> {
        let index = self.position(id)?;
        self.exercises[index].training_max = training_max;
        Ok(())
    }

    fn position(&self, id: &ExerciseID) -> Result<usize, SettingsError> {
        self.exercises
            .iter()
            .position(|e| e.id == *id)
            .ok_or_else(|| SettingsError::UnknownExercise(id.clone()))
    }
}

impl Default for ProgramSettings {
    fn default() -> Self {
        Self {
            exercises: DEFAULT_EXERCISES
                .iter()
                .map(|(id, name, training_max)| Exercise {
                    id: (*id).into(),
                    name: Name::new(name).unwrap(),
                    training_max: TrainingMax::new(*training_max).unwrap(),
                })
                .collect(),
            current_week: Week::One,
            rounding: Rounding::default(),
            unit: Unit::Kg,
        }
    }
}

const DEFAULT_EXERCISES: [(u128, &str, f32); 4] = [
    (1, "Squat", 90.0),
    (2, "Bench Press", 70.0),
    (3, "Deadlift", 130.0),
    (4, "Overhead Press", 45.0),
];

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("Exercise {0} does not exist")]
    UnknownExercise(ExerciseID),
    #[error("Exercise {0} exists more than once")]
    DuplicateExercise(ExerciseID),
    #[error("Position {index} is out of range (list has {len} exercises)")]
    IndexOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::TargetReps;

    struct Validator;

    impl SettingsService for Validator {
        fn load_settings(&self) -> Result<ProgramSettings, ReadError> {
            Ok(ProgramSettings::default())
        }

        fn set_settings(&self, _: &ProgramSettings) -> Result<(), WriteError> {
            Ok(())
        }
    }

    #[fixture]
    fn settings() -> ProgramSettings {
        ProgramSettings::default()
    }

    fn names(settings: &ProgramSettings) -> Vec<String> {
        settings
            .exercises()
            .iter()
            .map(|e| e.name.to_string())
            .collect()
    }

    fn exercise(id: u128, name: &str, training_max: f32) -> Exercise {
        Exercise {
            id: id.into(),
            name: Name::new(name).unwrap(),
            training_max: TrainingMax::new(training_max).unwrap(),
        }
    }

    #[rstest]
    fn test_default(settings: ProgramSettings) {
        assert_eq!(
            names(&settings),
            vec!["Squat", "Bench Press", "Deadlift", "Overhead Press"]
        );
        assert_eq!(
            settings
                .exercises()
                .iter()
                .map(|e| f32::from(e.training_max))
                .collect::<Vec<_>>(),
            vec![90.0, 70.0, 130.0, 45.0]
        );
        assert_eq!(settings.current_week, Week::One);
        assert_eq!(settings.rounding, Rounding::new(2.5).unwrap());
        assert_eq!(settings.unit, Unit::Kg);
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        assert_eq!(
            ProgramSettings::new(
                vec![exercise(1, "Squat", 90.0), exercise(1, "Deadlift", 130.0)],
                Week::One,
                Rounding::default(),
                Unit::Kg,
            ),
            Err(SettingsError::DuplicateExercise(1.into()))
        );
    }

    #[test]
    fn test_new_allows_empty_list() {
        let settings =
            ProgramSettings::new(vec![], Week::Two, Rounding::default(), Unit::Lbs).unwrap();
        assert!(settings.exercises().is_empty());
        assert!(settings.workout().is_empty());
    }

    #[rstest]
    fn test_workout(settings: ProgramSettings) {
        let workout = settings.workout();
        assert_eq!(workout.len(), 4);
        let (squat, sets) = &workout[0];
        assert_eq!(squat.name.to_string(), "Squat");
        assert_approx_eq!(sets[0].weight, 57.5);
        assert_approx_eq!(sets[1].weight, 67.5);
        assert_approx_eq!(sets[2].weight, 77.5);
        assert_eq!(sets[2].target_reps, TargetReps::Amrap { min: 5 });
    }

    #[rstest]
    fn test_workout_follows_current_week(mut settings: ProgramSettings) {
        settings.current_week = Week::Deload;
        settings.rounding = Rounding::new(5.0).unwrap();
        let workout = settings.workout();
        let (deadlift, sets) = &workout[2];
        assert_eq!(deadlift.name.to_string(), "Deadlift");
        assert_eq!(sets.map(|s| s.weight), [50.0, 65.0, 80.0]);
    }

    #[rstest]
    fn test_add_exercise(mut settings: ProgramSettings) {
        let id = settings.add_exercise(Name::new("New Lift").unwrap(), TrainingMax::ZERO);
        assert_eq!(settings.exercises().len(), 5);
        assert_eq!(settings.exercises()[4].id, id);
        assert_eq!(
            settings.exercise(&id).map(|e| e.name.to_string()),
            Some("New Lift".to_string())
        );
    }

    #[rstest]
    fn test_insert_exercise_rejects_existing_id(mut settings: ProgramSettings) {
        assert_eq!(
            settings.insert_exercise(exercise(2, "Row", 60.0)),
            Err(SettingsError::DuplicateExercise(2.into()))
        );
        assert_eq!(settings, ProgramSettings::default());
        assert_eq!(settings.insert_exercise(exercise(5, "Row", 60.0)), Ok(()));
        assert_eq!(names(&settings).last().map(String::as_str), Some("Row"));
    }

    #[rstest]
    fn test_remove_exercise(mut settings: ProgramSettings) {
        let removed = settings.remove_exercise(&2.into()).unwrap();
        assert_eq!(removed.name.to_string(), "Bench Press");
        assert_eq!(
            names(&settings),
            vec!["Squat", "Deadlift", "Overhead Press"]
        );
    }

    #[rstest]
    fn test_remove_unknown_exercise(mut settings: ProgramSettings) {
        assert_eq!(
            settings.remove_exercise(&9.into()),
            Err(SettingsError::UnknownExercise(9.into()))
        );
        assert_eq!(settings.exercises().len(), 4);
    }

    #[rstest]
    #[case(0, 2, vec!["Bench Press", "Deadlift", "Squat", "Overhead Press"])]
    #[case(3, 0, vec!["Overhead Press", "Squat", "Bench Press", "Deadlift"])]
    #[case(1, 2, vec!["Squat", "Deadlift", "Bench Press", "Overhead Press"])]
    #[case(2, 1, vec!["Squat", "Deadlift", "Bench Press", "Overhead Press"])]
    #[case(1, 1, vec!["Squat", "Bench Press", "Deadlift", "Overhead Press"])]
    fn test_move_exercise(
        mut settings: ProgramSettings,
        #[case] from: usize,
        #[case] to: usize,
        #[case] expected: Vec<&str>,
    ) {
        settings.move_exercise(from, to).unwrap();
        assert_eq!(names(&settings), expected);
    }

    #[rstest]
    fn test_move_exercise_preserves_exercises(mut settings: ProgramSettings) {
        let before = settings.exercises().to_vec();
        settings.move_exercise(0, 3).unwrap();
        for exercise in &before {
            assert_eq!(settings.exercise(&exercise.id), Some(exercise));
        }
        assert_eq!(settings.exercises()[3], before[0]);
    }

    #[rstest]
    #[case(4, 0, SettingsError::IndexOutOfRange { index: 4, len: 4 })]
    #[case(0, 4, SettingsError::IndexOutOfRange { index: 4, len: 4 })]
    fn test_move_exercise_out_of_range(
        mut settings: ProgramSettings,
        #[case] from: usize,
        #[case] to: usize,
        #[case] expected: SettingsError,
    ) {
        assert_eq!(settings.move_exercise(from, to), Err(expected));
        assert_eq!(settings, ProgramSettings::default());
    }

    #[rstest]
    fn test_rename_exercise(mut settings: ProgramSettings) {
        settings
            .rename_exercise(&4.into(), Name::new("Push Press").unwrap())
            .unwrap();
        assert_eq!(names(&settings)[3], "Push Press");
        assert_eq!(
            settings.rename_exercise(&5.into(), Name::new("Row").unwrap()),
            Err(SettingsError::UnknownExercise(5.into()))
        );
    }

    #[rstest]
    fn test_set_training_max(mut settings: ProgramSettings) {
        settings
            .set_training_max(&1.into(), TrainingMax::new(100.0).unwrap())
            .unwrap();
        assert_eq!(
            settings.exercise(&1.into()).map(|e| e.training_max),
            Some(TrainingMax::new(100.0).unwrap())
        );
    }

    #[rstest]
    #[case("Front Squat", 1, true)]
    #[case("Squat", 1, true)]
    #[case("Squat", 2, false)]
    #[case("", 1, false)]
    fn test_validate_exercise_name(
        settings: ProgramSettings,
        #[case] name: &str,
        #[case] id: u128,
        #[case] valid: bool,
    ) {
        assert_eq!(
            Validator
                .validate_exercise_name(&settings, name, &id.into())
                .is_ok(),
            valid
        );
    }

    #[test]
    fn test_validate_exercise_name_conflict() {
        assert!(matches!(
            Validator.validate_exercise_name(&ProgramSettings::default(), "Deadlift", &1.into()),
            Err(ValidationError::Conflict(field)) if field == "name"
        ));
    }

    #[rstest]
    #[case("92,5", Some(92.5))]
    #[case("-5", None)]
    #[case("", None)]
    fn test_validate_training_max(#[case] input: &str, #[case] expected: Option<f32>) {
        assert_eq!(
            Validator.validate_training_max(input).ok().map(f32::from),
            expected
        );
    }

    #[test]
    fn test_validate_week() {
        assert_eq!(Validator.validate_week("4").ok(), Some(Week::Deload));
        assert_eq!(
            Validator.validate_week("5").map_err(|err| err.to_string()),
            Err("Week must be 1, 2, 3 or 4 (5 is out of range)".to_string())
        );
    }

    #[test]
    fn test_validate_rounding() {
        assert_eq!(
            Validator.validate_rounding("2.5").ok(),
            Some(Rounding::new(2.5).unwrap())
        );
        assert_eq!(
            Validator.validate_rounding("0").map_err(|err| err.to_string()),
            Err("Rounding must be greater than zero".to_string())
        );
    }
}
