use anyhow::{Context, anyhow, bail};
use clap::Subcommand;
use log::info;
use simple531_app::{log as app_log, view};
use simple531_domain::{
    self as domain, ExerciseID, ProgramSettings, Rounding, SettingsService, Unit,
};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the sets of the current week
    Show {
        /// Show another week without changing the current one
        #[arg(long)]
        week: Option<String>,
    },
    /// Print training maxes and preferences
    Settings,
    /// Set the current week (1, 2, 3 or D)
    Week { week: String },
    /// Set the weight unit
    Unit { unit: Unit },
    /// Set the rounding increment (usually 1, 2.5 or 5)
    Rounding { rounding: String },
    /// Append an exercise
    Add {
        name: Option<String>,
        #[arg(long, short = 't', default_value = "0")]
        training_max: String,
    },
    /// Remove the exercise at a position
    Remove { position: usize },
    /// Rename the exercise at a position
    Rename { position: usize, name: String },
    /// Set the training max of the exercise at a position
    Tm {
        position: usize,
        training_max: String,
    },
    /// Move an exercise to another position
    Move { from: usize, to: usize },
    /// Print recent log messages
    Log,
    /// Replace all settings by the defaults
    Reset,
}

impl Default for Command {
    fn default() -> Self {
        Command::Show { week: None }
    }
}

/// Executes `command` and returns the text to print.
pub fn run(
    command: Command,
    settings_service: &impl SettingsService,
    log_service: &impl app_log::Service,
) -> anyhow::Result<String> {
    match command {
        Command::Show { week } => {
            let mut settings = settings_service.get_settings();
            if let Some(week) = week {
                settings.current_week = settings_service
                    .validate_week(&week)
                    .map_err(|err| anyhow!("{err}"))?;
            }
            Ok(view::workout(&settings))
        }
        Command::Settings => Ok(view::settings(&settings_service.get_settings())),
        Command::Log => {
            let entries = log_service
                .get_log_entries()
                .context("failed to read log")?;
            Ok(view::log(&entries))
        }
        Command::Reset => {
            let settings = ProgramSettings::default();
            save(settings_service, &settings)?;
            Ok(view::settings(&settings))
        }
        Command::Week { week } => {
            let mut settings = load(settings_service)?;
            settings.current_week = settings_service
                .validate_week(&week)
                .map_err(|err| anyhow!("{err}"))?;
            save(settings_service, &settings)?;
            Ok(view::workout(&settings))
        }
        command => {
            let mut settings = load(settings_service)?;
            edit(&mut settings, command, settings_service)?;
            save(settings_service, &settings)?;
            Ok(view::settings(&settings))
        }
    }
}

fn edit(
    settings: &mut ProgramSettings,
    command: Command,
    settings_service: &impl SettingsService,
) -> anyhow::Result<()> {
    match command {
        Command::Unit { unit } => settings.unit = unit,
        Command::Rounding { rounding } => {
            let rounding = settings_service
                .validate_rounding(&rounding)
                .map_err(|err| anyhow!("{err}"))?;
            if !Rounding::CHOICES.contains(&rounding) {
                info!("using uncommon rounding increment {rounding}");
            }
            settings.rounding = rounding;
        }
        Command::Add { name, training_max } => {
            let name = name.unwrap_or_else(|| unused_name(settings));
            let name = settings_service
                .validate_exercise_name(settings, &name, &ExerciseID::nil())
                .map_err(|err| anyhow!("{err}"))?;
            let training_max = settings_service
                .validate_training_max(&training_max)
                .map_err(|err| anyhow!("{err}"))?;
            info!("adding {name}");
            settings.add_exercise(name, training_max);
        }
        Command::Remove { position } => {
            let id = exercise_at(settings, position)?;
            let exercise = settings.remove_exercise(&id)?;
            info!("removed {}", exercise.name);
        }
        Command::Rename { position, name } => {
            let id = exercise_at(settings, position)?;
            let name = settings_service
                .validate_exercise_name(settings, &name, &id)
                .map_err(|err| anyhow!("{err}"))?;
            settings.rename_exercise(&id, name)?;
        }
        Command::Tm {
            position,
            training_max,
        } => {
            let id = exercise_at(settings, position)?;
            let training_max = settings_service
                .validate_training_max(&training_max)
                .map_err(|err| anyhow!("{err}"))?;
            settings.set_training_max(&id, training_max)?;
        }
        Command::Move { from, to } => {
            settings.move_exercise(index(from)?, index(to)?)?;
        }
        Command::Show { .. }
        | Command::Settings
        | Command::Week { .. }
        | Command::Log
        | Command::Reset => bail!("{command:?} does not edit settings"),
    }

    Ok(())
}

/// Stored settings for an edit. Unlike `get_settings`, an unreadable store is
/// an error, so the edit is never written over data that could not be read.
fn load(service: &impl SettingsService) -> anyhow::Result<ProgramSettings> {
    service
        .load_settings()
        .map_err(|err| anyhow!("failed to load settings, nothing was changed: {err}"))
}

fn save(service: &impl SettingsService, settings: &ProgramSettings) -> anyhow::Result<()> {
    service
        .set_settings(settings)
        .map_err(|err| anyhow!("failed to save settings: {err}"))
}

fn index(position: usize) -> anyhow::Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| anyhow!("positions start at 1"))
}

fn exercise_at(settings: &ProgramSettings, position: usize) -> anyhow::Result<ExerciseID> {
    match settings.exercises().get(index(position)?) {
        Some(exercise) => Ok(exercise.id.clone()),
        None => bail!(
            "no exercise at position {position} ({} configured)",
            settings.exercises().len()
        ),
    }
}

/// "New Lift", then "New Lift 2", "New Lift 3" and so on.
fn unused_name(settings: &ProgramSettings) -> String {
    let taken = |name: &str| {
        settings
            .exercises()
            .iter()
            .any(|e| e.name.as_ref() == name)
    };
    let base = domain::Name::default().to_string();
    if !taken(&base) {
        return base;
    }
    (2..)
        .map(|n| format!("{base} {n}"))
        .find(|name| !taken(name))
        .unwrap_or_default()
}
