//! Plain-text rendering of the workout and settings pages.

use std::{collections::VecDeque, fmt::Write};

use simple531_domain::{ProgramSettings, Week};
use strum::IntoEnumIterator;

use crate::log::Entry;

#[must_use]
pub fn week_selector(current: Week) -> String {
    Week::iter()
        .map(|week| {
            if week == current {
                format!("[{}]", week.label())
            } else {
                week.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn workout(settings: &ProgramSettings) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {}",
        settings.current_week,
        week_selector(settings.current_week)
    );

    if settings.exercises().is_empty() {
        out.push_str("\nNo exercises configured.\n");
        out.push_str("Use `simple531 add` to add your training maxes.\n");
        return out;
    }

    for (exercise, sets) in settings.workout() {
        let _ = writeln!(
            out,
            "\n{}  TM {} {}",
            exercise.name, exercise.training_max, settings.unit
        );
        for (idx, set) in sets.iter().enumerate() {
            let _ = writeln!(
                out,
                "  Set {}  {:>3}  {:>6} {}  x{}",
                idx + 1,
                set.percent.to_string(),
                set.weight,
                settings.unit,
                set.target_reps
            );
        }
    }

    out
}

#[must_use]
pub fn settings(settings: &ProgramSettings) -> String {
    let mut out = String::from("Training maxes\n");

    if settings.exercises().is_empty() {
        out.push_str("  (none)\n");
    }

    let width = settings
        .exercises()
        .iter()
        .map(|e| e.name.to_string().chars().count())
        .max()
        .unwrap_or_default();
    for (idx, exercise) in settings.exercises().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<width$}  {:>6} {}",
            idx + 1,
            exercise.name.to_string(),
            f32::from(exercise.training_max),
            settings.unit
        );
    }

    let week = settings.current_week;
    let _ = writeln!(out, "\nPreferences");
    let _ = writeln!(
        out,
        "  Week      {}{}",
        week.number(),
        if week.is_deload() { " (Deload)" } else { "" }
    );
    let _ = writeln!(out, "  Unit      {}", settings.unit);
    let _ = writeln!(out, "  Rounding  {}", f32::from(settings.rounding));

    out
}

#[must_use]
pub fn log(entries: &VecDeque<Entry>) -> String {
    if entries.is_empty() {
        return String::from("No log entries.\n");
    }
    entries.iter().fold(String::new(), |mut out, entry| {
        let _ = writeln!(out, "{}  {:<5}  {}", entry.time, entry.level, entry.message);
        out
    })
}
