//! Plain-text rendering of the workout log.

use crate::Workout;
use std::io::{self, Write};

/// Printed instead of a table when there is nothing logged
pub const EMPTY_LOG_MESSAGE: &str = "No workouts logged yet. Add some first!";

/// Write the log as a numbered table, one row per entry in log order
pub fn render_table(log: &[Workout], out: &mut dyn Write) -> io::Result<()> {
    if log.is_empty() {
        writeln!(out, "{}", EMPTY_LOG_MESSAGE)?;
        return Ok(());
    }

    writeln!(out, "Your Training Log:")?;
    for (i, workout) in log.iter().enumerate() {
        writeln!(out, "{}", format_row(i + 1, workout))?;
    }
    Ok(())
}

/// One table row: `  1 | 2026-01-10 | Squat        | 100.0 lb x 5 reps`
pub fn format_row(number: usize, workout: &Workout) -> String {
    format!(
        "{:>3} | {} | {:<12} | {:.1} lb x {} reps",
        number,
        workout.date,
        workout.exercise,
        workout.weight,
        workout.reps
    )
}
