//! Default stats program for athletelog.
//!
//! Usage: `athletelog-stats <path_to_workouts.json>`
//!
//! Prints the Epley estimated one-rep max for every entry, then the best
//! estimate per exercise.

use athletelog_core::{Store, Workout};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Epley estimated one-rep max; a single rep is its own max
fn epley_1rm(weight: f64, reps: i64) -> f64 {
    if reps <= 1 {
        weight
    } else {
        weight * (1.0 + reps as f64 / 30.0)
    }
}

/// Best estimate and total volume for one exercise
#[derive(Debug, PartialEq)]
struct ExerciseSummary {
    exercise: String,
    entries: usize,
    best_1rm: f64,
    total_volume: f64,
}

/// Group by exercise name, in first-seen order
fn summarize(log: &[Workout]) -> Vec<ExerciseSummary> {
    let mut summaries: Vec<ExerciseSummary> = Vec::new();
    for workout in log {
        let one_rm = epley_1rm(workout.weight, workout.reps).round();
        match summaries.iter_mut().find(|s| s.exercise == workout.exercise) {
            Some(summary) => {
                summary.entries += 1;
                summary.best_1rm = summary.best_1rm.max(one_rm);
                summary.total_volume += workout.volume();
            }
            None => summaries.push(ExerciseSummary {
                exercise: workout.exercise.clone(),
                entries: 1,
                best_1rm: one_rm,
                total_volume: workout.volume(),
            }),
        }
    }
    summaries
}

fn write_stats(log: &[Workout], out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Stats Calculation")?;
    for w in log {
        writeln!(
            out,
            "{}  |  {}  | {} lb x {} reps -> est. 1RM: {:.0} lb",
            w.date,
            w.exercise,
            w.weight,
            w.reps,
            epley_1rm(w.weight, w.reps).round()
        )?;
    }

    let summaries = summarize(log);
    if !summaries.is_empty() {
        writeln!(out)?;
        writeln!(out, "Best estimated 1RM by exercise")?;
        for s in &summaries {
            writeln!(
                out,
                "{}: {:.0} lb ({} entries, {:.1} lb total volume)",
                s.exercise, s.best_1rm, s.entries, s.total_volume
            )?;
        }
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "athletelog-stats")]
#[command(about = "Estimated one-rep max stats for an athletelog workout log", long_about = None)]
struct Args {
    /// Path to workouts.json
    path: PathBuf,
}

fn main() -> ExitCode {
    athletelog_core::logging::init();

    let Args { path } = Args::parse();

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        return ExitCode::FAILURE;
    }

    let log = match Store::new(path).load() {
        Ok(log) => log,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("Computing stats for {} workouts", log.len());

    if let Err(e) = write_stats(&log, &mut io::stdout().lock()) {
        eprintln!("Failed to write stats: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(date: &str, exercise: &str, weight: &str, reps: &str) -> Workout {
        Workout::parse(date, exercise, weight, reps).unwrap()
    }

    #[test]
    fn test_epley() {
        assert_eq!(epley_1rm(100.0, 1), 100.0);
        assert_eq!(epley_1rm(100.0, 30), 200.0);
        assert!((epley_1rm(100.0, 5) - 116.666).abs() < 0.01);
    }

    #[test]
    fn test_summarize_groups_in_first_seen_order() {
        let log = vec![
            workout("2026-01-10", "Squat", "100", "5"),
            workout("2026-01-12", "Deadlift", "140", "3"),
            workout("2026-01-14", "Squat", "110", "3"),
        ];

        let summaries = summarize(&log);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].exercise, "Squat");
        assert_eq!(summaries[0].entries, 2);
        assert_eq!(summaries[0].best_1rm, 121.0); // 110 * 1.1
        assert_eq!(summaries[0].total_volume, 830.0);
        assert_eq!(summaries[1].exercise, "Deadlift");
    }

    #[test]
    fn test_write_stats_rows() {
        let log = vec![workout("2026-01-10", "Squat", "100", "5")];
        let mut out = Vec::new();
        write_stats(&log, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Stats Calculation\n"));
        assert!(text.contains("2026-01-10  |  Squat  | 100 lb x 5 reps -> est. 1RM: 117 lb"));
        assert!(text.contains("Squat: 117 lb (1 entries, 500.0 lb total volume)"));
    }

    #[test]
    fn test_args_take_exactly_one_path() {
        let args = Args::try_parse_from(["athletelog-stats", "data/workouts.json"]).unwrap();
        assert_eq!(args.path, PathBuf::from("data/workouts.json"));

        assert!(Args::try_parse_from(["athletelog-stats"]).is_err());
        assert!(Args::try_parse_from(["athletelog-stats", "a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_write_stats_empty_log() {
        let mut out = Vec::new();
        write_stats(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Stats Calculation\n");
    }
}
