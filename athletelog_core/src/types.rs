//! Core domain types for the athletelog journal.
//!
//! A [`Workout`] is one logged set of an exercise. The persisted file is a
//! JSON array of these, and its field names (`date`, `exercise`, `weight`,
//! `reps`) are shared with the stats and report programs that read the same
//! file, so they must not change.

use crate::error::{Error, Field, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical textual date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One workout entry.
///
/// Fields are plain JSON scalars: the rules in [`Workout::parse`] apply when an
/// entry is created, and an existing log is read back without re-checking
/// them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    /// `YYYY-MM-DD`
    pub date: String,
    pub exercise: String,
    /// Magnitude only; "lb" is a display convention.
    pub weight: f64,
    pub reps: i64,
}

/// The full ordered collection of workouts, in insertion order
pub type WorkoutLog = Vec<Workout>;

impl Workout {
    /// Build a workout from raw command-line tokens.
    ///
    /// Fields are checked in the order weight, reps, date, exercise. The
    /// exercise label is kept byte-for-byte; it only has to be non-empty.
    ///
    /// Negative weights and zero reps are rejected. Older builds accepted any
    /// value that parsed, which let nonsense entries into the log.
    pub fn parse(date: &str, exercise: &str, weight: &str, reps: &str) -> Result<Self> {
        let weight = parse_weight(weight)?;
        let reps = parse_reps(reps)?;
        let date = parse_date(date)?;

        if exercise.is_empty() {
            return Err(Error::validation(Field::Exercise, "exercise name must not be empty"));
        }

        Ok(Workout {
            date,
            exercise: exercise.to_string(),
            weight,
            reps,
        })
    }

    /// Training volume for this entry (weight x reps)
    pub fn volume(&self) -> f64 {
        self.weight * self.reps as f64
    }
}

fn parse_weight(raw: &str) -> Result<f64> {
    let weight: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::validation(Field::Weight, format!("'{}' is not a number", raw)))?;

    if !weight.is_finite() {
        return Err(Error::validation(Field::Weight, format!("'{}' is not a finite number", raw)));
    }
    if weight < 0.0 {
        return Err(Error::validation(Field::Weight, "weight must not be negative"));
    }
    // "-0" parses to negative zero
    Ok(weight.abs())
}

fn parse_reps(raw: &str) -> Result<i64> {
    let reps: i64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::validation(Field::Reps, format!("'{}' is not a whole number", raw)))?;

    if reps < 1 {
        return Err(Error::validation(Field::Reps, "reps must be at least 1"));
    }
    Ok(reps)
}

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// chrono accepts single-digit months and days for `%m`/`%d`, so the parsed
/// value is formatted back and compared to reject non-canonical input.
pub fn parse_date(raw: &str) -> Result<String> {
    let invalid = || Error::validation(Field::Date, "date must be in YYYY-MM-DD format");

    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())?;
    let canonical = date.format(DATE_FORMAT).to_string();
    if canonical != raw {
        return Err(invalid());
    }
    Ok(canonical)
}
