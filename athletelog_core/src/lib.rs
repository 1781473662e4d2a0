#![forbid(unsafe_code)]

//! Core library for the athletelog workout journal.
//!
//! This crate provides:
//! - The workout record type and its input validation
//! - The JSON store holding the whole log
//! - Table rendering for `view`
//! - Delegation to external stats/report programs
//! - The static dashboard server
//! - The command operations the CLI dispatches to

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod table;
pub mod launcher;
pub mod delegate;
pub mod dashboard;
pub mod commands;

// Re-export commonly used types
pub use error::{Error, Field, Result};
pub use types::*;
pub use config::Config;
pub use store::Store;
pub use launcher::{Launcher, SystemLauncher};
pub use dashboard::{DashboardHandle, DashboardServer};
