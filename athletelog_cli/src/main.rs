use athletelog_core::{commands, Config, Error, Store, SystemLauncher};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "athletelog")]
#[command(about = "Track your workouts like a pro", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Load configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new workout entry
    #[command(after_help = "Example: athletelog add 2026-01-10 Squat 100 5")]
    Add {
        /// Date of the workout (YYYY-MM-DD)
        #[arg(allow_hyphen_values = true)]
        date: String,
        /// Exercise name, e.g. Squat
        #[arg(allow_hyphen_values = true)]
        exercise: String,
        /// Weight lifted
        #[arg(allow_hyphen_values = true)]
        weight: String,
        /// Number of reps
        #[arg(allow_hyphen_values = true)]
        reps: String,
    },

    /// View all workout entries
    View,

    /// Calculate stats (e.g. estimated 1RM) with the external stats program
    Stats,

    /// Generate a progress report with the external report program
    Report,

    /// Launch the dashboard in your browser
    Dashboard,
}

fn main() -> ExitCode {
    athletelog_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let store = Store::in_dir(&data_dir);
    let mut stdout = io::stdout();

    match cli.command {
        Commands::Add {
            date,
            exercise,
            weight,
            reps,
        } => match commands::add(&store, &date, &exercise, &weight, &reps, &mut stdout) {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => fatal(e),
        },
        Commands::View => report_and_continue(commands::view(&store, &mut stdout)),
        Commands::Stats => {
            report_and_continue(commands::stats(&store, &config, &SystemLauncher, &mut stdout))
        }
        Commands::Report => {
            report_and_continue(commands::report(&store, &config, &SystemLauncher, &mut stdout))
        }
        Commands::Dashboard => match cmd_dashboard(&config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => fatal(e),
        },
    }
}

fn cmd_dashboard(config: &Config) -> athletelog_core::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        };
        commands::dashboard(config, &SystemLauncher, &mut io::stdout(), shutdown).await
    })
}

/// Print the error and fail the invocation
fn fatal(e: Error) -> ExitCode {
    tracing::debug!("Command failed: {:?}", e);
    println!("{}", e);
    ExitCode::FAILURE
}

/// Print the error; the invocation still exits successfully
fn report_and_continue(result: athletelog_core::Result<()>) -> ExitCode {
    if let Err(e) = result {
        tracing::debug!("Command reported error: {:?}", e);
        println!("{}", e);
    }
    ExitCode::SUCCESS
}
