//! The `add`, `view`, `stats`, `report` and `dashboard` operations.
//!
//! Each command writes user-facing text to the given output and returns an
//! error for the caller to report. Whether an error is fatal is decided by
//! the binary, not here.

use crate::config::{Config, DelegateSpec};
use crate::dashboard::DashboardServer;
use crate::delegate::run_delegate;
use crate::launcher::Launcher;
use crate::table::render_table;
use crate::{Result, Store, Workout};
use std::future::Future;
use std::io::Write;

/// Printed by `stats`/`report` when there is no log file to hand over
pub const NO_WORKOUTS_MESSAGE: &str = "No workouts yet. Add some first!";

/// Validate the raw tokens and append the workout to the store
pub fn add(
    store: &Store,
    date: &str,
    exercise: &str,
    weight: &str,
    reps: &str,
    out: &mut dyn Write,
) -> Result<Workout> {
    let workout = Workout::parse(date, exercise, weight, reps)?;
    store.append(workout.clone())?;

    writeln!(
        out,
        "Added: {} - {} @ {:.1} lb x {} reps",
        date, workout.exercise, workout.weight, workout.reps
    )?;
    Ok(workout)
}

/// Print the whole log as a numbered table
pub fn view(store: &Store, out: &mut dyn Write) -> Result<()> {
    let log = store.list()?;
    render_table(&log, out)?;
    Ok(())
}

/// Run the configured stats program against the log file
pub fn stats(
    store: &Store,
    config: &Config,
    launcher: &dyn Launcher,
    out: &mut dyn Write,
) -> Result<()> {
    delegate(store, "stats", &config.delegates.stats, launcher, out)?;
    writeln!(out, "\nStats complete!")?;
    Ok(())
}

/// Run the configured report generator against the log file
pub fn report(
    store: &Store,
    config: &Config,
    launcher: &dyn Launcher,
    out: &mut dyn Write,
) -> Result<()> {
    delegate(store, "report", &config.delegates.report, launcher, out)?;
    writeln!(out, "\nReport complete!")?;
    Ok(())
}

fn delegate(
    store: &Store,
    name: &str,
    spec: &DelegateSpec,
    launcher: &dyn Launcher,
    out: &mut dyn Write,
) -> Result<()> {
    if !store.path().exists() {
        writeln!(out, "{}", NO_WORKOUTS_MESSAGE)?;
        return Ok(());
    }
    // Child output goes straight to the terminal; flush ours first so the
    // two don't interleave out of order.
    out.flush()?;
    run_delegate(launcher, name, spec, store.path())
}

/// Serve the dashboard, open it in a browser, and wait for `shutdown`.
///
/// A browser that fails to open is reported along with the URL; the server
/// keeps running either way.
pub async fn dashboard<F>(
    config: &Config,
    launcher: &dyn Launcher,
    out: &mut dyn Write,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let handle = DashboardServer::start(&config.dashboard).await?;
    let url = handle.url().to_string();

    writeln!(out, "Serving files from: {}", handle.root().display())?;

    match launcher.open_url(&url) {
        Ok(()) => {
            writeln!(out, "Opening dashboard in your browser...")?;
            writeln!(out, "If it doesn't open automatically, visit: {}", url)?;
        }
        Err(e) => {
            tracing::warn!("Failed to open browser: {}", e);
            writeln!(out, "Auto-open failed: {}", e)?;
            writeln!(out, "Dashboard available at: {}", url)?;
        }
    }
    writeln!(out, "Press Ctrl+C to stop the server when done.")?;
    out.flush()?;

    shutdown.await;
    handle.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::launcher::fake::FakeLauncher;
    use crate::launcher::ExitOutcome;
    use crate::Error;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_add_then_view() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(temp_dir.path().join("data"));

        let mut out = Vec::new();
        add(&store, "2026-01-10", "Squat", "100", "5", &mut out).unwrap();
        add(&store, "2026-01-12", "Deadlift", "140", "3", &mut out).unwrap();
        assert_eq!(
            output(out),
            "Added: 2026-01-10 - Squat @ 100.0 lb x 5 reps\n\
             Added: 2026-01-12 - Deadlift @ 140.0 lb x 3 reps\n"
        );

        let mut out = Vec::new();
        view(&store, &mut out).unwrap();
        let text = output(out);
        let rows: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("Squat") && rows[0].contains("100.0 lb x 5 reps"));
        assert!(rows[1].contains("Deadlift") && rows[1].contains("140.0 lb x 3 reps"));
    }

    #[test]
    fn test_invalid_add_leaves_store_unchanged() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(temp_dir.path());
        add(&store, "2026-01-10", "Squat", "100", "5", &mut Vec::new()).unwrap();
        let before = std::fs::read(store.path()).unwrap();

        let mut out = Vec::new();
        let err = add(&store, "2026-13-40", "Squat", "100", "5", &mut out).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(out.is_empty());

        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_view_empty_store() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(temp_dir.path());

        let mut out = Vec::new();
        view(&store, &mut out).unwrap();
        assert_eq!(output(out), "No workouts logged yet. Add some first!\n");
    }

    #[test]
    fn test_view_corrupt_store() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(temp_dir.path());
        std::fs::write(store.path(), "[{").unwrap();

        let err = view(&store, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::CorruptStore { .. }));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[{");
    }

    #[test]
    fn test_stats_without_log_does_not_launch() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(temp_dir.path());
        let launcher = FakeLauncher::exiting(ExitOutcome::Success);

        let mut out = Vec::new();
        stats(&store, &Config::default(), &launcher, &mut out).unwrap();

        assert_eq!(output(out), format!("{}\n", NO_WORKOUTS_MESSAGE));
        assert!(launcher.runs().is_empty());
    }

    #[test]
    fn test_stats_passes_store_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(temp_dir.path());
        add(&store, "2026-01-10", "Squat", "100", "5", &mut Vec::new()).unwrap();
        let launcher = FakeLauncher::exiting(ExitOutcome::Success);

        let mut out = Vec::new();
        stats(&store, &Config::default(), &launcher, &mut out).unwrap();

        let runs = launcher.runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].program, "athletelog-stats");
        assert_eq!(runs[0].args, vec![store.path().as_os_str().to_os_string()]);
        assert!(output(out).contains("Stats complete!"));
    }

    #[test]
    fn test_report_failure_is_returned() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::in_dir(temp_dir.path());
        add(&store, "2026-01-10", "Squat", "100", "5", &mut Vec::new()).unwrap();
        let launcher = FakeLauncher::exiting(ExitOutcome::Failed(Some(1)));

        let mut out = Vec::new();
        let err = report(&store, &Config::default(), &launcher, &mut out).unwrap_err();

        assert!(matches!(err, Error::Delegate { .. }));
        assert!(!output(out).contains("Report complete!"));
        assert_eq!(launcher.runs()[0].program, "python3");
    }

    fn dashboard_config(root: &std::path::Path) -> Config {
        Config {
            dashboard: DashboardConfig {
                host: "127.0.0.1".into(),
                port: 0,
                path: "/ts-dashboard/".into(),
                root: root.to_path_buf(),
            },
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_dashboard_opens_browser_and_stops() {
        crate::logging::init_test();
        let temp_dir = tempfile::tempdir().unwrap();
        let config = dashboard_config(temp_dir.path());
        let launcher = FakeLauncher::exiting(ExitOutcome::Success);

        let mut out = Vec::new();
        dashboard(&config, &launcher, &mut out, async {}).await.unwrap();

        let opened = launcher.opened.lock().unwrap().clone();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].starts_with("http://localhost:"));
        assert!(opened[0].ends_with("/ts-dashboard/"));
        assert!(output(out).contains("Opening dashboard in your browser..."));
    }

    #[tokio::test]
    async fn test_dashboard_reports_browser_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = dashboard_config(temp_dir.path());
        let launcher = FakeLauncher::missing();

        let mut out = Vec::new();
        dashboard(&config, &launcher, &mut out, async {}).await.unwrap();

        let text = output(out);
        assert!(text.contains("Auto-open failed"));
        assert!(text.contains("Dashboard available at: http://localhost:"));
    }
}
