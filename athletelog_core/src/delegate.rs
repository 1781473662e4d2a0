//! Running stats/report programs against the workout log.
//!
//! A delegate gets the log path as its final argument and owns everything
//! after that: parsing the file, computing, and printing. Its stdout/stderr
//! are inherited, and only success or failure of the exit status is observed.

use crate::config::DelegateSpec;
use crate::launcher::{ExitOutcome, Invocation, Launcher};
use crate::{Error, Result};
use std::path::Path;

/// Build the command line for a delegate: `<program> [args...] <store-path>`
pub fn delegate_invocation(spec: &DelegateSpec, store_path: &Path) -> Invocation {
    Invocation::new(spec.program.clone())
        .args(spec.args.iter())
        .arg(store_path)
}

/// Run a delegate to completion.
///
/// Launch failures and non-zero exits become [`Error::Delegate`].
pub fn run_delegate(
    launcher: &dyn Launcher,
    name: &str,
    spec: &DelegateSpec,
    store_path: &Path,
) -> Result<()> {
    let invocation = delegate_invocation(spec, store_path);
    tracing::info!("Running {} delegate: {:?}", name, invocation);

    let outcome = launcher.run(&invocation).map_err(|e| Error::Delegate {
        name: name.to_string(),
        reason: format!("could not launch '{}': {}", spec.program, e),
    })?;

    match outcome {
        ExitOutcome::Success => Ok(()),
        ExitOutcome::Failed(Some(code)) => Err(Error::Delegate {
            name: name.to_string(),
            reason: format!("'{}' exited with status {}", spec.program, code),
        }),
        ExitOutcome::Failed(None) => Err(Error::Delegate {
            name: name.to_string(),
            reason: format!("'{}' was terminated by a signal", spec.program),
        }),
    }
}
