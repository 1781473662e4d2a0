//! Launching external programs.
//!
//! Everything that leaves the process (stats/report programs, the browser)
//! goes through the [`Launcher`] trait so commands can be exercised with a
//! fake in tests.

use std::ffi::OsString;
use std::io;
use std::process::{Command, Stdio};

/// A program plus its arguments
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// How a foreground program finished
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitOutcome {
    Success,
    /// Non-zero exit; `None` when terminated by a signal
    Failed(Option<i32>),
}

/// External command launcher capability
pub trait Launcher {
    /// Run a program in the foreground with inherited stdio and wait for it
    fn run(&self, invocation: &Invocation) -> io::Result<ExitOutcome>;

    /// Open a URL in the user's default browser without waiting for it
    fn open_url(&self, url: &str) -> io::Result<()>;
}

/// Launcher that spawns real processes on the host OS
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn run(&self, invocation: &Invocation) -> io::Result<ExitOutcome> {
        tracing::debug!("Running {:?} {:?}", invocation.program, invocation.args);

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        if status.success() {
            Ok(ExitOutcome::Success)
        } else {
            Ok(ExitOutcome::Failed(status.code()))
        }
    }

    fn open_url(&self, url: &str) -> io::Result<()> {
        tracing::debug!("Opening {} in the default browser", url);
        open::that_detached(url)
    }
}
