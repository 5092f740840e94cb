use std::io;
use std::process::{Command as ProcessCommand, ExitStatus};
use std::time::{Duration, Instant};

use log::info;
use thiserror::Error;

use crate::targets::invocation::Invocation;
use crate::targets::project::Project;
use crate::targets::target::{Target, UnknownTarget};

/// Exit code for a name that is not a target, matching make's usage-error code
pub const UNKNOWN_TARGET_EXIT_CODE: u8 = 2;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    UnknownTarget(#[from] UnknownTarget),

    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl DispatchError {
    /// Process exit code the dispatcher reports for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            DispatchError::UnknownTarget(_) => UNKNOWN_TARGET_EXIT_CODE,
            DispatchError::Launch { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => 127,
                io::ErrorKind::PermissionDenied => 126,
                _ => 1,
            },
        }
    }
}

/// How a launched command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Exited(i32),
    /// Killed by the given signal (unix only)
    Signaled(i32),
}

impl Status {
    #[must_use]
    pub fn success(self) -> bool {
        self == Status::Exited(0)
    }

    /// Map the child's status onto the dispatcher's own exit code.
    ///
    /// Exit codes pass through; codes that don't fit a process exit code become 1, and
    /// signals follow the shell convention of `128 + signal`.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Status::Exited(code) => u8::try_from(code).unwrap_or(1),
            Status::Signaled(signal) => signal
                .checked_add(128)
                .and_then(|code| u8::try_from(code).ok())
                .unwrap_or(1),
        }
    }
}

impl From<ExitStatus> for Status {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Status::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Status::Signaled(signal);
            }
        }
        Status::Exited(1)
    }
}

/// Runs a resolved invocation to completion
pub trait Launcher {
    /// Run `invocation` once and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Launch` if the process cannot be started.
    fn launch(&mut self, invocation: &Invocation) -> Result<Status, DispatchError>;
}

/// Spawns a real child process that shares the caller's stdin, stdout and stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, invocation: &Invocation) -> Result<Status, DispatchError> {
        let status = ProcessCommand::from(invocation)
            .status()
            .map_err(|source| DispatchError::Launch {
                program: invocation.program.clone(),
                source,
            })?;
        Ok(status.into())
    }
}

fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let tenths = d.subsec_millis() / 100;
    if total_secs < 60 {
        format!("{total_secs}.{tenths}s")
    } else {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{mins}m {secs}.{tenths}s")
    }
}

/// Resolves target names against a project and runs them through a [`Launcher`]
pub struct Dispatcher<L = ProcessLauncher> {
    project: Project,
    launcher: L,
}

impl Dispatcher<ProcessLauncher> {
    #[must_use]
    pub fn new(project: Project) -> Self {
        Dispatcher::with_launcher(project, ProcessLauncher)
    }
}

impl<L: Launcher> Dispatcher<L> {
    pub fn with_launcher(project: Project, launcher: L) -> Self {
        Dispatcher { project, launcher }
    }

    #[must_use]
    pub fn project(&self) -> &Project {
        &self.project
    }

    #[must_use]
    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Build the invocation for `target` without running anything.
    #[must_use]
    pub fn resolve(&self, target: Target) -> Invocation {
        target.invocation(&self.project)
    }

    /// Run the target called `name` and return how its command ended.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::UnknownTarget` (nothing is launched) if `name` is not a
    /// target, or `DispatchError::Launch` if the command cannot be started.
    pub fn dispatch(&mut self, name: &str) -> Result<Status, DispatchError> {
        let target: Target = name.parse()?;
        self.dispatch_target(target)
    }

    /// Run `target` exactly once.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Launch` if the command cannot be started.
    pub fn dispatch_target(&mut self, target: Target) -> Result<Status, DispatchError> {
        let invocation = self.resolve(target);
        info!("Running target `{target}`: {invocation}");

        let start = Instant::now();
        let status = self.launcher.launch(&invocation)?;
        let elapsed = format_duration(start.elapsed());

        match status {
            _ if status.success() => info!("Target `{target}` succeeded ({elapsed})"),
            Status::Exited(code) => {
                info!("Target `{target}` exited with code {code} ({elapsed})");
            }
            Status::Signaled(signal) => {
                info!("Target `{target}` was killed by signal {signal} ({elapsed})");
            }
        }
        Ok(status)
    }
}
