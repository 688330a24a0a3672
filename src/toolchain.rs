//! External toolchain invocation
//!
//! Each step is one blocking subprocess that runs inside the project link
//! with `GOPATH` pointing at the workspace. The child shares our terminal;
//! its exit status is the only thing inspected.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Command;

use crate::error::{BuildError, BuildResult};
use crate::fs::FileSystem;
use crate::ui::say;
use crate::workspace::Workspace;

/// Variable pointing the toolchain at the workspace root
pub const WORKSPACE_ENV: &str = "GOPATH";

/// Variable holding the logical working directory.
///
/// The OS resolves `current_dir` to the real path, so the link path has to
/// be passed separately for the toolchain to see the import path.
pub const WORKDIR_ENV: &str = "PWD";

/// A fully resolved command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
    /// Variables set on top of the inherited environment
    pub env: Vec<(String, PathBuf)>,
    pub cwd: PathBuf,
}

impl Invocation {
    /// Program and arguments joined by spaces, for messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Something that can execute an [`Invocation`] to completion
pub trait ToolRunner {
    fn run(&self, invocation: &Invocation) -> BuildResult<()>;
}

impl<R: ToolRunner + ?Sized> ToolRunner for &R {
    fn run(&self, invocation: &Invocation) -> BuildResult<()> {
        (**self).run(invocation)
    }
}

/// Runs invocations as real child processes with inherited stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> BuildResult<()> {
        let command = invocation.command_line();
        tracing::debug!(cwd = %invocation.cwd.display(), %command, "spawning");

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_os_str())))
            .current_dir(&invocation.cwd)
            .status()
            .map_err(|source| BuildError::Spawn {
                command: command.clone(),
                source,
            })?;

        tracing::debug!(%command, code = ?status.code(), "finished");
        if !status.success() {
            return Err(BuildError::CommandFailed {
                command,
                code: status.code(),
            });
        }
        Ok(())
    }
}

/// Build the invocation for `program args...` inside the workspace.
///
/// Materializes the workspace root and the project link first.
pub fn prepare<F, I, S>(workspace: &Workspace<F>, program: &str, args: I) -> BuildResult<Invocation>
where
    F: FileSystem,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let go_path = workspace.root()?;
    let project_link = workspace.project_link()?;

    Ok(Invocation {
        program: program.to_string(),
        args: args.into_iter().map(|a| a.as_ref().to_os_string()).collect(),
        env: vec![
            (WORKSPACE_ENV.to_string(), go_path),
            (WORKDIR_ENV.to_string(), project_link.clone()),
        ],
        cwd: project_link,
    })
}

/// Run `program args...` in the workspace and wait for it
pub fn run_tool<F, R, I, S>(
    workspace: &Workspace<F>,
    runner: &R,
    program: &str,
    args: I,
) -> BuildResult<()>
where
    F: FileSystem,
    R: ToolRunner + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let invocation = prepare(workspace, program, args)?;
    say(format!("Running command '{}'", invocation.command_line()));
    runner.run(&invocation)
}

/// Runner that records invocations instead of spawning them (for tests)
#[cfg(test)]
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: std::cell::RefCell<Vec<Invocation>>,
    /// Exit code to fail with when the program name matches
    pub fail: Option<(String, i32)>,
}

#[cfg(test)]
impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(program: &str, code: i32) -> Self {
        Self {
            calls: Default::default(),
            fail: Some((program.to_string(), code)),
        }
    }

    /// Recorded command lines, in order
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Invocation::command_line).collect()
    }
}

#[cfg(test)]
impl ToolRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> BuildResult<()> {
        self.calls.borrow_mut().push(invocation.clone());
        match &self.fail {
            Some((program, code)) if *program == invocation.program => {
                Err(BuildError::CommandFailed {
                    command: invocation.command_line(),
                    code: Some(*code),
                })
            }
            _ => Ok(()),
        }
    }
}
