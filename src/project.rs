//! Build steps for the project
//!
//! `Project` ties the configuration, the workspace and a tool runner
//! together and implements each subcommand as a short sequence of toolchain
//! invocations. Steps run strictly one after the other; the first failure
//! stops the sequence.

use std::cell::OnceCell;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::Config;
use crate::discovery;
use crate::error::{BuildError, BuildResult};
use crate::fs::{FileSystem, LocalFs};
use crate::memo::cached;
use crate::toolchain::{run_tool, ProcessRunner, ToolRunner};
use crate::ui::say;
use crate::vendor::Vendor;
use crate::workspace::Workspace;

pub struct Project<R: ToolRunner = ProcessRunner, F: FileSystem = LocalFs> {
    config: Config,
    workspace: Workspace<F>,
    runner: R,
    vendor: Vendor,
    package_paths: OnceCell<Vec<String>>,
    packages: OnceCell<()>,
    binaries: OnceCell<Vec<PathBuf>>,
}

impl Project {
    /// Project at `project_dir` running the real toolchain
    pub fn open(project_dir: impl Into<PathBuf>, config: Config) -> Self {
        Self::with_parts(Workspace::new(project_dir, &config), ProcessRunner, config)
    }
}

impl<R: ToolRunner, F: FileSystem> Project<R, F> {
    pub fn with_parts(workspace: Workspace<F>, runner: R, config: Config) -> Self {
        Self {
            vendor: Vendor::new(&config),
            config,
            workspace,
            runner,
            package_paths: OnceCell::new(),
            packages: OnceCell::new(),
            binaries: OnceCell::new(),
        }
    }

    pub fn workspace(&self) -> &Workspace<F> {
        &self.workspace
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Make sure `vendor/` is populated and return its path
    pub fn ensure_vendor_dir(&self) -> BuildResult<PathBuf> {
        self.vendor.ensure(&self.workspace, &self.runner)
    }

    /// Sorted import paths of every library package
    pub fn package_paths(&self) -> BuildResult<Vec<String>> {
        cached(&self.package_paths, || {
            let project_dir = self.workspace.project_dir()?;
            let layout = &self.config.layout;
            discovery::package_paths(
                &project_dir,
                &project_dir.join(&layout.packages_dir),
                &self.config.project.import_path,
                &layout.source_extension,
            )
        })
    }

    /// Sorted names of the command directories
    pub fn command_names(&self) -> BuildResult<Vec<String>> {
        let project_dir = self.workspace.project_dir()?;
        discovery::command_names(&project_dir.join(&self.config.layout.commands_dir))
    }

    /// `go install` every library package (the `build` subcommand)
    pub fn ensure_packages(&self) -> BuildResult<()> {
        cached(&self.packages, || {
            self.ensure_vendor_dir()?;
            let pkg_paths = self.package_paths()?;
            self.go(std::iter::once("install".to_string()).chain(pkg_paths))
        })
    }

    /// `go install` every command, one at a time (the `binaries` subcommand).
    ///
    /// Returns the paths of the installed binaries.
    pub fn ensure_binaries(&self) -> BuildResult<Vec<PathBuf>> {
        cached(&self.binaries, || {
            self.ensure_vendor_dir()?;

            let cmd_names = self.command_names()?;
            for name in &cmd_names {
                say(format!("Building binary '{}'", name));
                let cmd_path = format!(
                    "{}/{}/{}",
                    self.config.project.import_path, self.config.layout.commands_dir, name
                );
                self.go(["install".to_string(), cmd_path])?;
            }

            let go_bin = self.workspace.bin_dir()?;
            Ok(cmd_names.iter().map(|name| go_bin.join(name)).collect())
        })
    }

    /// Run the unit tests of every package
    pub fn test(&self) -> BuildResult<()> {
        let pkg_paths = self.package_paths()?;
        self.go(std::iter::once("test".to_string()).chain(pkg_paths))
    }

    /// Run the benchmarks of every package
    pub fn bench(&self) -> BuildResult<()> {
        let pkg_paths = self.package_paths()?;
        self.go(["test".to_string(), "-bench=.".to_string()].into_iter().chain(pkg_paths))
    }

    /// Run `golint` over the packages and commands
    pub fn lint(&self) -> BuildResult<()> {
        let layout = &self.config.layout;
        let args = [
            "-min_confidence".to_string(),
            self.config.lint.min_confidence.clone(),
            "-set_exit_status".to_string(),
            format!("./{}/...", layout.packages_dir),
            format!("./{}/...", layout.commands_dir),
        ];
        run_tool(&self.workspace, &self.runner, &self.config.toolchain.golint, args)
    }

    /// Rewrite the sources in place with `gofmt -s`
    pub fn fmt(&self) -> BuildResult<()> {
        let layout = &self.config.layout;
        let args = [
            "-s".to_string(),
            "-l".to_string(),
            "-w".to_string(),
            format!("./{}/", layout.packages_dir),
            format!("./{}/", layout.commands_dir),
        ];
        run_tool(&self.workspace, &self.runner, &self.config.toolchain.gofmt, args)
    }

    /// Forward `tool args...` to the toolchain without interpreting `args`
    pub fn passthrough(&self, tool: &str, args: Vec<OsString>) -> BuildResult<()> {
        let toolchain = &self.config.toolchain;
        if !toolchain.is_direct_tool(tool) {
            return Err(BuildError::UnknownTool {
                name: tool.to_string(),
                allowed: toolchain.direct_tools.join(", "),
            });
        }
        run_tool(&self.workspace, &self.runner, &toolchain.program_for(tool), args)
    }

    fn go<I: IntoIterator<Item = String>>(&self, args: I) -> BuildResult<()> {
        run_tool(&self.workspace, &self.runner, &self.config.toolchain.go, args)
    }
}
