//! Test environment builder for isolated msgbuild testing.
//!
//! Provides `TestEnv` - a temp project directory plus a directory of fake
//! toolchain programs (`go`, `dep`, `golint`, `gofmt`). Each fake appends
//! its command line and the workspace variables it saw to log files, and
//! exits with `FAKE_<TOOL>_EXIT` (default 0). The fake `dep` creates
//! `vendor/` in its working directory on success, like the real one.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const FAKE_TOOLS: &[&str] = &["go", "dep", "golint", "gofmt"];

pub const IMPORT_PATH: &str = "github.com/container-mgmt/messaging-library";

/// Result of running a msgbuild CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    /// Temporary directory for the project
    pub project_root: TempDir,
    /// Fake toolchain programs and their logs
    pub tools_dir: TempDir,
    /// Isolated config home so no user config leaks in
    pub config_home: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Project directory with symlinks resolved, as msgbuild sees it
    pub fn project_dir(&self) -> PathBuf {
        self.project_root.path().canonicalize().unwrap()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_dir().join(relative)
    }

    /// Path of the project link inside the workspace
    pub fn project_link(&self) -> PathBuf {
        self.project_path(&format!(".gopath/src/{}", IMPORT_PATH))
    }

    /// Run msgbuild from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run msgbuild from the project root with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("MSGBUILD_PROJECT_DIR", self.project_root.path())
            .env("MSGBUILD_TEST_LOG", self.command_log_path())
            .env("MSGBUILD_TEST_ENV_LOG", self.env_log_path())
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env_remove("MSGBUILD_LOG")
            .env_remove("MSGBUILD_IMPORT_PATH");

        for tool in FAKE_TOOLS {
            cmd.env(
                format!("MSGBUILD_{}", tool.to_uppercase()),
                self.tools_dir.path().join(tool),
            );
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute msgbuild");
        Self::output_to_result(output)
    }

    fn output_to_result(output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    fn command_log_path(&self) -> PathBuf {
        self.tools_dir.path().join("commands.log")
    }

    fn env_log_path(&self) -> PathBuf {
        self.tools_dir.path().join("env.log")
    }

    /// Command lines the fake tools received, in order (`go install ...`)
    pub fn tool_commands(&self) -> Vec<String> {
        read_lines(&self.command_log_path())
    }

    /// `<tool> GOPATH=... PWD=...` lines, in order
    pub fn tool_environments(&self) -> Vec<String> {
        read_lines(&self.env_log_path())
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        write_file(&self.project_root.path().join(relative_path), content);
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

fn install_fake_tool(dir: &Path, name: &str) {
    let exit_var = format!("FAKE_{}_EXIT", name.to_uppercase());
    let on_success = if name == "dep" { "mkdir -p vendor\n" } else { "" };
    let script = format!(
        "#!/bin/sh\n\
         printf '%s\\n' \"{name} $*\" >> \"$MSGBUILD_TEST_LOG\"\n\
         printf '%s GOPATH=%s PWD=%s\\n' {name} \"$GOPATH\" \"$PWD\" >> \"$MSGBUILD_TEST_ENV_LOG\"\n\
         code=\"${{{exit_var}:-0}}\"\n\
         if [ \"$code\" -ne 0 ]; then exit \"$code\"; fi\n\
         {on_success}\
         exit 0\n"
    );
    let path = dir.join(name);
    std::fs::write(&path, script).expect("Failed to write fake tool");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake tool executable");
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    files: Vec<(String, String)>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Add a library package with one source file (`pkg/<dir>`)
    pub fn with_package(mut self, dir: &str) -> Self {
        let name = dir.rsplit('/').next().unwrap_or(dir);
        self.files.push((
            format!("pkg/{}/{}.go", dir, name),
            format!("package {}\n", name),
        ));
        self
    }

    /// Add a command directory (`cmd/<name>/main.go`)
    pub fn with_command(mut self, name: &str) -> Self {
        self.files
            .push((format!("cmd/{}/main.go", name), "package main\n".to_string()));
        self
    }

    /// Pretend dependencies were already vendored
    pub fn with_vendor(mut self) -> Self {
        self.files
            .push(("vendor/modules.txt".to_string(), String::new()));
        self
    }

    /// Set msgbuild.toml content
    pub fn with_project_config(mut self, toml: &str) -> Self {
        self.files
            .push(("msgbuild.toml".to_string(), toml.to_string()));
        self
    }

    pub fn with_file(mut self, relative_path: &str, content: &str) -> Self {
        self.files
            .push((relative_path.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> TestEnv {
        let project_root = TempDir::new().expect("Failed to create project temp dir");
        let tools_dir = TempDir::new().expect("Failed to create tools temp dir");
        let config_home = TempDir::new().expect("Failed to create config temp dir");

        for tool in FAKE_TOOLS {
            install_fake_tool(tools_dir.path(), tool);
        }
        for (relative, content) in &self.files {
            write_file(&project_root.path().join(relative), content);
        }

        TestEnv {
            project_root,
            tools_dir,
            config_home,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_msgbuild")),
        }
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
