//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BuildResult;

use super::loader::{self, ConfigWarning};

/// Identity of the Go project being built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Go import path the project is published under
    #[serde(default = "default_import_path")]
    pub import_path: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            import_path: default_import_path(),
        }
    }
}

fn default_import_path() -> String {
    "github.com/container-mgmt/messaging-library".to_string()
}

/// Directory names used inside the project and the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Hidden directory that stands in for the global `GOPATH`
    #[serde(default = "default_workspace_dir")]
    pub workspace_dir: String,

    /// Root of the importable library packages
    #[serde(default = "default_packages_dir")]
    pub packages_dir: String,

    /// Root of the buildable commands, one per subdirectory
    #[serde(default = "default_commands_dir")]
    pub commands_dir: String,

    #[serde(default = "default_vendor_dir")]
    pub vendor_dir: String,

    /// File extension (without the dot) that marks a directory as a package
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            workspace_dir: default_workspace_dir(),
            packages_dir: default_packages_dir(),
            commands_dir: default_commands_dir(),
            vendor_dir: default_vendor_dir(),
            source_extension: default_source_extension(),
        }
    }
}

fn default_workspace_dir() -> String {
    ".gopath".to_string()
}

fn default_packages_dir() -> String {
    "pkg".to_string()
}

fn default_commands_dir() -> String {
    "cmd".to_string()
}

fn default_vendor_dir() -> String {
    "vendor".to_string()
}

fn default_source_extension() -> String {
    "go".to_string()
}

/// Programs invoked for each toolchain step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    #[serde(default = "default_go")]
    pub go: String,

    #[serde(default = "default_dep")]
    pub dep: String,

    #[serde(default = "default_golint")]
    pub golint: String,

    #[serde(default = "default_gofmt")]
    pub gofmt: String,

    /// First-argument tokens that are forwarded to the toolchain unparsed
    #[serde(default = "default_direct_tools")]
    pub direct_tools: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            go: default_go(),
            dep: default_dep(),
            golint: default_golint(),
            gofmt: default_gofmt(),
            direct_tools: default_direct_tools(),
        }
    }
}

impl ToolchainConfig {
    /// Whether `name` is on the pass-through allow-list
    pub fn is_direct_tool(&self, name: &str) -> bool {
        self.direct_tools.iter().any(|tool| tool == name)
    }

    /// Program to execute for a direct tool name.
    ///
    /// Known tool names map to their configured programs so overrides apply
    /// to pass-through invocations as well.
    pub fn program_for(&self, name: &str) -> String {
        match name {
            "go" => self.go.clone(),
            "dep" => self.dep.clone(),
            "golint" => self.golint.clone(),
            "gofmt" => self.gofmt.clone(),
            other => other.to_string(),
        }
    }
}

fn default_go() -> String {
    "go".to_string()
}

fn default_dep() -> String {
    "dep".to_string()
}

fn default_golint() -> String {
    "golint".to_string()
}

fn default_gofmt() -> String {
    "gofmt".to_string()
}

fn default_direct_tools() -> Vec<String> {
    vec!["dep".to_string(), "go".to_string()]
}

/// Options passed to `golint`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintConfig {
    /// Kept as a string so it reaches `golint` exactly as written
    #[serde(default = "default_min_confidence")]
    pub min_confidence: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
        }
    }
}

fn default_min_confidence() -> String {
    "0.9".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub toolchain: ToolchainConfig,

    #[serde(default)]
    pub lint: LintConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> BuildResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> BuildResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults, then apply
    /// `MSGBUILD_*` overrides.
    pub fn load_for_project(project_dir: &Path) -> BuildResult<(Self, Vec<ConfigWarning>)> {
        loader::load_for_project(project_dir)
    }

    /// Apply environment variable overrides (MSGBUILD_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }
}
