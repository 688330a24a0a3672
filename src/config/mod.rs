//! Configuration module for msgbuild
//!
//! Configuration hierarchy:
//! 1. Environment variables (MSGBUILD_*)
//! 2. Project config (msgbuild.toml next to the Go sources)
//! 3. User config (~/.config/msgbuild/config.toml)
//! 4. Built-in defaults

mod loader;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{Config, LayoutConfig, LintConfig, ProjectConfig, ToolchainConfig};

#[cfg(test)]
pub(crate) use loader::with_env_overrides;
