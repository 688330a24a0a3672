//! msgbuild - build orchestration for the messaging library
//!
//! Sets up a project-local GOPATH workspace, vendors dependencies on demand
//! and drives the Go toolchain (`go install`, `go test`, `golint`, `gofmt`)
//! one subprocess at a time.

pub mod config;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod logging;
pub mod memo;
pub mod project;
pub mod project_root;
pub mod toolchain;
pub mod ui;
pub mod vendor;
pub mod workspace;

// Re-exports for convenience
pub use config::{Config, ConfigWarning};
pub use error::{BuildError, BuildResult};
pub use project::Project;
pub use project_root::{discover_project_root, resolve_project_root};
pub use toolchain::{Invocation, ProcessRunner, ToolRunner};
pub use workspace::Workspace;
