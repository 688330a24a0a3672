//! Vendored dependency directory
//!
//! The directory is populated by the dependency manager only when it is
//! missing. Its contents are never checked for freshness.

use std::cell::OnceCell;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::BuildResult;
use crate::fs::FileSystem;
use crate::memo::cached;
use crate::toolchain::{run_tool, ToolRunner};
use crate::workspace::Workspace;

/// Arguments for `dep` that install exactly what the lock file lists
pub const DEP_ENSURE_ARGS: &[&str] = &["ensure", "--vendor-only", "-v"];

/// The project's `vendor` directory, populated at most once per run
#[derive(Debug)]
pub struct Vendor {
    dir_name: String,
    dep: String,
    dir: OnceCell<PathBuf>,
}

impl Vendor {
    pub fn new(config: &Config) -> Self {
        Self {
            dir_name: config.layout.vendor_dir.clone(),
            dep: config.toolchain.dep.clone(),
            dir: OnceCell::new(),
        }
    }

    /// Return the vendor directory, running `dep ensure` if it is absent
    pub fn ensure<F, R>(&self, workspace: &Workspace<F>, runner: &R) -> BuildResult<PathBuf>
    where
        F: FileSystem,
        R: ToolRunner + ?Sized,
    {
        cached(&self.dir, || {
            let vendor_dir = workspace.project_link()?.join(&self.dir_name);
            if workspace.fs().resolves(&vendor_dir) {
                tracing::debug!(dir = %vendor_dir.display(), "vendor directory present");
            } else {
                run_tool(workspace, runner, &self.dep, DEP_ENSURE_ARGS)?;
            }
            Ok(vendor_dir)
        })
    }
}
