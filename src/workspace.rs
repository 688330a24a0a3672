//! GOPATH-style workspace inside the project
//!
//! ```text
//! <project>/
//!   .gopath/
//!     bin/
//!     pkg/
//!     src/
//!       github.com/container-mgmt/messaging-library -> <project>
//! ```
//!
//! Every resolver creates what it returns on first use and hands back the
//! same path afterwards without touching the file system again.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::BuildResult;
use crate::fs::{FileSystem, LocalFs};
use crate::memo::{cached, Memo};
use crate::ui::say;

/// Lazily materialized workspace layout for one project
pub struct Workspace<F: FileSystem = LocalFs> {
    fs: F,
    start_dir: PathBuf,
    workspace_dir: String,
    import_path: String,
    project_dir: OnceCell<PathBuf>,
    root: OnceCell<PathBuf>,
    bin: OnceCell<PathBuf>,
    pkg: OnceCell<PathBuf>,
    src: OnceCell<PathBuf>,
    project_link: OnceCell<PathBuf>,
    links: Memo<(String, PathBuf), PathBuf>,
}

impl Workspace<LocalFs> {
    pub fn new(project_dir: impl Into<PathBuf>, config: &Config) -> Self {
        Self::with_fs(LocalFs, project_dir, config)
    }
}

impl<F: FileSystem> Workspace<F> {
    pub fn with_fs(fs: F, project_dir: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            fs,
            start_dir: project_dir.into(),
            workspace_dir: config.layout.workspace_dir.clone(),
            import_path: config.project.import_path.clone(),
            project_dir: OnceCell::new(),
            root: OnceCell::new(),
            bin: OnceCell::new(),
            pkg: OnceCell::new(),
            src: OnceCell::new(),
            project_link: OnceCell::new(),
            links: Memo::new(),
        }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// The project directory with all symlinks resolved
    pub fn project_dir(&self) -> BuildResult<PathBuf> {
        cached(&self.project_dir, || {
            say("Calculating project directory");
            self.fs.canonicalize(&self.start_dir)
        })
    }

    /// The directory used as `GOPATH`
    pub fn root(&self) -> BuildResult<PathBuf> {
        cached(&self.root, || {
            let root = self.project_dir()?.join(&self.workspace_dir);
            if !self.fs.exists(&root) {
                say(format!("Creating Go path '{}'", root.display()));
                self.fs.create_dir(&root)?;
            }
            Ok(root)
        })
    }

    /// Where `go install` puts binaries
    pub fn bin_dir(&self) -> BuildResult<PathBuf> {
        cached(&self.bin, || self.ensure_subdir("bin"))
    }

    /// Where `go install` puts compiled packages
    pub fn pkg_dir(&self) -> BuildResult<PathBuf> {
        cached(&self.pkg, || self.ensure_subdir("pkg"))
    }

    /// Root of the source tree the toolchain searches by import path
    pub fn src_dir(&self) -> BuildResult<PathBuf> {
        cached(&self.src, || self.ensure_subdir("src"))
    }

    /// Make `src_path` visible under `src/<import_path>`.
    ///
    /// Returns the link path. An existing entry at that path is reused as is.
    pub fn src_link(&self, import_path: &str, src_path: &Path) -> BuildResult<PathBuf> {
        let key = (import_path.to_string(), src_path.to_path_buf());
        self.links.get_or_try_insert_with(key, || {
            let link = join_import_path(&self.src_dir()?, import_path);
            if let Some(parent) = link.parent() {
                if !self.fs.exists(parent) {
                    self.fs.create_dir_all(parent)?;
                }
            }
            if !self.fs.exists(&link) {
                tracing::debug!(link = %link.display(), to = %src_path.display(), "linking source");
                self.fs.symlink_dir(src_path, &link)?;
            }
            Ok(link)
        })
    }

    /// The project as seen through the workspace, used as working directory
    pub fn project_link(&self) -> BuildResult<PathBuf> {
        cached(&self.project_link, || {
            let project_dir = self.project_dir()?;
            self.src_link(&self.import_path, &project_dir)
        })
    }

    fn ensure_subdir(&self, name: &str) -> BuildResult<PathBuf> {
        let dir = self.root()?.join(name);
        if !self.fs.exists(&dir) {
            tracing::debug!(dir = %dir.display(), "creating workspace directory");
            self.fs.create_dir(&dir)?;
        }
        Ok(dir)
    }
}

/// Append a `/`-separated import path to `base` using native separators
pub fn join_import_path(base: &Path, import_path: &str) -> PathBuf {
    import_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}
