//! Subcommand handlers

use msgbuild::fs::FileSystem;
use msgbuild::ui::say;
use msgbuild::{BuildResult, Project, ToolRunner};

use crate::cli::Commands;

/// Run the handler for `command`
pub fn dispatch<R: ToolRunner, F: FileSystem>(
    command: Commands,
    project: &Project<R, F>,
) -> BuildResult<()> {
    match command {
        Commands::Build => project.ensure_packages(),
        Commands::Binaries => cmd_binaries(project),
        Commands::Test => project.test(),
        Commands::Bench => project.bench(),
        Commands::Lint => project.lint(),
        Commands::Fmt => project.fmt(),
    }
}

fn cmd_binaries<R: ToolRunner, F: FileSystem>(project: &Project<R, F>) -> BuildResult<()> {
    let binaries = project.ensure_binaries()?;
    for binary in &binaries {
        say(format!("Installed '{}'", binary.display()));
    }
    Ok(())
}
