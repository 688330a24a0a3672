//! msgbuild CLI - build tool for the messaging library
//!
//! Usage: msgbuild [--verbose] [--debug] <COMMAND>
//!        msgbuild <dep|go> [ARGS...]
//!
//! Commands:
//!   build     Vendor dependencies and install all packages
//!   binaries  Vendor dependencies and install all commands
//!   test      Run the unit tests
//!   bench     Run the benchmarks
//!   lint      Run golint
//!   fmt       Run gofmt

mod cli;
mod commands;

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use msgbuild::{logging, BuildError, Config, ConfigWarning, Project};

use cli::Cli;

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn run(args: Vec<OsString>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let project_dir = msgbuild::resolve_project_root(&cwd, |key| std::env::var(key).ok());
    let (config, warnings) = Config::load_for_project(&project_dir)?;

    // Direct tools bypass the parser so their flags reach the tool untouched.
    if let Some(tool) = args.get(1).and_then(|arg| arg.to_str()) {
        if config.toolchain.is_direct_tool(tool) {
            logging::init(false, false);
            report_config_warnings(&warnings);
            let project = Project::open(project_dir, config);
            project.passthrough(tool, args[2..].to_vec())?;
            return Ok(ExitCode::SUCCESS);
        }
    }

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            return Ok(ExitCode::from(code));
        }
    };

    logging::init(cli.verbose, cli.debug);
    report_config_warnings(&warnings);

    let Some(command) = cli.command else {
        println!("{}", Cli::command().render_usage());
        return Ok(ExitCode::from(1));
    };

    tracing::debug!(?command, project = %project_dir.display(), "dispatching");
    let project = Project::open(project_dir, config);
    commands::dispatch(command, &project)?;
    Ok(ExitCode::SUCCESS)
}

fn report_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        let location = match w.line {
            Some(line) => format!("{}:{}", w.file.display(), line),
            None => w.file.display().to_string(),
        };
        match &w.suggestion {
            Some(suggestion) => tracing::warn!(
                "unknown config key '{}' in {} (did you mean '{}'?)",
                w.key,
                location,
                suggestion
            ),
            None => tracing::warn!("unknown config key '{}' in {}", w.key, location),
        }
    }
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<BuildError>()
        .map(BuildError::exit_code)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_uses_child_status() {
        let err = anyhow::Error::new(BuildError::CommandFailed {
            command: "go test".to_string(),
            code: Some(2),
        });
        assert_eq!(exit_code_for(&err), 2);
    }

    #[test]
    fn exit_code_defaults_to_one() {
        let err = anyhow::anyhow!("failed to read the current directory");
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn usage_names_the_binary() {
        let usage = Cli::command().render_usage().to_string();
        assert!(usage.contains("msgbuild"), "{usage}");
    }
}
