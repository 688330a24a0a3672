use clap::{Parser, Subcommand};

/// A simple build tool, just for this project.
#[derive(Parser, Debug)]
#[command(name = "msgbuild")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "A first argument naming a direct tool (dep, go) runs that tool inside the workspace with the remaining arguments passed through untouched."
)]
pub struct Cli {
    /// Generate verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Generate debug, very verbose, output
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Vendor dependencies and install all library packages
    Build,

    /// Vendor dependencies and install one binary per command directory
    Binaries,

    /// Run the unit tests of all packages
    Test,

    /// Run the benchmarks of all packages
    Bench,

    /// Run golint over packages and commands
    Lint,

    /// Format all sources in place with gofmt
    Fmt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_subcommands() {
        let cases = [
            ("build", Commands::Build),
            ("binaries", Commands::Binaries),
            ("test", Commands::Test),
            ("bench", Commands::Bench),
            ("lint", Commands::Lint),
            ("fmt", Commands::Fmt),
        ];
        for (arg, expected) in cases {
            let cli = Cli::try_parse_from(["msgbuild", arg]).unwrap();
            assert_eq!(cli.command, Some(expected), "{arg}");
        }
    }

    #[test]
    fn test_cli_parse_no_subcommand() {
        let cli = Cli::try_parse_from(["msgbuild"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_global_flags_anywhere() {
        let cli = Cli::try_parse_from(["msgbuild", "--verbose", "test", "--debug"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.debug);
        assert_eq!(cli.command, Some(Commands::Test));
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        let err = Cli::try_parse_from(["msgbuild", "deploy"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_cli_rejects_subcommand_arguments() {
        assert!(Cli::try_parse_from(["msgbuild", "build", "./pkg/..."]).is_err());
    }
}
