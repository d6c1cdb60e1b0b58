mod args;
mod check;
mod completions;
mod extract;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use extract::ExtractCommand;

/// Extension trait for exiting on model errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for starcgen_types::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Extension trait for exiting on extraction failures with pretty formatting.
///
/// Reports that do not carry a [`starcgen_extract::Error`] are handed back
/// for `color-eyre` to render.
pub(crate) trait ExitOnDiagnostic<T> {
    fn exit_on_diagnostic(self) -> Result<T>;
}

impl<T> ExitOnDiagnostic<T> for Result<T> {
    fn exit_on_diagnostic(self) -> Result<T> {
        self.map_err(|report| match report.downcast::<starcgen_extract::Error>() {
            Ok(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
            Err(report) => report,
        })
    }
}

#[derive(Parser)]
#[command(name = "starcgen")]
#[command(version)]
#[command(about = "Generate registration shims for Apache Beam Go pipelines")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Extract(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the generation model from a checked package
    Extract(ExtractCommand),

    /// Type check a package model without extracting
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract_flags() {
        let cli = Cli::try_parse_from([
            "starcgen",
            "extract",
            "model.json",
            "-p",
            "wordcount",
            "--ids",
            "CountFn,strings.ToUpper",
            "--legacy",
        ])
        .unwrap();
        let Commands::Extract(cmd) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(cmd.config.package.as_deref(), Some("wordcount"));
        assert_eq!(cmd.config.ids, vec!["CountFn", "strings.ToUpper"]);
        assert!(cmd.config.legacy);
        assert!(!cmd.debug);
    }
}
