use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use starcgen_types::ModelFile;

use super::{ExitOnDiagnostic, UnwrapOrExit, args::ConfigArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExtractCommand {
    /// Checked package model (JSON) produced by the front end
    pub model: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the classification trace
    #[arg(long)]
    pub debug: bool,

    /// Name of the generated file (defaults to <package>.shims.go); the
    /// model is written next to it as <output>.json
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write per-phase pipeline snapshots into this directory
    #[arg(long, value_name = "DIR")]
    pub visualize: Option<PathBuf>,
}

impl ExtractCommand {
    pub fn run(&self) -> Result<()> {
        let mut config = self.config.resolve()?;
        config.debug |= self.debug;
        let model = ModelFile::open(&self.model).unwrap_or_exit();

        let report = ops::extract(
            model,
            config,
            ops::extract::ExtractOptions {
                output: self.output.as_deref(),
                visualize: self.visualize.as_deref(),
            },
        )
        .exit_on_diagnostic()?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
