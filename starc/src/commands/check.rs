use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use starcgen_types::ModelFile;

use super::{UnwrapOrExit, args::ConfigArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Checked package model (JSON) produced by the front end
    pub model: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let config = self.config.resolve()?;
        let model = ModelFile::open(&self.model).unwrap_or_exit();

        let report = ops::check(model, &config, &self.model);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
