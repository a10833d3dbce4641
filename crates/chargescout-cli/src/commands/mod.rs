pub mod analyze;
pub mod check;

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::output::OutputWriter;
use anyhow::Result;

pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command {
        Commands::Analyze(args) => analyze::execute(args, &config, &output),
        Commands::Check(args) => check::execute(args, &config, &output),
    }
}
