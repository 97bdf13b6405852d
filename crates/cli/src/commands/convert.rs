//! `convert` - re-serialize a script in another dialect

use std::path::PathBuf;

use anyhow::Result;
use casekit_engine::parser::load_script;
use casekit_engine::serializer::{save_to_file, SerializeMode};
use clap::{Args, ValueEnum};

use crate::config::CasekitConfig;
use crate::output;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Dialect {
    Legacy,
    Narrative,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Script filename (resolved against the testcases directory) or path
    pub script: String,

    /// Output file
    pub output: PathBuf,

    /// Output dialect
    #[arg(long, value_enum, default_value = "legacy")]
    pub to: Dialect,
}

pub fn execute(args: ConvertArgs, config: &CasekitConfig) -> Result<()> {
    let case = load_script(&args.script, &config.testcases_dir)?;

    let mode = match args.to {
        Dialect::Legacy => SerializeMode::Legacy,
        Dialect::Narrative => SerializeMode::Narrative,
    };
    save_to_file(&case, &args.output, mode)?;

    output::print_success(&format!("Test case saved to file: {}", args.output.display()));
    Ok(())
}
