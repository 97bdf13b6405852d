//! `show` - parse a script and print its summary or markdown rendering

use anyhow::Result;
use casekit_engine::markdown::to_markdown;
use casekit_engine::parser::load_script;
use casekit_engine::serializer;
use clap::Args;

use crate::config::CasekitConfig;

#[derive(Args)]
pub struct ShowArgs {
    /// Script filename (resolved against the testcases directory) or path
    pub script: String,

    /// Render as markdown instead of the summary block
    #[arg(long)]
    pub markdown: bool,
}

pub fn execute(args: ShowArgs, config: &CasekitConfig) -> Result<()> {
    let case = load_script(&args.script, &config.testcases_dir)?;

    if args.markdown {
        println!("{}", to_markdown(&case));
    } else {
        println!("{}", serializer::to_summary(&case));
    }

    Ok(())
}
