//! `new` - build a test case interactively, then offer to run and save it

use anyhow::Result;
use casekit_engine::serializer;
use clap::Args;

use crate::config::CasekitConfig;
use crate::console;

#[derive(Args)]
pub struct NewArgs {}

pub async fn execute(_args: NewArgs, config: &CasekitConfig) -> Result<()> {
    let case = console::build_new_case()?;
    println!("{}", serializer::to_summary(&case));
    console::offer_run_and_save(&case, config).await
}
