//! `list` - discover test scripts on disk

use std::path::PathBuf;

use anyhow::Result;
use casekit_engine::discovery::discover_scripts;
use casekit_engine::parser::{parse_str, ScriptFormat};
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::config::CasekitConfig;
use crate::output::{self, OutputFormat, TableDisplay};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum ScriptKind {
    #[default]
    Legacy,
    Narrative,
}

impl ScriptKind {
    fn extension(&self) -> &'static str {
        match self {
            ScriptKind::Legacy => "txt",
            ScriptKind::Narrative => "feature",
        }
    }
}

#[derive(Args)]
pub struct ListArgs {
    /// Directory to scan (defaults to the configured testcases directory)
    pub dir: Option<PathBuf>,

    /// Script kind to list
    #[arg(long, value_enum, default_value = "legacy")]
    pub kind: ScriptKind,
}

#[derive(Debug, Serialize)]
struct ScriptRow {
    file: String,
    feature: String,
    steps: usize,
}

impl TableDisplay for ScriptRow {
    fn headers() -> Vec<&'static str> {
        vec!["File", "Feature", "Steps"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.file.clone(),
            self.feature.clone(),
            self.steps.to_string(),
        ]
    }
}

pub fn execute(args: ListArgs, config: &CasekitConfig, format: OutputFormat) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| config.testcases_dir.clone());
    let scripts = discover_scripts(&dir, args.kind.extension())?;

    let script_format = match args.kind {
        ScriptKind::Legacy => ScriptFormat::Legacy,
        ScriptKind::Narrative => ScriptFormat::Narrative,
    };

    let mut rows = Vec::with_capacity(scripts.len());
    for path in &scripts {
        let Ok(text) = std::fs::read_to_string(path) else {
            continue;
        };
        let case = parse_str(&text, script_format);
        rows.push(ScriptRow {
            file: path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
            feature: case.feature_name,
            steps: case.steps.len(),
        });
    }

    output::print_list(&rows, format);
    Ok(())
}
