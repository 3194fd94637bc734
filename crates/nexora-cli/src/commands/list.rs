//! Implementation of the `nexora-rn list` command.
//!
//! Inside a managed project each feature is marked installed or not.
//! Elsewhere only the available features are printed.

use serde_json::json;

use nexora_adapters::LocalFilesystem;
use nexora_core::{
    application::ConfigStore,
    domain::{Feature, FeatureStateMachine, ProjectConfig},
};

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let filesystem = LocalFilesystem::new();
    let project = if ConfigStore::exists(&filesystem, &args.project.path) {
        Some(ConfigStore::load(&filesystem, &args.project.path)?)
    } else {
        None
    };
    let rows = rows(project.as_ref());

    match args.format {
        ListFormat::Table => {
            match &project {
                Some(p) => output.header(&format!("Features of {}:", p.name))?,
                None => output.header("Available features:")?,
            }
            for row in &rows {
                let marker = match row.installed {
                    Some(true) => "[x]",
                    Some(false) => "[ ]",
                    None => "   ",
                };
                output.print(&format!(
                    "  {marker} {:<18} {}",
                    row.feature.key(),
                    row.feature.def().description
                ))?;
            }
        }
        ListFormat::Plain => {
            for row in &rows {
                let status = match row.installed {
                    Some(true) => "installed",
                    Some(false) | None => "-",
                };
                println!("{}\t{status}", row.feature.key());
            }
        }
        ListFormat::Json => {
            // Written straight to stdout so pipes get JSON even with --quiet.
            let features: Vec<_> = rows
                .iter()
                .map(|row| {
                    json!({
                        "key": row.feature.key(),
                        "description": row.feature.def().description,
                        "installed": row.installed,
                    })
                })
                .collect();
            let doc = json!({
                "project": project.as_ref().map(|p| p.name.as_str()),
                "features": features,
            });
            let text = serde_json::to_string_pretty(&doc).map_err(std::io::Error::from)?;
            println!("{text}");
        }
    }

    Ok(())
}

struct Row {
    feature: Feature,
    /// `None` outside a managed project.
    installed: Option<bool>,
}

fn rows(project: Option<&ProjectConfig>) -> Vec<Row> {
    Feature::ALL
        .iter()
        .map(|&feature| Row {
            feature,
            installed: project.map(|p| FeatureStateMachine::is_installed(p, feature)),
        })
        .collect()
}
