//! `nexora-rn rename`.

use tracing::instrument;

use crate::{
    cli::RenameArgs, config::AppConfig, error::CliResult, output::OutputManager,
    wiring::Adapters,
};

#[instrument(skip_all, fields(new_name = %args.new_name))]
pub fn execute(args: RenameArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let report = Adapters::from_config(&config)?
        .features()
        .rename(&args.project.path, &args.new_name)?;

    output.success(&format!(
        "Renamed '{}' to '{}'",
        report.old_name, report.new_name
    ))?;
    let files: Vec<String> = report.files.iter().map(|p| p.display().to_string()).collect();
    output.list("Updated", &files)?;
    output.print("Native projects under android/ and ios/ keep their old identifiers.")?;
    Ok(())
}
