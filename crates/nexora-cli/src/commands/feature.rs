//! `nexora-rn add` and `nexora-rn remove`.

use tracing::instrument;

use nexora_core::{
    application::{AddOptions, AddOutcome, FeatureChange, RemoveOptions, RemoveOutcome},
    domain::Feature,
    error::NexoraError,
};

use crate::{
    cli::FeatureArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    wiring::Adapters,
};

#[instrument(skip_all, fields(feature = %args.feature))]
pub fn add(args: FeatureArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let feature: Feature = args.feature.parse().map_err(NexoraError::from)?;
    let adapters = Adapters::from_config(&config)?;

    let spinner = output.spinner(&format!("Adding {feature}..."));
    let result = adapters.features().add(
        &args.project.path,
        feature,
        AddOptions {
            reinstall: args.reinstall,
            skip_install: args.skip_install,
        },
    );
    spinner.finish_and_clear();

    match result? {
        AddOutcome::AlreadyInstalled(feature) => {
            output.info(&format!(
                "'{feature}' is already installed (use --reinstall to apply it again)"
            ))?;
        }
        AddOutcome::Added { change, replaced } => {
            if let Some(old) = replaced {
                let name = old.feature.map(|f| f.key()).unwrap_or("previous choice");
                output.warning(&format!("Replaced '{name}'"))?;
                describe(&old, &output)?;
            }
            output.success(&format!("Added '{feature}'"))?;
            describe(&change, &output)?;
        }
    }
    Ok(())
}

#[instrument(skip_all, fields(feature = %args.feature))]
pub fn remove(args: FeatureArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let feature: Feature = args.feature.parse().map_err(NexoraError::from)?;
    let adapters = Adapters::from_config(&config)?;

    let spinner = output.spinner(&format!("Removing {feature}..."));
    let result = adapters.features().remove(
        &args.project.path,
        feature,
        RemoveOptions {
            skip_install: args.skip_install,
        },
    );
    spinner.finish_and_clear();

    match result? {
        RemoveOutcome::NotInstalled(feature) => {
            output.info(&format!("'{feature}' is not installed; nothing to remove"))?;
        }
        RemoveOutcome::Removed(change) => {
            output.success(&format!("Removed '{feature}'"))?;
            describe(&change, &output)?;
        }
    }
    Ok(())
}

/// Print what one enable/disable step did.
pub(crate) fn describe(change: &FeatureChange, output: &OutputManager) -> CliResult<()> {
    let paths = |items: &[std::path::PathBuf]| -> Vec<String> {
        items.iter().map(|p| p.display().to_string()).collect()
    };

    output.list("Created", &paths(&change.files.created))?;
    output.list("Updated", &paths(&change.files.updated))?;
    output.list("Removed files", &paths(&change.removed_files))?;
    output.list("New directories", &change.created_directories)?;
    output.list("Removed directories", &change.removed_directories)?;
    output.list("Installed", &change.installed)?;
    output.list("Uninstalled", &change.uninstalled)?;
    Ok(())
}
