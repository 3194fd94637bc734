//! `nexora-rn update`: re-render an existing project with this version's
//! templates.

use std::io::IsTerminal;

use tracing::{info, instrument};

use nexora_core::{
    application::{UpdateOptions, UpdateOutcome, VersionStatus},
    domain::Feature,
    error::NexoraError,
};

use crate::{
    cli::{GlobalArgs, UpdateArgs},
    commands::create::confirm,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    wiring::Adapters,
};

#[instrument(skip_all, fields(root = %args.project.path.display()))]
pub fn execute(
    args: UpdateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let options = options(&args)?;
    let reconciler = Adapters::from_config(&config)?.reconciler();

    let status = reconciler.version_status(&args.project.path)?;
    if !will_run(&status, options.force) {
        output.info(&format!(
            "Project is at {}, already up to date with {} (use --force to re-render)",
            status.project_version, status.tool_version
        ))?;
        return Ok(());
    }

    if should_confirm(&args, &global) {
        let prompt = if options.backup {
            "Re-render project files? A backup is taken first."
        } else {
            "Re-render project files without a backup?"
        };
        if !confirm(prompt)? {
            return Err(CliError::Cancelled);
        }
    }

    let spinner = output.spinner("Updating project...");
    let result = reconciler.update(&args.project.path, options);
    spinner.finish_and_clear();

    let report = match result? {
        // The project changed between the check and the update.
        UpdateOutcome::UpToDate { project_version, .. } => {
            output.info(&format!("Project is already at {project_version}"))?;
            return Ok(());
        }
        UpdateOutcome::Updated(report) => report,
    };
    info!(
        from = %report.from_version,
        to = %report.to_version,
        touched = report.files.touched(),
        "Project updated"
    );

    output.success(&format!(
        "Updated {} -> {}",
        report.from_version, report.to_version
    ))?;
    if let Some(backup) = &report.backup {
        output.field("Backup", &backup.display().to_string(), 10)?;
    }
    output.field("Created", &report.files.created.len().to_string(), 10)?;
    output.field("Updated", &report.files.updated.len().to_string(), 10)?;
    output.field("Unchanged", &report.files.unchanged.len().to_string(), 10)?;
    output.list("Template sets", &report.sets)?;
    let preserved: Vec<String> = report
        .files
        .preserved
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    output.list("Kept (create-only)", &preserved)?;

    if !report.skipped.is_empty() {
        let keys: Vec<&str> = report.skipped.iter().map(|f| f.key()).collect();
        output.warning(&format!("Skipped inactive features: {}", keys.join(", ")))?;
    }
    if !report.installed {
        output.warning("Packages were not installed; run `npm install` in the project")?;
    }
    Ok(())
}

fn options(args: &UpdateArgs) -> CliResult<UpdateOptions> {
    let features = match &args.features {
        Some(keys) => Some(
            keys.iter()
                .map(|key| key.parse::<Feature>().map_err(NexoraError::from))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };

    Ok(UpdateOptions {
        features,
        force: args.force,
        backup: !args.no_backup,
        skip_install: args.skip_install,
    })
}

/// Whether `update` goes past the version gate; confirmation is only
/// asked for when it does.
fn will_run(status: &VersionStatus, force: bool) -> bool {
    force || !status.up_to_date
}

fn should_confirm(args: &UpdateArgs, global: &GlobalArgs) -> bool {
    !args.yes && !global.quiet && std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn update_args(extra: &[&str]) -> UpdateArgs {
        let mut argv = vec!["nexora-rn", "update"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Update(args) => args,
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn backup_is_on_unless_disabled() {
        assert!(options(&update_args(&[])).unwrap().backup);
        assert!(!options(&update_args(&["--no-backup"])).unwrap().backup);
    }

    #[test]
    fn feature_keys_are_parsed() {
        let opts = options(&update_args(&["--features", "redux,drawer"])).unwrap();
        assert_eq!(opts.features, Some(vec![Feature::Redux, Feature::Drawer]));
    }

    fn status(up_to_date: bool) -> VersionStatus {
        VersionStatus {
            project_version: "0.1.0".into(),
            tool_version: "0.1.0".into(),
            up_to_date,
        }
    }

    #[test]
    fn up_to_date_project_is_never_confirmed() {
        assert!(!will_run(&status(true), false));
        assert!(will_run(&status(true), true));
        assert!(will_run(&status(false), false));
    }

    #[test]
    fn unknown_feature_key_is_rejected() {
        let err = options(&update_args(&["--features", "mobx"])).unwrap_err();
        assert!(err.to_string().contains("mobx"));
    }
}
