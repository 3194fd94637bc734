//! `nexora-rn config`: change project settings.
//!
//! `--theme` / `--language` set the defaults baked into the theme and
//! localization templates. `--navigation`, `--state`, `--ui` and
//! `--storage` switch structural choices through add/remove steps.
//! Without options the current settings are printed.

use std::collections::BTreeSet;

use tracing::instrument;

use nexora_core::{
    application::ConfigureRequest,
    domain::{NavigationKind, ProjectConfig, Transition},
};

use crate::{
    cli::{ConfigArgs, navigation_set},
    commands::feature::describe,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    wiring::Adapters,
};

#[instrument(skip_all, fields(root = %args.project.path.display()))]
pub fn execute(args: ConfigArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let request = request(&args);
    let features = Adapters::from_config(&config)?.features();

    if request.is_empty() {
        let project = features.status(&args.project.path)?;
        return show(&project, &output);
    }

    let spinner = output.spinner("Applying configuration...");
    let result = features.configure(&args.project.path, request);
    spinner.finish_and_clear();
    let report = result?;

    if let Some(theme) = report.theme {
        output.success(&format!("Default theme set to '{theme}'"))?;
    }
    if let Some(language) = &report.language {
        output.success(&format!("Default language set to '{language}'"))?;
    }
    for (step, change) in report.steps.iter().zip(&report.changes) {
        match step {
            Transition::Enable(feature) => output.success(&format!("Enabled '{feature}'"))?,
            Transition::Disable(feature) => output.success(&format!("Disabled '{feature}'"))?,
        }
        describe(change, &output)?;
    }
    let files: Vec<String> = report
        .files
        .updated
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    output.list("Re-rendered", &files)?;
    if report.steps.is_empty() && report.theme.is_none() && report.language.is_none() {
        output.info("Nothing to change")?;
    }
    Ok(())
}

fn request(args: &ConfigArgs) -> ConfigureRequest {
    ConfigureRequest {
        theme: args.theme.map(Into::into),
        language: args.language.clone(),
        navigation: args
            .navigation
            .as_deref()
            .map(|values| navigation_set(values).into_iter().collect::<BTreeSet<_>>()),
        state: args.state.map(Into::into),
        ui: args.ui.map(Into::into),
        storage: args.storage.map(Into::into),
        skip_install: args.skip_install,
    }
}

fn show(project: &ProjectConfig, output: &OutputManager) -> CliResult<()> {
    let navigation = if project.has_navigation() {
        let kinds: Vec<&str> = project.navigation.iter().map(NavigationKind::as_str).collect();
        kinds.join(", ")
    } else {
        "none".to_string()
    };

    output.header(&format!("{} settings", project.name))?;
    output.field("Language", project.language.as_str(), 13)?;
    output.field("Navigation", &navigation, 13)?;
    output.field("State", project.state.as_str(), 13)?;
    output.field("UI", project.ui.as_str(), 13)?;
    output.field("Storage", project.storage.as_str(), 13)?;
    output.field("Theme", project.effective_theme().as_str(), 13)?;
    output.field("Locale", project.effective_language(), 13)?;
    output.field("Created with", &project.cli_version, 13)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use nexora_core::domain::{StateManager, ThemeMode, UiFramework};

    fn config_args(extra: &[&str]) -> ConfigArgs {
        let mut argv = vec!["nexora-rn", "config"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Config(args) => args,
            _ => panic!("expected config"),
        }
    }

    #[test]
    fn no_options_is_an_empty_request() {
        assert!(request(&config_args(&[])).is_empty());
        assert!(request(&config_args(&["--skip-install"])).is_empty());
    }

    #[test]
    fn options_map_onto_the_request() {
        let req = request(&config_args(&[
            "--theme",
            "dark",
            "--state",
            "zustand",
            "--ui",
            "tailwind",
            "--navigation",
            "drawer,stack",
        ]));

        assert_eq!(req.theme, Some(ThemeMode::Dark));
        assert_eq!(req.state, Some(StateManager::Zustand));
        assert_eq!(req.ui, Some(UiFramework::Tailwind));
        let nav = req.navigation.unwrap();
        assert!(nav.contains(&NavigationKind::Drawer) && nav.contains(&NavigationKind::Stack));
    }

    #[test]
    fn navigation_none_requests_an_empty_set() {
        let req = request(&config_args(&["--navigation", "none"]));
        assert_eq!(req.navigation, Some(BTreeSet::new()));
    }
}
