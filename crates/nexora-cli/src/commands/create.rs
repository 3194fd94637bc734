//! Implementation of the `nexora-rn create` command.
//!
//! Responsibility: turn flags, prompts and configured defaults into a
//! `ProjectConfig`, call the composer, and display results. No business
//! logic lives here.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, info, instrument};

use nexora_core::{
    application::ComposeOptions,
    domain::{
        DomainError, DomainValidator, Feature, Flag, Language, NavigationKind, ProjectConfig,
        StateManager, StorageBackend, UiFramework,
    },
    error::NexoraError,
};

use crate::{
    cli::{CreateArgs, GlobalArgs, navigation_set},
    config::{AppConfig, Defaults},
    error::{CliError, CliResult},
    output::OutputManager,
    wiring::Adapters,
};

/// Execute the `nexora-rn create` command.
///
/// Dispatch sequence:
/// 1. Validate the project name
/// 2. Resolve the selection: flags over configured defaults, or prompts
///    when attached to a terminal and nothing was passed
/// 3. Compose the project (native bootstrap, files, directories, packages,
///    config)
/// 4. Print next steps
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: CreateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    DomainValidator::validate_project_name(&args.name).map_err(NexoraError::from)?;
    let root = PathBuf::from(&args.name);
    let interactive = should_prompt(&args, &global);

    let mut project = from_flags(&args, &config.defaults)?;
    if interactive {
        project = prompt_selection(project)?;
    }
    debug!(?project, "Selection resolved");

    show_selection(&project, &output)?;
    if interactive && !confirm("Create this project?")? {
        return Err(CliError::Cancelled);
    }

    let adapters = Adapters::from_config(&config)?;
    let spinner = output.spinner(progress_message(&args));
    let result = adapters.composer().compose(
        &root,
        &project,
        ComposeOptions {
            skip_install: args.skip_install,
            force: args.force,
            skip_native: args.skip_native,
        },
    );
    spinner.finish_and_clear();
    let report = result?;
    info!(files = report.files.created.len(), "Project created");

    output.success(&format!(
        "Project '{}' created in {}",
        project.name,
        report.root.display()
    ))?;
    let written = report.files.created.len() + report.files.updated.len();
    output.field("Files", &written.to_string(), 11)?;
    output.field("Directories", &report.directories.len().to_string(), 11)?;
    output.field("Packages", &report.packages.all().len().to_string(), 11)?;
    if !report.installed {
        output.warning("Packages were not installed; run `npm install` in the project")?;
    }
    if !report.native {
        output.warning("No android/ or ios/ projects were generated (--skip-native)")?;
    }

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", args.name))?;
    if !report.installed {
        output.print("  npm install")?;
    }
    if report.native {
        output.print("  npx react-native run-android   # or run-ios")?;
    } else {
        output.print("  npx @react-native-community/cli init <Name> to add native projects")?;
    }
    Ok(())
}

fn progress_message(args: &CreateArgs) -> &'static str {
    match (args.skip_native, args.skip_install) {
        (false, false) => "Generating native project, writing files and installing packages...",
        (false, true) => "Generating native project and writing files...",
        (true, false) => "Writing project files and installing packages...",
        (true, true) => "Writing project files...",
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// Flags win; anything not passed comes from the configured defaults.
fn from_flags(args: &CreateArgs, defaults: &Defaults) -> CliResult<ProjectConfig> {
    let language = match args.language {
        Some(language) => language.into(),
        None => parse_default::<Language>(&defaults.language)?,
    };
    let navigation = match &args.navigation {
        Some(values) => navigation_set(values),
        None => defaults
            .navigation
            .iter()
            .filter(|value| !value.eq_ignore_ascii_case("none"))
            .map(|value| parse_default::<NavigationKind>(value))
            .collect::<CliResult<Vec<_>>>()?,
    };
    let state = match args.state {
        Some(state) => state.into(),
        None => parse_default::<StateManager>(&defaults.state)?,
    };
    let ui = match args.ui {
        Some(ui) => ui.into(),
        None => parse_default::<UiFramework>(&defaults.ui)?,
    };
    let storage = match args.storage {
        Some(storage) => storage.into(),
        None => parse_default::<StorageBackend>(&defaults.storage)?,
    };

    Ok(ProjectConfig::new(&args.name, language)
        .with_navigation(navigation)
        .with_state(state)
        .with_ui(ui)
        .with_storage(storage)
        .with_flag(Flag::Theme, args.theme)
        .with_flag(Flag::Localization, args.localization)
        .with_flag(Flag::Firebase, args.firebase)
        .with_flag(Flag::Api, args.api)
        .with_flag(Flag::Auth, args.auth)
        .with_flag(Flag::Fonts, args.fonts)
        .with_sample_screens(args.sample_screens))
}

fn parse_default<T>(value: &str) -> CliResult<T>
where
    T: FromStr<Err = DomainError>,
{
    value.parse::<T>().map_err(|e| CliError::ConfigError {
        message: format!("invalid default: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Prompts run only on a terminal, without `--yes`, and when no selection
/// flag was passed.
fn should_prompt(args: &CreateArgs, global: &GlobalArgs) -> bool {
    cfg!(feature = "interactive")
        && !args.yes
        && !global.quiet
        && !args.has_selection()
        && std::io::stdin().is_terminal()
        && std::io::stdout().is_terminal()
}

fn show_selection(project: &ProjectConfig, out: &OutputManager) -> CliResult<()> {
    let navigation = if project.navigation.is_empty() {
        "none".to_string()
    } else {
        project
            .navigation
            .iter()
            .map(NavigationKind::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let flags: Vec<&str> = Flag::ALL
        .into_iter()
        .filter(|flag| project.flag(*flag))
        .map(|flag| Feature::from_flag(flag).key())
        .collect();

    out.header(&format!("Creating {}", project.name))?;
    out.field("Language", project.language.as_str(), 10)?;
    out.field("Navigation", &navigation, 10)?;
    out.field("State", project.state.as_str(), 10)?;
    out.field("UI", project.ui.as_str(), 10)?;
    out.field("Storage", project.storage.as_str(), 10)?;
    out.field(
        "Features",
        &if flags.is_empty() {
            "none".to_string()
        } else {
            flags.join(", ")
        },
        10,
    )?;
    if project.sample_screens {
        out.field("Screens", "samples included", 10)?;
    }
    out.print("")?;
    Ok(())
}

// ── Prompts ───────────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
fn prompt_selection(base: ProjectConfig) -> CliResult<ProjectConfig> {
    use dialoguer::{Confirm, MultiSelect, Select, theme::ColorfulTheme};

    let theme = ColorfulTheme::default();

    let languages = Language::ALL;
    let language = Select::with_theme(&theme)
        .with_prompt("Language")
        .items(&languages.map(|l| l.as_str()))
        .default(languages.iter().position(|l| *l == base.language).unwrap_or(0))
        .interact()
        .map_err(prompt_error)?;

    let kinds = NavigationKind::ALL;
    let navigation = MultiSelect::with_theme(&theme)
        .with_prompt("Navigation (space to toggle)")
        .items(&kinds.map(|k| k.as_str()))
        .defaults(&kinds.map(|k| base.navigation.contains(&k)))
        .interact()
        .map_err(prompt_error)?;

    let states = [StateManager::None, StateManager::Redux, StateManager::Zustand];
    let state = pick(&theme, "State management", &states, base.state, |s| s.as_str())?;

    let uis = [UiFramework::None, UiFramework::StyledComponents, UiFramework::Tailwind];
    let ui = pick(&theme, "UI styling", &uis, base.ui, |u| u.as_str())?;

    let storages = [StorageBackend::AsyncStorage, StorageBackend::Mmkv];
    let storage = pick(&theme, "Storage", &storages, base.storage, |s| s.as_str())?;

    let flags = Flag::ALL;
    let chosen = MultiSelect::with_theme(&theme)
        .with_prompt("Features (space to toggle)")
        .items(&flags.map(|f| Feature::from_flag(f).key()))
        .defaults(&flags.map(|f| base.flag(f)))
        .interact()
        .map_err(prompt_error)?;

    let sample_screens = Confirm::with_theme(&theme)
        .with_prompt("Include sample screens?")
        .default(base.sample_screens)
        .interact()
        .map_err(prompt_error)?;

    let mut project = ProjectConfig::new(base.name, languages[language])
        .with_navigation(navigation.into_iter().map(|i| kinds[i]))
        .with_state(state)
        .with_ui(ui)
        .with_storage(storage)
        .with_sample_screens(sample_screens);
    for index in chosen {
        project.set_flag(flags[index], true);
    }
    Ok(project)
}

#[cfg(feature = "interactive")]
fn pick<T: Copy + PartialEq>(
    theme: &dialoguer::theme::ColorfulTheme,
    prompt: &str,
    options: &[T],
    current: T,
    label: fn(&T) -> &'static str,
) -> CliResult<T> {
    let labels: Vec<&str> = options.iter().map(label).collect();
    let index = dialoguer::Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(options.iter().position(|o| *o == current).unwrap_or(0))
        .interact()
        .map_err(prompt_error)?;
    Ok(options[index])
}

#[cfg(feature = "interactive")]
pub(crate) fn confirm(prompt: &str) -> CliResult<bool> {
    dialoguer::Confirm::with_theme(&dialoguer::theme::ColorfulTheme::default())
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(prompt_error)
}

#[cfg(feature = "interactive")]
fn prompt_error(e: dialoguer::Error) -> CliError {
    CliError::Prompt {
        message: e.to_string(),
    }
}

#[cfg(not(feature = "interactive"))]
fn prompt_selection(base: ProjectConfig) -> CliResult<ProjectConfig> {
    Ok(base)
}

#[cfg(not(feature = "interactive"))]
pub(crate) fn confirm(_prompt: &str) -> CliResult<bool> {
    Ok(true)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn create_args(extra: &[&str]) -> CreateArgs {
        let mut argv = vec!["nexora-rn", "create", "Shop"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Create(args) => args,
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn defaults_fill_unset_fields() {
        let project = from_flags(&create_args(&["--api"]), &Defaults::default()).unwrap();

        assert_eq!(project.language, Language::TypeScript);
        assert!(project.navigation.contains(&NavigationKind::Stack));
        assert_eq!(project.state, StateManager::None);
        assert_eq!(project.storage, StorageBackend::AsyncStorage);
        assert!(project.api);
        assert!(!project.theme);
    }

    #[test]
    fn flags_override_defaults() {
        let defaults = Defaults {
            state: "zustand".into(),
            ..Defaults::default()
        };
        let project = from_flags(
            &create_args(&["--language", "js", "--navigation", "none", "--state", "redux"]),
            &defaults,
        )
        .unwrap();

        assert_eq!(project.language, Language::JavaScript);
        assert!(project.navigation.is_empty());
        assert_eq!(project.state, StateManager::Redux);
    }

    #[test]
    fn configured_defaults_are_parsed() {
        let defaults = Defaults {
            navigation: vec!["tabs".into(), "drawer".into()],
            ui: "tailwind".into(),
            storage: "mmkv".into(),
            ..Defaults::default()
        };
        let project = from_flags(&create_args(&[]), &defaults).unwrap();

        assert_eq!(project.navigation.len(), 2);
        assert_eq!(project.ui, UiFramework::Tailwind);
        assert_eq!(project.storage, StorageBackend::Mmkv);
    }

    #[test]
    fn bad_default_is_a_config_error() {
        let defaults = Defaults {
            state: "mobx".into(),
            ..Defaults::default()
        };
        assert!(matches!(
            from_flags(&create_args(&[]), &defaults),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn progress_message_names_the_native_step() {
        assert!(progress_message(&create_args(&[])).starts_with("Generating native"));
        assert_eq!(
            progress_message(&create_args(&["--skip-native", "--skip-install"])),
            "Writing project files..."
        );
    }

    #[test]
    fn yes_never_prompts() {
        let global = Cli::parse_from(["nexora-rn", "list"]).global;
        assert!(!should_prompt(&create_args(&["--yes"]), &global));
        assert!(!should_prompt(&create_args(&["--theme"]), &global));
    }
}
