//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use nexora_core::domain::{
    Language as CoreLanguage, NavigationKind as CoreNavigation, StateManager as CoreState,
    StorageBackend as CoreStorage, ThemeMode as CoreTheme, UiFramework as CoreUi,
};

pub mod global;
pub use global::{GlobalArgs, LogFormat, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "nexora-rn",
    bin_name = "nexora-rn",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "React Native project generator with feature management",
    long_about = "nexora-rn creates React Native projects from a feature selection \
                  and keeps them in sync: features can be added, removed and \
                  reconfigured later, and `update` brings generated files up to \
                  the installed templates.",
    after_help = "EXAMPLES:\n\
        \x20 nexora-rn create Shop --navigation stack,tabs --state redux --theme\n\
        \x20 nexora-rn add drawer\n\
        \x20 nexora-rn remove redux --path ./Shop\n\
        \x20 nexora-rn update --no-backup",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new React Native project.
    #[command(
        visible_alias = "new",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 nexora-rn create Shop\n\
            \x20 nexora-rn create Shop --language js --navigation drawer --api --yes\n\
            \x20 nexora-rn create Shop --state zustand --storage mmkv --skip-install"
    )]
    Create(CreateArgs),

    /// Enable a feature in an existing project.
    #[command(
        about = "Add a feature",
        after_help = "EXAMPLES:\n\
            \x20 nexora-rn add drawer\n\
            \x20 nexora-rn add zustand   # replaces redux if present\n\
            \x20 nexora-rn add theme --path ./Shop"
    )]
    Add(FeatureArgs),

    /// Disable a feature and clean up what it owned.
    #[command(
        visible_alias = "rm",
        about = "Remove a feature",
        after_help = "EXAMPLES:\n\
            \x20 nexora-rn remove redux\n\
            \x20 nexora-rn rm firebase --skip-install"
    )]
    Remove(FeatureArgs),

    /// Rename the app.
    #[command(about = "Rename the project")]
    Rename(RenameArgs),

    /// Change project settings and structural choices.
    #[command(
        about = "Configure an existing project",
        after_help = "EXAMPLES:\n\
            \x20 nexora-rn config --theme dark\n\
            \x20 nexora-rn config --language fr\n\
            \x20 nexora-rn config --state zustand --ui tailwind\n\
            \x20 nexora-rn config --navigation stack,drawer"
    )]
    Config(ConfigArgs),

    /// Re-render generated files with this version's templates.
    #[command(
        about = "Update project templates",
        after_help = "EXAMPLES:\n\
            \x20 nexora-rn update\n\
            \x20 nexora-rn update --features theme,api\n\
            \x20 nexora-rn update --force --yes --no-backup"
    )]
    Update(UpdateArgs),

    /// Show features and which ones a project has.
    #[command(
        visible_alias = "status",
        about = "List features",
        after_help = "EXAMPLES:\n\
            \x20 nexora-rn list\n\
            \x20 nexora-rn status --path ./Shop --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 nexora-rn completions bash > ~/.local/share/bash-completion/completions/nexora-rn\n\
            \x20 nexora-rn completions zsh  > ~/.zfunc/_nexora-rn\n\
            \x20 nexora-rn completions fish > ~/.config/fish/completions/nexora-rn.fish"
    )]
    Completions(CompletionsArgs),
}

// ── shared ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Args)]
pub struct ProjectArg {
    /// Project root to operate on.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Project directory"
    )]
    pub path: PathBuf,
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `nexora-rn create`.
///
/// Selections left out are prompted for on a terminal, or taken from the
/// tool configuration defaults otherwise.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Project name; the project is created in `./<NAME>`.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    #[arg(short = 'l', long = "language", value_enum, help = "Source language")]
    pub language: Option<Language>,

    /// Comma separated; `none` for no navigation.
    #[arg(
        long = "navigation",
        value_enum,
        value_delimiter = ',',
        help = "Navigation kinds (stack, tabs, drawer, none)"
    )]
    pub navigation: Option<Vec<Navigation>>,

    #[arg(long = "state", value_enum, help = "State management")]
    pub state: Option<State>,

    #[arg(long = "ui", value_enum, help = "UI styling library")]
    pub ui: Option<Ui>,

    #[arg(long = "storage", value_enum, help = "Storage backend")]
    pub storage: Option<Storage>,

    #[arg(long = "theme", help = "Theme provider with light/dark modes")]
    pub theme: bool,

    #[arg(long = "localization", help = "i18n setup with translations")]
    pub localization: bool,

    #[arg(long = "firebase", help = "Firebase app and services")]
    pub firebase: bool,

    #[arg(long = "api", help = "Axios API client")]
    pub api: bool,

    #[arg(long = "auth", help = "Login screen and auth hook")]
    pub auth: bool,

    #[arg(long = "fonts", help = "Custom fonts directory")]
    pub fonts: bool,

    #[arg(long = "sample-screens", help = "Home and settings sample screens")]
    pub sample_screens: bool,

    /// Skip every prompt and use flags plus configured defaults.
    #[arg(
        short = 'y',
        long = "yes",
        visible_alias = "skip-prompts",
        help = "Skip prompts and create immediately"
    )]
    pub yes: bool,

    #[arg(long = "skip-install", help = "Do not install npm packages")]
    pub skip_install: bool,

    /// Write the templates without generating the android/ and ios/ projects.
    #[arg(long = "skip-native", help = "Skip the React Native CLI bootstrap")]
    pub skip_native: bool,

    /// Overwrite an existing directory (destructive).
    #[arg(long = "force", help = "Replace an existing directory")]
    pub force: bool,
}

impl CreateArgs {
    /// Whether any feature selection was made through flags.
    pub fn has_selection(&self) -> bool {
        self.language.is_some()
            || self.navigation.is_some()
            || self.state.is_some()
            || self.ui.is_some()
            || self.storage.is_some()
            || self.theme
            || self.localization
            || self.firebase
            || self.api
            || self.auth
            || self.fonts
            || self.sample_screens
    }
}

// ── add / remove ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FeatureArgs {
    /// Feature key, e.g. `drawer`, `redux`, `theme`.
    #[arg(value_name = "FEATURE", help = "Feature key")]
    pub feature: String,

    #[command(flatten)]
    pub project: ProjectArg,

    /// `add` only: re-render an active feature.
    #[arg(long = "reinstall", help = "Re-apply a feature that is already active")]
    pub reinstall: bool,

    #[arg(long = "skip-install", help = "Do not run the package manager")]
    pub skip_install: bool,
}

// ── rename ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RenameArgs {
    #[arg(value_name = "NEW_NAME", help = "New project name")]
    pub new_name: String,

    #[command(flatten)]
    pub project: ProjectArg,
}

// ── config ────────────────────────────────────────────────────────────────────

/// Arguments for `nexora-rn config`. Without options it prints the settings.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub project: ProjectArg,

    #[arg(long = "theme", value_enum, help = "Default theme mode")]
    pub theme: Option<Theme>,

    #[arg(long = "language", value_name = "LOCALE", help = "Default locale, e.g. en or pt-BR")]
    pub language: Option<String>,

    #[arg(
        long = "navigation",
        value_enum,
        value_delimiter = ',',
        help = "Replace the navigation kinds"
    )]
    pub navigation: Option<Vec<Navigation>>,

    #[arg(long = "state", value_enum, help = "Switch state management")]
    pub state: Option<State>,

    #[arg(long = "ui", value_enum, help = "Switch UI styling library")]
    pub ui: Option<Ui>,

    #[arg(long = "storage", value_enum, help = "Switch storage backend")]
    pub storage: Option<Storage>,

    #[arg(long = "skip-install", help = "Do not run the package manager")]
    pub skip_install: bool,
}

// ── update ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub project: ProjectArg,

    /// Only re-render these features (comma separated keys).
    #[arg(
        long = "features",
        value_delimiter = ',',
        value_name = "FEATURE",
        help = "Limit the update to these features"
    )]
    pub features: Option<Vec<String>>,

    #[arg(long = "force", help = "Update even when already at this version")]
    pub force: bool,

    #[arg(short = 'y', long = "yes", help = "Do not ask for confirmation")]
    pub yes: bool,

    #[arg(long = "no-backup", help = "Skip the project backup")]
    pub no_backup: bool,

    #[arg(long = "skip-install", help = "Do not run the package manager")]
    pub skip_install: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub project: ProjectArg,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One `key<TAB>status` line per feature.
    Plain,
    /// JSON document.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    #[value(alias = "ts")]
    Typescript,
    #[value(alias = "js")]
    Javascript,
}

impl From<Language> for CoreLanguage {
    fn from(value: Language) -> Self {
        match value {
            Language::Typescript => Self::TypeScript,
            Language::Javascript => Self::JavaScript,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Navigation {
    Stack,
    #[value(alias = "tab")]
    Tabs,
    Drawer,
    None,
}

/// Collapse a navigation selection into the set it describes.
///
/// `none` anywhere in the list wins over the other entries.
pub fn navigation_set(values: &[Navigation]) -> Vec<CoreNavigation> {
    if values.contains(&Navigation::None) {
        return Vec::new();
    }
    values
        .iter()
        .filter_map(|v| match v {
            Navigation::Stack => Some(CoreNavigation::Stack),
            Navigation::Tabs => Some(CoreNavigation::Tabs),
            Navigation::Drawer => Some(CoreNavigation::Drawer),
            Navigation::None => None,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum State {
    Redux,
    Zustand,
    None,
}

impl From<State> for CoreState {
    fn from(value: State) -> Self {
        match value {
            State::Redux => Self::Redux,
            State::Zustand => Self::Zustand,
            State::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Ui {
    StyledComponents,
    Tailwind,
    None,
}

impl From<Ui> for CoreUi {
    fn from(value: Ui) -> Self {
        match value {
            Ui::StyledComponents => Self::StyledComponents,
            Ui::Tailwind => Self::Tailwind,
            Ui::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Storage {
    AsyncStorage,
    Mmkv,
}

impl From<Storage> for CoreStorage {
    fn from(value: Storage) -> Self {
        match value {
            Storage::AsyncStorage => Self::AsyncStorage,
            Storage::Mmkv => Self::Mmkv,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl From<Theme> for CoreTheme {
    fn from(value: Theme) -> Self {
        match value {
            Theme::Light => Self::Light,
            Theme::Dark => Self::Dark,
            Theme::System => Self::System,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
