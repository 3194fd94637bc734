//! Nexora Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for `nexora-rn`,
//! a React Native project generator that keeps a persisted feature
//! configuration and reconciles project files, entry point and packages
//! against it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           nexora-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ProjectComposer, FeatureService,      │
//! │   UpdateReconciler, ConfigStore)        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, TemplateRegistry,          │
//! │  TemplateRenderer, PackageInstaller,    │
//! │  ProjectInitializer)                    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     nexora-adapters (Infrastructure)    │
//! │ (LocalFilesystem, HandlebarsRenderer,   │
//! │  InMemoryRegistry, NpmInstaller,        │
//! │  NpxInitializer)                        │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ProjectConfig, FeatureStateMachine,    │
//! │  DependencyPlanner, EntryPoint)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nexora_core::prelude::*;
//!
//! # fn run(service: FeatureService) -> NexoraResult<()> {
//! match service.add("./MyApp".as_ref(), Feature::Drawer, AddOptions::default())? {
//!     AddOutcome::AlreadyInstalled(f) => println!("{f} already installed"),
//!     AddOutcome::Added { change, .. } => println!("{} files written", change.files.touched()),
//! }
//! # Ok(())
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AddOptions, AddOutcome, ComposeOptions, ConfigStore, ConfigureRequest, FeatureService,
        ProjectComposer, RemoveOptions, RemoveOutcome, UpdateOptions, UpdateOutcome, UpdateReconciler,
        ports::{
            Filesystem, PackageInstaller, ProjectInitializer, TemplateRegistry,
            TemplateRenderer,
        },
    };
    pub use crate::domain::{
        Feature, FeatureStateMachine, Flag, Language, NavigationKind, ProjectConfig,
        StateManager, StorageBackend, ThemeMode, UiFramework,
    };
    pub use crate::error::{NexoraError, NexoraResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
