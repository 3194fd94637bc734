//! Application layer for Nexora.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProjectComposer, FeatureService,
//!   UpdateReconciler) and config persistence (ConfigStore)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Lock**: the per-project lock every mutating command holds
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All feature rules live in `crate::domain`.

pub mod error;
pub mod lock;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AddOptions, AddOutcome, BACKUP_DIR, CONFIG_FILE, ComposeOptions, ComposeReport, ConfigStore,
    ConfigureReport, ConfigureRequest, FeatureChange, FeatureService, ProjectComposer,
    RemoveOptions, RemoveOutcome, RenameReport, UpdateOptions, UpdateOutcome, UpdateReconciler,
    UpdateReport, VersionStatus, WriteReport,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    Filesystem, PackageInstaller, ProjectInitializer, TemplateRegistry, TemplateRenderer,
};

pub use error::ApplicationError;
pub use lock::{LOCK_FILE, ProjectLock};
