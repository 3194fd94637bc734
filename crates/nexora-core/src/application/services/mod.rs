//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level commands: compose a project, add/remove/rename/configure
//! features, and reconcile templates on update.

pub mod composer;
pub mod config_store;
pub mod feature_service;
pub mod reconciler;

mod package_sync;
mod template_writer;

pub use composer::{ComposeOptions, ComposeReport, ProjectComposer};
pub use config_store::{CONFIG_FILE, ConfigStore, UNVERSIONED};
pub use feature_service::{
    AddOptions, AddOutcome, ConfigureReport, ConfigureRequest, FeatureChange, FeatureService,
    RemoveOptions, RemoveOutcome, RenameReport,
};
pub use reconciler::{
    BACKUP_DIR, BACKUP_EXCLUDES, UpdateOptions, UpdateOutcome, UpdateReconciler, UpdateReport,
    VersionStatus,
    backup_stamp, parse_version,
};
pub use template_writer::WriteReport;
