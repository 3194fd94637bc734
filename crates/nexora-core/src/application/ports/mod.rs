//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `nexora-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateRegistry`: Template-set lookup per feature and language
//!   - `TemplateRenderer`: Template rendering
//!   - `PackageInstaller`: Package manager invocation
//!   - `ProjectInitializer`: Native project bootstrap
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    Filesystem, PackageInstaller, ProjectInitializer, TemplateRegistry, TemplateRenderer,
};

#[cfg(test)]
pub use output::{MockFilesystem, MockPackageInstaller, MockProjectInitializer};
