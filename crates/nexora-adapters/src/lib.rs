//! Infrastructure adapters for Nexora.
//!
//! This crate implements the ports defined in `nexora_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod filesystem;
pub mod initializer;
pub mod installer;
pub mod renderer;
pub mod template_loader;
pub mod template_registry;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use initializer::{InitCall, NpxInitializer, RecordingInitializer};
pub use installer::{InstallCall, NpmInstaller, RecordingInstaller};
pub use renderer::HandlebarsRenderer;
pub use template_loader::FilesystemTemplateLoader;
pub use template_registry::InMemoryRegistry;
