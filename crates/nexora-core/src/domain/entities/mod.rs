pub mod common;
pub mod project_config;
pub mod project_structure;
pub mod template;

pub use common::*;
pub use project_config::*;
pub use project_structure::*;
pub use template::*;
