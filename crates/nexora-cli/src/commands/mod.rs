//! One module per subcommand.

pub mod completions;
pub mod config;
pub mod create;
pub mod feature;
pub mod list;
pub mod rename;
pub mod update;
