//! CLI command handlers. Each command is in its own file.

mod config_path;
mod fetch;
mod links;
mod resolve;

pub use config_path::run_config_path;
pub use fetch::{exit_status, run_fetch, FetchArgs};
pub use links::run_links;
pub use resolve::run_resolve;
