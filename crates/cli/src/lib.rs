//! courier-put
//!
//! Command-line front end: loads the JSON configuration, applies flag
//! overrides, stands up the in-process broker and runs the producer.

pub mod app;
pub mod args;
pub mod config;

pub use app::{execute, execute_with, run};
pub use args::{ArgsError, CliArgs, print_help};
pub use config::{AppConfig, ConfigError, load_config, load_default_config};
