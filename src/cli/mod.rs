//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod process;
pub mod record;

pub use process::{handle_process_command, ProcessArgs};
pub use record::{handle_diff_command, handle_flatten_command, DiffArgs, FlattenArgs};
