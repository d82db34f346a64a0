//! Display formatting for terminal output
//!
//! Provides utilities for formatting audit data for terminal display.

pub mod diff;

pub use diff::format_diff;
