//! marc-audit - Field-level audit trails for MARC record changes
//!
//! This library turns source-record change events for MARC bibliographic and
//! authority records into audit entities describing exactly which fields
//! were added, removed or modified, by whom, and when.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Event, record and diff data models
//! - `marc`: Record flattening and diff computation (the pure core)
//! - `audit`: Event classification and audit entity mapping
//! - `services`: Event stream pipeline and JSONL output
//! - `display`: Terminal formatting of diffs
//! - `cli`: Command handlers for the `marc-audit` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use marc_audit::marc::{compute_diff, flatten_content};
//!
//! let old = flatten_content(Some(&old_content));
//! let new = flatten_content(Some(&new_content));
//! let diff = compute_diff(&old, &new);
//! println!("{}", serde_json::to_string(&diff)?);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod marc;
pub mod models;
pub mod services;

pub use error::{AuditError, AuditResult};
