//! Service layer for marc-audit
//!
//! The service layer drives the pure audit core over event streams,
//! applying settings and writing the resulting entities.

pub mod pipeline;
pub mod writer;

pub use pipeline::{EventOutcome, EventPipeline, PipelineSummary};
pub use writer::AuditWriter;
