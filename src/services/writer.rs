//! JSONL writer for audit entities
//!
//! Each entity is written as a single compact JSON line. The output is the
//! hand-off to whatever persists the entities.

use std::io::Write;

use crate::audit::AuditEntity;
use crate::error::{AuditError, AuditResult};

/// Writes audit entities as line-delimited JSON
pub struct AuditWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> AuditWriter<W> {
    /// Create a writer over any byte sink
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Write one entity as a JSON line
    pub fn write(&mut self, entity: &AuditEntity) -> AuditResult<()> {
        let json = serde_json::to_string(entity)
            .map_err(|e| AuditError::Json(format!("Failed to serialize audit entity: {}", e)))?;

        writeln!(self.out, "{}", json)
            .map_err(|e| AuditError::Io(format!("Failed to write audit entity: {}", e)))?;

        self.written += 1;
        Ok(())
    }

    /// Number of entities written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying sink
    pub fn finish(mut self) -> AuditResult<W> {
        self.out
            .flush()
            .map_err(|e| AuditError::Io(format!("Failed to flush audit output: {}", e)))?;
        Ok(self.out)
    }
}
