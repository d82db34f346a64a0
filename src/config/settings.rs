//! User settings for marc-audit
//!
//! Manages pipeline preferences: log verbosity, output formatting, which
//! record types are audited, and how unsupported events are treated.

use serde::{Deserialize, Serialize};

use super::paths::AuditPaths;
use crate::error::AuditError;
use crate::models::RecordType;

/// User settings for marc-audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default tracing filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pretty-print JSON written by the `diff` and `flatten` commands
    #[serde(default)]
    pub pretty_output: bool,

    /// Reject unsupported events and keep going instead of aborting
    #[serde(default = "default_skip_unsupported")]
    pub skip_unsupported_events: bool,

    /// Record types that produce audit entities; others are skipped
    #[serde(default = "default_audited_record_types")]
    pub audited_record_types: Vec<RecordType>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_skip_unsupported() -> bool {
    true
}

fn default_audited_record_types() -> Vec<RecordType> {
    vec![RecordType::MarcBib, RecordType::MarcAuthority]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            log_level: default_log_level(),
            pretty_output: false,
            skip_unsupported_events: default_skip_unsupported(),
            audited_record_types: default_audited_record_types(),
        }
    }
}

impl Settings {
    /// Whether events for this record type should be audited
    ///
    /// Events that carry no record type at all are audited.
    pub fn audits(&self, record_type: Option<&RecordType>) -> bool {
        match record_type {
            Some(rt) => self.audited_record_types.contains(rt),
            None => true,
        }
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &AuditPaths) -> Result<Self, AuditError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| AuditError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AuditError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AuditPaths) -> Result<(), AuditError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AuditError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| AuditError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.log_level, "info");
        assert!(!settings.pretty_output);
        assert!(settings.skip_unsupported_events);
        assert_eq!(
            settings.audited_record_types,
            vec![RecordType::MarcBib, RecordType::MarcAuthority]
        );
    }

    #[test]
    fn test_audits_record_types() {
        let settings = Settings::default();
        assert!(settings.audits(Some(&RecordType::MarcBib)));
        assert!(settings.audits(Some(&RecordType::MarcAuthority)));
        assert!(!settings.audits(Some(&RecordType::Other("MARC_HOLDING".into()))));
        assert!(settings.audits(None));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AuditPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.pretty_output = true;
        settings.audited_record_types = vec![RecordType::MarcAuthority];

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.pretty_output);
        assert_eq!(loaded.audited_record_types, vec![RecordType::MarcAuthority]);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AuditPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"log_level": "debug"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.log_level, "debug");
        assert!(loaded.skip_unsupported_events);
        assert_eq!(loaded.schema_version, 1);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AuditPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, AuditError::Config(_)));
    }
}
