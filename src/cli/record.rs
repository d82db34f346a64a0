//! Record inspection CLI commands
//!
//! `diff` compares two record files; `flatten` shows how one record is
//! flattened. A record file may hold the MARC-in-JSON content itself, a
//! `{"content": ...}` wrapper, or a whole source record with
//! `parsedRecord.content`.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::config::Settings;
use crate::display::format_diff;
use crate::error::{AuditError, AuditResult};
use crate::marc::{compute_diff, flatten_content};

/// Arguments for `diff`
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Record file holding the previous state
    pub old: PathBuf,

    /// Record file holding the new state
    pub new: PathBuf,

    /// Print the diff as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `flatten`
#[derive(Args, Debug)]
pub struct FlattenArgs {
    /// Record file
    pub file: PathBuf,
}

/// Handle the diff command
pub fn handle_diff_command(settings: &Settings, args: DiffArgs) -> AuditResult<()> {
    let old = flatten_content(Some(&read_record_content(&args.old)?));
    let new = flatten_content(Some(&read_record_content(&args.new)?));
    let diff = compute_diff(&old, &new);

    if args.json {
        println!("{}", to_json(&diff, settings.pretty_output)?);
    } else {
        println!("{}", format_diff(&diff));
    }
    Ok(())
}

/// Handle the flatten command
pub fn handle_flatten_command(settings: &Settings, args: FlattenArgs) -> AuditResult<()> {
    let record = flatten_content(Some(&read_record_content(&args.file)?));
    println!("{}", to_json(&record, settings.pretty_output)?);
    Ok(())
}

/// Read a record file and pull out the record content
pub fn read_record_content(path: &Path) -> AuditResult<Value> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AuditError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let value: Value = serde_json::from_str(&text)
        .map_err(|e| AuditError::Json(format!("Failed to parse {}: {}", path.display(), e)))?;

    Ok(extract_content(value))
}

fn extract_content(mut value: Value) -> Value {
    if let Some(content) = value.pointer_mut("/parsedRecord/content") {
        return content.take();
    }
    if let Some(content) = value.get_mut("content") {
        return content.take();
    }
    value
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> AuditResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_extract_content_variants() {
        let content = json!({ "leader": "l", "fields": [] });

        assert_eq!(extract_content(content.clone()), content);
        assert_eq!(extract_content(json!({ "content": content.clone() })), content);
        assert_eq!(
            extract_content(json!({ "id": "r", "parsedRecord": { "content": content.clone() } })),
            content
        );
    }

    #[test]
    fn test_read_record_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("record.json");
        std::fs::write(&path, r#"{"content": "{\"leader\":\"l\"}"}"#).unwrap();

        let content = read_record_content(&path).unwrap();
        assert_eq!(content, json!("{\"leader\":\"l\"}"));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_record_content(Path::new("/nonexistent/record.json")).unwrap_err();
        assert!(matches!(err, AuditError::Io(_)));
    }
}
