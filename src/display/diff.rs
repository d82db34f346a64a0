//! Diff display formatting
//!
//! Formats a `DiffResult` as a terminal table, one row per changed tag.

use crate::models::{DiffResult, FieldChange, FieldValue};

/// Format a diff as a table
pub fn format_diff(diff: &DiffResult) -> String {
    if diff.is_empty() {
        return "No changes.".to_string();
    }

    let rows: Vec<(&str, &FieldChange)> = diff
        .added
        .iter()
        .map(|c| ("added", c))
        .chain(diff.removed.iter().map(|c| ("removed", c)))
        .chain(diff.modified.iter().map(|c| ("modified", c)))
        .collect();

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|(kind, change)| {
            [
                kind.to_string(),
                change.field.clone(),
                display_value(change.old_value.as_ref()),
                display_value(change.new_value.as_ref()),
            ]
        })
        .collect();

    let header = ["Change", "Field", "Old", "New"];
    let mut widths = header.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_row(&mut output, &header.map(str::to_string), &widths);

    let separator = widths.map(|w| "-".repeat(w));
    push_row(&mut output, &separator, &widths);

    for row in &cells {
        push_row(&mut output, row, &widths);
    }

    output.push_str(&format!(
        "\n{} added, {} removed, {} modified\n",
        diff.added.len(),
        diff.removed.len(),
        diff.modified.len()
    ));

    output
}

fn push_row(output: &mut String, row: &[String; 4], widths: &[usize; 4]) {
    output.push_str(&format!(
        "{:<w0$}  {:<w1$}  {:<w2$}  {}\n",
        row[0],
        row[1],
        row[2],
        row[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    ));
}

/// Repeated occurrences are joined with ` | `
fn display_value(value: Option<&FieldValue>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) => v.as_slice().join(" | "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_diff() {
        assert_eq!(format_diff(&DiffResult::default()), "No changes.");
    }

    #[test]
    fn test_table_rows() {
        let diff = DiffResult {
            added: vec![FieldChange::added("500", "note text".into())],
            removed: vec![],
            modified: vec![FieldChange::modified(
                "650",
                Some("B".into()),
                Some(FieldValue::Multiple(vec!["C".into(), "D".into()])),
            )],
        };
        let output = format_diff(&diff);
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("Change"));
        assert!(lines[1].starts_with("--------"));
        assert!(lines[2].starts_with("added"));
        assert!(lines[2].contains("note text"));
        assert!(lines[2].contains(" - "));
        assert!(lines[3].starts_with("modified"));
        assert!(lines[3].ends_with("C | D"));
        assert!(output.contains("1 added, 0 removed, 1 modified"));
    }
}
