//! Field-level diff computation
//!
//! Compares two flattened records and sorts every differing tag into
//! exactly one of `added`, `removed` or `modified`. Output order follows
//! tag order in the records, so identical inputs always give identical
//! output.

use std::collections::HashMap;

use super::flatten::FlattenedRecord;
use crate::models::{DiffResult, FieldChange, FieldValue};

/// Record-modified timestamp; it changes on every save
pub const LAST_TRANSACTION_TAG: &str = "005";

/// Compare an old and a new record state
///
/// Tags only in `new` are added, tags only in `old` are removed. A tag on
/// both sides (other than 005) whose occurrences differ is modified: when
/// the occurrence count is unchanged both full values are recorded so
/// positions still line up; when it changed, only the occurrences that
/// disappeared and appeared are recorded.
///
/// So `[A, B]` -> `[A, C]` records both full lists, not `B` -> `C`; the
/// reduced form only appears once the count changes, e.g. `[A, B]` ->
/// `[A, C, D]` records `B` -> `[C, D]`.
pub fn compute_diff(old: &FlattenedRecord, new: &FlattenedRecord) -> DiffResult {
    let added = new
        .iter()
        .filter(|(tag, _)| !old.contains(tag))
        .map(|(tag, value)| FieldChange::added(tag, value.clone()))
        .collect();

    let removed = old
        .iter()
        .filter(|(tag, _)| !new.contains(tag))
        .map(|(tag, value)| FieldChange::removed(tag, value.clone()))
        .collect();

    let modified = old
        .iter()
        .filter(|(tag, _)| *tag != LAST_TRANSACTION_TAG)
        .filter_map(|(tag, old_value)| {
            let new_value = new.get(tag)?;
            modified_change(tag, old_value, new_value)
        })
        .collect();

    DiffResult {
        added,
        removed,
        modified,
    }
}

/// Describe a whole record as created or deleted
///
/// Every tag, 005 included, lands under `added` (create) or `removed`
/// (delete); `modified` stays empty.
pub fn compute_single_sided_diff(record: &FlattenedRecord, is_create: bool) -> DiffResult {
    let changes = record.iter().map(|(tag, value)| {
        if is_create {
            FieldChange::added(tag, value.clone())
        } else {
            FieldChange::removed(tag, value.clone())
        }
    });

    if is_create {
        DiffResult {
            added: changes.collect(),
            ..Default::default()
        }
    } else {
        DiffResult {
            removed: changes.collect(),
            ..Default::default()
        }
    }
}

fn modified_change(tag: &str, old: &FieldValue, new: &FieldValue) -> Option<FieldChange> {
    let (old_list, new_list) = (old.as_slice(), new.as_slice());
    if old_list == new_list {
        return None;
    }

    if old_list.len() == new_list.len() {
        return Some(FieldChange::modified(
            tag,
            Some(old.clone()),
            Some(new.clone()),
        ));
    }

    let disappeared = FieldValue::from_vec(occurrences_missing_from(old_list, new_list));
    let appeared = FieldValue::from_vec(occurrences_missing_from(new_list, old_list));
    Some(FieldChange::modified(tag, disappeared, appeared))
}

/// Occurrences of `left` with no matching occurrence left in `right`
///
/// Each occurrence in `right` cancels at most one equal occurrence in
/// `left`. Result keeps `left`'s order.
fn occurrences_missing_from(left: &[String], right: &[String]) -> Vec<String> {
    let mut remaining: HashMap<&str, usize> = HashMap::new();
    for value in right {
        *remaining.entry(value.as_str()).or_default() += 1;
    }

    left.iter()
        .filter(|value| match remaining.get_mut(value.as_str()) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entries: &[(&str, &str)]) -> FlattenedRecord {
        let mut record = FlattenedRecord::new();
        for (tag, value) in entries {
            record.push(*tag, value.to_string());
        }
        record
    }

    fn multiple(values: &[&str]) -> FieldValue {
        FieldValue::Multiple(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_single_valued_modify() {
        let old = record(&[("245", "10$aOld Title")]);
        let new = record(&[("245", "10$aNew Title")]);

        let diff = compute_diff(&old, &new);
        assert_eq!(
            diff.modified,
            vec![FieldChange::modified(
                "245",
                Some("10$aOld Title".into()),
                Some("10$aNew Title".into())
            )]
        );
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn test_added_and_removed_tags() {
        let old = record(&[("245", "10$aT"), ("490", "0 $aSeries")]);
        let new = record(&[("245", "10$aT"), ("500", "note text")]);

        let diff = compute_diff(&old, &new);
        assert_eq!(diff.added, vec![FieldChange::added("500", "note text".into())]);
        assert_eq!(
            diff.removed,
            vec![FieldChange::removed("490", "0 $aSeries".into())]
        );
        assert!(diff.modified.is_empty());
    }

    #[test]
    fn test_identical_records_have_no_diff() {
        let old = record(&[("LDR", "00000naa"), ("650", "A"), ("650", "B")]);
        let diff = compute_diff(&old, &old.clone());
        assert!(diff.is_empty());
    }

    #[test]
    fn test_005_is_never_modified() {
        let old = record(&[("005", "20240101000000.0"), ("245", "10$aT")]);
        let new = record(&[("005", "20240301101530.0"), ("245", "10$aT")]);

        assert!(compute_diff(&old, &new).is_empty());
    }

    #[test]
    fn test_005_can_still_be_added_or_removed() {
        let old = record(&[("245", "10$aT")]);
        let new = record(&[("005", "20240301101530.0"), ("245", "10$aT")]);

        let diff = compute_diff(&old, &new);
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added[0].field, "005");
    }

    #[test]
    fn test_equal_cardinality_keeps_full_lists() {
        let old = record(&[("650", "A"), ("650", "B")]);
        let new = record(&[("650", "A"), ("650", "C")]);

        let diff = compute_diff(&old, &new);
        assert_eq!(
            diff.modified,
            vec![FieldChange::modified(
                "650",
                Some(multiple(&["A", "B"])),
                Some(multiple(&["A", "C"]))
            )]
        );
    }

    #[test]
    fn test_reordered_occurrences_are_modified() {
        let old = record(&[("650", "A"), ("650", "B")]);
        let new = record(&[("650", "B"), ("650", "A")]);

        let diff = compute_diff(&old, &new);
        assert_eq!(diff.modified.len(), 1);
        assert_eq!(diff.modified[0].old_value, Some(multiple(&["A", "B"])));
    }

    #[test]
    fn test_cardinality_change_with_overlap() {
        let old = record(&[("650", "A"), ("650", "B")]);
        let new = record(&[("650", "A"), ("650", "C"), ("650", "D")]);

        let diff = compute_diff(&old, &new);
        assert_eq!(
            diff.modified,
            vec![FieldChange::modified(
                "650",
                Some("B".into()),
                Some(multiple(&["C", "D"]))
            )]
        );
    }

    #[test]
    fn test_pure_occurrence_addition() {
        let old = record(&[("650", "A")]);
        let new = record(&[("650", "A"), ("650", "B")]);

        let diff = compute_diff(&old, &new);
        assert_eq!(
            diff.modified,
            vec![FieldChange::modified("650", None, Some("B".into()))]
        );
    }

    #[test]
    fn test_pure_occurrence_removal() {
        let old = record(&[("650", "A"), ("650", "B"), ("650", "C")]);
        let new = record(&[("650", "B")]);

        let diff = compute_diff(&old, &new);
        assert_eq!(
            diff.modified,
            vec![FieldChange::modified("650", Some(multiple(&["A", "C"])), None)]
        );
    }

    #[test]
    fn test_duplicate_occurrence_removed() {
        let old = record(&[("650", "A"), ("650", "A")]);
        let new = record(&[("650", "A")]);

        let diff = compute_diff(&old, &new);
        assert_eq!(
            diff.modified,
            vec![FieldChange::modified("650", Some("A".into()), None)]
        );
    }

    #[test]
    fn test_categories_are_exclusive() {
        let old = record(&[("001", "x"), ("245", "10$aOld"), ("650", "A"), ("650", "B")]);
        let new = record(&[("245", "10$aNew"), ("650", "B"), ("700", "1 $aP")]);

        let diff = compute_diff(&old, &new);
        let mut seen: Vec<&str> = diff
            .added
            .iter()
            .chain(&diff.removed)
            .chain(&diff.modified)
            .map(|c| c.field.as_str())
            .collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), total);
        assert_eq!(total, 4);
    }

    #[test]
    fn test_leader_change() {
        let old = record(&[("LDR", "00000naa a2200000 a 4500")]);
        let new = record(&[("LDR", "00001naa a2200000 a 4500")]);

        let diff = compute_diff(&old, &new);
        assert_eq!(diff.modified[0].field, "LDR");
        assert_eq!(
            diff.modified[0].old_value,
            Some("00000naa a2200000 a 4500".into())
        );
    }

    #[test]
    fn test_single_sided_create() {
        let rec = record(&[("001", "in1"), ("005", "20240301"), ("650", "A"), ("650", "B")]);

        let diff = compute_single_sided_diff(&rec, true);
        assert_eq!(diff.added.len(), 3);
        assert!(diff.removed.is_empty());
        assert!(diff.modified.is_empty());
        assert!(diff.added.iter().all(|c| c.old_value.is_none()));
        assert_eq!(diff.added[2].new_value, Some(multiple(&["A", "B"])));
    }

    #[test]
    fn test_single_sided_delete() {
        let rec = record(&[("001", "in1"), ("245", "10$aT")]);

        let diff = compute_single_sided_diff(&rec, false);
        assert!(diff.added.is_empty());
        assert_eq!(
            diff.removed,
            vec![
                FieldChange::removed("001", "in1".into()),
                FieldChange::removed("245", "10$aT".into())
            ]
        );
    }

    #[test]
    fn test_single_sided_empty_record() {
        assert!(compute_single_sided_diff(&FlattenedRecord::new(), true).is_empty());
    }
}
