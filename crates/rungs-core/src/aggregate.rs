//! Name-merged display aggregation.
//!
//! Statuses fetched across scopes repeat names, sometimes with different
//! casing ("Done" in one project, "done" in another). [`aggregate`] folds
//! such records into one [`StatusValue`] per case-folded name so a display
//! layer can treat them as a single bucket while keeping every concrete
//! record reachable.
//!
//! Merge precedence is first-seen-wins: the first record to introduce a name
//! fixes the bucket's casing and position, and later members only extend the
//! member list. Color is the one field that unifies: a bucket keeps a color
//! only while every member agrees on it.

use std::collections::HashMap;

use crate::model::{Status, StatusValue};

/// Merge statuses into display values, one per case-folded name, in
/// first-seen order. Total: any input sequence aggregates.
#[must_use]
pub fn aggregate(statuses: impl IntoIterator<Item = Status>) -> Vec<StatusValue> {
    let mut values: Vec<StatusValue> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for status in statuses {
        let key = status.name.to_lowercase();
        match by_name.get(&key).copied() {
            Some(position) => {
                let value = &mut values[position];
                if value.color != status.color {
                    value.color = None;
                }
                value.values.push(status);
            }
            None => {
                by_name.insert(key, values.len());
                values.push(StatusValue {
                    name: status.name.clone(),
                    color: status.color,
                    values: vec![status],
                });
            }
        }
    }

    values
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::aggregate;
    use crate::doc::Ref;
    use crate::model::{CategoryValue, Status};
    use crate::rank::Rank;

    fn status(id: &str, name: &str, color: Option<u32>) -> Status {
        Status {
            id: Ref::new(id),
            space: Ref::new("space-1"),
            modified_on: 0,
            of_attribute: Ref::new("attr-1"),
            category: None,
            name: name.to_string(),
            color,
            description: None,
            rank: Rank::middle(),
        }
    }

    #[test]
    fn merges_case_variants_under_first_seen_name() {
        let merged = aggregate([
            status("s-1", "Open", None),
            status("s-2", "Done", None),
            status("s-3", "done", None),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "Open");
        assert_eq!(merged[0].values.len(), 1);
        assert_eq!(merged[1].name, "Done");
        let members: Vec<&str> = merged[1].values.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(members, vec!["s-2", "s-3"]);
    }

    #[test]
    fn buckets_appear_in_first_seen_order() {
        let merged = aggregate([
            status("s-1", "Done", None),
            status("s-2", "Open", None),
            status("s-3", "DONE", None),
            status("s-4", "Backlog", None),
        ]);
        let names: Vec<&str> = merged.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Done", "Open", "Backlog"]);
    }

    #[test]
    fn color_survives_unanimous_agreement() {
        let merged = aggregate([
            status("s-1", "Done", Some(7)),
            status("s-2", "done", Some(7)),
        ]);
        assert_eq!(merged[0].color, Some(7));
    }

    #[test]
    fn color_clears_on_disagreement() {
        let merged = aggregate([
            status("s-1", "Done", Some(7)),
            status("s-2", "done", Some(9)),
            status("s-3", "DONE", Some(7)),
        ]);
        assert_eq!(merged[0].color, None);
        assert_eq!(merged[0].values.len(), 3);
    }

    #[test]
    fn color_clears_when_any_member_lacks_one() {
        let merged = aggregate([
            status("s-1", "Done", Some(7)),
            status("s-2", "done", None),
        ]);
        assert_eq!(merged[0].color, None);
    }

    #[test]
    fn empty_input_aggregates_to_nothing() {
        assert!(aggregate([]).is_empty());
    }

    #[test]
    fn merged_bucket_converts_to_grouping_key() {
        let merged = aggregate([status("s-1", "Open", None)]);
        let key = CategoryValue::from(merged[0].clone());
        assert!(matches!(key, CategoryValue::Merged(v) if v.name == "Open"));
    }
}
