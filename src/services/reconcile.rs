// src/services/reconcile.rs
//
// Set-difference planning for nested project collections. Rows are matched
// by their natural key (block name, floor label, object name).

use std::collections::HashSet;

/// What to do with an existing collection to make it equal `desired`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Ids of existing rows whose key is no longer wanted.
    pub delete: Vec<i32>,
    /// Existing rows that stay untouched, as `(id, key)`.
    pub keep: Vec<(i32, String)>,
    /// Keys to insert, in payload order.
    pub insert: Vec<String>,
}

pub fn plan_sync<'a, I>(existing: I, desired: &[String]) -> SyncPlan
where
    I: IntoIterator<Item = (i32, &'a str)>,
{
    let wanted: HashSet<&str> = desired.iter().map(String::as_str).collect();
    let mut plan = SyncPlan::default();
    let mut present = HashSet::new();

    for (id, key) in existing {
        // A second row with the same key is a duplicate and gets dropped.
        if wanted.contains(key) && present.insert(key.to_string()) {
            plan.keep.push((id, key.to_string()));
        } else {
            plan.delete.push(id);
        }
    }

    plan.insert = desired
        .iter()
        .filter(|key| !present.contains(key.as_str()))
        .cloned()
        .collect();

    plan
}

impl SyncPlan {
    pub fn is_noop(&self) -> bool {
        self.delete.is_empty() && self.insert.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn removes_missing_inserts_new_and_keeps_the_rest() {
        let existing = [(1, "B1"), (2, "B2"), (3, "B3")];
        let plan = plan_sync(existing, &keys(&["B3", "B1", "B4"]));

        assert_eq!(plan.delete, vec![2]);
        assert_eq!(plan.keep, vec![(1, "B1".to_string()), (3, "B3".to_string())]);
        assert_eq!(plan.insert, keys(&["B4"]));
    }

    #[test]
    fn empty_desired_set_deletes_everything() {
        let plan = plan_sync([(1, "Lobby"), (2, "Apartments")], &[]);
        assert_eq!(plan.delete, vec![1, 2]);
        assert!(plan.keep.is_empty());
        assert!(plan.insert.is_empty());
    }

    #[test]
    fn empty_existing_set_inserts_everything_in_order() {
        let plan = plan_sync(std::iter::empty(), &keys(&["2", "1"]));
        assert_eq!(plan.insert, keys(&["2", "1"]));
        assert!(plan.delete.is_empty());
    }

    #[test]
    fn identical_sets_are_a_noop() {
        let plan = plan_sync([(1, "1"), (2, "2")], &keys(&["2", "1"]));
        assert!(plan.is_noop());
        assert_eq!(plan.keep.len(), 2);
    }

    #[test]
    fn duplicate_existing_keys_are_collapsed() {
        let plan = plan_sync([(1, "1"), (2, "1")], &keys(&["1"]));
        assert_eq!(plan.keep, vec![(1, "1".to_string())]);
        assert_eq!(plan.delete, vec![2]);
        assert!(plan.insert.is_empty());
    }

    #[test]
    fn final_keys_equal_desired_keys() {
        let existing = [(1, "a"), (2, "b"), (3, "c")];
        let desired = keys(&["c", "d", "e"]);
        let plan = plan_sync(existing, &desired);

        let mut result: Vec<String> = plan.keep.iter().map(|(_, k)| k.clone()).collect();
        result.extend(plan.insert.iter().cloned());
        result.sort();
        let mut expected = desired.clone();
        expected.sort();
        assert_eq!(result, expected);
    }
}
