//! Duplicate-name detection

use std::collections::HashSet;

/// Names that repeat an earlier item, once per repeat occurrence, in order
pub fn find_conflicts<T, F>(items: &[T], id: F) -> Vec<String>
where
    F: Fn(&T) -> &str,
{
    let mut seen = HashSet::new();
    items
        .iter()
        .map(id)
        .filter(|name| !seen.insert(*name))
        .map(str::to_string)
        .collect()
}
