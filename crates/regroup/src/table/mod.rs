//! Per-match lookup from capture-group name to captured text.

use std::collections::HashMap;

use rustc_hash::FxHashMap;

/// Group name to captured substring for a single match.
///
/// A group that did not participate in the match maps to `""`, the same
/// as a group that matched the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupTable<'t> {
    groups: FxHashMap<&'t str, &'t str>,
}

impl<'t> GroupTable<'t> {
    /// Build a table from a match.
    ///
    /// `names` is the expression's group list and `values` the match,
    /// index-aligned; index 0 is the whole match and is skipped, as are
    /// unnamed groups. A repeated name keeps its last value.
    pub fn map<N, V>(names: N, values: V) -> Self
    where
        N: IntoIterator<Item = Option<&'t str>>,
        V: IntoIterator<Item = Option<&'t str>>,
    {
        let groups = names
            .into_iter()
            .zip(values)
            .skip(1)
            .filter_map(|(name, value)| Some((name?, value.unwrap_or_default())))
            .collect();
        GroupTable { groups }
    }

    pub fn get(&self, group: &str) -> Option<&'t str> {
        self.groups.get(group).copied()
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&'t str, &'t str)> + '_ {
        self.groups.iter().map(|(name, value)| (*name, *value))
    }

    /// Copy the table out of the borrowed pattern and input.
    pub fn into_owned(self) -> HashMap<String, String> {
        self.groups
            .into_iter()
            .map(|(name, value)| (name.to_owned(), value.to_owned()))
            .collect()
    }
}

impl<'t> FromIterator<(&'t str, &'t str)> for GroupTable<'t> {
    fn from_iter<I: IntoIterator<Item = (&'t str, &'t str)>>(iter: I) -> Self {
        GroupTable {
            groups: iter.into_iter().collect(),
        }
    }
}

impl From<GroupTable<'_>> for HashMap<String, String> {
    fn from(table: GroupTable<'_>) -> Self {
        table.into_owned()
    }
}
