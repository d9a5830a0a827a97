//! Ordered collections of uniquely named entries.
//!
//! Loaders and plugins are both kept in a [`NamedCollection`]: an ordered list
//! of `(name, value)` pairs that can be looked up, replaced, moved to the front
//! or removed by name. Order matters because the bundler applies rules and
//! plugins in sequence.

use serde::{Deserialize, Serialize};

/// Where a new (or re-positioned) entry goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Index 0. Successive top insertions stack, so the latest one is first.
    Top,
    /// After the last entry (default)
    #[default]
    Bottom,
}

/// A name/value pair held in a [`NamedCollection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    pub name: String,
    pub value: T,
}

impl<T> Entry<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Ordered sequence of entries with unique names.
///
/// Uniqueness is maintained by [`set`](Self::set), which replaces an existing
/// entry in place. [`add`](Self::add) skips that check and is meant for
/// populating a collection whose names are already known to be distinct.
///
/// # Example
///
/// ```
/// use packrig_config::{NamedCollection, Placement};
///
/// let mut plugins = NamedCollection::new();
/// plugins.set("Manifest", 1, Placement::Bottom);
/// plugins.set("Environment", 2, Placement::Top);
/// plugins.set("Manifest", 3, Placement::Bottom);
///
/// assert_eq!(plugins.names().collect::<Vec<_>>(), ["Environment", "Manifest"]);
/// assert_eq!(plugins.get("Manifest"), Some(&3));
/// assert_eq!(plugins.index_of("Environment"), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NamedCollection<T> {
    entries: Vec<Entry<T>>,
}

impl<T> NamedCollection<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the entry called `name`, compared by exact string equality.
    ///
    /// Index 0 is a real position; a missing name is `None`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entry(name).map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        let index = self.index_of(name)?;
        Some(&mut self.entries[index].value)
    }

    pub fn entry(&self, name: &str) -> Option<&Entry<T>> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Insert or replace the entry called `name`.
    ///
    /// An existing entry keeps its position unless `placement` is
    /// [`Placement::Top`], in which case it moves to index 0 and every other
    /// entry keeps its relative order. A new entry is inserted at the front or
    /// appended, following `placement`.
    pub fn set(&mut self, name: impl Into<String>, value: T, placement: Placement) {
        let name = name.into();
        match self.index_of(&name) {
            Some(index) => {
                self.entries[index].value = value;
                if placement == Placement::Top {
                    self.entries[..=index].rotate_right(1);
                }
            }
            None => self.add(Entry { name, value }, placement),
        }
    }

    /// Insert without checking for an existing entry of the same name.
    pub fn add(&mut self, entry: Entry<T>, placement: Placement) {
        match placement {
            Placement::Top => self.entries.insert(0, entry),
            Placement::Bottom => self.entries.push(entry),
        }
    }

    /// Remove and return the entry called `name`, if present.
    pub fn remove(&mut self, name: &str) -> Option<Entry<T>> {
        let index = self.index_of(name)?;
        Some(self.entries.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry<T>> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|entry| &entry.value)
    }

    pub fn into_values(self) -> Vec<T> {
        self.entries.into_iter().map(|entry| entry.value).collect()
    }
}

impl<T> Default for NamedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects through [`NamedCollection::set`], so a repeated name keeps its
/// first position and its last value.
impl<N: Into<String>, T> FromIterator<(N, T)> for NamedCollection<T> {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl<N: Into<String>, T> Extend<(N, T)> for NamedCollection<T> {
    fn extend<I: IntoIterator<Item = (N, T)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value, Placement::Bottom);
        }
    }
}

impl<T> IntoIterator for NamedCollection<T> {
    type Item = Entry<T>;
    type IntoIter = std::vec::IntoIter<Entry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NamedCollection<T> {
    type Item = &'a Entry<T>;
    type IntoIter = std::slice::Iter<'a, Entry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> NamedCollection<i32> {
        [("a", 1), ("b", 2), ("c", 3)].into_iter().collect()
    }

    fn names(collection: &NamedCollection<i32>) -> Vec<&str> {
        collection.names().collect()
    }

    #[test]
    fn index_of_reports_first_position_as_present() {
        let collection = abc();
        assert_eq!(collection.index_of("a"), Some(0));
        assert_eq!(collection.index_of("c"), Some(2));
        assert_eq!(collection.index_of("missing"), None);
    }

    #[test]
    fn set_replaces_entry_at_index_zero_in_place() {
        let mut collection = abc();
        collection.set("a", 10, Placement::Bottom);

        assert_eq!(collection.len(), 3);
        assert_eq!(names(&collection), ["a", "b", "c"]);
        assert_eq!(collection.get("a"), Some(&10));
    }

    #[test]
    fn set_top_moves_existing_entry_to_front() {
        let mut collection = abc();
        collection.set("c", 30, Placement::Top);

        assert_eq!(names(&collection), ["c", "a", "b"]);
        assert_eq!(collection.get("c"), Some(&30));
    }

    #[test]
    fn set_appends_or_prepends_new_entries() {
        let mut collection = abc();
        collection.set("d", 4, Placement::Bottom);
        collection.set("z", 0, Placement::Top);

        assert_eq!(names(&collection), ["z", "a", "b", "c", "d"]);
    }

    #[test]
    fn repeated_top_inserts_put_latest_first() {
        let mut collection = NamedCollection::new();
        collection.set("first", 1, Placement::Top);
        collection.set("second", 2, Placement::Top);
        collection.set("third", 3, Placement::Top);

        assert_eq!(names(&collection), ["third", "second", "first"]);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut collection = abc();
        collection.set("A", 100, Placement::Bottom);

        assert_eq!(collection.len(), 4);
        assert_eq!(collection.get("a"), Some(&1));
        assert_eq!(collection.get("A"), Some(&100));
    }

    #[test]
    fn remove_returns_the_entry_and_missing_names_are_noops() {
        let mut collection = abc();

        let removed = collection.remove("a").unwrap();
        assert_eq!(removed, Entry::new("a", 1));
        assert_eq!(collection.get("a"), None);

        assert!(collection.remove("a").is_none());
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn add_skips_uniqueness_check() {
        let mut collection = abc();
        collection.add(Entry::new("a", 5), Placement::Bottom);

        assert_eq!(collection.len(), 4);
        // Lookups resolve to the first match
        assert_eq!(collection.get("a"), Some(&1));
    }

    #[test]
    fn get_mut_edits_value() {
        let mut collection = abc();
        *collection.get_mut("b").unwrap() += 40;
        assert_eq!(collection.get("b"), Some(&42));
        assert!(collection.get_mut("missing").is_none());
    }

    #[test]
    fn serializes_as_ordered_entries() {
        let value = serde_json::to_value(abc()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"name": "a", "value": 1},
                {"name": "b", "value": 2},
                {"name": "c", "value": 3}
            ])
        );
    }
}
