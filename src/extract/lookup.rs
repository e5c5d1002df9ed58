use indexmap::IndexMap;

use crate::model::{PropertySet, ToValue, Value};

/// Merged property values of one element, searched by alias lists.
///
/// Keys keep their original spelling; [`find`](Self::find) compares them
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyLookup {
    values: IndexMap<String, Value>,
}

impl PropertyLookup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges property sets in order (later sets win on the same key), then
    /// lets quantity sets fill keys no property set defines.
    #[must_use]
    pub fn from_sets(property_sets: &[PropertySet], quantity_sets: &[PropertySet]) -> Self {
        let mut lookup = Self::new();
        for set in property_sets {
            for (key, value) in &set.values {
                lookup.insert(key, value.to_value());
            }
        }
        for set in quantity_sets {
            for (key, value) in &set.values {
                if !lookup.values.contains_key(key) {
                    lookup.insert(key, value.to_value());
                }
            }
        }
        lookup
    }

    /// Null values are not stored.
    pub fn insert(&mut self, key: &str, value: Value) {
        if value != Value::Null {
            self.values.insert(key.to_string(), value);
        }
    }

    /// Value of the first alias present, in alias order.
    #[must_use]
    pub fn find(&self, aliases: &[&str]) -> Option<&Value> {
        aliases.iter().find_map(|alias| self.get(alias))
    }

    /// Like [`find`](Self::find), but skips aliases whose value is empty.
    #[must_use]
    pub fn find_non_empty(&self, aliases: &[&str]) -> Option<&Value> {
        aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .find(|value| !value.is_empty())
    }

    fn get(&self, alias: &str) -> Option<&Value> {
        let alias = alias.to_lowercase();
        self.values
            .iter()
            .find(|(key, _)| key.to_lowercase() == alias)
            .map(|(_, value)| value)
    }
}

impl<K: AsRef<str>> FromIterator<(K, Value)> for PropertyLookup {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut lookup = Self::new();
        for (key, value) in iter {
            lookup.insert(key.as_ref(), value);
        }
        lookup
    }
}
