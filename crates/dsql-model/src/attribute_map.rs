//! Insertion-ordered attribute name map.
//!
//! Items coming back from the store carry no schema, so the order in which
//! their keys appear on the wire is the only stable column order available.
//! `AttributeMap` keeps that order through deserialization and keeps the
//! statement's order when a request is built, unlike `HashMap`. A name index
//! beside the entries keeps lookups constant-time on wide items.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::attribute_value::AttributeValue;

/// A single schemaless record: attribute name to value, in insertion order.
pub type Item = AttributeMap<AttributeValue>;

/// A map from attribute name to `V` that remembers insertion order.
///
/// Re-inserting an existing name replaces its value in place, so the name
/// keeps the position of its first insertion.
#[derive(Clone, PartialEq, Eq)]
pub struct AttributeMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> AttributeMap<V> {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a value, returning the previous value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        if let Some(slot) = self.get_mut(&name) {
            return Some(std::mem::replace(slot, value));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, value));
        None
    }

    /// Look up a value by attribute name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        let &i = self.index.get(name)?;
        self.entries.get(i).map(|(_, v)| v)
    }

    /// Look up a value mutably by attribute name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        let &i = self.index.get(name)?;
        self.entries.get_mut(i).map(|(_, v)| v)
    }

    /// Whether the map holds `name`.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Attribute names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.into_iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for AttributeMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for AttributeMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for AttributeMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V> IntoIterator for AttributeMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

type BorrowedEntry<'a, V> = (&'a str, &'a V);

impl<'a, V> IntoIterator for &'a AttributeMap<V> {
    type Item = BorrowedEntry<'a, V>;
    type IntoIter =
        std::iter::Map<std::slice::Iter<'a, (String, V)>, fn(&'a (String, V)) -> Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(borrow_entry::<V> as fn(&'a (String, V)) -> Self::Item)
    }
}

fn borrow_entry<V>((k, v): &(String, V)) -> (&str, &V) {
    (k.as_str(), v)
}

impl<V: Serialize> Serialize for AttributeMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for AttributeMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AttributeMapVisitor(PhantomData))
    }
}

struct AttributeMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for AttributeMapVisitor<V> {
    type Value = AttributeMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map keyed by attribute name")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut map = AttributeMap::new();
        while let Some((k, v)) = access.next_entry::<String, V>()? {
            map.insert(k, v);
        }
        Ok(map)
    }
}
