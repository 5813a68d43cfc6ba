use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::key::AttributeKey;
use super::value::{Attribute, AttributeValue};

/// Old and new value of one attribute entry; `None` means absent.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeChange {
    pub name: String,
    pub old: Option<AttributeValue>,
    pub new: Option<AttributeValue>,
}

impl AttributeChange {
    pub fn is_noop(&self) -> bool {
        self.old == self.new
    }
}

/// Opaque snapshot of a whole [`AttributeStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRestoreData(AttributeStore);

impl AttributeRestoreData {
    /// Whether the snapshot holds an entry for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

/// Heterogeneous attribute map owned by one figure.
///
/// Reading an absent key yields the key's default. The store itself sends
/// no notifications; the drawing wraps every mutation and reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeStore {
    values: BTreeMap<String, AttributeValue>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: Attribute>(&self, key: &AttributeKey<T>) -> T {
        match self.values.get(key.name()) {
            Some(value) => key.decode(value),
            None => key.default_value(),
        }
    }

    pub fn get_value(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn set<T: Attribute>(&mut self, key: &AttributeKey<T>, value: T) -> AttributeChange {
        key.register();
        self.set_value(key.name(), Some(value.into_value()))
    }

    pub fn remove<T: Attribute>(&mut self, key: &AttributeKey<T>) -> AttributeChange {
        self.set_value(key.name(), None)
    }

    /// Untyped write used when replaying recorded changes.
    pub(crate) fn set_value(
        &mut self,
        name: &str,
        value: Option<AttributeValue>,
    ) -> AttributeChange {
        let old = match &value {
            Some(v) => self.values.insert(name.to_string(), v.clone()),
            None => self.values.remove(name),
        };
        AttributeChange {
            name: name.to_string(),
            old,
            new: value,
        }
    }

    pub fn restore_data(&self) -> AttributeRestoreData {
        AttributeRestoreData(self.clone())
    }

    /// Replaces the whole map, returning the previous contents.
    pub fn restore_from(&mut self, data: &AttributeRestoreData) -> AttributeRestoreData {
        AttributeRestoreData(std::mem::replace(self, data.0.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
