use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::value::{Attribute, AttributeValue};

/// Typed, named identifier for one figure property.
///
/// Keys are plain values built in `const` context; identity is the name.
/// The first use of a key records its value type in a process-wide
/// registry, and a second key reusing the name with another type panics.
pub struct AttributeKey<T: Attribute> {
    name: &'static str,
    presentation_name: &'static str,
    default: fn() -> T,
}

impl<T: Attribute> AttributeKey<T> {
    pub const fn new(
        name: &'static str,
        presentation_name: &'static str,
        default: fn() -> T,
    ) -> Self {
        Self {
            name,
            presentation_name,
            default,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Human readable name, used in undo descriptions.
    pub const fn presentation_name(&self) -> &'static str {
        self.presentation_name
    }

    pub fn default_value(&self) -> T {
        (self.default)()
    }

    pub(crate) fn decode(&self, value: &AttributeValue) -> T {
        match T::from_value(value) {
            Some(v) => v,
            None => panic!(
                "attribute '{}' holds a {} value, expected {}",
                self.name,
                value.type_name(),
                std::any::type_name::<T>()
            ),
        }
    }

    pub(crate) fn register(&self) {
        register_key::<T>(self.name, self.presentation_name);
    }
}

impl<T: Attribute> Clone for AttributeKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Attribute> Copy for AttributeKey<T> {}

impl<T: Attribute> std::fmt::Debug for AttributeKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeKey")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Registry entry for a key name.
#[derive(Debug, Clone, Copy)]
pub struct KeyInfo {
    pub name: &'static str,
    pub presentation_name: &'static str,
    pub type_name: &'static str,
    type_id: TypeId,
}

fn registry() -> &'static RwLock<HashMap<&'static str, KeyInfo>> {
    static REGISTRY: OnceLock<RwLock<HashMap<&'static str, KeyInfo>>> = OnceLock::new();
    REGISTRY.get_or_init(Default::default)
}

fn register_key<T: Attribute>(name: &'static str, presentation_name: &'static str) {
    let type_id = TypeId::of::<T>();
    if let Some(info) = registry().read().get(name) {
        check_type::<T>(info, type_id);
        return;
    }

    match registry().write().entry(name) {
        Entry::Occupied(entry) => check_type::<T>(entry.get(), type_id),
        Entry::Vacant(entry) => {
            tracing::trace!("Registered attribute key '{}'", name);
            entry.insert(KeyInfo {
                name,
                presentation_name,
                type_name: std::any::type_name::<T>(),
                type_id,
            });
        }
    }
}

fn check_type<T: Attribute>(info: &KeyInfo, type_id: TypeId) {
    if info.type_id != type_id {
        panic!(
            "attribute key '{}' registered as {} and reused as {}",
            info.name,
            info.type_name,
            std::any::type_name::<T>()
        );
    }
}

/// Looks up a registered key by name.
pub fn key_info(name: &str) -> Option<KeyInfo> {
    registry().read().get(name).copied()
}

/// All keys used so far, sorted by name.
pub fn registered_keys() -> Vec<KeyInfo> {
    let mut keys: Vec<KeyInfo> = registry().read().values().copied().collect();
    keys.sort_by_key(|info| info.name);
    keys
}
