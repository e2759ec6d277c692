//! Registry of constructed enumerations, keyed by type name.
//!
//! Persisting a member writes its [`MemberKey`] (type name and member name),
//! which is only allowed for members of the enumeration registered globally
//! under that type name.
//! Restoring it routes the key back through the registry and
//! [`Enumeration::resolve`], so the result is the very same canonical
//! instance that was persisted, not merely an equal copy.
//!
//! # Example
//!
//! ```
//! use enumkit::{EnumBuilder, MemberRef, Names, Result};
//!
//! # fn main() -> Result<()> {
//! let mut builder = EnumBuilder::<String>::new("DocSuit", Names);
//! builder.declare_all(["hearts", "spades"])?;
//! let suit = builder.define()?;
//!
//! let spades = suit.get_by_name("spades")?;
//! let json = serde_json::to_string(spades)?;
//! let restored: MemberRef<String> = serde_json::from_str(&json)?;
//! assert!(MemberRef::ptr_eq(spades, &restored));
//! # Ok(())
//! # }
//! ```

use crate::enumeration::Lookup;
use crate::member::{EnumId, MemberKey, MemberRef};
use crate::{EnumError, EnumValue, Enumeration, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{de, ser};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

struct Entry {
    id: EnumId,
    enumeration: Arc<dyn Any + Send + Sync>,
}

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Thread-safe map from type name to constructed enumeration.
///
/// Enumerations of different value types live side by side; the value type
/// is checked when an enumeration is fetched back out.
#[derive(Default)]
pub struct Registry {
    entries: RwLock<HashMap<String, Entry>>,
}

impl Registry {
    /// Create an empty, scope-local registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used for member persistence.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Take ownership of `enumeration` and make it reachable by type name.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEnumeration` if the type name is already taken.
    pub fn register<V: EnumValue>(&self, enumeration: Enumeration<V>) -> Result<Arc<Enumeration<V>>> {
        let mut entries = self.entries.write();
        if entries.contains_key(enumeration.type_name()) {
            return Err(EnumError::DuplicateEnumeration(
                enumeration.type_name().to_string(),
            ));
        }

        let enumeration = Arc::new(enumeration);
        let entry = Entry {
            id: enumeration.id(),
            enumeration: enumeration.clone(),
        };
        entries.insert(enumeration.type_name().to_string(), entry);
        debug!("registered enumeration {}", enumeration.type_name());
        Ok(enumeration)
    }

    /// Fetch a registered enumeration.
    ///
    /// # Errors
    ///
    /// - `UnknownEnumeration` if nothing is registered under `type_name`
    /// - `ValueTypeMismatch` if its values are not of type `V`
    pub fn get<V: EnumValue>(&self, type_name: &str) -> Result<Arc<Enumeration<V>>> {
        let entry = self
            .entries
            .read()
            .get(type_name)
            .map(|entry| Arc::clone(&entry.enumeration))
            .ok_or_else(|| EnumError::UnknownEnumeration(type_name.to_string()))?;

        entry
            .downcast::<Enumeration<V>>()
            .map_err(|_| EnumError::ValueTypeMismatch {
                enumeration: type_name.to_string(),
                expected: std::any::type_name::<V>(),
            })
    }

    /// Restore the canonical member a persisted key refers to.
    pub fn resolve_key<V: EnumValue>(&self, key: &MemberKey) -> Result<MemberRef<V>> {
        let enumeration = self.get::<V>(&key.enumeration)?;
        let member = enumeration.resolve(Some(Lookup::Name(&key.name)), None)?;
        Ok(member.clone())
    }

    /// Whether the enumeration registered under `type_name` is the one with `id`.
    pub fn holds(&self, type_name: &str, id: EnumId) -> bool {
        self.entries
            .read()
            .get(type_name)
            .map_or(false, |entry| entry.id == id)
    }

    /// Whether an enumeration is registered under `type_name`.
    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.read().contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered enumerations.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no enumeration is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Only members of an enumeration held by the global registry are written,
/// so every persisted key restores the member it was taken from.
impl<V> Serialize for MemberRef<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if !Registry::global().holds(self.type_name(), self.enumeration_id()) {
            return Err(ser::Error::custom(EnumError::NotPersistable {
                enumeration: self.type_name().to_string(),
                name: self.name().to_string(),
            }));
        }
        self.key().serialize(serializer)
    }
}

impl<'de, V: EnumValue> Deserialize<'de> for MemberRef<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let key = MemberKey::deserialize(deserializer)?;
        Registry::global().resolve_key(&key).map_err(de::Error::custom)
    }
}
