//! Members - the named, valued constants of an enumeration.
//!
//! Members are created exactly once, by the builder, and shared through
//! [`MemberRef`] handles. Two handles are equal only if they point at the
//! same member, so a member looked up by name, by value, or restored from
//! its persisted [`MemberKey`] is the very same instance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Bound satisfied by every type usable as a member value.
///
/// Values are lookup keys, so they must be hashable and comparable. They are
/// shared between threads once the enumeration is built.
pub trait EnumValue: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> EnumValue for T where T: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// Unique identifier of a constructed enumeration.
///
/// Distinguishes two enumerations even when they share a type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumId(u32);

impl EnumId {
    /// Create a new unique EnumId.
    ///
    /// Uses an atomic counter to ensure uniqueness across the entire program.
    pub(crate) fn new() -> Self {
        use std::sync::atomic::{AtomicU32, Ordering};
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        EnumId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Persisted form of a member: the enumeration's type name and the member name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberKey {
    /// Type name the enumeration is registered under
    pub enumeration: String,
    /// Member (or alias) name
    pub name: String,
}

/// One named, valued constant.
///
/// `name` and `value` never change after construction.
#[derive(Debug)]
pub struct Member<V> {
    owner: EnumId,
    type_name: Arc<str>,
    name: String,
    value: V,
    ordinal: usize,
}

impl<V> Member<V> {
    pub(crate) fn new(
        owner: EnumId,
        type_name: Arc<str>,
        name: String,
        value: V,
        ordinal: usize,
    ) -> Self {
        Self {
            owner,
            type_name,
            name,
            value,
            ordinal,
        }
    }

    /// Member name (the first name declared with this value).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Position among the canonical members, in declaration order.
    #[inline]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Type name of the owning enumeration.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Identifier of the owning enumeration.
    #[inline]
    pub fn enumeration_id(&self) -> EnumId {
        self.owner
    }

    /// Key under which this member is persisted.
    pub fn key(&self) -> MemberKey {
        MemberKey {
            enumeration: self.type_name.to_string(),
            name: self.name.clone(),
        }
    }
}

/// Shared handle to a canonical member.
///
/// Equality is identity: two handles compare equal only when they point at
/// the same member instance.
pub struct MemberRef<V>(Arc<Member<V>>);

impl<V> MemberRef<V> {
    pub(crate) fn new(member: Member<V>) -> Self {
        MemberRef(Arc::new(member))
    }

    /// Whether both handles point at the same member instance.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl<V> Clone for MemberRef<V> {
    fn clone(&self) -> Self {
        MemberRef(Arc::clone(&self.0))
    }
}

impl<V> Deref for MemberRef<V> {
    type Target = Member<V>;

    fn deref(&self) -> &Member<V> {
        &self.0
    }
}

impl<V> PartialEq for MemberRef<V> {
    fn eq(&self, other: &Self) -> bool {
        MemberRef::ptr_eq(self, other)
    }
}

impl<V> Eq for MemberRef<V> {}

impl<V> Hash for MemberRef<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.owner.hash(state);
        self.0.ordinal.hash(state);
    }
}

impl<V: fmt::Debug> fmt::Debug for MemberRef<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(&self.0.type_name)
            .field(&self.0.name)
            .field(&self.0.value)
            .finish()
    }
}

impl<V> fmt::Display for MemberRef<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0.type_name, self.0.name)
    }
}
