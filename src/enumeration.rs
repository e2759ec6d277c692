//! Enumeration - the immutable registry of members built by the builder.
//!
//! An [`Enumeration`] is a plain value offering containment, iteration and
//! keyed access by name or by value. It is never modified after
//! construction, so it can be shared freely between threads.
//!
//! # Example
//!
//! ```
//! use enumkit::{EnumBuilder, Names, Result};
//!
//! # fn main() -> Result<()> {
//! let mut builder = EnumBuilder::<String>::new("Colour", Names);
//! builder.declare_all(["red", "green", "blue"])?;
//! let colour = builder.build()?;
//!
//! assert_eq!(colour.len(), 3);
//! assert_eq!(colour.get_by_name("green")?.value(), "green");
//! assert_eq!(colour.to_string(), "Colour(red, green, blue)");
//! # Ok(())
//! # }
//! ```

use crate::error::describe;
use crate::member::{EnumId, MemberRef};
use crate::{EnumError, EnumValue, Result};
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// First argument of [`Enumeration::resolve`]: a name, or an existing member.
pub enum Lookup<'a, V> {
    /// Look up by member or alias name
    Name(&'a str),
    /// Re-validate a member handle
    Member(&'a MemberRef<V>),
}

impl<V> Clone for Lookup<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Lookup<'_, V> {}

impl<V> fmt::Debug for Lookup<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Name(name) => write!(f, "{:?}", name),
            Lookup::Member(member) => write!(f, "{}", member),
        }
    }
}

impl<'a, V> From<&'a str> for Lookup<'a, V> {
    fn from(name: &'a str) -> Self {
        Lookup::Name(name)
    }
}

impl<'a, V> From<&'a String> for Lookup<'a, V> {
    fn from(name: &'a String) -> Self {
        Lookup::Name(name)
    }
}

impl<'a, V> From<&'a MemberRef<V>> for Lookup<'a, V> {
    fn from(member: &'a MemberRef<V>) -> Self {
        Lookup::Member(member)
    }
}

/// Immutable, ordered collection of uniquely named, uniquely valued members.
///
/// Aliases (extra names for an existing value) are resolvable by name but
/// are not members of their own: they do not count towards [`len`] and are
/// skipped by [`iter_members`].
///
/// [`len`]: Enumeration::len
/// [`iter_members`]: Enumeration::iter_members
#[derive(Debug)]
pub struct Enumeration<V> {
    pub(crate) id: EnumId,

    pub(crate) type_name: Arc<str>,

    /// Canonical members in declaration order; index == ordinal
    pub(crate) members: Vec<MemberRef<V>>,

    /// Every declared name, aliases included, in declaration order
    pub(crate) names: Vec<String>,

    /// name -> ordinal of the canonical member
    pub(crate) by_name: HashMap<String, usize>,

    /// value -> ordinal of the first member declared with it
    pub(crate) by_value: HashMap<V, usize>,

    pub(crate) allow_aliases: bool,
}

impl<V: EnumValue> Enumeration<V> {
    /// Type name given at definition.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Unique identifier of this enumeration.
    #[inline]
    pub fn id(&self) -> EnumId {
        self.id
    }

    /// Whether duplicate values were accepted as aliases.
    #[inline]
    pub fn allow_aliases(&self) -> bool {
        self.allow_aliases
    }

    /// Number of canonical members (distinct values, not counting aliases).
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the enumeration has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `name` is a member or alias name.
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Whether some member has `value`.
    pub fn contains_value(&self, value: &V) -> bool {
        self.by_value.contains_key(value)
    }

    /// Look up a member by name, returning `None` if absent.
    pub fn get(&self, name: &str) -> Option<&MemberRef<V>> {
        self.by_name.get(name).map(|&ordinal| &self.members[ordinal])
    }

    /// Look up a member by name. Alias names yield their canonical member.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if no member or alias has this name.
    pub fn get_by_name(&self, name: &str) -> Result<&MemberRef<V>> {
        self.get(name).ok_or_else(|| EnumError::NameNotFound {
            enumeration: self.type_name.to_string(),
            name: name.to_string(),
        })
    }

    /// Look up the canonical member owning `value`.
    ///
    /// # Errors
    ///
    /// Returns `ValueNotFound` if no member has this value.
    pub fn get_by_value(&self, value: &V) -> Result<&MemberRef<V>> {
        self.by_value
            .get(value)
            .map(|&ordinal| &self.members[ordinal])
            .ok_or_else(|| EnumError::ValueNotFound {
                enumeration: self.type_name.to_string(),
                value: format!("{:?}", value),
            })
    }

    /// Reconcile a partial or full (name, value) pair to one canonical member.
    ///
    /// - A member of this enumeration is accepted as-is when `value` is
    ///   absent or equal to its value.
    /// - A value alone is looked up by value, a name alone by name.
    /// - A name and a value must both map to the same canonical member.
    ///
    /// # Errors
    ///
    /// `ValueNotFound` / `NameNotFound` for single-key lookups.
    /// `InconsistentArguments` when both are absent, when the pair does not
    /// identify one member, or when the member belongs to another
    /// enumeration.
    ///
    /// # Examples
    ///
    /// ```
    /// use enumkit::{Counter, EnumBuilder, Lookup, Result};
    ///
    /// # fn main() -> Result<()> {
    /// let mut builder = EnumBuilder::<u8>::new("Weekday", Counter::from_one());
    /// builder.declare_all(["monday", "tuesday"])?;
    /// let weekday = builder.build()?;
    ///
    /// let tuesday = weekday.resolve(Some(Lookup::Name("tuesday")), Some(&2))?;
    /// assert_eq!(weekday.resolve(None, Some(&2))?, tuesday);
    /// assert!(weekday.resolve(Some(Lookup::Name("monday")), Some(&2)).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn resolve(&self, name: Option<Lookup<'_, V>>, value: Option<&V>) -> Result<&MemberRef<V>> {
        match (name, value) {
            (Some(Lookup::Member(member)), value) => {
                if self.owns(member) && value.map_or(true, |value| value == member.value()) {
                    return Ok(&self.members[member.ordinal()]);
                }
            }
            (None, Some(value)) => return self.get_by_value(value),
            (Some(Lookup::Name(name)), None) => return self.get_by_name(name),
            (Some(Lookup::Name(name)), Some(value)) => {
                if let (Some(by_name), Some(by_value)) =
                    (self.by_name.get(name), self.by_value.get(value))
                {
                    if by_name == by_value {
                        return Ok(&self.members[*by_name]);
                    }
                }
            }
            (None, None) => {}
        }

        Err(EnumError::InconsistentArguments {
            enumeration: self.type_name.to_string(),
            name: describe(name),
            value: describe(value),
        })
    }

    /// Whether `member` is one of this enumeration's own instances.
    pub fn owns(&self, member: &MemberRef<V>) -> bool {
        self.members
            .get(member.ordinal())
            .map_or(false, |own| MemberRef::ptr_eq(own, member))
    }

    /// Canonical members in declaration order, aliases excluded.
    pub fn iter_members(&self) -> std::slice::Iter<'_, MemberRef<V>> {
        self.members.iter()
    }

    /// `(name, value)` pairs of the canonical members in declaration order.
    pub fn iter_items(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.members.iter().map(|member| (member.name(), member.value()))
    }

    /// Every declared name, aliases included, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Alias names with the canonical member each one refers to.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &MemberRef<V>)> + '_ {
        self.names
            .iter()
            .map(|name| (name.as_str(), &self.members[self.by_name[name]]))
            .filter(|(name, member)| *name != member.name())
    }
}

/// Helpers for bit-flag enumerations.
impl Enumeration<u64> {
    /// Bitwise OR of the values of the named members.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` for the first unknown name.
    pub fn combine<'a, I>(&self, names: I) -> Result<u64>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .try_fold(0u64, |acc, name| Ok(acc | *self.get_by_name(name)?.value()))
    }

    /// Split `value` into the single-bit members whose OR equals it.
    ///
    /// # Errors
    ///
    /// Returns `ValueNotFound` with the uncovered bits if some set bit of
    /// `value` has no single-bit member.
    pub fn decompose(&self, value: u64) -> Result<Vec<&MemberRef<u64>>> {
        let flags: Vec<_> = self
            .members
            .iter()
            .filter(|member| member.value().is_power_of_two() && value & member.value() != 0)
            .collect();

        let covered = flags.iter().fold(0u64, |acc, member| acc | *member.value());
        if covered != value {
            return Err(EnumError::ValueNotFound {
                enumeration: self.type_name.to_string(),
                value: format!("{:#x}", value & !covered),
            });
        }
        Ok(flags)
    }
}

impl<'a, V: EnumValue> IntoIterator for &'a Enumeration<V> {
    type Item = &'a MemberRef<V>;
    type IntoIter = std::slice::Iter<'a, MemberRef<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_members()
    }
}

impl<V: EnumValue> fmt::Display for Enumeration<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})",
            self.type_name,
            self.members.iter().map(|member| member.name()).join(", ")
        )
    }
}
