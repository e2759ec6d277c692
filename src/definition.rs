//! Enumeration definitions as data.
//!
//! An [`EnumDefinition`] carries everything the definition entry point
//! needs: type name, value policy, alias and implicit-only flags, and the
//! ordered member declarations. It can be stored as JSON or bincode and
//! turned into an enumeration with [`EnumDefinition::build`] or
//! [`EnumDefinition::define`].
//!
//! # JSON layout
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "name": "Permission",
//!   "policy": "bits",
//!   "allow_aliases": false,
//!   "implicit_only": false,
//!   "members": [
//!     { "name": "read", "value": null },
//!     { "name": "write", "value": null },
//!     { "name": "read_write", "value": 3 }
//!   ]
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use enumkit::{EnumDefinition, Result, ValuePolicy};
//!
//! # fn main() -> Result<()> {
//! let definition = EnumDefinition::<u32>::new("Status", ValuePolicy::FromOne)
//!     .member("active")
//!     .member("suspended")
//!     .member_with_value("deleted", 99);
//!
//! let json = definition.to_json()?;
//! let status = EnumDefinition::<u32>::from_json(&json)?.build()?;
//! assert_eq!(status.get_by_name("suspended")?.value(), &2);
//! assert_eq!(status.get_by_name("deleted")?.value(), &99);
//! # Ok(())
//! # }
//! ```

use crate::assigner::{PolicyValue, ValuePolicy};
use crate::builder::{Declaration, EnumBuilder};
use crate::{EnumValue, Enumeration, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One declared member of a definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberDefinition<V> {
    /// Member (or alias) name
    pub name: String,
    /// Explicit value, or `None` to take the policy's next value
    pub value: Option<V>,
}

impl<V> From<MemberDefinition<V>> for Declaration<V> {
    fn from(member: MemberDefinition<V>) -> Self {
        match member.value {
            Some(value) => Declaration::Explicit(member.name, value),
            None => Declaration::Implicit(member.name),
        }
    }
}

/// Complete, serializable definition of an enumeration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnumDefinition<V> {
    /// Version of the crate that wrote the definition
    pub version: String,

    /// Type name of the enumeration
    pub name: String,

    /// Policy for members without explicit values
    #[serde(default)]
    pub policy: ValuePolicy,

    /// Accept duplicate values as aliases
    #[serde(default)]
    pub allow_aliases: bool,

    /// Reject explicit values
    #[serde(default)]
    pub implicit_only: bool,

    /// Members in declaration order
    #[serde(default = "Vec::new")]
    pub members: Vec<MemberDefinition<V>>,
}

impl<V> EnumDefinition<V> {
    /// Create an empty definition.
    pub fn new(name: impl Into<String>, policy: ValuePolicy) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: name.into(),
            policy,
            allow_aliases: false,
            implicit_only: false,
            members: Vec::new(),
        }
    }

    /// Set the alias policy.
    pub fn with_aliases(mut self, allow: bool) -> Self {
        self.allow_aliases = allow;
        self
    }

    /// Set implicit-only mode.
    pub fn with_implicit_only(mut self, implicit_only: bool) -> Self {
        self.implicit_only = implicit_only;
        self
    }

    /// Append a member taking its value from the policy.
    pub fn member(mut self, name: impl Into<String>) -> Self {
        self.members.push(MemberDefinition {
            name: name.into(),
            value: None,
        });
        self
    }

    /// Append a member with an explicit value.
    pub fn member_with_value(mut self, name: impl Into<String>, value: V) -> Self {
        self.members.push(MemberDefinition {
            name: name.into(),
            value: Some(value),
        });
        self
    }
}

impl<V: EnumValue + PolicyValue> EnumDefinition<V> {
    /// Prepare a builder with every declaration of this definition.
    pub fn builder(&self) -> Result<EnumBuilder<V>> {
        let mut builder = EnumBuilder::with_policy(self.name.clone(), self.policy)
            .allow_aliases(self.allow_aliases)
            .implicit_only(self.implicit_only);
        builder.declare_all(self.members.iter().cloned())?;
        Ok(builder)
    }

    /// Build the enumeration described by this definition.
    pub fn build(&self) -> Result<Enumeration<V>> {
        self.builder()?.build()
    }

    /// Build the enumeration and register it globally.
    pub fn define(&self) -> Result<Arc<Enumeration<V>>> {
        self.builder()?.define()
    }
}

impl<V> EnumDefinition<V>
where
    V: Serialize + for<'de> Deserialize<'de>,
{
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to binary (bincode).
    pub fn to_binary(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from binary (bincode).
    pub fn from_binary(data: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(data)?)
    }
}
