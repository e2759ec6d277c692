//! Builder - constructs enumerations from ordered declaration lists.
//!
//! This is the definition entry point of the crate. A declaration either
//! names a member and takes the next implicit value from the assigner, or
//! supplies an explicit value which bypasses the assigner without advancing
//! or resetting it.
//!
//! Construction is fail-fast: the first conflicting declaration aborts the
//! build and no partially built enumeration is ever returned.
//!
//! # Lifecycle
//!
//! 1. Create a builder: `EnumBuilder::new("Colour", Names)`
//! 2. Declare members: `builder.declare("red")?`, `builder.declare(("crimson", value))?`
//! 3. Build: `builder.build()?` (or `builder.define()?` to also register it)
//!
//! # Example
//!
//! ```
//! use enumkit::{Bits, EnumBuilder, Result};
//!
//! # fn main() -> Result<()> {
//! let mut builder = EnumBuilder::<u64>::new("Permission", Bits::new());
//! builder.declare_all(["read", "write", "execute"])?;
//! builder.declare(("read_write", 1 | 2))?;
//! let permission = builder.build()?;
//!
//! assert_eq!(permission.get_by_name("execute")?.value(), &4);
//! assert_eq!(permission.get_by_name("read_write")?.value(), &3);
//! # Ok(())
//! # }
//! ```

use crate::assigner::{PolicyValue, ValueAssigner, ValuePolicy};
use crate::member::{EnumId, Member, MemberRef};
use crate::registry::Registry;
use crate::{EnumError, EnumValue, Enumeration, Result};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// One entry of a declaration list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration<V> {
    /// Take the next value from the assigner
    Implicit(String),
    /// Use this value, bypassing the assigner
    Explicit(String, V),
}

impl<V> Declaration<V> {
    /// Declaration taking its value from the assigner.
    pub fn implicit(name: impl Into<String>) -> Self {
        Declaration::Implicit(name.into())
    }

    /// Declaration with a caller-supplied value.
    pub fn explicit(name: impl Into<String>, value: V) -> Self {
        Declaration::Explicit(name.into(), value)
    }

    /// Declared name.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Implicit(name) | Declaration::Explicit(name, _) => name,
        }
    }

    /// Explicit value, if any.
    pub fn value(&self) -> Option<&V> {
        match self {
            Declaration::Implicit(_) => None,
            Declaration::Explicit(_, value) => Some(value),
        }
    }
}

impl<V> From<&str> for Declaration<V> {
    fn from(name: &str) -> Self {
        Declaration::Implicit(name.to_string())
    }
}

impl<V> From<String> for Declaration<V> {
    fn from(name: String) -> Self {
        Declaration::Implicit(name)
    }
}

impl<V> From<(&str, V)> for Declaration<V> {
    fn from((name, value): (&str, V)) -> Self {
        Declaration::Explicit(name.to_string(), value)
    }
}

impl<V> From<(String, V)> for Declaration<V> {
    fn from((name, value): (String, V)) -> Self {
        Declaration::Explicit(name, value)
    }
}

/// Enumeration under construction. Never escapes this module.
struct Staging<V> {
    enumeration: Enumeration<V>,
}

impl<V: EnumValue> Staging<V> {
    fn new(type_name: &str, allow_aliases: bool) -> Self {
        Self {
            enumeration: Enumeration {
                id: EnumId::new(),
                type_name: Arc::from(type_name),
                members: Vec::new(),
                names: Vec::new(),
                by_name: HashMap::new(),
                by_value: HashMap::new(),
                allow_aliases,
            },
        }
    }

    fn insert(
        &mut self,
        declaration: Declaration<V>,
        assigner: &mut dyn ValueAssigner<V>,
    ) -> Result<()> {
        let e = &mut self.enumeration;

        if e.by_name.contains_key(declaration.name()) {
            return Err(EnumError::ReassignmentRejected {
                enumeration: e.type_name.to_string(),
                name: declaration.name().to_string(),
            });
        }

        let (name, value) = match declaration {
            Declaration::Implicit(name) => {
                let value = assigner.next_value(&name)?;
                (name, value)
            }
            Declaration::Explicit(name, value) => (name, value),
        };

        let ordinal = match e.by_value.get(&value) {
            Some(&existing) if e.allow_aliases => {
                debug!(
                    "{}: {} is an alias of {}",
                    e.type_name,
                    name,
                    e.members[existing].name()
                );
                existing
            }
            Some(&existing) => {
                return Err(EnumError::DuplicateValue {
                    enumeration: e.type_name.to_string(),
                    name,
                    existing: e.members[existing].name().to_string(),
                    value: format!("{:?}", value),
                });
            }
            None => {
                let ordinal = e.members.len();
                trace!("{}: member {} = {:?}", e.type_name, name, value);
                e.members.push(MemberRef::new(Member::new(
                    e.id,
                    Arc::clone(&e.type_name),
                    name.clone(),
                    value.clone(),
                    ordinal,
                )));
                e.by_value.insert(value, ordinal);
                ordinal
            }
        };

        e.by_name.insert(name.clone(), ordinal);
        e.names.push(name);
        Ok(())
    }

    fn finish(self) -> Enumeration<V> {
        let e = self.enumeration;
        debug!(
            "built enumeration {} with {} members and {} aliases",
            e.type_name,
            e.members.len(),
            e.names.len() - e.members.len()
        );
        e
    }
}

impl<V: EnumValue> Enumeration<V> {
    /// Build an enumeration from an ordered declaration list.
    ///
    /// Each declaration takes its value from `assigner` unless it carries an
    /// explicit one. A value seen before becomes an alias of the first member
    /// declared with it when `allow_aliases` is set, and fails the build with
    /// `DuplicateValue` otherwise.
    ///
    /// # Errors
    ///
    /// - `DuplicateValue` on a repeated value with aliases disabled
    /// - `ReassignmentRejected` on a repeated name
    /// - any error raised by the assigner
    ///
    /// # Examples
    ///
    /// ```
    /// use enumkit::{Enumeration, Explicit, Result};
    ///
    /// # fn main() -> Result<()> {
    /// let e = Enumeration::<i32>::build("Pair", [("a", 1), ("b", 1)], Explicit, true)?;
    /// assert_eq!(e.len(), 1);
    /// assert_eq!(e.get_by_name("b")?, e.get_by_name("a")?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn build<I, D, A>(
        type_name: &str,
        declarations: I,
        mut assigner: A,
        allow_aliases: bool,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<Declaration<V>>,
        A: ValueAssigner<V>,
    {
        let mut staging = Staging::new(type_name, allow_aliases);
        for declaration in declarations {
            staging.insert(declaration.into(), &mut assigner)?;
        }
        Ok(staging.finish())
    }
}

/// Lifecycle of an [`EnumBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildState {
    Open,
    Built,
    Failed,
}

/// Incremental definition of an enumeration.
///
/// The builder is closed once `build()` has run: later declarations fail
/// with `ReassignmentRejected`. Another `build()` fails with `AlreadyBuilt`
/// after a success and with `BuildFailed` after a failure, since the
/// assigner's sequence has been consumed either way.
pub struct EnumBuilder<V> {
    type_name: String,
    assigner: Box<dyn ValueAssigner<V>>,
    allow_aliases: bool,
    implicit_only: bool,
    declarations: Vec<Declaration<V>>,
    declared: HashSet<String>,
    state: BuildState,
}

impl<V: EnumValue> EnumBuilder<V> {
    /// Create a builder for `type_name` drawing implicit values from `assigner`.
    pub fn new<A>(type_name: impl Into<String>, assigner: A) -> Self
    where
        A: ValueAssigner<V> + 'static,
    {
        Self {
            type_name: type_name.into(),
            assigner: Box::new(assigner),
            allow_aliases: false,
            implicit_only: false,
            declarations: Vec::new(),
            declared: HashSet::new(),
            state: BuildState::Open,
        }
    }

    /// Accept duplicate values as aliases instead of failing.
    pub fn allow_aliases(mut self, allow: bool) -> Self {
        self.allow_aliases = allow;
        self
    }

    /// Reject explicit values, so every member takes an assigned value.
    pub fn implicit_only(mut self, implicit_only: bool) -> Self {
        self.implicit_only = implicit_only;
        self
    }

    /// Type name of the enumeration being defined.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Number of declarations so far, aliases included.
    pub fn num_declarations(&self) -> usize {
        self.declarations.len()
    }

    /// Add one declaration.
    ///
    /// # Errors
    ///
    /// - `ReassignmentRejected` if the name was already declared or the
    ///   enumeration has been built
    /// - `ExplicitValueRejected` for an explicit value in implicit-only mode
    pub fn declare(&mut self, declaration: impl Into<Declaration<V>>) -> Result<&mut Self> {
        let declaration = declaration.into();

        if self.state != BuildState::Open || self.declared.contains(declaration.name()) {
            return Err(EnumError::ReassignmentRejected {
                enumeration: self.type_name.clone(),
                name: declaration.name().to_string(),
            });
        }
        if self.implicit_only && declaration.value().is_some() {
            return Err(EnumError::ExplicitValueRejected {
                enumeration: self.type_name.clone(),
                name: declaration.name().to_string(),
            });
        }

        self.declared.insert(declaration.name().to_string());
        self.declarations.push(declaration);
        Ok(self)
    }

    /// Add several declarations in order, stopping at the first error.
    pub fn declare_all<I, D>(&mut self, declarations: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<Declaration<V>>,
    {
        for declaration in declarations {
            self.declare(declaration)?;
        }
        Ok(self)
    }

    /// Build the enumeration from the declarations made so far.
    ///
    /// # Errors
    ///
    /// `AlreadyBuilt` after a successful call, `BuildFailed` after a failed
    /// one, otherwise as [`Enumeration::build`].
    pub fn build(&mut self) -> Result<Enumeration<V>> {
        match self.state {
            BuildState::Open => {}
            BuildState::Built => {
                return Err(EnumError::AlreadyBuilt {
                    enumeration: self.type_name.clone(),
                })
            }
            BuildState::Failed => {
                return Err(EnumError::BuildFailed {
                    enumeration: self.type_name.clone(),
                })
            }
        }
        self.state = BuildState::Failed;

        let mut staging = Staging::new(&self.type_name, self.allow_aliases);
        for declaration in std::mem::take(&mut self.declarations) {
            staging.insert(declaration, self.assigner.as_mut())?;
        }
        self.state = BuildState::Built;
        Ok(staging.finish())
    }

    /// Build the enumeration and register it in the global registry, which
    /// makes its members persistable.
    ///
    /// # Errors
    ///
    /// As [`build`](EnumBuilder::build), plus `DuplicateEnumeration` if the
    /// type name is already registered.
    pub fn define(&mut self) -> Result<Arc<Enumeration<V>>> {
        let enumeration = self.build()?;
        Registry::global().register(enumeration)
    }
}

impl<V: fmt::Debug> fmt::Debug for EnumBuilder<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumBuilder")
            .field("type_name", &self.type_name)
            .field("allow_aliases", &self.allow_aliases)
            .field("implicit_only", &self.implicit_only)
            .field("declarations", &self.declarations)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<V: EnumValue + PolicyValue> EnumBuilder<V> {
    /// Create a builder whose implicit values follow a built-in policy.
    pub fn with_policy(type_name: impl Into<String>, policy: ValuePolicy) -> Self {
        Self::new(type_name, policy.assigner::<V>())
    }
}
