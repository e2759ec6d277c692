//! Error types for enumeration construction and lookup.
//!
//! This module provides a unified error type for every fallible operation in
//! the crate, using the `thiserror` crate for ergonomic error handling.
//! Member values are generic, so they are rendered with their `Debug`
//! representation when an error is created.

use thiserror::Error;

/// The main error type for enumeration operations.
///
/// Construction errors (`DuplicateValue`, `ReassignmentRejected`, ...) are
/// fatal to the enumeration being built. Lookup errors (`NameNotFound`,
/// `ValueNotFound`, `InconsistentArguments`) are recoverable by the caller.
#[derive(Error, Debug)]
pub enum EnumError {
    /// A declaration produced a value that an earlier member already owns
    /// while aliases are disabled.
    #[error("{enumeration}: duplicate value {value} for {name} (already used by {existing})")]
    DuplicateValue {
        /// Enumeration being built
        enumeration: String,
        /// Name of the rejected declaration
        name: String,
        /// Name of the member that owns the value
        existing: String,
        /// The shared value
        value: String,
    },

    /// No member or alias has the given name
    #[error("{enumeration}: no member named {name:?}")]
    NameNotFound {
        /// Enumeration that was searched
        enumeration: String,
        /// The missing name
        name: String,
    },

    /// No member has the given value
    #[error("{enumeration}: no member with value {value}")]
    ValueNotFound {
        /// Enumeration that was searched
        enumeration: String,
        /// The missing value
        value: String,
    },

    /// Name and value do not jointly identify one canonical member
    #[error("{enumeration}: inconsistent arguments name={name}, value={value}")]
    InconsistentArguments {
        /// Enumeration that was searched
        enumeration: String,
        /// The supplied name (or member), `None` if absent
        name: String,
        /// The supplied value, `None` if absent
        value: String,
    },

    /// A name was declared twice, or declared after the enumeration was built
    #[error("{enumeration}: cannot reassign {name}, enumerations are closed for extension")]
    ReassignmentRejected {
        /// Enumeration being built
        enumeration: String,
        /// The offending name
        name: String,
    },

    /// `build()` was called a second time on the same builder
    #[error("{enumeration}: enumeration has already been built")]
    AlreadyBuilt {
        /// Enumeration that was built
        enumeration: String,
    },

    /// `build()` was called again after an earlier attempt failed
    #[error("{enumeration}: an earlier build failed, declare the enumeration again")]
    BuildFailed {
        /// Enumeration whose build failed
        enumeration: String,
    },

    /// An explicit value was supplied to a builder in implicit-only mode
    #[error("{enumeration}: cannot use explicit value for {name}")]
    ExplicitValueRejected {
        /// Enumeration being built
        enumeration: String,
        /// The offending name
        name: String,
    },

    /// An implicit declaration met an assigner that only accepts explicit values
    #[error("no value given for {name} and no implicit values are available")]
    MissingValue {
        /// The declaration without a value
        name: String,
    },

    /// The value policy cannot produce values of the requested type
    #[error("value policy {policy} cannot produce values of type {value_type}")]
    UnsupportedPolicy {
        /// The policy that was selected
        policy: String,
        /// The member value type
        value_type: &'static str,
    },

    /// The assigner ran out of representable values
    #[error("{policy} assigner exhausted at {name}")]
    AssignerExhausted {
        /// The policy that ran out
        policy: String,
        /// The declaration that could not be given a value
        name: String,
    },

    /// A registry already holds an enumeration with this type name
    #[error("enumeration {0} is already registered")]
    DuplicateEnumeration(String),

    /// A registry holds no enumeration with this type name
    #[error("no enumeration named {0} is registered")]
    UnknownEnumeration(String),

    /// A member was serialized whose enumeration is not the one registered
    /// globally under its type name
    #[error("{enumeration}.{name} cannot be persisted: its enumeration is not the one registered as {enumeration}")]
    NotPersistable {
        /// Type name of the member's enumeration
        enumeration: String,
        /// Member name
        name: String,
    },

    /// A registered enumeration was requested with the wrong value type
    #[error("enumeration {enumeration} does not hold values of type {expected}")]
    ValueTypeMismatch {
        /// The registered type name
        enumeration: String,
        /// The value type that was requested
        expected: &'static str,
    },

    /// Binary serialization error occurred
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// JSON serialization error occurred
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for enumeration operations.
///
/// This is a type alias for `Result<T, EnumError>` and is used
/// throughout the crate for consistency.
pub type Result<T> = std::result::Result<T, EnumError>;

/// Render an optional argument the way `InconsistentArguments` reports it.
pub(crate) fn describe<T: std::fmt::Debug>(arg: Option<T>) -> String {
    match arg {
        Some(arg) => format!("{:?}", arg),
        None => "None".to_string(),
    }
}
