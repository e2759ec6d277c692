//! Enumkit - declarative enumerations with automatic values.
//!
//! Enumkit builds immutable enumerations from an ordered list of member
//! names, assigning values automatically where none are given, detecting
//! accidental duplicate values, and offering lookup by name or by value.
//!
//! # Key Characteristics
//!
//! - Pluggable value policies: names, counters, bit flags, or custom closures
//! - Duplicate values rejected, or accepted as aliases when requested
//! - One canonical instance per member, compared by identity
//! - Persistence by `(type name, member name)` that restores the same instance
//!
//! # Architecture
//!
//! - **Value Assigner** ([`assigner`]): stateful policies producing implicit values
//! - **Builder** ([`builder`]): turns declarations into an [`Enumeration`]
//! - **Enumeration** ([`enumeration`]): immutable name/value registry with `resolve`
//! - **Registry** ([`registry`]): constructed enumerations by type name, for persistence
//! - **Definitions** ([`definition`]): enumerations described as JSON / bincode data
//!
//! # Examples
//!
//! ## Names as values
//!
//! ```
//! use enumkit::{EnumBuilder, Names};
//!
//! let mut builder = EnumBuilder::<String>::new("Colour", Names);
//! builder.declare_all(["red", "green", "blue"]).unwrap();
//! let colour = builder.build().unwrap();
//!
//! let items: Vec<(&str, &str)> = colour
//!     .iter_items()
//!     .map(|(name, value)| (name, value.as_str()))
//!     .collect();
//! assert_eq!(items, vec![("red", "red"), ("green", "green"), ("blue", "blue")]);
//! ```
//!
//! ## Bit flags with a composite member
//!
//! ```
//! use enumkit::{Bits, EnumBuilder};
//!
//! let mut builder = EnumBuilder::<u64>::new("Style", Bits::new());
//! builder.declare_all(["bold", "italic", "underline"]).unwrap();
//! builder.declare(("bold_italic", 1 | 2)).unwrap();
//! let style = builder.build().unwrap();
//!
//! assert_eq!(style.combine(["italic", "underline"]).unwrap(), 6);
//! assert_eq!(style.get_by_value(&3).unwrap().name(), "bold_italic");
//! ```
//!
//! ## Aliases
//!
//! ```
//! use enumkit::{Enumeration, Explicit};
//!
//! let answer = Enumeration::<u8>::build("Answer", [("yes", 1), ("no", 0), ("aye", 1)], Explicit, true)
//!     .unwrap();
//! assert_eq!(answer.len(), 2);
//! assert_eq!(answer.get_by_name("aye").unwrap().name(), "yes");
//! ```
//!
//! # Thread Safety
//!
//! Construction is a single-threaded, one-time step. Built enumerations are
//! never mutated, so they can be shared between threads without locking.
//! [`LazyEnumeration`] builds statics at most once under concurrent first use.
//!
//! # Logging
//!
//! Construction and registration are reported through `tracing` at `debug`
//! and `trace` level. The crate installs no subscriber.

// Module declarations
pub mod assigner;
pub mod builder;
pub mod definition;
pub mod enumeration;
pub mod error;
pub mod lazy;
pub mod member;
pub mod registry;

// Re-exports for convenient access
pub use assigner::{Bits, Counter, Explicit, Names, PolicyValue, ValueAssigner, ValuePolicy};
pub use builder::{Declaration, EnumBuilder};
pub use definition::{EnumDefinition, MemberDefinition};
pub use enumeration::{Enumeration, Lookup};
pub use error::{EnumError, Result};
pub use lazy::LazyEnumeration;
pub use member::{EnumId, EnumValue, Member, MemberKey, MemberRef};
pub use registry::Registry;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "Enumkit";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
