//! Build-once holder for enumerations defined in statics.
//!
//! A [`LazyEnumeration`] runs its initializer on first use. Concurrent first
//! use from several threads runs the initializer at most once and every
//! reader observes either no enumeration or the complete one.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use enumkit::{Counter, EnumBuilder, Enumeration, LazyEnumeration, Result};
//!
//! fn weekday() -> Result<Arc<Enumeration<u8>>> {
//!     let mut builder = EnumBuilder::new("LazyDocWeekday", Counter::from_one());
//!     builder.declare_all(["monday", "tuesday", "wednesday"])?;
//!     builder.define()
//! }
//!
//! static WEEKDAY: LazyEnumeration<u8> = LazyEnumeration::new(weekday);
//!
//! # fn main() -> Result<()> {
//! assert_eq!(WEEKDAY.get()?.get_by_name("tuesday")?.value(), &2);
//! # Ok(())
//! # }
//! ```

use crate::{EnumValue, Enumeration, Result};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Initializer of a [`LazyEnumeration`].
pub type Init<V> = fn() -> Result<Arc<Enumeration<V>>>;

/// Enumeration built on first access.
pub struct LazyEnumeration<V> {
    cell: OnceCell<Arc<Enumeration<V>>>,
    init: Init<V>,
}

impl<V: EnumValue> LazyEnumeration<V> {
    /// Create a holder that will call `init` on first access.
    pub const fn new(init: Init<V>) -> Self {
        Self {
            cell: OnceCell::new(),
            init,
        }
    }

    /// Get the enumeration, building it if this is the first access.
    ///
    /// # Errors
    ///
    /// Returns the initializer's error. The holder stays empty, so the next
    /// access runs the initializer again.
    pub fn get(&self) -> Result<&Arc<Enumeration<V>>> {
        self.cell.get_or_try_init(self.init)
    }

    /// Whether the enumeration has been built.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
