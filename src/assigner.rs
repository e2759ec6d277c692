//! Value assigners - policies that give implicit declarations their values.
//!
//! An assigner is a small stateful object consulted once per implicit
//! declaration, in declaration order, while a single enumeration is built.
//! Explicit declarations bypass the assigner entirely and do not advance it.
//!
//! # Built-in policies
//!
//! - [`Names`]: the value is the member name itself
//! - [`Counter`]: `start, start + step, start + 2 * step, ...`
//! - [`Bits`]: `1, 2, 4, 8, ...` for bit-flag enumerations
//! - [`Explicit`]: no implicit values at all
//!
//! Any closure `FnMut(&str) -> Result<V>` becomes an assigner through [`from_fn`].
//!
//! # Examples
//!
//! ```
//! use enumkit::{Counter, ValueAssigner};
//!
//! let mut counter = Counter::from_one();
//! let a: u32 = counter.next_value("a").unwrap();
//! let b: u32 = counter.next_value("b").unwrap();
//! assert_eq!((a, b), (1, 2));
//! ```

use crate::{EnumError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stateful source of implicit member values.
///
/// One instance serves exactly one enumeration construction. Reusing an
/// instance for a second enumeration continues the previous sequence.
pub trait ValueAssigner<V> {
    /// Produce the value for the next implicit declaration `name`.
    fn next_value(&mut self, name: &str) -> Result<V>;
}

impl<V, A: ValueAssigner<V> + ?Sized> ValueAssigner<V> for &mut A {
    fn next_value(&mut self, name: &str) -> Result<V> {
        (**self).next_value(name)
    }
}

impl<V, A: ValueAssigner<V> + ?Sized> ValueAssigner<V> for Box<A> {
    fn next_value(&mut self, name: &str) -> Result<V> {
        (**self).next_value(name)
    }
}

/// Assigner backed by a closure, see [`from_fn`].
#[derive(Debug, Clone)]
pub struct FromFn<F>(F);

/// Create a custom assigner from a closure called once per implicit declaration.
///
/// # Examples
///
/// ```
/// use enumkit::{assigner, ValueAssigner};
///
/// let mut lengths = assigner::from_fn(|name: &str| Ok(name.len()));
/// assert_eq!(lengths.next_value("three").unwrap(), 5);
/// ```
pub fn from_fn<V, F>(f: F) -> FromFn<F>
where
    F: FnMut(&str) -> Result<V>,
{
    FromFn(f)
}

impl<V, F> ValueAssigner<V> for FromFn<F>
where
    F: FnMut(&str) -> Result<V>,
{
    fn next_value(&mut self, name: &str) -> Result<V> {
        (self.0)(name)
    }
}

/// Conversion from the raw material of the built-in policies into a value type.
///
/// Every method defaults to `None` ("this type cannot be produced that way"),
/// so caller-defined value types can opt into exactly the policies they
/// support.
pub trait PolicyValue: Sized {
    /// Build a value from a member name.
    fn from_name(name: &str) -> Option<Self> {
        let _ = name;
        None
    }

    /// Build a value from a counter position.
    fn from_count(count: i64) -> Option<Self> {
        let _ = count;
        None
    }

    /// Build a value from a single-bit pattern.
    fn from_bits(bits: u64) -> Option<Self> {
        let _ = bits;
        None
    }
}

impl PolicyValue for String {
    fn from_name(name: &str) -> Option<Self> {
        Some(name.to_string())
    }
}

macro_rules! integer_policy_value {
    ($($t:ty),+ $(,)?) => {
        $(
            impl PolicyValue for $t {
                fn from_count(count: i64) -> Option<Self> {
                    <$t>::try_from(count).ok()
                }

                fn from_bits(bits: u64) -> Option<Self> {
                    <$t>::try_from(bits).ok()
                }
            }
        )+
    };
}

integer_policy_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

fn unsupported<V>(policy: &str) -> EnumError {
    EnumError::UnsupportedPolicy {
        policy: policy.to_string(),
        value_type: std::any::type_name::<V>(),
    }
}

fn exhausted(policy: &str, name: &str) -> EnumError {
    EnumError::AssignerExhausted {
        policy: policy.to_string(),
        name: name.to_string(),
    }
}

/// Identity policy: each member's value is its own name.
#[derive(Debug, Clone, Copy, Default)]
pub struct Names;

impl<V: PolicyValue> ValueAssigner<V> for Names {
    fn next_value(&mut self, name: &str) -> Result<V> {
        V::from_name(name).ok_or_else(|| unsupported::<V>("names"))
    }
}

/// Arithmetic progression policy, ignoring member names.
///
/// # Examples
///
/// ```
/// use enumkit::{Counter, ValueAssigner};
///
/// let mut counter = Counter::new(10, 5);
/// let values: Vec<i64> = ["a", "b", "c"]
///     .iter()
///     .map(|name| counter.next_value(name).unwrap())
///     .collect();
/// assert_eq!(values, vec![10, 15, 20]);
/// ```
#[derive(Debug, Clone)]
pub struct Counter {
    /// Next value to hand out, `None` once the progression overflowed
    next: Option<i64>,
    step: i64,
}

impl Counter {
    /// Count from `start` in increments of `step`.
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            next: Some(start),
            step,
        }
    }

    /// Count `0, 1, 2, ...`
    pub fn from_zero() -> Self {
        Self::new(0, 1)
    }

    /// Count `1, 2, 3, ...`
    pub fn from_one() -> Self {
        Self::new(1, 1)
    }
}

impl<V: PolicyValue> ValueAssigner<V> for Counter {
    fn next_value(&mut self, name: &str) -> Result<V> {
        let current = self.next.ok_or_else(|| exhausted("counter", name))?;
        let value = match V::from_count(current) {
            Some(value) => value,
            // A type that cannot even hold zero does not support counting at all
            None if V::from_count(0).is_none() => return Err(unsupported::<V>("counter")),
            None => return Err(exhausted("counter", name)),
        };
        self.next = current.checked_add(self.step);
        Ok(value)
    }
}

/// Bit-flag policy: each call returns the next power of two.
///
/// Composite flags are declared with explicit values (the bitwise OR of
/// earlier members) and never touch the assigner.
#[derive(Debug, Clone, Default)]
pub struct Bits {
    shift: u32,
}

impl Bits {
    /// Start at `1 << 0`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: PolicyValue> ValueAssigner<V> for Bits {
    fn next_value(&mut self, name: &str) -> Result<V> {
        if self.shift >= u64::BITS {
            return Err(exhausted("bits", name));
        }
        let value = match V::from_bits(1u64 << self.shift) {
            Some(value) => value,
            None if V::from_bits(1).is_none() => return Err(unsupported::<V>("bits")),
            None => return Err(exhausted("bits", name)),
        };
        self.shift += 1;
        Ok(value)
    }
}

/// Policy for enumerations whose every member carries an explicit value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Explicit;

impl<V> ValueAssigner<V> for Explicit {
    fn next_value(&mut self, name: &str) -> Result<V> {
        Err(EnumError::MissingValue {
            name: name.to_string(),
        })
    }
}

/// Serializable selection of a built-in value policy.
///
/// Use [`ValuePolicy::assigner`] to obtain a fresh assigner for each
/// enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePolicy {
    /// Value is the member name
    #[default]
    Names,
    /// Counter starting at 0
    FromZero,
    /// Counter starting at 1
    FromOne,
    /// Counter with a custom start and step
    Counter {
        /// First value
        start: i64,
        /// Increment between successive values
        step: i64,
    },
    /// Successive powers of two
    Bits,
    /// Explicit values only
    Explicit,
}

impl ValuePolicy {
    /// Create a fresh assigner implementing this policy.
    pub fn assigner<V: PolicyValue + 'static>(&self) -> Box<dyn ValueAssigner<V>> {
        match *self {
            ValuePolicy::Names => Box::new(Names),
            ValuePolicy::FromZero => Box::new(Counter::from_zero()),
            ValuePolicy::FromOne => Box::new(Counter::from_one()),
            ValuePolicy::Counter { start, step } => Box::new(Counter::new(start, step)),
            ValuePolicy::Bits => Box::new(Bits::new()),
            ValuePolicy::Explicit => Box::new(Explicit),
        }
    }
}

impl fmt::Display for ValuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuePolicy::Names => write!(f, "names"),
            ValuePolicy::FromZero => write!(f, "from_zero"),
            ValuePolicy::FromOne => write!(f, "from_one"),
            ValuePolicy::Counter { start, step } => write!(f, "counter({}, {})", start, step),
            ValuePolicy::Bits => write!(f, "bits"),
            ValuePolicy::Explicit => write!(f, "explicit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take<V, A: ValueAssigner<V>>(assigner: &mut A, names: &[&str]) -> Vec<V> {
        names
            .iter()
            .map(|name| assigner.next_value(name).unwrap())
            .collect()
    }

    #[test]
    fn test_names() {
        let values: Vec<String> = take(&mut Names, &["red", "green"]);
        assert_eq!(values, vec!["red", "green"]);
    }

    #[test]
    fn test_names_unsupported_for_integers() {
        let result: Result<i32> = Names.next_value("red");
        assert!(matches!(
            result,
            Err(EnumError::UnsupportedPolicy { ref policy, .. }) if policy == "names"
        ));
    }

    #[test]
    fn test_counter_from_one_and_zero() {
        let names = ["a", "b", "c", "d", "e", "f", "g"];
        let ones: Vec<u8> = take(&mut Counter::from_one(), &names);
        assert_eq!(ones, vec![1, 2, 3, 4, 5, 6, 7]);

        let zeros: Vec<i32> = take(&mut Counter::from_zero(), &names);
        assert_eq!(zeros, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_counter_negative_step() {
        let values: Vec<i64> = take(&mut Counter::new(3, -2), &["a", "b", "c"]);
        assert_eq!(values, vec![3, 1, -1]);
    }

    #[test]
    fn test_counter_out_of_range() {
        let mut counter = Counter::new(255, 1);
        let first: u8 = counter.next_value("a").unwrap();
        assert_eq!(first, 255);
        let second: Result<u8> = counter.next_value("b");
        assert!(matches!(second, Err(EnumError::AssignerExhausted { ref name, .. }) if name == "b"));
    }

    #[test]
    fn test_counter_overflow() {
        let mut counter = Counter::new(i64::MAX, 1);
        let _: i64 = counter.next_value("a").unwrap();
        let next: Result<i64> = counter.next_value("b");
        assert!(matches!(next, Err(EnumError::AssignerExhausted { .. })));
    }

    #[test]
    fn test_counter_unsupported_for_strings() {
        let result: Result<String> = Counter::from_one().next_value("a");
        assert!(matches!(result, Err(EnumError::UnsupportedPolicy { .. })));
    }

    #[test]
    fn test_bits() {
        let values: Vec<u32> = take(&mut Bits::new(), &["a", "b", "c", "d"]);
        assert_eq!(values, vec![1, 2, 4, 8]);
    }

    #[test]
    fn test_bits_exhausted() {
        let mut bits = Bits::new();
        let names: Vec<String> = (0..8).map(|i| format!("f{}", i)).collect();
        for name in &names {
            let _: u8 = bits.next_value(name).unwrap();
        }
        let ninth: Result<u8> = bits.next_value("f8");
        assert!(matches!(ninth, Err(EnumError::AssignerExhausted { .. })));

        let mut wide = Bits::new();
        for i in 0..64 {
            let value: u64 = wide.next_value("f").unwrap();
            assert_eq!(value, 1u64 << i);
        }
        let past: Result<u64> = wide.next_value("f64");
        assert!(matches!(past, Err(EnumError::AssignerExhausted { .. })));
    }

    #[test]
    fn test_explicit_rejects_implicit() {
        let result: Result<u8> = Explicit.next_value("a");
        assert!(matches!(result, Err(EnumError::MissingValue { ref name }) if name == "a"));
    }

    #[test]
    fn test_closure_assigner() {
        let mut seen = Vec::new();
        let mut assigner = from_fn(|name: &str| {
            seen.push(name.to_string());
            Ok(name.len())
        });
        let values: Vec<usize> = take(&mut assigner, &["one", "three"]);
        assert_eq!(values, vec![3, 5]);
        drop(assigner);
        assert_eq!(seen, vec!["one", "three"]);
    }

    #[test]
    fn test_boxed_and_borrowed_assigners() {
        let mut boxed: Box<dyn ValueAssigner<u32>> = Box::new(Counter::from_one());
        assert_eq!(boxed.next_value("a").unwrap(), 1);

        let mut counter = Counter::from_zero();
        let first: u32 = (&mut counter).next_value("a").unwrap();
        let second: u32 = counter.next_value("b").unwrap();
        assert_eq!((first, second), (0, 1));
    }

    #[test]
    fn test_policy_assigners_are_fresh() {
        let policy = ValuePolicy::FromOne;
        let mut first = policy.assigner::<u16>();
        let _ = first.next_value("a").unwrap();
        let _ = first.next_value("b").unwrap();

        let mut second = policy.assigner::<u16>();
        assert_eq!(second.next_value("a").unwrap(), 1);
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(ValuePolicy::default().to_string(), "names");
        assert_eq!(ValuePolicy::Counter { start: 3, step: 2 }.to_string(), "counter(3, 2)");
    }
}
