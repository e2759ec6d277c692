//! Integration tests for `Enumeration::resolve`.
//!
//! Tests the reconciliation of name / value / member arguments:
//! - Re-validating an existing member
//! - Single-key lookups
//! - Cross-checking a name/value pair

use enumkit::{Counter, EnumError, Enumeration, Explicit, Lookup, MemberRef, Result};

fn weekday() -> Enumeration<u8> {
    Enumeration::build(
        "Weekday",
        ["monday", "tuesday", "wednesday", "thursday", "friday"],
        Counter::from_one(),
        false,
    )
    .unwrap()
}

#[test]
fn test_resolve_is_identity_for_every_member() -> Result<()> {
    let weekday = weekday();
    for member in weekday.iter_members() {
        let resolved = weekday.resolve(Some(Lookup::Name(member.name())), Some(member.value()))?;
        assert!(MemberRef::ptr_eq(resolved, member));
    }
    Ok(())
}

#[test]
fn test_resolve_existing_member() -> Result<()> {
    let weekday = weekday();
    let friday = weekday.get_by_name("friday")?;

    assert!(MemberRef::ptr_eq(weekday.resolve(Some(friday.into()), None)?, friday));
    assert!(MemberRef::ptr_eq(
        weekday.resolve(Some(friday.into()), Some(&5))?,
        friday
    ));
    assert!(matches!(
        weekday.resolve(Some(friday.into()), Some(&4)),
        Err(EnumError::InconsistentArguments { .. })
    ));
    Ok(())
}

#[test]
fn test_resolve_single_keys() -> Result<()> {
    let weekday = weekday();
    assert_eq!(weekday.resolve(None, Some(&3))?.name(), "wednesday");
    assert_eq!(*weekday.resolve(Some("thursday".into()), None)?.value(), 4);

    assert!(matches!(
        weekday.resolve(None, Some(&9)),
        Err(EnumError::ValueNotFound { .. })
    ));
    assert!(matches!(
        weekday.resolve(Some(Lookup::Name("sunday")), None),
        Err(EnumError::NameNotFound { .. })
    ));
    Ok(())
}

#[test]
fn test_resolve_mismatched_pair() {
    let weekday = weekday();
    let err = weekday
        .resolve(Some(Lookup::Name("monday")), Some(&2))
        .unwrap_err();
    match err {
        EnumError::InconsistentArguments { name, value, .. } => {
            assert_eq!(name, "\"monday\"");
            assert_eq!(value, "2");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_resolve_pair_with_unknown_half() {
    let weekday = weekday();
    assert!(matches!(
        weekday.resolve(Some(Lookup::Name("sunday")), Some(&1)),
        Err(EnumError::InconsistentArguments { .. })
    ));
    assert!(matches!(
        weekday.resolve(Some(Lookup::Name("monday")), Some(&42)),
        Err(EnumError::InconsistentArguments { .. })
    ));
}

#[test]
fn test_resolve_nothing() {
    let weekday = weekday();
    assert!(matches!(
        weekday.resolve(None, None),
        Err(EnumError::InconsistentArguments { .. })
    ));
}

#[test]
fn test_resolve_alias_pair() -> Result<()> {
    let answer = Enumeration::<u8>::build("Answer", [("yes", 1), ("no", 0), ("aye", 1)], Explicit, true)?;
    let yes = answer.get_by_name("yes")?;
    assert!(MemberRef::ptr_eq(
        answer.resolve(Some(Lookup::Name("aye")), Some(&1))?,
        yes
    ));
    Ok(())
}

#[test]
fn test_resolve_rejects_member_of_other_enumeration() -> Result<()> {
    let ours = weekday();
    let theirs = weekday();
    let monday = theirs.get_by_name("monday")?;

    let err = ours.resolve(Some(monday.into()), None).unwrap_err();
    match err {
        EnumError::InconsistentArguments { name, value, .. } => {
            assert_eq!(name, "Weekday.monday");
            assert_eq!(value, "None");
        }
        other => panic!("unexpected error: {}", other),
    }
    Ok(())
}
