//! Integration tests for member persistence.
//!
//! Members are persisted as `(type name, member name)` and restored through
//! the global registry, which must hand back the very same instance.

use enumkit::{
    Bits, Counter, EnumBuilder, EnumError, Enumeration, MemberKey, MemberRef, Names, Registry,
    Result,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Serialize, Deserialize)]
struct Ticket {
    id: u32,
    priority: MemberRef<u8>,
    tags: Vec<MemberRef<String>>,
}

#[test]
fn test_json_round_trip_preserves_identity() -> Result<()> {
    let mut builder = EnumBuilder::<u8>::new("PersistPriority", Counter::from_one());
    builder.declare_all(["low", "normal", "high"])?;
    let priority = builder.define()?;

    let mut builder = EnumBuilder::<String>::new("PersistTag", Names);
    builder.declare_all(["bug", "feature", "docs"])?;
    let tag = builder.define()?;

    let ticket = Ticket {
        id: 7,
        priority: priority.get_by_name("high")?.clone(),
        tags: vec![tag.get_by_name("bug")?.clone(), tag.get_by_name("docs")?.clone()],
    };

    let json = serde_json::to_string(&ticket)?;
    assert!(json.contains(r#"{"enumeration":"PersistPriority","name":"high"}"#));

    let restored: Ticket = serde_json::from_str(&json)?;
    assert_eq!(restored.id, 7);
    assert!(MemberRef::ptr_eq(&restored.priority, priority.get_by_name("high")?));
    assert_eq!(restored.tags, ticket.tags);
    Ok(())
}

#[test]
fn test_bincode_round_trip_preserves_identity() -> Result<()> {
    let mut builder = EnumBuilder::<u64>::new("PersistPermission", Bits::new());
    builder.declare_all(["read", "write", "execute"])?;
    let permission = builder.define()?;

    for member in permission.iter_members() {
        let bytes = bincode::serialize(member)?;
        let restored: MemberRef<u64> = bincode::deserialize(&bytes)?;
        assert!(MemberRef::ptr_eq(&restored, member));
    }
    Ok(())
}

#[test]
fn test_alias_key_restores_canonical_member() -> Result<()> {
    let mut builder = EnumBuilder::<u8>::new("PersistAnswer", Counter::from_one()).allow_aliases(true);
    builder.declare_all(["yes", "no"])?;
    builder.declare(("aye", 1))?;
    let answer = builder.define()?;

    let key = MemberKey {
        enumeration: "PersistAnswer".into(),
        name: "aye".into(),
    };
    let restored = Registry::global().resolve_key::<u8>(&key)?;
    assert!(MemberRef::ptr_eq(&restored, answer.get_by_name("yes")?));

    // Aliases persist under their canonical name
    assert_eq!(restored.key().name, "yes");
    Ok(())
}

#[test]
fn test_unknown_member_fails_to_deserialize() -> Result<()> {
    let mut builder = EnumBuilder::<String>::new("PersistSize", Names);
    builder.declare_all(["small", "large"])?;
    builder.define()?;

    let json = r#"{"enumeration":"PersistSize","name":"medium"}"#;
    let err = serde_json::from_str::<MemberRef<String>>(json).unwrap_err();
    assert!(err.to_string().contains("medium"));

    // Wrong value type for a registered enumeration
    let json = r#"{"enumeration":"PersistSize","name":"small"}"#;
    assert!(serde_json::from_str::<MemberRef<u8>>(json).is_err());
    Ok(())
}

#[test]
fn test_same_name_local_enumeration_is_not_persistable() -> Result<()> {
    let mut builder = EnumBuilder::<String>::new("PersistColour", Names);
    builder.declare_all(["red", "green"])?;
    let global = builder.define()?;

    let local = Enumeration::<String>::build("PersistColour", ["red", "green"], Names, false)?;
    let red = local.get_by_name("red")?;

    // The key would restore the registered enumeration's red, not this one
    let err = serde_json::to_string(red).unwrap_err();
    assert!(err.to_string().contains("PersistColour.red"));

    let json = serde_json::to_string(global.get_by_name("red")?)?;
    let restored: MemberRef<String> = serde_json::from_str(&json)?;
    assert!(MemberRef::ptr_eq(&restored, global.get_by_name("red")?));
    assert!(!MemberRef::ptr_eq(&restored, red));
    Ok(())
}

#[test]
fn test_unregistered_enumeration_is_not_persistable() -> Result<()> {
    let solo = Enumeration::<u8>::build("PersistSolo", ["only"], Counter::from_one(), false)?;
    let only = solo.get_by_name("only")?;

    assert!(!Registry::global().holds("PersistSolo", solo.id()));
    assert!(serde_json::to_string(only).is_err());
    assert!(bincode::serialize(only).is_err());
    Ok(())
}

#[test]
fn test_define_twice_is_rejected() -> Result<()> {
    let mut first = EnumBuilder::<String>::new("PersistTwice", Names);
    first.declare("only")?;
    first.define()?;

    let mut second = EnumBuilder::<String>::new("PersistTwice", Names);
    second.declare("only")?;
    assert!(matches!(
        second.define(),
        Err(EnumError::DuplicateEnumeration(_))
    ));
    Ok(())
}

#[test]
fn test_concurrent_readers() -> Result<()> {
    let mut builder = EnumBuilder::<u16>::new("PersistPort", Counter::new(8000, 1));
    builder.declare_all(["http", "https", "admin", "metrics"])?;
    let port = builder.define()?;

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let port = Arc::clone(&port);
            thread::spawn(move || {
                let member = port.iter_members().nth(i).unwrap().clone();
                let json = serde_json::to_string(&member).unwrap();
                let restored: MemberRef<u16> = serde_json::from_str(&json).unwrap();
                MemberRef::ptr_eq(&member, &restored)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    Ok(())
}
