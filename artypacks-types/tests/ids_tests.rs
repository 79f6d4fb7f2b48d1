use artypacks_types::{Error, FileId};
use std::collections::HashSet;
use std::str::FromStr;

#[test]
fn file_id_new_is_unique() {
    let a = FileId::new();
    let b = FileId::new();
    assert_ne!(a, b);
}

#[test]
fn file_id_from_uuid_roundtrip() {
    let uuid = uuid::Uuid::now_v7();
    let id = FileId::from_uuid(uuid);
    assert_eq!(id.as_uuid(), uuid);
}

#[test]
fn file_id_display_is_prefixed() {
    let id = FileId::new();
    assert!(id.to_string().starts_with("file-"));
}

#[test]
fn file_id_display_and_parse() {
    let id = FileId::new();
    let parsed = FileId::parse(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn file_id_parse_accepts_bare_uuid() {
    let uuid = uuid::Uuid::now_v7();
    let parsed = FileId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(parsed.as_uuid(), uuid);
}

#[test]
fn file_id_parse_invalid() {
    assert!(FileId::parse("file-not-a-uuid").is_err());
    assert!(FileId::from_str("garbage").is_err());
}

#[test]
fn file_id_parse_error_is_invalid_uuid() {
    let err = FileId::parse("file-1234").unwrap_err();
    assert!(matches!(err, Error::InvalidUuid(_)));
    assert!(err.to_string().starts_with("invalid UUID"));
}

#[test]
fn file_id_ordered_by_creation() {
    let a = FileId::new();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let b = FileId::new();
    assert!(a < b);
}

#[test]
fn file_id_hash_and_eq() {
    let id = FileId::new();
    let mut set = HashSet::new();
    set.insert(id);
    set.insert(id);
    assert_eq!(set.len(), 1);
}

#[test]
fn file_id_serde_is_transparent() {
    let id = FileId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    let parsed: FileId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}
