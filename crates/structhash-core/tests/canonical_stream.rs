//! # Canonical Stream Vectors
//!
//! Hardcoded byte streams for representative object graphs, captured with
//! [`Recorder`]. Any change here changes every digest ever computed, so a
//! failing vector means a compatibility break, not a test to update.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use structhash_core::{
    catalog_for, compute_digest_static, reflect, Hasher, HasherConfig, ObjectType, Recorder,
    StringEncoding, StructHashError,
};
use uuid::Uuid;

pub struct Person {
    pub id: i32,
    pub name: String,
    pub date: chrono::DateTime<Utc>,
}

reflect!(Person { id, name, date });

fn stream<T: structhash_core::ToValue + ?Sized>(value: &T) -> Vec<u8> {
    compute_digest_static(value, Recorder::new()).unwrap().into_vec()
}

#[test]
fn test_person_stream() {
    let person = Person {
        id: 1,
        name: "Eve".into(),
        date: Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap(),
    };
    let mut expected = vec![1, 0, 0, 0];
    expected.extend_from_slice(&[b'E', 0, b'v', 0, b'e', 0]);
    expected.extend_from_slice(&621_355_968_000_000_000i64.to_le_bytes());
    assert_eq!(stream(&person), expected);
}

#[test]
fn test_catalog_lists_declared_members() {
    let catalog = catalog_for(ObjectType::of::<Person>()).unwrap();
    let names: Vec<_> = catalog.members().iter().map(|m| m.name()).collect();
    assert_eq!(names, ["id", "name", "date"]);
}

pub struct Invoice {
    pub number: Uuid,
    pub total: Decimal,
    pub issued: chrono::NaiveDateTime,
    pub paid: bool,
    pub tags: Vec<String>,
    pub codes: BTreeMap<char, u16>,
}

reflect!(Invoice { number, total, issued, paid, tags, codes });

#[test]
fn test_invoice_stream() {
    let mut codes = BTreeMap::new();
    codes.insert('b', 2u16);
    codes.insert('a', 1u16);
    let invoice = Invoice {
        number: Uuid::from_bytes([0x11; 16]),
        total: Decimal::new(-1234, 2),
        issued: NaiveDate::from_ymd_opt(1, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        paid: true,
        tags: vec!["x".into(), "y".into()],
        codes,
    };

    let mut expected = vec![0x11; 16];
    // -12.34: mantissa 1234, scale 2, sign bit set.
    expected.extend_from_slice(&1234u32.to_le_bytes());
    expected.extend_from_slice(&0u32.to_le_bytes());
    expected.extend_from_slice(&0u32.to_le_bytes());
    expected.extend_from_slice(&((2u32 << 16) | (1 << 31)).to_le_bytes());
    expected.extend_from_slice(&0i64.to_le_bytes());
    expected.push(1);
    expected.extend_from_slice(&[b'x', 0, b'y', 0]);
    // Map entries in key order: key, value, key, value.
    expected.extend_from_slice(&(u32::from('a')).to_le_bytes());
    expected.extend_from_slice(&1u16.to_le_bytes());
    expected.extend_from_slice(&(u32::from('b')).to_le_bytes());
    expected.extend_from_slice(&2u16.to_le_bytes());

    assert_eq!(stream(&invoice), expected);
}

#[test]
fn test_member_override_not_applied_to_elements() {
    let mut hasher = Hasher::new(Recorder::new());
    hasher
        .register_type::<Invoice, _>(|p| {
            p.configure_encoding("tags", StringEncoding::Utf8)?
                .ignore("number")?
                .ignore("total")?
                .ignore("issued")?
                .ignore("paid")?
                .ignore("codes")?;
            Ok(())
        })
        .unwrap();
    let invoice = Invoice {
        number: Uuid::nil(),
        total: Decimal::ZERO,
        issued: NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        paid: false,
        tags: vec!["\u{e9}".into()],
        codes: BTreeMap::new(),
    };
    // Elements keep the hasher default (UTF-16LE).
    let fp = hasher.compute_digest(&invoice).unwrap();
    assert_eq!(fp.as_bytes(), [0xe9, 0x00]);
}

#[test]
fn test_default_encoding_from_config() {
    let config: HasherConfig = serde_json::from_str(r#"{"default_encoding": "utf-32be"}"#).unwrap();
    let mut hasher = Hasher::with_config(Recorder::new(), config).unwrap();
    let fp = hasher.compute_digest("A").unwrap();
    assert_eq!(fp.as_bytes(), [0, 0, 0, b'A']);
}

#[test]
fn test_unknown_member_rejected_at_registration() {
    let mut hasher = Hasher::new(Recorder::new());
    let err = hasher
        .register_type::<Person, _>(|p| {
            p.ignore("age")?;
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, StructHashError::Configuration(_)), "{err}");
    assert!(!hasher.registry().is_registered::<Person>());
}

#[test]
fn test_out_of_range_datetime_rejected() {
    struct Event {
        at: chrono::NaiveDateTime,
    }
    reflect!(Event { at });

    let far = NaiveDate::from_ymd_opt(10_000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let err = compute_digest_static(&Event { at: far }, Recorder::new()).unwrap_err();
    assert!(matches!(err, StructHashError::UnsupportedType { member: Some("at"), .. }));
}

pub struct Link {
    pub v: u8,
    pub next: Option<Box<Link>>,
}

reflect!(Link { v, next });

fn chain(len: usize) -> Link {
    let mut head = Link { v: 0, next: None };
    for i in 1..len {
        head = Link {
            v: i as u8,
            next: Some(Box::new(head)),
        };
    }
    head
}

#[test]
fn test_chain_below_default_depth_fits_default_thread_stack() {
    use structhash_core::config::DEFAULT_MAX_DEPTH;

    let len = DEFAULT_MAX_DEPTH - 1;
    let bytes = std::thread::spawn(move || {
        compute_digest_static(&chain(len), Recorder::new()).map(|fp| fp.len())
    })
    .join()
    .unwrap();
    assert_eq!(bytes, Ok(len));
}

#[test]
fn test_chain_beyond_default_depth_is_rejected() {
    use structhash_core::config::DEFAULT_MAX_DEPTH;

    let err = std::thread::spawn(|| {
        compute_digest_static(&chain(DEFAULT_MAX_DEPTH + 1), Recorder::new()).map(|fp| fp.len())
    })
    .join()
    .unwrap()
    .unwrap_err();
    assert_eq!(
        err,
        StructHashError::DepthLimitExceeded {
            limit: DEFAULT_MAX_DEPTH
        }
    );
}
