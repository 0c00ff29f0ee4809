//! # Value Model
//!
//! [`Value`] is the borrowed, type-erased view of a single value that the
//! traversal engine consumes. [`ToValue`] converts a Rust value into that
//! view without copying; sequences are presented lazily through [`Seq`].
//!
//! `HashSet` and `HashMap` intentionally have no `ToValue` implementation:
//! their iteration order is randomized per process, which would make the
//! digest of an otherwise identical graph differ between runs. Use
//! `BTreeSet`/`BTreeMap` (or sort into a `Vec`) for hashed collections.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::reflect::Object;

/// A borrowed value reachable from a hashed object graph.
pub enum Value<'a> {
    /// Absent value. Contributes no bytes.
    Null,
    Bool(bool),
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    U128(u128),
    I128(i128),
    F32(f32),
    F64(f64),
    Char(char),
    /// 96-bit mantissa decimal.
    Decimal(Decimal),
    /// Date-time as wall-clock (naive) or UTC instant.
    DateTime(NaiveDateTime),
    Uuid(Uuid),
    /// Text, encoded with the member's or the hasher's string encoding.
    Text(&'a str),
    /// Ordered elements, each dispatched by its own runtime type.
    Seq(Seq<'a>),
    /// Nested object, traversed member by member.
    Object(&'a dyn Object),
    /// A value type with no canonical encoding. Encoding it is an error.
    Unsupported(&'static str),
}

impl<'a> Value<'a> {
    /// Mark a value of type `T` as having no canonical encoding.
    pub fn unsupported<T: ?Sized>() -> Self {
        Value::Unsupported(std::any::type_name::<T>())
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the value kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::U8(_) => "u8",
            Value::I8(_) => "i8",
            Value::U16(_) => "u16",
            Value::I16(_) => "i16",
            Value::U32(_) => "u32",
            Value::I32(_) => "i32",
            Value::U64(_) => "u64",
            Value::I64(_) => "i64",
            Value::U128(_) => "u128",
            Value::I128(_) => "i128",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Char(_) => "char",
            Value::Decimal(_) => "decimal",
            Value::DateTime(_) => "datetime",
            Value::Uuid(_) => "uuid",
            Value::Text(_) => "text",
            Value::Seq(_) => "seq",
            Value::Object(_) => "object",
            Value::Unsupported(_) => "unsupported",
        }
    }
}

impl std::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => write!(f, "Bool({v})"),
            Value::U8(v) => write!(f, "U8({v})"),
            Value::I8(v) => write!(f, "I8({v})"),
            Value::U16(v) => write!(f, "U16({v})"),
            Value::I16(v) => write!(f, "I16({v})"),
            Value::U32(v) => write!(f, "U32({v})"),
            Value::I32(v) => write!(f, "I32({v})"),
            Value::U64(v) => write!(f, "U64({v})"),
            Value::I64(v) => write!(f, "I64({v})"),
            Value::U128(v) => write!(f, "U128({v})"),
            Value::I128(v) => write!(f, "I128({v})"),
            Value::F32(v) => write!(f, "F32({v})"),
            Value::F64(v) => write!(f, "F64({v})"),
            Value::Char(v) => write!(f, "Char({v:?})"),
            Value::Decimal(v) => write!(f, "Decimal({v})"),
            Value::DateTime(v) => write!(f, "DateTime({v})"),
            Value::Uuid(v) => write!(f, "Uuid({v})"),
            Value::Text(v) => write!(f, "Text({v:?})"),
            Value::Seq(_) => f.write_str("Seq(..)"),
            Value::Object(o) => write!(f, "Object({})", o.object_type().name),
            Value::Unsupported(name) => write!(f, "Unsupported({name})"),
        }
    }
}

/// A lazily evaluated sequence of values.
///
/// A sequence built from a collection should carry that collection as its
/// origin (see [`Seq::identified`]); the traversal engine uses it to report
/// a collection that contains itself as a cycle.
pub struct Seq<'a> {
    items: Box<dyn Iterator<Item = Value<'a>> + 'a>,
    origin: Option<(usize, &'static str)>,
}

impl<'a> Seq<'a> {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value<'a>>,
        I::IntoIter: 'a,
    {
        Seq {
            items: Box::new(items.into_iter()),
            origin: None,
        }
    }

    /// Record the collection this sequence iterates.
    pub fn identified<T: ?Sized>(mut self, origin: &T) -> Self {
        let address = origin as *const T as *const () as usize;
        self.origin = Some((address, std::any::type_name::<T>()));
        self
    }

    /// Address and type name of the originating collection, if recorded.
    pub fn origin(&self) -> Option<(usize, &'static str)> {
        self.origin
    }
}

impl<'a> Iterator for Seq<'a> {
    type Item = Value<'a>;

    fn next(&mut self) -> Option<Value<'a>> {
        self.items.next()
    }
}

/// Conversion into the borrowed [`Value`] view.
pub trait ToValue {
    fn to_value(&self) -> Value<'_>;
}

macro_rules! scalar_to_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value<'_> {
                    Value::$variant(*self)
                }
            }
        )*
    };
}

scalar_to_value! {
    bool => Bool,
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64,
    u128 => U128,
    i128 => I128,
    f32 => F32,
    f64 => F64,
    char => Char,
    Decimal => Decimal,
    NaiveDateTime => DateTime,
    Uuid => Uuid,
}

// Pointer-sized integers hash at a fixed 64-bit width so digests agree
// across targets.
impl ToValue for usize {
    fn to_value(&self) -> Value<'_> {
        Value::U64(*self as u64)
    }
}

impl ToValue for isize {
    fn to_value(&self) -> Value<'_> {
        Value::I64(*self as i64)
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> Value<'_> {
        Value::DateTime(self.naive_utc())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl ToValue for dyn Object {
    fn to_value(&self) -> Value<'_> {
        Value::Object(self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Rc<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::Seq(Seq::new(self.iter().map(ToValue::to_value)).identified(self))
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value<'_> {
        Value::Seq(Seq::new(self.iter().map(ToValue::to_value)).identified(self))
    }
}

impl<T: ToValue> ToValue for LinkedList<T> {
    fn to_value(&self) -> Value<'_> {
        Value::Seq(Seq::new(self.iter().map(ToValue::to_value)).identified(self))
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value<'_> {
        Value::Seq(Seq::new(self.iter().map(ToValue::to_value)).identified(self))
    }
}

/// Entries are presented in key order as `key, value, key, value, ...`.
impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value<'_> {
        Value::Seq(
            Seq::new(self.iter().flat_map(|(k, v)| [k.to_value(), v.to_value()]))
                .identified(self),
        )
    }
}
