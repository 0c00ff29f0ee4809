//! # Member Declaration
//!
//! Rust has no runtime introspection, so hashable types declare their
//! members up front. A member is a name, the declared type of the member,
//! and an accessor that reads the member out of a type-erased object.
//!
//! Declarations are gathered once per type by the
//! [`catalog`](crate::catalog) and reused for every digest.
//!
//! ## Declaring members
//!
//! The [`reflect!`](crate::reflect!) macro covers plain structs:
//!
//! ```
//! use structhash_core::reflect;
//!
//! pub struct Account {
//!     pub id: u64,
//!     pub owner: String,
//!     pub tags: Vec<String>,
//! }
//!
//! reflect!(Account { id, owner, tags });
//! ```
//!
//! Types that need computed members implement [`Reflect`] by hand with
//! [`Member::new`] and also implement [`ToValue`](crate::ToValue) returning
//! [`Value::Object`].

use std::any::{Any, TypeId};

use crate::value::Value;

/// Reads one member out of a type-erased object.
///
/// The accessor is only ever invoked with the type it was declared for;
/// accessors generated by [`reflect!`](crate::reflect!) return
/// [`Value::Null`] for any other type.
pub type Accessor = for<'a> fn(&'a dyn Any) -> Value<'a>;

/// A named, readable member of a hashable type.
#[derive(Clone, Copy)]
pub struct Member {
    name: &'static str,
    type_name: &'static str,
    read: Accessor,
}

impl Member {
    /// Declare a member.
    pub const fn new(name: &'static str, type_name: &'static str, read: Accessor) -> Self {
        Self {
            name,
            type_name,
            read,
        }
    }

    /// Member name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type of the member.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Read the member from `object`.
    pub fn read<'a>(&self, object: &'a dyn Any) -> Value<'a> {
        (self.read)(object)
    }
}

impl std::fmt::Debug for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// A type whose members participate in structural hashing.
pub trait Reflect: Any {
    /// The type's members in a fixed order.
    ///
    /// Called at most a handful of times per process; the result is cached.
    /// The order is part of the digest: reordering members changes every
    /// digest of the type.
    fn members() -> Vec<Member>
    where
        Self: Sized;
}

/// Runtime identity of a reflected type.
#[derive(Debug, Clone, Copy)]
pub struct ObjectType {
    /// `TypeId` of the concrete type.
    pub id: TypeId,
    /// `std::any::type_name` of the concrete type.
    pub name: &'static str,
    /// Produces the type's member list.
    pub describe: fn() -> Vec<Member>,
}

impl ObjectType {
    /// Identity of `T`.
    pub fn of<T: Reflect>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            describe: T::members,
        }
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ObjectType {}

/// Object-safe view of a [`Reflect`] type.
///
/// Blanket-implemented for every `Reflect` type. `dyn Object` is how
/// polymorphic members are expressed: a `Box<dyn Object>` member is
/// hashed according to the concrete type it holds.
pub trait Object: Any {
    /// Runtime type of this object.
    fn object_type(&self) -> ObjectType;

    /// Upcast for member accessors.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Reflect> Object for T {
    fn object_type(&self) -> ObjectType {
        ObjectType::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[doc(hidden)]
pub fn field_type_name<T, F, G>(_project: G) -> &'static str
where
    F: ?Sized,
    G: Fn(&T) -> &F,
{
    std::any::type_name::<F>()
}

/// Implement [`Reflect`] and [`ToValue`](crate::ToValue) for a struct by
/// listing the fields that participate in hashing, in hashing order.
///
/// Every listed field must implement [`ToValue`](crate::ToValue). Fields
/// not listed are invisible to the digest.
#[macro_export]
macro_rules! reflect {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn members() -> ::std::vec::Vec<$crate::Member> {
                ::std::vec![$(
                    $crate::Member::new(
                        ::std::stringify!($field),
                        $crate::reflect::field_type_name(|this: &$ty| &this.$field),
                        {
                            fn read(object: &dyn ::std::any::Any) -> $crate::Value<'_> {
                                match object.downcast_ref::<$ty>() {
                                    ::std::option::Option::Some(this) => {
                                        $crate::ToValue::to_value(&this.$field)
                                    }
                                    ::std::option::Option::None => $crate::Value::Null,
                                }
                            }
                            read
                        },
                    )
                ),*]
            }
        }

        impl $crate::ToValue for $ty {
            fn to_value(&self) -> $crate::Value<'_> {
                $crate::Value::Object(self)
            }
        }
    };
}
