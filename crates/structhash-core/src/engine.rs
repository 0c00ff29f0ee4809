//! # Traversal Engine
//!
//! Walks an object graph and streams its canonical encoding into a digest
//! accumulator, strictly left to right:
//!
//! - Objects are traversed member by member in catalog order. The policy is
//!   looked up by the object's runtime type once per object; without one,
//!   every member is hashed with the default encoding.
//! - Null members and null sequence elements contribute no bytes.
//! - Each sequence element is dispatched as a value of its own runtime type,
//!   with the default encoding.
//! - An object, or a collection that records its origin, reached again while
//!   still on the current traversal path closes a cycle and aborts the
//!   computation. Values shared between siblings are hashed every time they
//!   are reached.
//! - Nested objects and nested sequences both count toward `max_depth`.
//!
//! The engine never resets or finalizes the accumulator; that is the
//! caller's job.

use std::any::{Any, TypeId};
use std::collections::HashSet;

use crate::catalog::catalog_for;
use crate::config::HasherConfig;
use crate::digest::DigestAlgorithm;
use crate::encoder::{self, Step};
use crate::encoding::StringEncoding;
use crate::error::{Result, StructHashError};
use crate::policy::PolicyRegistry;
use crate::reflect::Object;
use crate::value::{Seq, Value};

/// Identity of a value on the traversal path. The type separates a struct
/// or collection from a first element that shares its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Identity {
    Object(usize, TypeId),
    Seq(usize, &'static str),
}

/// One top-level traversal.
pub struct Traversal<'r, A: DigestAlgorithm + ?Sized> {
    registry: &'r PolicyRegistry,
    config: &'r HasherConfig,
    sink: &'r mut A,
    in_progress: HashSet<Identity>,
    depth: usize,
    scratch: Vec<u8>,
    appended: u64,
}

impl<'r, A: DigestAlgorithm + ?Sized> Traversal<'r, A> {
    pub fn new(registry: &'r PolicyRegistry, config: &'r HasherConfig, sink: &'r mut A) -> Self {
        Self {
            registry,
            config,
            sink,
            in_progress: HashSet::new(),
            depth: 0,
            scratch: Vec::with_capacity(64),
            appended: 0,
        }
    }

    /// Number of bytes written to the accumulator so far.
    pub fn bytes_appended(&self) -> u64 {
        self.appended
    }

    /// Encode a root value. A null root is an error.
    pub fn encode_root(&mut self, root: Value<'_>) -> Result<()> {
        if root.is_null() {
            return Err(StructHashError::NullRoot);
        }
        self.dispatch(root, self.config.default_encoding)
    }

    fn dispatch(&mut self, value: Value<'_>, text: StringEncoding) -> Result<()> {
        self.scratch.clear();
        match encoder::encode(value, text, &mut self.scratch)? {
            Step::Emit => {
                self.sink.append(&self.scratch);
                self.appended += self.scratch.len() as u64;
            }
            Step::Skip => {}
            Step::Recurse(object) => self.object(object)?,
            Step::Iterate(items) => self.sequence(items)?,
        }
        Ok(())
    }

    fn descend(&mut self) -> Result<()> {
        if self.depth >= self.config.max_depth {
            return Err(StructHashError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn sequence(&mut self, items: Seq<'_>) -> Result<()> {
        self.descend()?;
        let origin = items.origin();
        if let Some((address, type_name)) = origin {
            if !self.in_progress.insert(Identity::Seq(address, type_name)) {
                return Err(StructHashError::CyclicGraph { type_name });
            }
        }

        for item in items {
            if !item.is_null() {
                self.dispatch(item, self.config.default_encoding)?;
            }
        }

        if let Some((address, type_name)) = origin {
            self.in_progress.remove(&Identity::Seq(address, type_name));
        }
        self.depth -= 1;
        Ok(())
    }

    fn object(&mut self, object: &dyn Object) -> Result<()> {
        let ty = object.object_type();
        self.descend()?;
        let any = object.as_any();
        let identity = Identity::Object(any as *const dyn Any as *const () as usize, ty.id);
        if !self.in_progress.insert(identity) {
            return Err(StructHashError::CyclicGraph { type_name: ty.name });
        }

        let registry = self.registry;
        match registry.lookup(ty.id) {
            Some(policy) => {
                for (member, rule) in policy.entries() {
                    if rule.ignored {
                        continue;
                    }
                    let text = rule.encoding.unwrap_or(self.config.default_encoding);
                    self.member(member.name(), member.read(any), text)?;
                }
            }
            None => {
                let catalog = catalog_for(ty)?;
                for member in catalog.members() {
                    self.member(member.name(), member.read(any), self.config.default_encoding)?;
                }
            }
        }

        self.depth -= 1;
        self.in_progress.remove(&identity);
        Ok(())
    }

    fn member(&mut self, name: &'static str, value: Value<'_>, text: StringEncoding) -> Result<()> {
        if value.is_null() {
            return Ok(());
        }
        self.dispatch(value, text).map_err(|e| e.in_member(name))
    }
}
