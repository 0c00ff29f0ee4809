//! # Member Catalog
//!
//! Per-type member lists, built once from the type's [`Reflect`]
//! declaration and cached for the lifetime of the process. Every hasher
//! shares the cache; rebuilding an entry is idempotent, so concurrent first
//! uses of the same type may both build it and either result is kept.

use std::any::TypeId;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::error::{ConfigurationError, Result};
use crate::reflect::{Member, ObjectType};

/// The ordered members of one type.
#[derive(Debug)]
pub struct TypeCatalog {
    ty: ObjectType,
    members: Vec<Member>,
}

impl TypeCatalog {
    /// Build a catalog from the type's declaration, rejecting duplicate
    /// member names.
    pub fn build(ty: ObjectType) -> Result<Self> {
        let members = (ty.describe)();
        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if !seen.insert(member.name()) {
                return Err(ConfigurationError::DuplicateMember {
                    type_name: ty.name,
                    member: member.name(),
                }
                .into());
            }
        }
        tracing::trace!(type_name = ty.name, members = members.len(), "built member catalog");
        Ok(Self { ty, members })
    }

    /// The type this catalog describes.
    pub fn object_type(&self) -> ObjectType {
        self.ty
    }

    pub fn type_name(&self) -> &'static str {
        self.ty.name
    }

    /// Members in hashing order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Position of the named member.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|m| m.name() == name)
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.position(name).map(|i| &self.members[i])
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

fn cache() -> &'static DashMap<TypeId, Arc<TypeCatalog>> {
    static CACHE: OnceLock<DashMap<TypeId, Arc<TypeCatalog>>> = OnceLock::new();
    CACHE.get_or_init(DashMap::new)
}

/// Cached catalog for `ty`, building it on first use.
pub fn catalog_for(ty: ObjectType) -> Result<Arc<TypeCatalog>> {
    if let Some(hit) = cache().get(&ty.id) {
        return Ok(Arc::clone(hit.value()));
    }
    // Build outside the shard lock: `describe` is user code.
    let built = Arc::new(TypeCatalog::build(ty)?);
    let entry = cache().entry(ty.id).or_insert(built);
    Ok(Arc::clone(entry.value()))
}
