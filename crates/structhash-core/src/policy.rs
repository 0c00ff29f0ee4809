//! # Type Policy Registry
//!
//! A [`TypePolicy`] records, for every member of one concrete type, whether
//! the member is hashed and which string encoding overrides the hasher
//! default. A [`PolicyRegistry`] maps types to their policies.
//!
//! Types without a registered policy are hashed with the default policy:
//! every member included, default string encoding. Policies never leak
//! between types, even structurally identical ones.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::{catalog_for, TypeCatalog};
use crate::encoding::StringEncoding;
use crate::error::{ConfigurationError, Result};
use crate::reflect::{Member, ObjectType, Reflect};

/// Hashing policy for one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberPolicy {
    /// Excluded from the digest when set.
    pub ignored: bool,
    /// Encoding used when the member's value is text. Ignored for
    /// non-text values.
    pub encoding: Option<StringEncoding>,
}

/// Member policies for one concrete type, in catalog order.
#[derive(Debug, Clone)]
pub struct TypePolicy {
    catalog: Arc<TypeCatalog>,
    entries: Vec<MemberPolicy>,
}

impl TypePolicy {
    /// Fresh policy with one default entry per catalog member.
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        let entries = vec![MemberPolicy::default(); catalog.len()];
        Self { catalog, entries }
    }

    pub fn type_name(&self) -> &'static str {
        self.catalog.type_name()
    }

    fn entry_mut(&mut self, member: &str) -> Result<&mut MemberPolicy> {
        match self.catalog.position(member) {
            Some(i) => Ok(&mut self.entries[i]),
            None => Err(ConfigurationError::UnknownMember {
                type_name: self.catalog.type_name(),
                member: member.to_string(),
            }
            .into()),
        }
    }

    /// Exclude `member` from the digest.
    pub fn ignore(&mut self, member: &str) -> Result<&mut Self> {
        self.entry_mut(member)?.ignored = true;
        Ok(self)
    }

    /// Include a previously ignored member again.
    pub fn include(&mut self, member: &str) -> Result<&mut Self> {
        self.entry_mut(member)?.ignored = false;
        Ok(self)
    }

    /// Encode `member` with `encoding` whenever its value is text.
    ///
    /// Accepted for members of any declared type; on non-text values the
    /// override is retained but never consulted.
    pub fn configure_encoding(
        &mut self,
        member: &str,
        encoding: StringEncoding,
    ) -> Result<&mut Self> {
        self.entry_mut(member)?.encoding = Some(encoding);
        Ok(self)
    }

    /// Policy of the named member, if the type has it.
    pub fn member_policy(&self, member: &str) -> Option<&MemberPolicy> {
        self.catalog.position(member).map(|i| &self.entries[i])
    }

    /// Members and their policies in hashing order.
    pub fn entries(&self) -> impl Iterator<Item = (&Member, &MemberPolicy)> {
        self.catalog.members().iter().zip(&self.entries)
    }
}

/// Registry of type policies owned by one hasher.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    policies: HashMap<TypeId, TypePolicy>,
}

impl PolicyRegistry {
    /// An empty registry: every type uses the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and store a policy for `T`.
    ///
    /// The policy starts with every member included and no encoding
    /// overrides; `configure` adjusts it. A previous policy for `T` is
    /// replaced wholesale, but only if `configure` succeeds.
    pub fn register<T, F>(&mut self, configure: F) -> Result<()>
    where
        T: Reflect,
        F: FnOnce(&mut TypePolicy) -> Result<()>,
    {
        let ty = ObjectType::of::<T>();
        let mut policy = TypePolicy::new(catalog_for(ty)?);
        configure(&mut policy)?;
        let ignored = policy.entries.iter().filter(|p| p.ignored).count();
        tracing::debug!(type_name = ty.name, ignored, "registered type policy");
        self.policies.insert(ty.id, policy);
        Ok(())
    }

    /// Policy registered for the type with id `type_id`.
    pub fn lookup(&self, type_id: TypeId) -> Option<&TypePolicy> {
        self.policies.get(&type_id)
    }

    pub fn is_registered<T: Reflect>(&self) -> bool {
        self.policies.contains_key(&TypeId::of::<T>())
    }

    /// Drop the policy for `T`, returning it. `T` falls back to the
    /// default policy afterwards.
    pub fn unregister<T: Reflect>(&mut self) -> Option<TypePolicy> {
        self.policies.remove(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn clear(&mut self) {
        self.policies.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StructHashError;

    struct Person {
        id: u32,
        name: String,
    }

    crate::reflect!(Person { id, name });

    struct Twin {
        id: u32,
        name: String,
    }

    crate::reflect!(Twin { id, name });

    #[test]
    fn test_unregistered_type_has_no_policy() {
        let registry = PolicyRegistry::new();
        assert!(registry.lookup(TypeId::of::<Person>()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_seeds_defaults() {
        let mut registry = PolicyRegistry::new();
        registry.register::<Person, _>(|_| Ok(())).unwrap();
        let policy = registry.lookup(TypeId::of::<Person>()).unwrap();
        let entries: Vec<_> = policy.entries().map(|(m, p)| (m.name(), *p)).collect();
        assert_eq!(
            entries,
            [("id", MemberPolicy::default()), ("name", MemberPolicy::default())]
        );
    }

    #[test]
    fn test_ignore_and_encoding_chain() {
        let mut registry = PolicyRegistry::new();
        registry
            .register::<Person, _>(|p| {
                p.ignore("id")?
                    .configure_encoding("name", StringEncoding::Utf8)?;
                Ok(())
            })
            .unwrap();
        let policy = registry.lookup(TypeId::of::<Person>()).unwrap();
        assert!(policy.member_policy("id").unwrap().ignored);
        assert_eq!(
            policy.member_policy("name").unwrap().encoding,
            Some(StringEncoding::Utf8)
        );
    }

    #[test]
    fn test_include_reverses_ignore() {
        let mut registry = PolicyRegistry::new();
        registry
            .register::<Person, _>(|p| {
                p.ignore("id")?.include("id")?;
                Ok(())
            })
            .unwrap();
        let policy = registry.lookup(TypeId::of::<Person>()).unwrap();
        assert!(!policy.member_policy("id").unwrap().ignored);
    }

    #[test]
    fn test_encoding_on_non_text_member_is_retained() {
        let mut registry = PolicyRegistry::new();
        registry
            .register::<Person, _>(|p| {
                p.configure_encoding("id", StringEncoding::Ascii)?;
                Ok(())
            })
            .unwrap();
        let policy = registry.lookup(TypeId::of::<Person>()).unwrap();
        assert_eq!(
            policy.member_policy("id").unwrap().encoding,
            Some(StringEncoding::Ascii)
        );
    }

    #[test]
    fn test_unknown_member_is_configuration_error() {
        let mut registry = PolicyRegistry::new();
        let err = registry
            .register::<Person, _>(|p| {
                p.ignore("email")?;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(
            err,
            StructHashError::Configuration(ConfigurationError::UnknownMember {
                type_name: std::any::type_name::<Person>(),
                member: "email".into(),
            })
        );
        assert!(!registry.is_registered::<Person>());
    }

    #[test]
    fn test_failed_reregistration_keeps_previous_policy() {
        let mut registry = PolicyRegistry::new();
        registry
            .register::<Person, _>(|p| {
                p.ignore("id")?;
                Ok(())
            })
            .unwrap();
        assert!(registry
            .register::<Person, _>(|p| {
                p.ignore("nope")?;
                Ok(())
            })
            .is_err());
        let policy = registry.lookup(TypeId::of::<Person>()).unwrap();
        assert!(policy.member_policy("id").unwrap().ignored);
    }

    #[test]
    fn test_reregistration_replaces_wholesale() {
        let mut registry = PolicyRegistry::new();
        registry
            .register::<Person, _>(|p| {
                p.ignore("id")?;
                Ok(())
            })
            .unwrap();
        registry
            .register::<Person, _>(|p| {
                p.configure_encoding("name", StringEncoding::Utf8)?;
                Ok(())
            })
            .unwrap();
        let policy = registry.lookup(TypeId::of::<Person>()).unwrap();
        assert!(!policy.member_policy("id").unwrap().ignored);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_policies_are_isolated_per_type() {
        let mut registry = PolicyRegistry::new();
        registry
            .register::<Person, _>(|p| {
                p.ignore("id")?;
                Ok(())
            })
            .unwrap();
        assert!(registry.is_registered::<Person>());
        assert!(!registry.is_registered::<Twin>());
        assert!(registry.lookup(TypeId::of::<Twin>()).is_none());
    }

    #[test]
    fn test_unregister_and_clear() {
        let mut registry = PolicyRegistry::new();
        registry.register::<Person, _>(|_| Ok(())).unwrap();
        registry.register::<Twin, _>(|_| Ok(())).unwrap();
        assert!(registry.unregister::<Person>().is_some());
        assert!(!registry.is_registered::<Person>());
        registry.clear();
        assert!(registry.is_empty());
    }
}
