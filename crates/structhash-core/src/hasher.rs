//! # Hasher
//!
//! Owns one digest accumulator, one policy registry and one configuration.
//! `compute_digest` takes `&mut self`, so a hasher runs at most one
//! computation at a time and its registry cannot change mid-computation.
//! [`SharedHasher`] serializes access for callers that need a shared handle.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::HasherConfig;
use crate::digest::{DigestAlgorithm, Fingerprint};
use crate::engine::Traversal;
use crate::error::Result;
use crate::policy::{PolicyRegistry, TypePolicy};
use crate::reflect::Reflect;
use crate::value::ToValue;

/// Computes structural digests with one algorithm and one set of type
/// policies.
#[derive(Debug)]
pub struct Hasher<A: DigestAlgorithm> {
    algorithm: A,
    registry: PolicyRegistry,
    config: HasherConfig,
}

impl<A: DigestAlgorithm> Hasher<A> {
    /// Hasher with the default configuration and no type policies.
    pub fn new(algorithm: A) -> Self {
        Self {
            algorithm,
            registry: PolicyRegistry::new(),
            config: HasherConfig::default(),
        }
    }

    /// Hasher with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn with_config(algorithm: A, config: HasherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            algorithm,
            registry: PolicyRegistry::new(),
            config,
        })
    }

    /// Register the hashing policy for `T`, replacing any previous one.
    ///
    /// ```
    /// # use structhash_core::{reflect, Hasher, Recorder, StringEncoding};
    /// struct User { id: u64, name: String }
    /// reflect!(User { id, name });
    ///
    /// let mut hasher = Hasher::new(Recorder::new());
    /// hasher.register_type::<User, _>(|p| {
    ///     p.ignore("id")?.configure_encoding("name", StringEncoding::Utf8)?;
    ///     Ok(())
    /// })?;
    /// let bytes = hasher.compute_digest(&User { id: 9, name: "Eve".into() })?;
    /// assert_eq!(bytes.as_bytes(), b"Eve");
    /// # Ok::<(), structhash_core::StructHashError>(())
    /// ```
    pub fn register_type<T, F>(&mut self, configure: F) -> Result<()>
    where
        T: Reflect,
        F: FnOnce(&mut TypePolicy) -> Result<()>,
    {
        self.registry.register::<T, F>(configure)
    }

    /// Digest `value` using this hasher's registry and accumulator.
    ///
    /// # Errors
    ///
    /// Fails on a null root, a value without canonical encoding, a cycle,
    /// or excessive nesting. The accumulator is reset either way.
    pub fn compute_digest<T: ToValue + ?Sized>(&mut self, value: &T) -> Result<Fingerprint> {
        digest_with(&mut self.algorithm, &self.registry, &self.config, value)
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PolicyRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Wrap in a cloneable, lock-guarded handle.
    pub fn into_shared(self) -> SharedHasher<A> {
        SharedHasher {
            inner: Arc::new(Mutex::new(self)),
        }
    }
}

/// Digest `value` with an empty registry and default configuration.
///
/// The caller hands over `algorithm`, so no other computation can share it;
/// policies registered on any [`Hasher`] have no effect here.
pub fn compute_digest_static<T, A>(value: &T, mut algorithm: A) -> Result<Fingerprint>
where
    T: ToValue + ?Sized,
    A: DigestAlgorithm,
{
    digest_with(
        &mut algorithm,
        &PolicyRegistry::new(),
        &HasherConfig::default(),
        value,
    )
}

fn digest_with<T, A>(
    algorithm: &mut A,
    registry: &PolicyRegistry,
    config: &HasherConfig,
    value: &T,
) -> Result<Fingerprint>
where
    T: ToValue + ?Sized,
    A: DigestAlgorithm + ?Sized,
{
    algorithm.reset();
    let mut traversal = Traversal::new(registry, config, algorithm);
    let outcome = traversal.encode_root(value.to_value());
    let appended = traversal.bytes_appended();
    match outcome {
        Ok(()) => {
            let bytes = algorithm.finalize_reset();
            tracing::debug!(
                algorithm = algorithm.name(),
                appended,
                output_len = bytes.len(),
                "computed structural digest"
            );
            Ok(Fingerprint::new(bytes))
        }
        Err(e) => {
            algorithm.reset();
            tracing::warn!(algorithm = algorithm.name(), appended, error = %e, "structural digest aborted");
            Err(e)
        }
    }
}

/// A [`Hasher`] behind a mutex. Clones share the same hasher; computations
/// and registrations are serialized.
#[derive(Debug)]
pub struct SharedHasher<A: DigestAlgorithm> {
    inner: Arc<Mutex<Hasher<A>>>,
}

impl<A: DigestAlgorithm> Clone for SharedHasher<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: DigestAlgorithm> SharedHasher<A> {
    pub fn new(hasher: Hasher<A>) -> Self {
        hasher.into_shared()
    }

    pub fn register_type<T, F>(&self, configure: F) -> Result<()>
    where
        T: Reflect,
        F: FnOnce(&mut TypePolicy) -> Result<()>,
    {
        self.inner.lock().register_type::<T, F>(configure)
    }

    pub fn compute_digest<T: ToValue + ?Sized>(&self, value: &T) -> Result<Fingerprint> {
        self.inner.lock().compute_digest(value)
    }

    /// Run `f` with exclusive access to the underlying hasher.
    pub fn with<R>(&self, f: impl FnOnce(&mut Hasher<A>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
