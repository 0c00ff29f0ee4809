//! # structhash-core — Structural Object-Graph Digests
//!
//! Computes a deterministic digest of an in-memory object graph. Two graphs
//! with equal relevant state produce equal digests in any process; a change
//! to any hashed member changes the digest.
//!
//! ## Pipeline
//!
//! 1. **Member Catalog** ([`catalog`]): each hashable type declares its
//!    members once through [`Reflect`] (usually via [`reflect!`]); the
//!    list is cached per type for the life of the process.
//!
//! 2. **Type Policy Registry** ([`policy`]): per-type member rules, either
//!    ignored or given a string-encoding override. Types without a policy
//!    hash every member with the default encoding.
//!
//! 3. **Value Encoder** ([`encoder`]): canonical little-endian byte rules
//!    for primitives, decimals, date-times, UUIDs and text. Value types
//!    without a rule are rejected, never coerced.
//!
//! 4. **Traversal Engine** ([`engine`]): walks the graph by runtime type,
//!    skips nulls, iterates collections in order, detects cycles, and
//!    streams bytes into a [`DigestAlgorithm`].
//!
//! 5. **Hasher** ([`hasher`]): owns the accumulator and registry; one
//!    reset → traverse → finalize cycle per digest.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Nothing non-deterministic (addresses, hash seeds, clocks) ever reaches
//!   the digest stream.

pub mod catalog;
pub mod config;
pub mod digest;
pub mod encoder;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod policy;
pub mod reflect;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use catalog::{catalog_for, TypeCatalog};
pub use config::HasherConfig;
pub use digest::{DigestAlgorithm, Fingerprint, Recorder};
pub use encoding::StringEncoding;
pub use error::{ConfigurationError, Result, StructHashError};
pub use hasher::{compute_digest_static, Hasher, SharedHasher};
pub use policy::{MemberPolicy, PolicyRegistry, TypePolicy};
pub use reflect::{Accessor, Member, Object, ObjectType, Reflect};
pub use value::{Seq, ToValue, Value};
