//! # structhash-crypto — Digest Algorithm Adapters
//!
//! Concrete [`DigestAlgorithm`](structhash_core::DigestAlgorithm)
//! implementations for the structural hasher:
//!
//! - **SHA-2** (224, 256, 384, 512, 512/256) through one generic adapter
//!   over the `sha2` crate.
//! - **BLAKE3** with default 32-byte, extended, or truncated output, keyed
//!   or unkeyed.
//! - **MD5** for compatibility with legacy fingerprints only.
//!
//! [`Algorithm`] selects an adapter by name for configuration-driven
//! callers.
//!
//! ## Crate Policy
//!
//! - Depends only on `structhash-core` internally.
//! - No mocking of digest operations in tests; every test runs the real
//!   algorithm.

pub mod algorithm;
pub mod blake;
pub mod legacy;
pub mod sha;

pub use algorithm::Algorithm;
pub use blake::Blake3;
pub use legacy::Md5;
pub use sha::{Sha2, Sha224, Sha256, Sha384, Sha512, Sha512_256};
