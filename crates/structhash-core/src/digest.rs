//! # Digest Accumulator Contract
//!
//! Defines [`DigestAlgorithm`], the incremental byte sink the traversal
//! engine writes canonical bytes into, and [`Fingerprint`], the digest bytes
//! returned to callers.
//!
//! Concrete algorithms live in `structhash-crypto`. An accumulator is
//! single-writer: one computation is one `reset` → many `append` → one
//! `finalize_reset` cycle, and two computations must never interleave on
//! the same instance.

use serde::{Deserialize, Serialize};

/// An incremental digest algorithm.
pub trait DigestAlgorithm {
    /// Algorithm identifier (e.g. `"sha256"`).
    fn name(&self) -> &'static str;

    /// Number of bytes [`finalize_reset`](Self::finalize_reset) returns,
    /// for every input. `None` for sinks whose output length depends on
    /// the input, such as [`Recorder`].
    fn output_len(&self) -> Option<usize>;

    /// Discard any buffered input.
    fn reset(&mut self);

    /// Feed bytes into the running computation.
    fn append(&mut self, bytes: &[u8]);

    /// Produce the digest of everything appended since the last reset, and
    /// reset so the instance can be reused.
    fn finalize_reset(&mut self) -> Vec<u8>;
}

impl<A: DigestAlgorithm + ?Sized> DigestAlgorithm for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn output_len(&self) -> Option<usize> {
        (**self).output_len()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn append(&mut self, bytes: &[u8]) {
        (**self).append(bytes)
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        (**self).finalize_reset()
    }
}

/// Digest bytes of one object graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fingerprint(Vec<u8>);

impl Fingerprint {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Fingerprint> for Vec<u8> {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Accumulator that keeps every appended byte. Finalizing returns the raw
/// stream, which makes the canonical encoding directly observable.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    buffer: Vec<u8>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes appended since the last reset.
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }
}

impl DigestAlgorithm for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn output_len(&self) -> Option<usize> {
        None
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn append(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }
}
