//! # BLAKE3
//!
//! BLAKE3 is an extendable-output function: the adapter produces 32 bytes
//! by default and any requested length otherwise. Keyed mode binds every
//! digest to a 32-byte key; the key survives resets.

use structhash_core::{ConfigurationError, DigestAlgorithm, Result};

/// Default BLAKE3 output length in bytes.
pub const DEFAULT_OUTPUT_LEN: usize = blake3::OUT_LEN;

/// BLAKE3 accumulator.
#[derive(Debug, Clone)]
pub struct Blake3 {
    hasher: blake3::Hasher,
    output_len: usize,
}

impl Blake3 {
    /// Unkeyed BLAKE3 with a 32-byte output.
    pub fn new() -> Self {
        Self {
            hasher: blake3::Hasher::new(),
            output_len: DEFAULT_OUTPUT_LEN,
        }
    }

    /// Keyed BLAKE3 with a 32-byte output.
    pub fn keyed(key: &[u8; blake3::KEY_LEN]) -> Self {
        Self {
            hasher: blake3::Hasher::new_keyed(key),
            output_len: DEFAULT_OUTPUT_LEN,
        }
    }

    /// Change the output length.
    ///
    /// # Errors
    ///
    /// Rejects a zero length.
    pub fn with_output_len(mut self, output_len: usize) -> Result<Self> {
        if output_len == 0 {
            return Err(ConfigurationError::InvalidOutputLength(output_len).into());
        }
        self.output_len = output_len;
        Ok(self)
    }
}

impl Default for Blake3 {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestAlgorithm for Blake3 {
    fn name(&self) -> &'static str {
        "blake3"
    }

    fn output_len(&self) -> Option<usize> {
        Some(self.output_len)
    }

    fn reset(&mut self) {
        self.hasher.reset();
    }

    fn append(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        let mut out = vec![0u8; self.output_len];
        self.hasher.finalize_xof().fill(&mut out);
        self.hasher.reset();
        out
    }
}
