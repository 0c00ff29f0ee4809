//! # Legacy Digests
//!
//! MD5, for matching fingerprints produced by older systems. It is not
//! collision resistant; prefer SHA-2 or BLAKE3 for anything new.

use structhash_core::DigestAlgorithm;

/// MD5 digest length in bytes.
pub const MD5_OUTPUT_LEN: usize = 16;

/// MD5 accumulator. Input is buffered and digested in one pass at
/// finalization.
#[derive(Debug, Clone, Default)]
pub struct Md5 {
    buffer: Vec<u8>,
}

impl Md5 {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DigestAlgorithm for Md5 {
    fn name(&self) -> &'static str {
        "md5"
    }

    fn output_len(&self) -> Option<usize> {
        Some(MD5_OUTPUT_LEN)
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn append(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        let digest = md5::compute(&self.buffer);
        self.buffer.clear();
        digest.0.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_known_vectors() {
        let mut md5 = Md5::new();
        assert_eq!(hex(&md5.finalize_reset()), "d41d8cd98f00b204e9800998ecf8427e");
        md5.append(b"a");
        md5.append(b"bc");
        assert_eq!(hex(&md5.finalize_reset()), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_reset_discards_input() {
        let mut md5 = Md5::new();
        md5.append(b"junk");
        md5.reset();
        md5.append(b"abc");
        assert_eq!(hex(&md5.finalize_reset()), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(md5.output_len(), Some(MD5_OUTPUT_LEN));
    }
}
