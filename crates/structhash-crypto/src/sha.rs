//! # SHA-2 Family
//!
//! One generic adapter, [`Sha2`], covers every fixed-output SHA-2 variant
//! from the `sha2` crate. Finalization resets the inner state in place, so
//! an adapter is reused across digests without reallocation.

use sha2::digest::FixedOutputReset;
use sha2::Digest;
use structhash_core::DigestAlgorithm;

/// SHA-2 accumulator over the `sha2` core type `D`.
#[derive(Debug, Clone)]
pub struct Sha2<D> {
    name: &'static str,
    inner: D,
}

/// SHA-224 accumulator (28-byte digest).
pub type Sha224 = Sha2<sha2::Sha224>;
/// SHA-256 accumulator (32-byte digest).
pub type Sha256 = Sha2<sha2::Sha256>;
/// SHA-384 accumulator (48-byte digest).
pub type Sha384 = Sha2<sha2::Sha384>;
/// SHA-512 accumulator (64-byte digest).
pub type Sha512 = Sha2<sha2::Sha512>;
/// SHA-512/256 accumulator (32-byte digest).
pub type Sha512_256 = Sha2<sha2::Sha512_256>;

macro_rules! sha2_variant {
    ($($alias:ident => $name:literal),* $(,)?) => {
        $(
            impl $alias {
                pub fn new() -> Self {
                    Self {
                        name: $name,
                        inner: Default::default(),
                    }
                }
            }

            impl Default for $alias {
                fn default() -> Self {
                    Self::new()
                }
            }
        )*
    };
}

sha2_variant! {
    Sha224 => "sha224",
    Sha256 => "sha256",
    Sha384 => "sha384",
    Sha512 => "sha512",
    Sha512_256 => "sha512-256",
}

impl<D> DigestAlgorithm for Sha2<D>
where
    D: Digest + FixedOutputReset,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn output_len(&self) -> Option<usize> {
        Some(<D as Digest>::output_size())
    }

    fn reset(&mut self) {
        Digest::reset(&mut self.inner);
    }

    fn append(&mut self, bytes: &[u8]) {
        Digest::update(&mut self.inner, bytes);
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        Digest::finalize_reset(&mut self.inner).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_sha256_empty_vector() {
        let mut sha = Sha256::new();
        assert_eq!(
            hex(&sha.finalize_reset()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_abc_in_pieces() {
        let mut sha = Sha256::new();
        sha.append(b"a");
        sha.append(b"bc");
        assert_eq!(
            hex(&sha.finalize_reset()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_finalize_resets_state() {
        let mut sha = Sha256::new();
        sha.append(b"abc");
        let first = sha.finalize_reset();
        sha.append(b"abc");
        assert_eq!(sha.finalize_reset(), first);
    }

    #[test]
    fn test_reset_discards_input() {
        let mut sha = Sha512::new();
        sha.append(b"junk");
        sha.reset();
        let mut fresh = Sha512::new();
        assert_eq!(sha.finalize_reset(), fresh.finalize_reset());
    }

    #[test]
    fn test_output_lengths() {
        assert_eq!(Sha224::new().output_len(), Some(28));
        assert_eq!(Sha256::new().output_len(), Some(32));
        assert_eq!(Sha384::new().output_len(), Some(48));
        assert_eq!(Sha512::new().output_len(), Some(64));
        assert_eq!(Sha512_256::new().output_len(), Some(32));
        assert_eq!(Sha384::new().finalize_reset().len(), 48);
    }

    #[test]
    fn test_names() {
        assert_eq!(Sha256::new().name(), "sha256");
        assert_eq!(Sha512_256::new().name(), "sha512-256");
    }
}
