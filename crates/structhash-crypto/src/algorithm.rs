//! # Algorithm Selection
//!
//! Names every algorithm this crate provides so that configuration can pick
//! one by string (`"sha256"`, `"blake3"`, ...).

use serde::{Deserialize, Serialize};
use structhash_core::{ConfigurationError, DigestAlgorithm};

use crate::blake::Blake3;
use crate::legacy::Md5;
use crate::sha::{Sha224, Sha256, Sha384, Sha512, Sha512_256};

/// A digest algorithm provided by `structhash-crypto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "sha224")]
    Sha224,
    #[default]
    #[serde(rename = "sha256")]
    Sha256,
    #[serde(rename = "sha384")]
    Sha384,
    #[serde(rename = "sha512")]
    Sha512,
    #[serde(rename = "sha512-256")]
    Sha512_256,
    #[serde(rename = "blake3")]
    Blake3,
    #[serde(rename = "md5")]
    Md5,
}

impl Algorithm {
    /// All provided algorithms.
    pub const ALL: [Algorithm; 7] = [
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha512_256,
        Self::Blake3,
        Self::Md5,
    ];

    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha512_256 => "sha512-256",
            Self::Blake3 => "blake3",
            Self::Md5 => "md5",
        }
    }

    /// Digest length in bytes (BLAKE3 at its default length).
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha224 => 28,
            Self::Sha256 | Self::Sha512_256 | Self::Blake3 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
            Self::Md5 => 16,
        }
    }

    /// A fresh accumulator for this algorithm.
    pub fn build(&self) -> Box<dyn DigestAlgorithm + Send> {
        match self {
            Self::Sha224 => Box::new(Sha224::new()),
            Self::Sha256 => Box::new(Sha256::new()),
            Self::Sha384 => Box::new(Sha384::new()),
            Self::Sha512 => Box::new(Sha512::new()),
            Self::Sha512_256 => Box::new(Sha512_256::new()),
            Self::Blake3 => Box::new(Blake3::new()),
            Self::Md5 => Box::new(Md5::new()),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let normalized = lower.replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized || a.as_str().replace('-', "") == normalized)
            .ok_or_else(|| ConfigurationError::UnknownAlgorithm(s.to_string()))
    }
}
