//! # Hasher Configuration
//!
//! Settings that apply to every digest a hasher computes. Loadable from any
//! serde format; encodings are written by name (`"utf-8"`, `"utf-16le"`, ...).

use serde::{Deserialize, Serialize};

use crate::encoding::StringEncoding;
use crate::error::{ConfigurationError, Result};

/// Default nesting limit for objects and sequences within one digest.
///
/// Each level costs a few engine stack frames; 256 levels fit a default
/// 2 MiB thread stack in unoptimized builds with room to spare. Raise it
/// only for threads with larger stacks.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Hasher-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct HasherConfig {
    /// Encoding for text values whose member has no override.
    pub default_encoding: StringEncoding,
    /// Maximum number of nested objects and sequences on one traversal path.
    pub max_depth: usize,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            default_encoding: StringEncoding::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl HasherConfig {
    pub fn with_default_encoding(mut self, encoding: StringEncoding) -> Self {
        self.default_encoding = encoding;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Reject settings no traversal could run under.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(ConfigurationError::InvalidDepth.into());
        }
        Ok(())
    }
}
