//! # Error Types
//!
//! Every failure is fatal to the digest computation in flight: the hasher
//! resets its accumulator and surfaces the error, so a caller never receives
//! a digest computed over a partial byte stream.
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T, E = StructHashError> = std::result::Result<T, E>;

/// Top-level error type for structural hashing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructHashError {
    /// The root value handed to the hasher was null (e.g. `None`).
    #[error("cannot digest a null root value")]
    NullRoot,

    /// A value has no canonical byte encoding.
    ///
    /// Raised instead of coercing the value to some numeric approximation.
    #[error("no canonical encoding for type `{type_name}`{}", member_suffix(.member))]
    UnsupportedType {
        /// Runtime type name of the offending value.
        type_name: &'static str,
        /// Member through which the value was reached, if any.
        member: Option<&'static str>,
    },

    /// Policy or hasher configuration is invalid.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// An object was reached again while it was still being traversed.
    #[error("cyclic object graph: `{type_name}` references itself through its members")]
    CyclicGraph {
        /// Type of the object that closed the cycle.
        type_name: &'static str,
    },

    /// Object nesting went deeper than the configured limit.
    #[error("object graph nesting exceeds the configured limit of {limit}")]
    DepthLimitExceeded {
        /// The `max_depth` in force for the computation.
        limit: usize,
    },
}

impl StructHashError {
    /// Attach the member name through which an unsupported value was reached.
    ///
    /// Only the innermost member is recorded; errors that already carry a
    /// member are returned unchanged.
    pub fn in_member(self, name: &'static str) -> Self {
        match self {
            Self::UnsupportedType {
                type_name,
                member: None,
            } => Self::UnsupportedType {
                type_name,
                member: Some(name),
            },
            other => other,
        }
    }
}

fn member_suffix(member: &Option<&'static str>) -> String {
    match member {
        Some(name) => format!(" (member `{name}`)"),
        None => String::new(),
    }
}

/// Error raised while building catalogs, mutating type policies, or
/// validating hasher configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A policy mutation named a member the type does not expose.
    #[error("type `{type_name}` has no member named `{member}`")]
    UnknownMember {
        /// Type whose policy was being mutated.
        type_name: &'static str,
        /// The member name that could not be resolved.
        member: String,
    },

    /// A type declared two members with the same name.
    #[error("type `{type_name}` declares member `{member}` more than once")]
    DuplicateMember {
        /// Type whose member list is malformed.
        type_name: &'static str,
        /// The repeated member name.
        member: &'static str,
    },

    /// A string encoding name was not recognised.
    #[error("unknown string encoding `{0}`")]
    UnknownEncoding(String),

    /// A digest algorithm name was not recognised.
    #[error("unknown digest algorithm `{0}`")]
    UnknownAlgorithm(String),

    /// `max_depth` must allow at least the root object.
    #[error("max_depth must be at least 1")]
    InvalidDepth,

    /// Variable-length digests need at least one output byte.
    #[error("digest output length must be at least 1 byte, got {0}")]
    InvalidOutputLength(usize),
}
