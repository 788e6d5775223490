use thiserror::Error;

use crate::fields::TypeIdent;

// -----------------------------------------------------------------------------
// ConfigError

/// A composite type's field declarations cannot produce a valid field set.
///
/// This is a mistake in the type definition, not in the data: the same type
/// fails the same way on every call, and nothing is cached for it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("duplicated key `{key}` in struct `{owner}`")]
    DuplicateKey { key: String, owner: TypeIdent },

    #[error("unsupported field flag `{flag}` on field `{field}` of struct `{owner}`")]
    UnsupportedFlag {
        flag: char,
        field: String,
        owner: TypeIdent,
    },
}

// -----------------------------------------------------------------------------
// ParseError

/// The input bytes are not a well-formed document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    // 1-based `(line, column)`.
    location: Option<(usize, usize)>,
}

impl ParseError {
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Attaches the 1-based `(line, column)` the parser stopped at.
    #[inline]
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.location = Some((line, column));
        self
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the `(line, column)` of the error, if the parser reported one.
    #[inline]
    pub fn location(&self) -> Option<(usize, usize)> {
        self.location
    }
}

// -----------------------------------------------------------------------------
// DecodeError

/// Why a node could not be stored into its target.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    #[error("cannot decode {found} into {expected}")]
    Mismatch {
        expected: &'static str,
        found: String,
    },

    #[error("value `{value}` is out of range")]
    OutOfRange { value: String },
}

/// A node of the tree is incompatible with the type it is decoded into.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} (target `{type_name}` at `{path}`)")]
pub struct DecodeError {
    pub path: String,
    pub type_name: &'static str,
    pub kind: DecodeErrorKind,
}

// -----------------------------------------------------------------------------
// EncodeError

/// A value could not be turned into a node, or the tree could not be rendered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    #[error("invalid tag `{tag}` at `{path}`")]
    InvalidTag { tag: String, path: String },

    #[error("cannot render document: {0}")]
    Render(String),
}

// -----------------------------------------------------------------------------
// Error

/// The single error type returned by the entry points.
///
/// Internal invariant violations are not represented here: they panic and
/// unwind through the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
