use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::descriptor::Field;

/// Errors raised while building descriptor tables or generating sources.
#[derive(Debug, Error)]
pub enum GenError {
    /// A class name has no entry in the descriptor table.
    #[error("unknown type: {class_name}")]
    UnknownType { class_name: String },

    /// A default token expected in the master text is absent.
    #[error("missing {kind} token {token:?} in master text (generating {class_name})")]
    MissingToken {
        class_name: String,
        kind: TokenKind,
        token: String,
    },

    /// The master file could not be read as text.
    #[error("malformed input {path}: {reason}")]
    MalformedInput { path: PathBuf, reason: String },

    /// A descriptor field is empty.
    #[error("invalid descriptor: {field} must not be empty")]
    InvalidDescriptor { field: Field },

    /// The same class name was registered twice.
    #[error("duplicate type: {class_name}")]
    DuplicateType { class_name: String },

    /// Two rules share a matcher but disagree on the replacement.
    #[error("conflicting replacements for token {token:?}: {first:?} vs {second:?}")]
    ConflictingTokens {
        token: String,
        first: String,
        second: String,
    },

    /// A substitution rule cannot be compiled.
    #[error("invalid rule: {message}")]
    InvalidRule { message: String },

    /// A target resolves to the hand-maintained default class.
    #[error("refusing to regenerate default class {class_name}")]
    SelfGeneration { class_name: String },

    /// An output file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which part of the default type a missing token stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// The default class identifier.
    ClassName,
    Field(Field),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::ClassName => f.write_str("class name"),
            TokenKind::Field(field) => fmt::Display::fmt(field, f),
        }
    }
}

impl GenError {
    pub fn missing_token(class_name: &str, kind: TokenKind, token: &str) -> Self {
        Self::MissingToken {
            class_name: class_name.to_string(),
            kind,
            token: token.to_string(),
        }
    }

    pub fn unknown_type(class_name: &str) -> Self {
        Self::UnknownType {
            class_name: class_name.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
