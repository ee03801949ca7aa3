//! Error taxonomy, one enum per layer.

use std::string::FromUtf8Error;

use thiserror::Error;

use crate::types::{Direction, TransformId};

/// A recipe name broke the length or character rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Zero-length name.
    #[error("recipe name is empty")]
    Empty,
    /// More characters than allowed.
    #[error("recipe name is {len} characters, limit is {max}")]
    TooLong {
        /// Actual length in characters.
        len: usize,
        /// Allowed maximum.
        max: usize,
    },
    /// Contains a path separator or NUL.
    #[error("recipe name contains forbidden character {0:?}")]
    ForbiddenChar(char),
}

/// A transform identifier outside the closed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transform {0:?}")]
pub struct UnknownTransform(pub String);

/// Reason a single forward/inverse function refused its input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// Input is not strict standard Base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Input is not an even-length run of hex digits.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    /// Decoded bytes are not valid UTF-8 text.
    #[error("decoded bytes are not utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    /// A `%` not followed by two hex digits.
    #[error("malformed percent escape at byte {offset}")]
    PercentEscape {
        /// Byte offset of the `%`.
        offset: usize,
    },
    /// Text outside a `\xhh` group.
    #[error("malformed \\x escape at byte {offset}")]
    ByteEscape {
        /// Byte offset of the offending group.
        offset: usize,
    },
    /// A hex dump line that does not follow the canonical layout.
    #[error("malformed hex dump line {line}: {reason}")]
    DumpLine {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: &'static str,
    },
}

/// A step failed while evaluating a pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("step {position} ({transform} {direction:?}) failed: {source}")]
pub struct StepFailure {
    /// 1-based index of the failing step.
    pub position: usize,
    /// Transform the step referenced.
    pub transform: TransformId,
    /// Direction the step ran in.
    pub direction: Direction,
    /// Underlying transform error.
    pub source: TransformError,
}

/// Invalid position passed to the step editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Position outside `[1, len]` for the list it addresses.
    #[error("step position {position} is out of range 1..={len}")]
    OutOfRange {
        /// Requested 1-based position.
        position: usize,
        /// Length of the list the position was checked against.
        len: usize,
    },
}

/// Why an untrusted record was refused at the trust boundary.
///
/// Every variant means the whole record was discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionReason {
    /// Not parseable as the encoding at all.
    #[error("record is malformed: {0}")]
    Malformed(String),
    /// Parseable, but fields are missing, extra, duplicated or mistyped.
    #[error("record does not match the recipe schema: {0}")]
    SchemaViolation(String),
    /// Envelope version this build does not understand.
    #[error("unsupported recipe format version {0}")]
    UnsupportedVersion(u16),
    /// A step references a transform outside the catalog.
    #[error("record references {0}")]
    UnknownTransform(#[from] UnknownTransform),
    /// Embedded name differs from the identity the record arrived under.
    #[error("record claims to be {embedded:?} but arrived as {claimed:?}")]
    IdentityMismatch {
        /// Identity implied by the import context.
        claimed: String,
        /// Name stored inside the record.
        embedded: String,
    },
    /// Embedded name breaks the name rules.
    #[error("record name is invalid: {0}")]
    InvariantViolation(#[from] NameError),
}

/// Durable store failure.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// SQLite failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Encoding a record failed.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<tempfile::PersistError> for PersistError {
    fn from(value: tempfile::PersistError) -> Self {
        Self::Io(value.error)
    }
}

/// Result alias for store operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file unreadable.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid TOML for [`crate::config::CellarConfig`].
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Error returned by [`crate::service::Cellar`] operations.
#[derive(Debug, Error)]
pub enum CellarError {
    /// Name failed validation.
    #[error(transparent)]
    Name(#[from] NameError),
    /// Outer layer referenced a transform or method that does not exist.
    #[error(transparent)]
    UnknownTransform(#[from] UnknownTransform),
    /// Step editor position error; the recipe was left unmodified.
    #[error(transparent)]
    Edit(#[from] EditError),
    /// Import refused at the trust boundary.
    #[error("import rejected: {0}")]
    Rejected(#[from] RejectionReason),
    /// A stored record no longer passes validation.
    #[error("stored recipe {name:?} is corrupt: {reason}")]
    Corrupt {
        /// Key of the corrupt record.
        name: String,
        /// Validation failure.
        reason: RejectionReason,
    },
    /// Durable store failure.
    #[error(transparent)]
    Persist(#[from] PersistError),
    /// Session was flagged by an earlier rejected import.
    #[error("session is flagged")]
    Flagged,
    /// Uploaded filename cannot name a recipe.
    #[error("the filename of the recipe is not valid: {0:?}")]
    BadFilename(String),
    /// Uploaded filename has the wrong extension.
    #[error("expected extension {expected:?}, found {found:?}")]
    WrongExtension {
        /// Configured extension without the dot.
        expected: String,
        /// Extension of the upload.
        found: String,
    },
    /// Upload larger than the configured limit.
    #[error("recipe is {len} bytes, limit is {max}")]
    TooLarge {
        /// Upload size.
        len: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl CellarError {
    /// True when the error came from the trust boundary and the submitting
    /// session should be flagged.
    pub fn is_rejection(&self) -> bool {
        matches!(self, CellarError::Rejected(_))
    }
}

/// Result alias for facade operations.
pub type CellarResult<T> = Result<T, CellarError>;
