//! Shared primitive types: transform ids, directions and validated names.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{NameError, UnknownTransform};

/// Maximum recipe name length in characters.
pub const MAX_NAME_LEN: usize = 40;

/// Characters a recipe name may never contain.
pub const FORBIDDEN_NAME_CHARS: [char; 3] = ['/', '\\', '\0'];

/// Closed set of transforms known at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransformId {
    /// Standard padded Base64.
    Base64,
    /// `0x`-prefixed lowercase hex.
    Hex,
    /// Canonical 16-byte-per-line hex dump.
    HexDump,
    /// Form-style percent encoding.
    Url,
    /// `\xhh` byte escapes.
    Unicode,
}

impl TransformId {
    /// Every id, in catalog order.
    pub const ALL: [TransformId; 5] = [
        TransformId::Base64,
        TransformId::Hex,
        TransformId::HexDump,
        TransformId::Url,
        TransformId::Unicode,
    ];

    /// Stable wire identifier.
    pub fn slug(self) -> &'static str {
        match self {
            TransformId::Base64 => "base64",
            TransformId::Hex => "hex",
            TransformId::HexDump => "hexdump",
            TransformId::Url => "url",
            TransformId::Unicode => "unicode",
        }
    }
}

impl fmt::Display for TransformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for TransformId {
    type Err = UnknownTransform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransformId::ALL
            .into_iter()
            .find(|id| id.slug() == s)
            .ok_or_else(|| UnknownTransform(s.to_string()))
    }
}

/// Which half of a transform pair a step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Encode-style half.
    Forward,
    /// Decode-style half.
    Inverse,
}

impl Direction {
    /// The opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Direction::Forward => Direction::Inverse,
            Direction::Inverse => Direction::Forward,
        }
    }
}

/// Recipe identifier, also used as the durable storage key.
///
/// Always 1..=[`MAX_NAME_LEN`] characters with none of
/// [`FORBIDDEN_NAME_CHARS`], so it is safe to splice into a file path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeName(String);

impl RecipeName {
    /// Validates `name` against the length and character rules.
    pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();
        let len = name.chars().count();
        if len == 0 {
            return Err(NameError::Empty);
        }
        if len > MAX_NAME_LEN {
            return Err(NameError::TooLong {
                len,
                max: MAX_NAME_LEN,
            });
        }
        if let Some(c) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
            return Err(NameError::ForbiddenChar(c));
        }
        Ok(Self(name))
    }

    pub(crate) fn new_unchecked(name: String) -> Self {
        Self(name)
    }

    /// Borrows the name text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the owned name text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RecipeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecipeName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for RecipeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
