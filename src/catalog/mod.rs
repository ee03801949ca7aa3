//! Closed, build-time table of transforms.
//!
//! Each [`TransformId`] maps to exactly one [`Transform`] holding a pair of
//! pure functions. The table is a `static` and is never mutated; recipes
//! refer to entries by id and share them by reference.

/// Forward/inverse function implementations.
pub mod codecs;

use crate::{
    error::{TransformError, UnknownTransform},
    recipe::TransformStep,
    types::{Direction, TransformId},
};

/// Signature shared by every forward and inverse function.
pub type TransformFn = fn(&str) -> Result<String, TransformError>;

/// One half of a transform pair.
#[derive(Debug)]
pub struct Method {
    /// Name the outer layer uses for this half (`encode`, `dump`, ...).
    pub name: &'static str,
    /// The pure function.
    pub apply: TransformFn,
}

/// Catalog entry: a labelled forward/inverse pair.
#[derive(Debug)]
pub struct Transform {
    /// Identifier of this entry.
    pub id: TransformId,
    /// Human-readable label.
    pub label: &'static str,
    /// Forward half.
    pub forward: Method,
    /// Inverse half, undoing `forward`.
    pub inverse: Method,
}

impl Transform {
    /// Returns the half for `direction`.
    pub fn method(&self, direction: Direction) -> &Method {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Inverse => &self.inverse,
        }
    }

    /// Runs the half for `direction` on `input`.
    pub fn apply(&self, direction: Direction, input: &str) -> Result<String, TransformError> {
        (self.method(direction).apply)(input)
    }

    /// Display label for a step, e.g. `Base64 - Encode`.
    pub fn step_label(&self, direction: Direction) -> String {
        let name = self.method(direction).name;
        let mut chars = name.chars();
        let title: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("{} - {}", self.label, title)
    }
}

/// Catalog entries in [`TransformId::ALL`] order.
pub static CATALOG: [Transform; 5] = [
    Transform {
        id: TransformId::Base64,
        label: "Base64",
        forward: Method {
            name: "encode",
            apply: codecs::base64_encode,
        },
        inverse: Method {
            name: "decode",
            apply: codecs::base64_decode,
        },
    },
    Transform {
        id: TransformId::Hex,
        label: "Hex",
        forward: Method {
            name: "encode",
            apply: codecs::hex_encode,
        },
        inverse: Method {
            name: "decode",
            apply: codecs::hex_decode,
        },
    },
    Transform {
        id: TransformId::HexDump,
        label: "Hex Dump",
        forward: Method {
            name: "dump",
            apply: codecs::hexdump_dump,
        },
        inverse: Method {
            name: "restore",
            apply: codecs::hexdump_restore,
        },
    },
    Transform {
        id: TransformId::Url,
        label: "Url",
        forward: Method {
            name: "encode",
            apply: codecs::url_encode,
        },
        inverse: Method {
            name: "decode",
            apply: codecs::url_decode,
        },
    },
    Transform {
        id: TransformId::Unicode,
        label: "Unicode",
        forward: Method {
            name: "encode",
            apply: codecs::unicode_encode,
        },
        inverse: Method {
            name: "decode",
            apply: codecs::unicode_decode,
        },
    },
];

/// Returns the entry for `id`. Never fails: the id type is closed.
pub fn lookup(id: TransformId) -> &'static Transform {
    let idx = match id {
        TransformId::Base64 => 0,
        TransformId::Hex => 1,
        TransformId::HexDump => 2,
        TransformId::Url => 3,
        TransformId::Unicode => 4,
    };
    &CATALOG[idx]
}

/// Resolves a slug from outside the crate, failing on catalog misses.
pub fn lookup_slug(slug: &str) -> Result<&'static Transform, UnknownTransform> {
    slug.parse::<TransformId>().map(lookup)
}

/// Resolves an `(ingredient, method)` pair such as `("hex", "decode")` into
/// a step.
pub fn resolve(slug: &str, method: &str) -> Result<TransformStep, UnknownTransform> {
    let transform = lookup_slug(slug)?;
    [Direction::Forward, Direction::Inverse]
        .into_iter()
        .find(|d| transform.method(*d).name == method)
        .map(|direction| TransformStep::new(transform.id, direction))
        .ok_or_else(|| UnknownTransform(format!("{slug}.{method}")))
}

/// All entries, in catalog order.
pub fn entries() -> &'static [Transform] {
    &CATALOG
}
