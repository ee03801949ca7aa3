//! Named, persisted pipelines of reversible text transforms.
//!
//! A [`recipe::Recipe`] holds a base value and an ordered list of
//! [`recipe::TransformStep`]s drawn from a closed [`catalog`]. The output is
//! recomputed on every view by folding the steps over the base value, and
//! recipes can be exported to and imported from a validated JSON record.
//!
//! # Examples
//!
//! In-memory usage with [`service::Cellar`]:
//! ```
//! use alchemist::{
//!     config::CellarConfig,
//!     persist::memory::MemoryRecipeStore,
//!     recipe::TransformStep,
//!     service::Cellar,
//!     types::{RecipeName, TransformId},
//! };
//!
//! let mut cellar = Cellar::new(MemoryRecipeStore::new(), CellarConfig::default());
//! let name = RecipeName::new("elixir").expect("valid name");
//! let mut recipe = cellar.get_or_create(&name).expect("load");
//! cellar.set_base_value(&mut recipe, Some("flag{x}".to_string())).expect("base");
//! cellar.append_step(&mut recipe, TransformStep::forward(TransformId::Base64)).expect("append");
//!
//! let evaluation = cellar.evaluate(&mut recipe);
//! assert_eq!(evaluation.output.as_deref(), Some("ZmxhZ3t4fQ=="));
//! assert_eq!(evaluation.failed_step(), None);
//! ```
//!
//! Export and re-import through the trust boundary:
//! ```
//! use alchemist::{
//!     config::CellarConfig,
//!     persist::memory::MemoryRecipeStore,
//!     recipe::TransformStep,
//!     service::Cellar,
//!     session::Session,
//!     types::{RecipeName, TransformId},
//! };
//!
//! let mut cellar = Cellar::new(MemoryRecipeStore::new(), CellarConfig::default());
//! let name = RecipeName::new("tonic").expect("valid name");
//! let mut recipe = cellar.get_or_create(&name).expect("load");
//! cellar.append_step(&mut recipe, TransformStep::inverse(TransformId::Hex)).expect("append");
//!
//! let bytes = cellar.export_bytes(&recipe).expect("export");
//! let mut session = Session::new();
//! let imported = cellar
//!     .import_file(&mut session, "tonic.recipe", &bytes)
//!     .expect("import");
//! assert_eq!(imported.steps, recipe.steps);
//!
//! // The embedded name must match the file it arrived in.
//! assert!(cellar.import_file(&mut session, "other.recipe", &bytes).is_err());
//! assert!(session.is_flagged());
//! ```
#![deny(missing_docs)]

/// Transform table and the functions behind it.
pub mod catalog;
/// Record encoding and trust-boundary decoding.
pub mod codec;
/// Cellar configuration.
pub mod config;
/// Step editor and pipeline evaluator.
pub mod core;
/// Error types for every layer.
pub mod error;
/// Seeded default-name generation.
pub mod naming;
/// Editor command model.
pub mod op;
/// Storage abstraction and filesystem, SQLite and in-memory stores.
pub mod persist;
/// Recipe aggregate and step types.
pub mod recipe;
/// Recipe facade exposed to the outer layer.
pub mod service;
/// Caller-owned session value.
pub mod session;
/// Shared primitive types and enums.
pub mod types;
