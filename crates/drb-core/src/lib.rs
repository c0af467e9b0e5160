//! Core engine for Dragonbourne: entity composition and condition evaluation.
//!
//! A game file is loaded into a [`ConfigTree`], then [`compose`] walks it
//! under a [`Schema`] and builds typed [`Entity`] values. Each entity checks
//! its availability conditions against a [`WorldState`] while it is built.
//! The crate never touches stdin/stdout; the `drb` binary does that.

/// Recursive composition of config trees into entity sets.
pub mod composer;
/// The embedded condition language: parser and evaluator.
pub mod condition;
/// Entity variants, construction, and capabilities.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Loading config trees from JSON or TOML.
pub mod loader;
/// Composition schemas mapping config keys to directives.
pub mod schema;
/// Untyped nested values read from game files.
pub mod value;
/// The mutable world state consulted by conditions.
pub mod world;

/// Re-export composition types.
pub use composer::{Composition, EntityNode, EntitySet, compose};
/// Re-export condition types.
pub use condition::{Condition, ConditionError, EvalContext, Literal, Operand, Operator, evaluate_str};
/// Re-export entity types.
pub use entity::{Entity, EntityId, EntityVariant, UseOutcome};
/// Re-export error types.
pub use error::{DrbError, DrbResult};
/// Re-export loader entry points.
pub use loader::{ConfigFormat, load_config, parse_config};
/// Re-export schema types.
pub use schema::{Schema, SchemaNode};
/// Re-export value types.
pub use value::{ConfigTree, Value};
/// Re-export world types.
pub use world::{Player, PlayerConfig, WorldState};
