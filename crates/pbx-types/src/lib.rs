//! Foundation types for pbxgraph.
//!
//! This crate provides the vocabulary shared by every other pbxgraph crate:
//! the identifiers that cross-reference records in a `project.pbxproj` file,
//! the `isa` discriminators that name each record's kind, and the typed build
//! settings table that survives parsing.
//!
//! # Key Types
//!
//! - [`ObjectId`] -- Opaque record identifier (24 hex characters in practice)
//! - [`Isa`] -- Closed set of record kinds understood by the parser
//! - [`SourceTree`] -- How a group or file reference path joins its parent's
//! - [`SettingValue`] -- A build setting: scalar string or list of strings
//! - [`BuildSettings`] -- String-keyed settings table of one build configuration

pub mod error;
pub mod isa;
pub mod object;
pub mod settings;
pub mod source_tree;

pub use error::TypeError;
pub use isa::Isa;
pub use object::ObjectId;
pub use settings::{BuildSettings, SettingValue};
pub use source_tree::SourceTree;
