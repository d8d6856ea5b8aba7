//! Identifier-keyed record storage for pbxgraph.
//!
//! A `project.pbxproj` file is one flat mapping from opaque identifiers to
//! untyped records. Each record is a set of named fields whose values are
//! strings, booleans, arrays, or nested dictionaries, and records refer to
//! one another only by identifier. This crate holds that mapping and offers
//! typed, fallible projections over it.
//!
//! # Record Access
//!
//! [`Record`] projections fail with a distinct error kind:
//!
//! - [`StoreError::KeyNotFound`] -- the field is absent
//! - [`StoreError::TypeMismatch`] -- the field exists with the wrong shape
//!
//! Neither ever yields a zero value that could pass for a legitimate empty
//! result.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `BTreeMap`-based store built once from a
//!   decoded document
//!
//! # Design Rules
//!
//! 1. The store is immutable once built; no method mutates it.
//! 2. Lookups of unknown identifiers fail with [`StoreError::NotFound`].
//! 3. The store never interprets record contents beyond the `isa` field.

pub mod document;
pub mod error;
pub mod memory;
pub mod object;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use document::PbxDocument;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use object::{Record, Value};
pub use traits::ObjectStore;
