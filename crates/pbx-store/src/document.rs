//! Whole-document loading.
//!
//! A decoded `project.pbxproj` is a dictionary with a handful of header
//! fields (`archiveVersion`, `objectVersion`, `rootObject`) and the flat
//! `objects` mapping. Decoding the property-list syntax itself is left to an
//! external converter; this module accepts the JSON form that converter
//! emits (`plutil -convert json`).

use std::path::Path;

use pbx_types::ObjectId;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryObjectStore;

/// A decoded project document.
#[derive(Clone, Debug)]
pub struct PbxDocument {
    pub archive_version: Option<String>,
    pub object_version: Option<String>,
    /// Identifier of the `PBXProject` record, when the header names it.
    pub root_object: Option<ObjectId>,
    pub objects: InMemoryObjectStore,
}

impl PbxDocument {
    /// Decode a document from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> StoreResult<Self> {
        let json: serde_json::Value = serde_json::from_slice(bytes)?;
        Self::from_json(json)
    }

    /// Decode a document from a JSON string.
    pub fn from_json_str(text: &str) -> StoreResult<Self> {
        Self::from_json_slice(text.as_bytes())
    }

    /// Read and decode a document file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading project document");
        let bytes = std::fs::read(path)?;
        Self::from_json_slice(&bytes)
    }

    /// Build a document from an already-decoded JSON tree.
    pub fn from_json(json: serde_json::Value) -> StoreResult<Self> {
        let serde_json::Value::Object(mut root) = json else {
            return Err(StoreError::InvalidDocument(
                "document root is not a dictionary".into(),
            ));
        };

        let objects = root
            .remove("objects")
            .ok_or_else(|| StoreError::KeyNotFound {
                key: "objects".into(),
            })?;
        let objects = InMemoryObjectStore::from_objects_json(objects)?;

        Ok(Self {
            archive_version: header_string(&root, "archiveVersion")?,
            object_version: header_string(&root, "objectVersion")?,
            root_object: header_string(&root, "rootObject")?.map(ObjectId::from),
            objects,
        })
    }
}

fn header_string(
    root: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> StoreResult<Option<String>> {
    match root.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(StoreError::TypeMismatch {
            key: key.to_string(),
            actual: other.to_string(),
            expected: "a string",
        }),
    }
}
