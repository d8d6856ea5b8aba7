//! Typed file references.

use serde::{Deserialize, Serialize};

use pbx_store::{ObjectStore, Record};
use pbx_types::{Isa, ObjectId, SourceTree};

use crate::error::{PathError, PathResult};

/// A `PBXFileReference`: one leaf of the project's file tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    pub id: ObjectId,
    /// Path relative to whatever `source_tree` names. Empty when absent.
    pub path: String,
    /// Display name, when it differs from the path.
    pub name: Option<String>,
    pub source_tree: SourceTree,
    pub last_known_file_type: Option<String>,
}

impl FileReference {
    /// Parse the file reference `id`, failing if the record is some other kind.
    pub fn parse<S: ObjectStore + ?Sized>(store: &S, id: &ObjectId) -> PathResult<Self> {
        let (record, isa) = store.get_with_isa(id)?;
        if isa != Isa::FileReference.as_str() {
            return Err(PathError::UnexpectedKind {
                id: id.clone(),
                isa: isa.to_string(),
                expected: Isa::FileReference.as_str(),
            });
        }
        Self::from_record(id, record)
    }

    fn from_record(id: &ObjectId, record: &Record) -> PathResult<Self> {
        Ok(Self {
            id: id.clone(),
            path: record.optional_string("path")?.unwrap_or_default().to_string(),
            name: record.optional_string("name")?.map(str::to_string),
            source_tree: source_tree_of(record)?,
            last_known_file_type: record
                .optional_string("lastKnownFileType")?
                .map(str::to_string),
        })
    }

    /// The name shown in Xcode's navigator.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}

/// The record's `sourceTree`; absent reads as undefined.
pub(crate) fn source_tree_of(record: &Record) -> PathResult<SourceTree> {
    Ok(SourceTree::from_raw(
        record.optional_string("sourceTree")?.unwrap_or_default(),
    ))
}
