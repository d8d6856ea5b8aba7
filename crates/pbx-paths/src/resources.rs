//! Resources build phase and asset catalog discovery.
//!
//! A native target copies its resources through one
//! `PBXResourcesBuildPhase`, whose `files` are `PBXBuildFile` records each
//! pointing at a file reference. Build files with no `fileRef` occur in real
//! projects (`(null) in Resources`) and are skipped, as are build files that
//! point at a `PBXVariantGroup` (localized resources) instead of a plain
//! `PBXFileReference`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use pbx_graph::{ProjectGraph, Target};
use pbx_store::ObjectStore;
use pbx_types::{Isa, ObjectId};

use crate::error::{PathError, PathResult};
use crate::file_ref::FileReference;
use crate::resolver::resolve_in_project;

/// Suffix of asset catalog bundles.
pub const XCASSETS_EXTENSION: &str = ".xcassets";

/// A `PBXResourcesBuildPhase`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResourcesBuildPhase {
    pub id: ObjectId,
    /// `PBXBuildFile` identifiers.
    pub files: Vec<ObjectId>,
}

/// A `PBXBuildFile`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BuildFile {
    pub id: ObjectId,
    /// Missing on some broken entries.
    pub file_ref: Option<ObjectId>,
}

impl BuildFile {
    pub fn parse<S: ObjectStore + ?Sized>(store: &S, id: &ObjectId) -> PathResult<Self> {
        let (record, isa) = store.get_with_isa(id)?;
        expect_isa(id, isa, Isa::BuildFile)?;
        Ok(Self {
            id: id.clone(),
            file_ref: record.optional_string("fileRef")?.map(ObjectId::from),
        })
    }
}

/// An asset catalog found in a target's resources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetCatalog {
    pub file_ref: FileReference,
    /// Resolved location, when requested and found under the main group.
    pub resolved_path: Option<PathBuf>,
}

/// The first resources build phase of `target`, if it has one.
pub fn resources_build_phase<S: ObjectStore + ?Sized>(
    store: &S,
    target: &Target,
) -> PathResult<Option<ResourcesBuildPhase>> {
    for phase_id in target.build_phases() {
        let (record, isa) = store.get_with_isa(phase_id)?;
        if isa == Isa::ResourcesBuildPhase.as_str() {
            let files = record
                .string_list("files")?
                .into_iter()
                .map(ObjectId::from)
                .collect();
            return Ok(Some(ResourcesBuildPhase {
                id: phase_id.clone(),
                files,
            }));
        }
    }
    Ok(None)
}

/// The plain file references copied by `phase`, in phase order.
pub fn resource_files<S: ObjectStore + ?Sized>(
    store: &S,
    phase: &ResourcesBuildPhase,
) -> PathResult<Vec<FileReference>> {
    let mut files = Vec::new();
    for build_file_id in &phase.files {
        let build_file = BuildFile::parse(store, build_file_id)?;
        let Some(file_ref) = build_file.file_ref else {
            debug!(build_file = %build_file_id, "build file without fileRef");
            continue;
        };

        let (_, isa) = store.get_with_isa(&file_ref)?;
        if isa != Isa::FileReference.as_str() {
            debug!(build_file = %build_file_id, isa, "skipping non-file resource");
            continue;
        }
        files.push(FileReference::parse(store, &file_ref)?);
    }
    Ok(files)
}

/// Asset catalogs in `target`'s resources build phase.
///
/// A target without a resources phase has none.
pub fn asset_catalogs<S: ObjectStore + ?Sized>(
    store: &S,
    target: &Target,
) -> PathResult<Vec<FileReference>> {
    let Some(phase) = resources_build_phase(store, target)? else {
        return Ok(Vec::new());
    };
    Ok(resource_files(store, &phase)?
        .into_iter()
        .filter(|file| file.path.ends_with(XCASSETS_EXTENSION))
        .collect())
}

/// Asset catalogs of every project target, keyed by target identifier.
///
/// With `resolve` set, each catalog's path is also resolved through the
/// group tree.
pub fn targets_to_asset_catalogs<S: ObjectStore + ?Sized>(
    store: &S,
    graph: &ProjectGraph,
    resolve: bool,
) -> PathResult<BTreeMap<ObjectId, Vec<AssetCatalog>>> {
    let mut catalogs = BTreeMap::new();
    for target in graph.targets() {
        let mut found = Vec::new();
        for file_ref in asset_catalogs(store, target)? {
            let resolved_path = if resolve {
                resolve_in_project(store, graph.project(), &file_ref.id)?
            } else {
                None
            };
            found.push(AssetCatalog {
                file_ref,
                resolved_path,
            });
        }
        debug!(target_name = %target.name, catalogs = found.len(), "collected asset catalogs");
        catalogs.insert(target.id.clone(), found);
    }
    Ok(catalogs)
}

fn expect_isa(id: &ObjectId, isa: &str, expected: Isa) -> PathResult<()> {
    if isa == expected.as_str() {
        Ok(())
    } else {
        Err(PathError::UnexpectedKind {
            id: id.clone(),
            isa: isa.to_string(),
            expected: expected.as_str(),
        })
    }
}
