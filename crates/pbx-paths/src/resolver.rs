//! File and group path resolution.
//!
//! A file reference's location on disk is implied by where it sits in the
//! group tree: each group it is nested in may add a path component, start
//! over from an absolute path, or add nothing. Resolution walks down from
//! the project's main group, accumulating a prefix, until it meets the
//! requested identifier.
//!
//! # Rules
//!
//! - `<group>`: join the node's `path` onto the parent prefix
//! - `<absolute>`: drop the parent prefix and start from the node's `path`
//! - empty or missing: pass the parent prefix through
//! - anything else: [`PathError::UnsupportedSourceTree`]
//!
//! Every node the walk visits is classified, whether or not it is the one
//! being looked for, so an unsupported classifier anywhere before the target
//! fails the lookup.
//!
//! Group-relative joins are textual and lexically cleaned: a leading `/` on
//! a `<group>` path does not make it absolute, and `..` components pop the
//! prefix.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use pbx_graph::Project;
use pbx_store::{ObjectStore, Record};
use pbx_types::{Isa, ObjectId, SourceTree};

use crate::error::{PathError, PathResult};
use crate::file_ref::source_tree_of;

/// Resolve `file_ref`'s path starting from the project record `project_id`.
///
/// The result is relative to the project's `projectDirPath`/`projectRoot`
/// unless an absolute group or reference intervenes. `Ok(None)` means the
/// identifier is not anywhere under the main group.
pub fn resolve_absolute_path<S: ObjectStore + ?Sized>(
    store: &S,
    file_ref: &ObjectId,
    project_id: &ObjectId,
) -> PathResult<Option<PathBuf>> {
    let (record, isa) = store.get_with_isa(project_id)?;
    if isa != Isa::Project.as_str() {
        return Err(PathError::UnexpectedKind {
            id: project_id.clone(),
            isa: isa.to_string(),
            expected: Isa::Project.as_str(),
        });
    }

    let main_group = ObjectId::from(record.string("mainGroup")?);
    let mut base = PathBuf::from(record.optional_string("projectDirPath")?.unwrap_or_default());
    push_component(&mut base, record.optional_string("projectRoot")?.unwrap_or_default());

    resolve_under(store, &main_group, file_ref, &base)
}

/// Same as [`resolve_absolute_path`] for an already-parsed project.
pub fn resolve_in_project<S: ObjectStore + ?Sized>(
    store: &S,
    project: &Project,
    file_ref: &ObjectId,
) -> PathResult<Option<PathBuf>> {
    resolve_under(store, &project.main_group, file_ref, &project.root_path())
}

/// Walk the tree rooted at `group`, starting from prefix `base`.
pub fn resolve_under<S: ObjectStore + ?Sized>(
    store: &S,
    group: &ObjectId,
    target: &ObjectId,
    base: &Path,
) -> PathResult<Option<PathBuf>> {
    let mut walk = GroupWalk {
        store,
        target,
        path: Vec::new(),
        on_path: HashSet::new(),
    };
    let found = walk.visit(group, base)?;
    match &found {
        Some(path) => debug!(file_ref = %target, path = %path.display(), "resolved path"),
        None => debug!(file_ref = %target, "file reference not under main group"),
    }
    Ok(found)
}

struct GroupWalk<'a, S: ?Sized> {
    store: &'a S,
    target: &'a ObjectId,
    path: Vec<ObjectId>,
    on_path: HashSet<ObjectId>,
}

impl<'a, S: ObjectStore + ?Sized> GroupWalk<'a, S> {
    fn visit(&mut self, id: &ObjectId, parent: &Path) -> PathResult<Option<PathBuf>> {
        if self.on_path.contains(id) {
            let mut path = self.path.clone();
            path.push(id.clone());
            return Err(PathError::GroupCycle {
                id: id.clone(),
                path,
            });
        }

        let store: &'a S = self.store;
        let record = store.get(id)?;
        let here = contribution(id, record, parent)?;
        trace!(node = %id, prefix = %here.display(), "entered node");
        if id == self.target {
            return Ok(Some(here));
        }

        let Some(children) = record.optional_string_list("children")? else {
            return Ok(None);
        };

        self.path.push(id.clone());
        self.on_path.insert(id.clone());
        for child in children {
            if let Some(found) = self.visit(&ObjectId::from(child), &here)? {
                return Ok(Some(found));
            }
        }
        self.on_path.remove(id);
        self.path.pop();
        Ok(None)
    }
}

/// The prefix in effect at node `id`, given its parent's prefix.
fn contribution(id: &ObjectId, record: &Record, parent: &Path) -> PathResult<PathBuf> {
    let own = record.optional_string("path")?.unwrap_or_default();
    match source_tree_of(record)? {
        SourceTree::Group => Ok(join_clean(parent, own)),
        SourceTree::Absolute => Ok(PathBuf::from(own)),
        SourceTree::Undefined => Ok(parent.to_path_buf()),
        SourceTree::Other(raw) => Err(PathError::UnsupportedSourceTree {
            id: id.clone(),
            source_tree: raw,
        }),
    }
}

/// Append `component` unless it is empty; `PathBuf::push("")` would leave a
/// trailing separator.
fn push_component(path: &mut PathBuf, component: &str) {
    if !component.is_empty() {
        path.push(component);
    }
}

/// Join `component` onto `parent` as text and clean the result lexically.
///
/// Empty parts are ignored and `component` is always appended, even when it
/// starts with `/`. Cleaning drops `.` and empty segments and lets `..` pop
/// the previous segment; `..` above an absolute root is dropped. A relative
/// path that cleans to nothing is `.`, and two empty parts join to nothing.
fn join_clean(parent: &Path, component: &str) -> PathBuf {
    let parent = parent.to_string_lossy();
    let joined = match (parent.is_empty(), component.is_empty()) {
        (true, true) => return PathBuf::new(),
        (true, false) => component.to_string(),
        (false, true) => parent.into_owned(),
        (false, false) => format!("{parent}/{component}"),
    };

    let rooted = joined.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let cleaned = segments.join("/");
    match (rooted, cleaned.is_empty()) {
        (true, _) => PathBuf::from(format!("/{cleaned}")),
        (false, true) => PathBuf::from("."),
        (false, false) => PathBuf::from(cleaned),
    }
}
