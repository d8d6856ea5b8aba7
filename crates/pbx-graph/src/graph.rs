//! The parsed, immutable entity graph.
//!
//! [`ProjectGraph`] is an arena: every typed entity is stored once, keyed by
//! its identifier, and entities refer to one another by identifier. The
//! graph is produced by [`parse_project`](crate::parse_project) and never
//! mutated afterwards, so it can be shared across threads freely.
//!
//! # Invariants
//!
//! - Every identifier reachable from the project (targets, their
//!   configuration lists, their dependencies) has an entry in the arena.
//! - Project target order is the order declared in the file.

use std::collections::HashMap;

use serde::Serialize;

use pbx_types::ObjectId;

use crate::configuration::{ConfigurationList, ConfigurationOwner};
use crate::error::{GraphError, GraphResult};
use crate::project::Project;
use crate::target::{Target, TargetDependency};

/// The typed project graph.
#[derive(Clone, Debug, Serialize)]
pub struct ProjectGraph {
    pub(crate) project: Project,
    pub(crate) targets: HashMap<ObjectId, Target>,
    pub(crate) configuration_lists: HashMap<ObjectId, ConfigurationList>,
    pub(crate) dependencies: HashMap<ObjectId, TargetDependency>,
}

impl ProjectGraph {
    pub fn project(&self) -> &Project {
        &self.project
    }

    // ---------------------------------------------------------------
    // Targets
    // ---------------------------------------------------------------

    /// Look up any parsed target by identifier.
    pub fn target(&self, id: &ObjectId) -> Option<&Target> {
        self.targets.get(id)
    }

    /// Look up a target, failing with [`GraphError::MissingEntity`].
    pub fn require_target(&self, id: &ObjectId) -> GraphResult<&Target> {
        self.targets.get(id).ok_or_else(|| GraphError::MissingEntity {
            id: id.clone(),
            kind: "target",
        })
    }

    /// The project's targets in declaration order.
    pub fn targets(&self) -> Vec<&Target> {
        self.project
            .targets
            .iter()
            .filter_map(|id| self.targets.get(id))
            .collect()
    }

    /// The first project target called `name`.
    pub fn target_by_name(&self, name: &str) -> Option<&Target> {
        self.targets().into_iter().find(|t| t.name == name)
    }

    /// Number of parsed targets, including any reachable only through
    /// dependencies.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    // ---------------------------------------------------------------
    // Configuration lists
    // ---------------------------------------------------------------

    pub fn configuration_list(&self, id: &ObjectId) -> Option<&ConfigurationList> {
        self.configuration_lists.get(id)
    }

    /// The configuration list of the project or a target.
    pub fn configuration_list_of<O: ConfigurationOwner + ?Sized>(
        &self,
        owner: &O,
    ) -> GraphResult<&ConfigurationList> {
        let id = owner.configuration_list_id();
        self.configuration_lists
            .get(id)
            .ok_or_else(|| GraphError::MissingEntity {
                id: id.clone(),
                kind: "configuration list",
            })
    }

    /// Number of distinct configuration lists parsed.
    pub fn configuration_list_count(&self) -> usize {
        self.configuration_lists.len()
    }

    // ---------------------------------------------------------------
    // Dependencies
    // ---------------------------------------------------------------

    pub fn dependency(&self, id: &ObjectId) -> Option<&TargetDependency> {
        self.dependencies.get(id)
    }

    /// A target's dependency edges in declaration order.
    pub fn dependencies_of(&self, target: &Target) -> GraphResult<Vec<&TargetDependency>> {
        target
            .dependencies
            .iter()
            .map(|id| {
                self.dependencies
                    .get(id)
                    .ok_or_else(|| GraphError::MissingEntity {
                        id: id.clone(),
                        kind: "target dependency",
                    })
            })
            .collect()
    }
}
