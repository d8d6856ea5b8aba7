//! Pre-order traversal of target dependencies.
//!
//! The walk visits a target's dependencies in declaration order, emitting
//! each dependency before its own dependencies. Targets on the active path
//! are tracked; reaching one again is a
//! [`DependencyCycle`](DepsError::DependencyCycle). A target reachable along
//! two different paths (a diamond) is not a cycle and is emitted once per
//! path.
//!
//! Dependencies on targets in other projects are not descended into; they
//! are collected separately as [`ContainerItemProxy`] references.

use std::collections::HashSet;

use tracing::{debug, trace};

use pbx_graph::{ContainerItemProxy, DependencyTarget, ProjectGraph, Target};
use pbx_types::ObjectId;

use crate::error::{DepsError, DepsResult};

/// Everything reachable from one target.
#[derive(Clone, Debug, Default)]
pub struct DependencyWalk<'g> {
    /// Local targets in pre-order.
    pub targets: Vec<&'g Target>,
    /// Cross-project dependencies met along the way, in walk order.
    pub remote: Vec<&'g ContainerItemProxy>,
}

impl DependencyWalk<'_> {
    /// Target names in walk order.
    pub fn names(&self) -> Vec<&str> {
        self.targets.iter().map(|t| t.name.as_str()).collect()
    }
}

/// The transitive dependencies of `target`, parent first, depth first,
/// in declaration order. `target` itself is not included.
pub fn dependent_targets<'g>(
    graph: &'g ProjectGraph,
    target: &Target,
) -> DepsResult<Vec<&'g Target>> {
    Ok(walk(graph, target)?.targets)
}

/// Walk `target`'s dependencies, keeping remote proxies as well.
pub fn walk<'g>(graph: &'g ProjectGraph, target: &Target) -> DepsResult<DependencyWalk<'g>> {
    let root = graph.require_target(&target.id)?;
    let mut walker = Walker {
        graph,
        path: Vec::new(),
        on_path: HashSet::new(),
        result: DependencyWalk::default(),
    };
    walker.visit(root)?;
    debug!(
        target_name = %target.name,
        dependencies = walker.result.targets.len(),
        remote = walker.result.remote.len(),
        "walked target dependencies"
    );
    Ok(walker.result)
}

struct Walker<'g> {
    graph: &'g ProjectGraph,
    path: Vec<ObjectId>,
    on_path: HashSet<ObjectId>,
    result: DependencyWalk<'g>,
}

impl<'g> Walker<'g> {
    fn visit(&mut self, target: &'g Target) -> DepsResult<()> {
        self.path.push(target.id.clone());
        self.on_path.insert(target.id.clone());

        for dependency in self.graph.dependencies_of(target)? {
            match &dependency.target {
                DependencyTarget::Local(id) => {
                    if self.on_path.contains(id) {
                        let mut path = self.path.clone();
                        path.push(id.clone());
                        return Err(DepsError::DependencyCycle {
                            target: id.clone(),
                            path,
                        });
                    }
                    let child = self.graph.require_target(id)?;
                    trace!(parent = %target.id, child = %id, "dependency");
                    self.result.targets.push(child);
                    self.visit(child)?;
                }
                DependencyTarget::Remote(proxy) => {
                    trace!(parent = %target.id, proxy = %proxy.id, "remote dependency");
                    self.result.remote.push(proxy);
                }
            }
        }

        self.on_path.remove(&target.id);
        self.path.pop();
        Ok(())
    }
}
