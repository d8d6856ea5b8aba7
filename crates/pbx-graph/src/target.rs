//! Build targets and their dependency edges.
//!
//! A [`Target`] is one of three kinds, distinguished by [`TargetKind`]. The
//! fields every kind shares live on `Target` itself; kind-specific data lives
//! in the variant. Dependencies are held by identifier and resolved through
//! the owning [`ProjectGraph`](crate::ProjectGraph), so a dependency cycle in
//! the project file never becomes an ownership cycle here.

use std::fmt;

use serde::{Deserialize, Serialize};

use pbx_types::{Isa, ObjectId};

use crate::configuration::ConfigurationOwner;

/// A buildable unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: ObjectId,
    pub name: String,
    pub build_configuration_list: ObjectId,
    /// `PBXTargetDependency` identifiers, in declaration order.
    pub dependencies: Vec<ObjectId>,
    pub kind: TargetKind,
}

impl Target {
    /// The `isa` tag this target was parsed from.
    pub fn isa(&self) -> Isa {
        self.kind.isa()
    }

    /// Build phase identifiers. Only native targets carry them.
    pub fn build_phases(&self) -> &[ObjectId] {
        match &self.kind {
            TargetKind::Native(native) => &native.build_phases,
            TargetKind::Aggregate | TargetKind::Legacy(_) => &[],
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self.kind, TargetKind::Native(_))
    }
}

impl ConfigurationOwner for Target {
    fn configuration_list_id(&self) -> &ObjectId {
        &self.build_configuration_list
    }

    fn owner_name(&self) -> &str {
        &self.name
    }
}

/// Kind-specific target data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// `PBXNativeTarget`: compiles and packages a product.
    Native(NativeTarget),
    /// `PBXAggregateTarget`: groups other targets, usually with scripts.
    Aggregate,
    /// `PBXLegacyTarget`: runs an external build tool.
    Legacy(LegacyTarget),
}

impl TargetKind {
    pub fn isa(&self) -> Isa {
        match self {
            Self::Native(_) => Isa::NativeTarget,
            Self::Aggregate => Isa::AggregateTarget,
            Self::Legacy(_) => Isa::LegacyTarget,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(_) => write!(f, "native"),
            Self::Aggregate => write!(f, "aggregate"),
            Self::Legacy(_) => write!(f, "legacy"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeTarget {
    pub build_phases: Vec<ObjectId>,
    pub product_name: Option<String>,
    /// Uniform type identifier such as `com.apple.product-type.application`.
    pub product_type: Option<String>,
    pub product_reference: Option<ObjectId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyTarget {
    pub build_tool_path: Option<String>,
    pub build_arguments_string: Option<String>,
}

/// A `PBXTargetDependency` edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDependency {
    pub id: ObjectId,
    pub target: DependencyTarget,
}

impl TargetDependency {
    /// The depended-on target when it lives in this project.
    pub fn local_target(&self) -> Option<&ObjectId> {
        match &self.target {
            DependencyTarget::Local(id) => Some(id),
            DependencyTarget::Remote(_) => None,
        }
    }
}

/// What a dependency points at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyTarget {
    /// A target record in this project.
    Local(ObjectId),
    /// A target in another project, known only through its proxy.
    Remote(ContainerItemProxy),
}

/// A `PBXContainerItemProxy`: a reference into another container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerItemProxy {
    pub id: ObjectId,
    /// File reference of the container (another `.xcodeproj`) or the project.
    pub container_portal: ObjectId,
    pub proxy_type: String,
    pub remote_global_id: ObjectId,
    pub remote_info: Option<String>,
}
