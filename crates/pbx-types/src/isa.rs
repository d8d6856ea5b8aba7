//! Record kind discriminators.
//!
//! Every record in a project file carries an `isa` field naming its concrete
//! kind. [`Isa`] is the closed set of kinds this workspace understands; a tag
//! outside the set is an error at the point it is interpreted, never a
//! silent default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The kind of a project-file record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Isa {
    Project,
    NativeTarget,
    AggregateTarget,
    LegacyTarget,
    ConfigurationList,
    BuildConfiguration,
    TargetDependency,
    ContainerItemProxy,
    FileReference,
    Group,
    VariantGroup,
    VersionGroup,
    ReferenceProxy,
    BuildFile,
    ResourcesBuildPhase,
    SourcesBuildPhase,
    FrameworksBuildPhase,
    HeadersBuildPhase,
    CopyFilesBuildPhase,
    ShellScriptBuildPhase,
}

impl Isa {
    /// Every recognized kind.
    pub const ALL: [Isa; 20] = [
        Isa::Project,
        Isa::NativeTarget,
        Isa::AggregateTarget,
        Isa::LegacyTarget,
        Isa::ConfigurationList,
        Isa::BuildConfiguration,
        Isa::TargetDependency,
        Isa::ContainerItemProxy,
        Isa::FileReference,
        Isa::Group,
        Isa::VariantGroup,
        Isa::VersionGroup,
        Isa::ReferenceProxy,
        Isa::BuildFile,
        Isa::ResourcesBuildPhase,
        Isa::SourcesBuildPhase,
        Isa::FrameworksBuildPhase,
        Isa::HeadersBuildPhase,
        Isa::CopyFilesBuildPhase,
        Isa::ShellScriptBuildPhase,
    ];

    /// The tag as written in the project file.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "PBXProject",
            Self::NativeTarget => "PBXNativeTarget",
            Self::AggregateTarget => "PBXAggregateTarget",
            Self::LegacyTarget => "PBXLegacyTarget",
            Self::ConfigurationList => "XCConfigurationList",
            Self::BuildConfiguration => "XCBuildConfiguration",
            Self::TargetDependency => "PBXTargetDependency",
            Self::ContainerItemProxy => "PBXContainerItemProxy",
            Self::FileReference => "PBXFileReference",
            Self::Group => "PBXGroup",
            Self::VariantGroup => "PBXVariantGroup",
            Self::VersionGroup => "XCVersionGroup",
            Self::ReferenceProxy => "PBXReferenceProxy",
            Self::BuildFile => "PBXBuildFile",
            Self::ResourcesBuildPhase => "PBXResourcesBuildPhase",
            Self::SourcesBuildPhase => "PBXSourcesBuildPhase",
            Self::FrameworksBuildPhase => "PBXFrameworksBuildPhase",
            Self::HeadersBuildPhase => "PBXHeadersBuildPhase",
            Self::CopyFilesBuildPhase => "PBXCopyFilesBuildPhase",
            Self::ShellScriptBuildPhase => "PBXShellScriptBuildPhase",
        }
    }

    /// Returns `true` for the three target kinds.
    pub fn is_target(&self) -> bool {
        matches!(
            self,
            Self::NativeTarget | Self::AggregateTarget | Self::LegacyTarget
        )
    }

    /// Returns `true` for kinds that may hold `children` in the file tree.
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group | Self::VariantGroup | Self::VersionGroup)
    }

    /// Returns `true` for build phase kinds.
    pub fn is_build_phase(&self) -> bool {
        matches!(
            self,
            Self::ResourcesBuildPhase
                | Self::SourcesBuildPhase
                | Self::FrameworksBuildPhase
                | Self::HeadersBuildPhase
                | Self::CopyFilesBuildPhase
                | Self::ShellScriptBuildPhase
        )
    }
}

impl FromStr for Isa {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Isa::ALL
            .iter()
            .copied()
            .find(|isa| isa.as_str() == s)
            .ok_or_else(|| TypeError::UnknownIsa(s.to_string()))
    }
}

impl fmt::Display for Isa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_known_tags() {
        assert_eq!("PBXProject".parse::<Isa>().unwrap(), Isa::Project);
        assert_eq!(
            "XCConfigurationList".parse::<Isa>().unwrap(),
            Isa::ConfigurationList
        );
        assert_eq!("PBXLegacyTarget".parse::<Isa>().unwrap(), Isa::LegacyTarget);
    }

    #[test]
    fn unknown_tag_is_named_in_error() {
        let err = "PBXShinyTarget".parse::<Isa>().unwrap_err();
        assert_eq!(err, TypeError::UnknownIsa("PBXShinyTarget".into()));
        assert_eq!(err.to_string(), "unknown isa: PBXShinyTarget");
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!("pbxproject".parse::<Isa>().is_err());
    }

    #[test]
    fn classification() {
        assert!(Isa::AggregateTarget.is_target());
        assert!(!Isa::Project.is_target());
        assert!(Isa::VariantGroup.is_group());
        assert!(!Isa::FileReference.is_group());
        assert!(Isa::ResourcesBuildPhase.is_build_phase());
        assert!(!Isa::BuildFile.is_build_phase());
    }

    #[test]
    fn all_tags_are_distinct() {
        let mut tags: Vec<&str> = Isa::ALL.iter().map(Isa::as_str).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), Isa::ALL.len());
    }

    proptest! {
        #[test]
        fn tag_round_trips(index in 0usize..Isa::ALL.len()) {
            let isa = Isa::ALL[index];
            let reparsed: Isa = isa.as_str().parse().unwrap();
            prop_assert_eq!(reparsed, isa);
            prop_assert_eq!(reparsed.to_string(), isa.as_str());
        }

        #[test]
        fn arbitrary_lowercase_tags_are_rejected(tag in "[a-z]{1,24}") {
            prop_assert!(tag.parse::<Isa>().is_err());
        }
    }
}
