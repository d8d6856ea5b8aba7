//! Build-settings resolution for pbxgraph.
//!
//! Answers the two questions build tooling asks of a parsed
//! [`ProjectGraph`](pbx_graph::ProjectGraph) most often:
//!
//! - [`build_settings`] -- the settings table of a project or target under a
//!   named configuration
//! - [`bundle_identifier`] -- a target's `PRODUCT_BUNDLE_IDENTIFIER` with
//!   every variable reference expanded, falling back to the Info.plist
//!
//! Variable expansion lives in [`expand`] and is usable on its own through
//! [`resolve_variables`] or an [`Expander`].

pub mod bundle_id;
pub mod config;
pub mod error;
pub mod expand;
pub mod resolver;

pub use bundle_id::{
    bundle_identifier, FsInfoPlistSource, InfoPlistSource, NoInfoPlist, CF_BUNDLE_IDENTIFIER,
    INFOPLIST_FILE, PRODUCT_BUNDLE_IDENTIFIER,
};
pub use config::ExpansionConfig;
pub use error::{SettingsError, SettingsResult};
pub use expand::{resolve_variables, Expander};
pub use resolver::{build_configuration, build_settings, default_configuration_name};
