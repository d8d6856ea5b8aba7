use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("not an Xcode project bundle: {0}")]
    NotAProjectBundle(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("target not found: {0}")]
    TargetNotFound(String),

    #[error("build setting {key} not set for target {target} ({configuration})")]
    MissingSetting {
        key: String,
        target: String,
        configuration: String,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("store error: {0}")]
    Store(#[from] pbx_store::StoreError),

    #[error("graph error: {0}")]
    Graph(#[from] pbx_graph::GraphError),

    #[error("settings error: {0}")]
    Settings(#[from] pbx_settings::SettingsError),

    #[error("dependency error: {0}")]
    Deps(#[from] pbx_deps::DepsError),

    #[error("path error: {0}")]
    Paths(#[from] pbx_paths::PathError),
}

pub type SdkResult<T> = Result<T, SdkError>;
