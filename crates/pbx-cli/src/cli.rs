use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pbx",
    about = "pbxgraph: inspect Xcode project files",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the project's targets
    Targets(ProjectArgs),
    /// Show build settings of the project or a target
    Settings(SettingsArgs),
    /// Resolve a target's bundle identifier
    BundleId(TargetArgs),
    /// List a target's transitive dependencies
    Deps(DepsArgs),
    /// Resolve the path of a file or group reference
    Path(PathArgs),
    /// List asset catalogs per target
    Assets(AssetsArgs),
    /// Find .xcodeproj bundles under a directory
    Find(FindArgs),
}

#[derive(Args)]
pub struct ProjectArgs {
    /// Path to the .xcodeproj bundle
    pub project: PathBuf,
}

#[derive(Args)]
pub struct SettingsArgs {
    pub project: PathBuf,
    /// Target name; project-level settings when omitted
    #[arg(short, long)]
    pub target: Option<String>,
    /// Configuration name; the default configuration when omitted
    #[arg(short, long)]
    pub configuration: Option<String>,
    /// Print a single setting, expanded
    #[arg(short, long)]
    pub key: Option<String>,
}

#[derive(Args)]
pub struct TargetArgs {
    pub project: PathBuf,
    pub target: String,
    #[arg(short, long)]
    pub configuration: Option<String>,
}

#[derive(Args)]
pub struct DepsArgs {
    pub project: PathBuf,
    pub target: String,
}

#[derive(Args)]
pub struct PathArgs {
    pub project: PathBuf,
    /// Identifier of the file or group reference
    pub file_ref: String,
}

#[derive(Args)]
pub struct AssetsArgs {
    pub project: PathBuf,
    /// Also resolve each catalog's path
    #[arg(long)]
    pub resolve: bool,
}

#[derive(Args)]
pub struct FindArgs {
    #[arg(default_value = ".")]
    pub dir: PathBuf,
    #[arg(long, default_value = "8")]
    pub max_depth: usize,
}
